/// One scope to cumulative flight data sample.
///
/// `flight_time` is only meaningful while the sample travels from a part's status core to the
/// store; stored records always carry `0.0`.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct FlightDataRecord {
    scope: String,
    flight_data: f64,
    flight_time: f64,
}

impl FlightDataRecord {
    pub fn new(scope: impl Into<String>, flight_data: f64, flight_time: f64) -> Self {
        Self { scope: scope.into(), flight_data, flight_time }
    }

    /// Creates a record as it is kept in storage, with the flight time cleared.
    pub fn stored(scope: impl Into<String>, flight_data: f64) -> Self {
        Self::new(scope, flight_data, 0.0)
    }

    pub fn scope(&self) -> &str { &self.scope }
    pub fn flight_data(&self) -> f64 { self.flight_data }
    pub fn flight_time(&self) -> f64 { self.flight_time }

    /// Folds `incoming` into this record: flight data only ever grows, flight time is dropped.
    pub(crate) fn absorb(&mut self, incoming: &FlightDataRecord) {
        if incoming.flight_data > self.flight_data {
            self.flight_data = incoming.flight_data;
        }
        self.flight_time = 0.0;
    }
}
