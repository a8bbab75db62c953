use super::flight_data_record::FlightDataRecord;
use crate::config_node::ConfigNode;
use crate::event;
use std::fmt::{Display, Formatter};

/// All persisted flight data of a single part type, one record per scope in first-seen order.
///
/// The packed text form is `<partName>:<scope>,<flightData>,0 <scope>,<flightData>,0 ...`
/// with a trailing space after every record. The third field is reserved and never read back.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PartFlightData {
    part_name: String,
    flight_data: Vec<FlightDataRecord>,
}

impl PartFlightData {
    pub(crate) const NODE_NAME: &'static str = "FLIGHTDATA_PART";
    const RECORD_NODE_NAME: &'static str = "FLIGHTDATA";
    const PART_NAME_KEY: &'static str = "partName";
    const SCOPE_KEY: &'static str = "scope";
    const FLIGHT_DATA_KEY: &'static str = "flightData";

    const NAME_SEP: char = ':';
    const RECORD_SEP: char = ' ';
    const FIELD_SEP: char = ',';
    /// Escape table applied to part names and scopes; `%` has to stay first.
    const ESCAPES: [(char, &'static str); 4] =
        [('%', "%25"), (' ', "%20"), (',', "%2C"), (':', "%3A")];

    pub fn new(part_name: impl Into<String>) -> Self {
        Self { part_name: part_name.into(), flight_data: Vec::new() }
    }

    pub fn part_name(&self) -> &str { &self.part_name }
    pub fn flight_data(&self) -> &[FlightDataRecord] { &self.flight_data }
    pub fn is_empty(&self) -> bool { self.flight_data.is_empty() }

    pub fn get(&self, scope: &str) -> Option<&FlightDataRecord> {
        self.flight_data.iter().find(|r| r.scope() == scope)
    }

    /// Merges a freshly observed sample into the stored records.
    ///
    /// An unknown scope seeds a new record with the incoming value. A known scope keeps the
    /// maximum of stored and incoming flight data. Either way the stored flight time is `0`.
    pub fn add_flight_data(&mut self, data: &FlightDataRecord) {
        if let Some(current) = self.flight_data.iter_mut().find(|r| r.scope() == data.scope()) {
            current.absorb(data);
        } else {
            self.flight_data.push(FlightDataRecord::stored(data.scope(), data.flight_data()));
        }
    }

    /// Encodes this set into its packed text form.
    pub fn to_packed(&self) -> String { self.to_string() }

    /// Decodes a packed string.
    ///
    /// Returns `None` if `packed` has no `:` separator. Records that do not split into exactly
    /// three fields, or whose flight data is not a number, are skipped. A scope repeated within
    /// one string is merged into a single record holding the maximum.
    ///
    /// Names and scopes are unescaped, so a string written by an older, non-escaping encoder
    /// whose scope literally contains `%20`, `%2C`, `%3A` or `%25` decodes to a different
    /// scope. Such scopes come back with the escape resolved, e.g. `Low%20Orbit` as `Low Orbit`.
    pub fn from_packed(packed: &str) -> Option<Self> {
        let (name, data) = packed.split_once(Self::NAME_SEP)?;
        let mut part_data = Self::new(Self::unescape(name));
        for record in data.split(Self::RECORD_SEP).filter(|r| !r.trim().is_empty()) {
            let fields: Vec<&str> = record.split(Self::FIELD_SEP).collect();
            let [scope, value, _reserved] = fields.as_slice() else {
                event!("Skipping malformed flight data record '{record}' for {name}");
                continue;
            };
            match value.trim().parse::<f64>() {
                Ok(flight_data) => {
                    part_data.add_flight_data(&FlightDataRecord::stored(Self::unescape(scope), flight_data));
                }
                Err(_) => event!("Skipping flight data record '{record}' for {name}: bad value"),
            }
        }
        Some(part_data)
    }

    /// Hydrates a set from a `FLIGHTDATA_PART` node. Nodes without a `partName` yield `None`.
    /// Repeated scopes are merged into one record holding the maximum.
    pub fn load(node: &ConfigNode) -> Option<Self> {
        let Some(part_name) = node.get_value(Self::PART_NAME_KEY) else {
            event!("Skipping {} node without {}", Self::NODE_NAME, Self::PART_NAME_KEY);
            return None;
        };
        let mut part_data = Self::new(part_name);
        for data_node in node.get_nodes(Self::RECORD_NODE_NAME) {
            let Some(scope) = data_node.get_value(Self::SCOPE_KEY) else {
                event!("Skipping {} record of {part_name} without scope", Self::RECORD_NODE_NAME);
                continue;
            };
            let flight_data = match data_node.get_value(Self::FLIGHT_DATA_KEY) {
                None => 0.0,
                Some(raw) => match raw.trim().parse::<f64>() {
                    Ok(v) => v,
                    Err(_) => {
                        event!("Skipping {scope} record of {part_name}: bad flight data '{raw}'");
                        continue;
                    }
                },
            };
            part_data.add_flight_data(&FlightDataRecord::stored(scope, flight_data));
        }
        Some(part_data)
    }

    /// Writes `partName` and one `FLIGHTDATA` child per record into `node`.
    pub fn save(&self, node: &mut ConfigNode) {
        node.add_value(Self::PART_NAME_KEY, &self.part_name);
        for data in &self.flight_data {
            let data_node = node.add_node(Self::RECORD_NODE_NAME);
            data_node.add_value(Self::SCOPE_KEY, data.scope());
            data_node.add_value(Self::FLIGHT_DATA_KEY, data.flight_data());
        }
    }

    fn escape(raw: &str) -> String {
        Self::ESCAPES.iter().fold(raw.to_string(), |acc, (c, esc)| acc.replace(*c, esc))
    }

    fn unescape(raw: &str) -> String {
        Self::ESCAPES.iter().rev().fold(raw.to_string(), |acc, (c, esc)| acc.replace(esc, &c.to_string()))
    }
}

impl Display for PartFlightData {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", Self::escape(&self.part_name), Self::NAME_SEP)?;
        for data in &self.flight_data {
            write!(
                f,
                "{}{}{}{}0{}",
                Self::escape(data.scope()),
                Self::FIELD_SEP,
                data.flight_data(),
                Self::FIELD_SEP,
                Self::RECORD_SEP
            )?;
        }
        Ok(())
    }
}
