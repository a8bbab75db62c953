use crate::event;
use crate::flight_data::FlightDataStore;
use crate::host::Vessel;

/// Seeds every status core on `vessel` with the persisted flight data of its part type.
/// Part types without stored data are seeded with an empty history.
pub(crate) fn initialize_parts(vessel: &mut dyn Vessel, store: &FlightDataStore, reliability_modifier: f64) {
    event!("Initializing parts for vessel {}", vessel.name());
    for part in vessel.parts_mut() {
        let history = store.get(part.name()).map_or(&[][..], |d| d.flight_data());
        for core in part.flight_cores_mut() {
            core.initialize_flight_data(history, reliability_modifier);
        }
    }
}
