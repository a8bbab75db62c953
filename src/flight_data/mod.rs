mod flight_data_record;
mod flight_data_store;
mod part_flight_data;
#[cfg(test)]
mod tests;

pub use flight_data_record::FlightDataRecord;
pub use flight_data_store::FlightDataStore;
pub use part_flight_data::PartFlightData;
