mod flight_data_scenario;
mod scenario_error;
mod scenario_slot;
mod settings;

pub use flight_data_scenario::{FlightDataScenario, ScenarioHandle};
pub use scenario_error::ScenarioError;
pub use scenario_slot::ScenarioSlot;
pub use settings::Settings;
