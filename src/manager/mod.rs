mod flight_manager;
mod tick_report;

pub use flight_manager::FlightManager;
pub use tick_report::TickReport;
