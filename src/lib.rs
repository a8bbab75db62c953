//! Per-part flight data aggregation and live status tracking for the vessels of a host simulation.
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]

pub mod logger;

pub mod config_node;
pub mod flight_data;
pub mod host;
pub mod manager;
pub mod scenario;
pub mod status;
pub mod tracker;
