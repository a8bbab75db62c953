//! The seam between the tracking core and the simulation that owns vessels and parts.
//!
//! The core never owns vessel or part lifetimes: it only queries the host through [`Universe`],
//! [`Vessel`] and [`Part`], and talks to the per-part reliability model through the
//! [`FlightCore`] capability. [`sim`] provides an in-memory host for the demo and the tests.

pub mod sim;
mod vessel_type;

use crate::flight_data::FlightDataRecord;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Weak;

pub use vessel_type::VesselType;

/// Opaque, host-assigned vessel identity.
#[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct VesselId(pub u128);

impl Display for VesselId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { write!(f, "{:032x}", self.0) }
}

/// Flight id of a part, unique within its vessel.
#[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct PartId(pub u32);

impl Display for PartId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
}

/// The live object graph of the host simulation.
pub trait Universe {
    /// Current simulation time in seconds.
    fn universal_time(&self) -> f64;
    fn active_vessel(&self) -> Option<VesselId>;
    fn vessels(&self) -> Vec<&dyn Vessel>;
    fn vessel_mut(&mut self, id: VesselId) -> Option<&mut dyn Vessel>;

    fn vessel(&self, id: VesselId) -> Option<&dyn Vessel> {
        self.vessels().into_iter().find(|v| v.id() == id)
    }
}

pub trait Vessel {
    fn id(&self) -> VesselId;
    fn name(&self) -> &str;
    fn vessel_type(&self) -> VesselType;
    /// `false` for vessels that are only represented by a lightweight placeholder.
    fn is_loaded(&self) -> bool;
    fn parts(&self) -> Vec<&dyn Part>;
    fn parts_mut(&mut self) -> Vec<&mut dyn Part>;

    fn has_part(&self, id: PartId) -> bool { self.parts().iter().any(|p| p.flight_id() == id) }
}

pub trait Part {
    fn flight_id(&self) -> PartId;
    /// Declared part type name, the key of the persisted flight data.
    fn name(&self) -> &str;
    /// Human readable title shown in the status table.
    fn title(&self) -> &str;
    /// Modules of this part exposing the status capability; empty for plain parts.
    fn flight_cores(&self) -> Vec<&dyn FlightCore>;
    fn flight_cores_mut(&mut self) -> Vec<&mut dyn FlightCore>;
}

/// Status capability of a part, implemented by the per-part reliability model.
pub trait FlightCore {
    /// Seeds the model with the persisted history of the part type.
    fn initialize_flight_data(&mut self, flight_data: &[FlightDataRecord], reliability_modifier: f64);
    fn scope(&self) -> String;
    fn flight_data(&self) -> f64;
    fn flight_time(&self) -> f64;
    /// `0` while nominal, a failure code above `0` otherwise.
    fn part_status(&self) -> i32;
    fn current_reliability(&self, reliability_modifier: f64) -> f64;
    fn requirements_tooltip(&self) -> String;
    fn is_failure_acknowledged(&self) -> bool;
    /// The active failure, owned by the part.
    fn failure_module(&self) -> Option<Weak<dyn FailureModule>>;

    fn momentary_reliability(&self, reliability_modifier: f64) -> f64 {
        self.current_reliability(reliability_modifier)
    }
}

/// Detail object of an active part failure.
pub trait FailureModule: Debug + Send + Sync {
    fn failure_title(&self) -> &str;
    fn is_major(&self) -> bool;
}
