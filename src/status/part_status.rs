use crate::host::{FailureModule, FlightCore, Part, PartId, VesselId};
use std::sync::Weak;

/// Live status of one status-capable part, rebuilt every tick.
#[derive(Debug, Clone)]
pub struct PartStatus {
    pub part_name: String,
    pub part_id: PartId,
    pub part_status: i32,
    pub flight_time: f64,
    pub flight_data: f64,
    pub reliability: f64,
    pub momentary_reliability: f64,
    /// Owned by the part; dangles once the failure is repaired or the part is destroyed.
    pub active_failure: Option<Weak<dyn FailureModule>>,
    pub highlight_part: bool,
    pub repair_requirements: String,
    pub acknowledged: bool,
}

impl PartStatus {
    /// Reads the current status of `core` on `part`.
    pub fn poll(part: &dyn Part, core: &dyn FlightCore, reliability_modifier: f64) -> Self {
        let part_status = core.part_status();
        Self {
            part_name: part.title().to_string(),
            part_id: part.flight_id(),
            part_status,
            flight_time: core.flight_time(),
            flight_data: core.flight_data(),
            reliability: core.current_reliability(reliability_modifier),
            momentary_reliability: core.momentary_reliability(reliability_modifier),
            active_failure: if part_status > 0 { core.failure_module() } else { None },
            highlight_part: false,
            repair_requirements: core.requirements_tooltip(),
            acknowledged: core.is_failure_acknowledged(),
        }
    }

    pub fn has_failure(&self) -> bool { self.part_status > 0 }
}

/// One row of the master status table: a vessel and its status-capable parts in first-seen order.
#[derive(Debug, Clone)]
pub struct MasterStatusItem {
    pub vessel_id: VesselId,
    pub vessel_name: String,
    pub all_parts_status: Vec<PartStatus>,
}
