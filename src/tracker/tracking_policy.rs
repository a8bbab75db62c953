use crate::host::{Vessel, VesselId};
use strum_macros::Display;

/// Which vessels the tracker admits.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Display)]
pub enum TrackingPolicy {
    /// Only the vessel currently under player control.
    ActiveVessel,
    /// Every lander, probe, rover, ship or station.
    AllVessels,
}

impl TrackingPolicy {
    pub fn from_process_all(process_all_vessels: bool) -> Self {
        if process_all_vessels { TrackingPolicy::AllVessels } else { TrackingPolicy::ActiveVessel }
    }

    /// Whether `vessel` qualifies for admission under this policy, given the id of the
    /// currently active vessel. Debris never qualifies.
    pub fn admits(self, vessel: &dyn Vessel, active_vessel: Option<VesselId>) -> bool {
        match self {
            TrackingPolicy::ActiveVessel => {
                active_vessel == Some(vessel.id()) && !vessel.vessel_type().is_debris()
            }
            TrackingPolicy::AllVessels => vessel.vessel_type().is_trackable(),
        }
    }
}
