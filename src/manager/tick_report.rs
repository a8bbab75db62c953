use crate::host::VesselId;
use crate::status::ReconcileReport;

/// What one tick changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub admitted: Vec<VesselId>,
    /// Present only if the reconciliation cooldown expired during this tick.
    pub reconciled: Option<ReconcileReport>,
    pub parts_polled: usize,
    /// Part ids that had several rows in the master status table and were coalesced.
    pub anomalies: usize,
}
