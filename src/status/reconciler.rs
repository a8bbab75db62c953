use super::master_status::MasterStatus;
use crate::event;
use crate::host::Universe;

/// Counts of rows dropped by one reconciliation sweep.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct ReconcileReport {
    pub vessels_removed: usize,
    pub parts_removed: usize,
}

impl ReconcileReport {
    pub fn is_noop(&self) -> bool { self.vessels_removed == 0 && self.parts_removed == 0 }
}

/// Periodically prunes master status rows of vessels and parts that no longer exist.
///
/// Stale rows are harmless between sweeps, so the sweep only runs once per cooldown interval.
#[derive(Debug, Default)]
pub struct Reconciler {
    last_run: f64,
}

impl Reconciler {
    pub fn new() -> Self { Self::default() }

    pub fn last_run(&self) -> f64 { self.last_run }

    pub fn is_due(&self, now: f64, interval: f64) -> bool { now >= self.last_run + interval }

    /// Runs [`Reconciler::verify`] if `interval` seconds passed since the previous sweep.
    pub fn run_if_due<U: Universe + ?Sized>(
        &mut self,
        status: &mut MasterStatus,
        universe: &U,
        interval: f64,
    ) -> Option<ReconcileReport> {
        let now = universe.universal_time();
        if !self.is_due(now, interval) {
            return None;
        }
        self.last_run = now;
        Some(Self::verify(status, universe))
    }

    /// Removes rows of vessels that vanished or became debris, then rows of parts missing
    /// from their surviving vessel.
    pub fn verify<U: Universe + ?Sized>(status: &mut MasterStatus, universe: &U) -> ReconcileReport {
        let mut report = ReconcileReport::default();
        status.retain_vessels(|item| {
            let keep = match universe.vessel(item.vessel_id) {
                None => {
                    event!("Vessel {} no longer exists. Marking it for deletion.", item.vessel_name);
                    false
                }
                Some(v) if v.vessel_type().is_debris() => {
                    event!("Vessel {} appears to be debris now. Marking it for deletion.", item.vessel_name);
                    false
                }
                Some(_) => true,
            };
            if !keep {
                report.vessels_removed += 1;
            }
            keep
        });
        if report.vessels_removed > 0 {
            event!("Removing {} vessels from master status", report.vessels_removed);
        }

        for item in status.items_mut() {
            let Some(vessel) = universe.vessel(item.vessel_id) else { continue };
            let before = item.all_parts_status.len();
            item.all_parts_status.retain(|p| {
                let exists = vessel.has_part(p.part_id);
                if !exists {
                    event!("Could not find part {}({}). Marking it for deletion.", p.part_name, p.part_id);
                }
                exists
            });
            let removed = before - item.all_parts_status.len();
            if removed > 0 {
                event!("Deleting {removed} parts from vessel {}", vessel.name());
                report.parts_removed += removed;
            }
        }
        report
    }
}
