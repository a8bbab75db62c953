use super::tick_report::TickReport;
use crate::flight_data::FlightDataRecord;
use crate::host::{Universe, VesselId};
use crate::scenario::ScenarioHandle;
use crate::status::{MasterStatus, PartStatus, PartUpsert, Reconciler};
use crate::tracker::{ObjectTracker, TrackingPolicy};
use crate::{info, warn};
use itertools::Itertools;
use tokio::sync::watch;

/// Drives the tracking core once per simulation step.
///
/// The manager owns the transient state (vessel cache, master status table, reconciler) and
/// borrows the durable state through the scenario handle it was constructed with.
pub struct FlightManager {
    scenario: ScenarioHandle,
    tracker: ObjectTracker,
    master_status: MasterStatus,
    reconciler: Reconciler,
    last_data_poll: f64,
    last_failure_poll: f64,
}

impl FlightManager {
    pub fn new(scenario: ScenarioHandle) -> Self {
        Self {
            scenario,
            tracker: ObjectTracker::new(),
            master_status: MasterStatus::new(),
            reconciler: Reconciler::new(),
            last_data_poll: 0.0,
            last_failure_poll: 0.0,
        }
    }

    /// Waits until the scenario is published on `ready`, then builds a manager on it.
    ///
    /// There is no timeout. If the publishing side goes away without ever starting the
    /// scenario, the returned future never completes.
    pub async fn connect(mut ready: watch::Receiver<Option<ScenarioHandle>>) -> Self {
        let published = match ready.wait_for(Option::is_some).await {
            Ok(slot) => slot.clone(),
            Err(_) => None,
        };
        let Some(scenario) = published else {
            warn!("Scenario slot closed before the scenario started");
            return std::future::pending().await;
        };
        info!("Scenario ready, starting flight manager");
        Self::new(scenario)
    }

    pub fn scenario(&self) -> &ScenarioHandle { &self.scenario }
    pub fn master_status(&self) -> &MasterStatus { &self.master_status }
    pub fn master_status_mut(&mut self) -> &mut MasterStatus { &mut self.master_status }
    pub fn known_vessels(&self) -> &ObjectTracker { &self.tracker }
    pub fn last_data_poll(&self) -> f64 { self.last_data_poll }
    pub fn last_failure_poll(&self) -> f64 { self.last_failure_poll }

    /// Runs one tick against `universe`.
    ///
    /// Refreshes the vessel cache, prunes the master status table if the reconciliation
    /// cooldown expired, then polls every status core on every loaded tracked vessel. Each
    /// poll upserts the part's row and merges its sample into the flight data store.
    /// Unloaded vessels are skipped and keep their rows from earlier ticks.
    pub async fn update<U: Universe + ?Sized>(&mut self, universe: &mut U) -> TickReport {
        let mut scenario = self.scenario.write().await;
        let (settings, store) = scenario.split_mut();
        let modifier = settings.global_reliability_modifier;
        let policy = TrackingPolicy::from_process_all(settings.process_all_vessels);
        let reconcile_interval = settings.master_status_update_frequency;
        let data_interval = settings.min_time_between_data_poll;
        let failure_interval = settings.min_time_between_failure_poll;

        let mut report = TickReport {
            admitted: self.tracker.cache_vessels(universe, policy, store, modifier),
            ..TickReport::default()
        };
        report.reconciled = self.reconciler.run_if_due(&mut self.master_status, &*universe, reconcile_interval);

        let tracked: Vec<VesselId> = self.tracker.ids().into_iter().sorted().collect();
        for id in tracked {
            let Some(vessel) = universe.vessel(id) else { continue };
            if !vessel.is_loaded() {
                continue;
            }
            for part in vessel.parts() {
                for core in part.flight_cores() {
                    let sample = FlightDataRecord::new(core.scope(), core.flight_data(), core.flight_time());
                    let status = PartStatus::poll(part, core, modifier);
                    if let PartUpsert::Coalesced(_) = self.master_status.update_part(id, vessel.name(), status) {
                        report.anomalies += 1;
                    }
                    store.add_flight_data(part.name(), &sample);
                    report.parts_polled += 1;
                }
            }
        }

        let now = universe.universal_time();
        if now >= self.last_data_poll + data_interval {
            self.last_data_poll = now;
        }
        if now >= self.last_failure_poll + failure_interval {
            self.last_failure_poll = now;
        }
        report
    }
}
