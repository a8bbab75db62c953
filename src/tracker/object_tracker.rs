use super::{part_init::initialize_parts, tracking_policy::TrackingPolicy};
use crate::event;
use crate::flight_data::FlightDataStore;
use crate::host::{Universe, VesselId};
use std::collections::HashMap;

/// Cache of the vessels under tracking, each with the simulation time it was first seen at.
///
/// The first-seen time stands in for a mission start time: the host only starts its mission
/// clock on first staging, which would leave e.g. engine test stands without a start time.
#[derive(Debug, Default)]
pub struct ObjectTracker {
    known_vessels: HashMap<VesselId, f64>,
}

impl ObjectTracker {
    pub fn new() -> Self { Self::default() }

    pub fn contains(&self, id: VesselId) -> bool { self.known_vessels.contains_key(&id) }
    pub fn first_seen(&self, id: VesselId) -> Option<f64> { self.known_vessels.get(&id).copied() }
    pub fn len(&self) -> usize { self.known_vessels.len() }
    pub fn is_empty(&self) -> bool { self.known_vessels.is_empty() }

    /// Snapshot of the tracked vessel ids.
    pub fn ids(&self) -> Vec<VesselId> { self.known_vessels.keys().copied().collect() }

    /// Brings the cache in line with the live vessels of `universe`.
    ///
    /// Drops vessels that vanished or turned into debris, then admits every untracked vessel
    /// accepted by `policy`, initializing its parts from `store` exactly once.
    ///
    /// # Returns
    /// The ids of the newly admitted vessels.
    pub fn cache_vessels<U: Universe + ?Sized>(
        &mut self,
        universe: &mut U,
        policy: TrackingPolicy,
        store: &FlightDataStore,
        reliability_modifier: f64,
    ) -> Vec<VesselId> {
        let before = self.known_vessels.len();
        self.known_vessels.retain(|id, _| {
            universe.vessel(*id).is_some_and(|v| !v.vessel_type().is_debris())
        });
        let removed = before - self.known_vessels.len();
        if removed > 0 {
            event!("Deleting {removed} vessels from cached vessels");
        }

        let now = universe.universal_time();
        let active = universe.active_vessel();
        let admitted: Vec<VesselId> = universe
            .vessels()
            .into_iter()
            .filter(|v| !self.known_vessels.contains_key(&v.id()) && policy.admits(*v, active))
            .map(|v| v.id())
            .collect();

        for id in &admitted {
            self.known_vessels.insert(*id, now);
            if let Some(vessel) = universe.vessel_mut(*id) {
                event!("Adding new vessel {} with launch time {now}", vessel.name());
                initialize_parts(vessel, store, reliability_modifier);
            }
        }
        admitted
    }
}
