use super::{ObjectTracker, TrackingPolicy};
use crate::flight_data::FlightDataStore;
use crate::host::sim::{SimFlightCore, SimPart, SimUniverse, SimVessel};
use crate::host::{PartId, VesselId, VesselType};

fn engine_vessel(id: u128, name: &str, vessel_type: VesselType) -> SimVessel {
    SimVessel::new(id, name, vessel_type)
        .with_part(SimPart::new(1, "liquidEngine", "LV-T30 Engine").with_core(SimFlightCore::new("Atmosphere")))
        .with_part(SimPart::new(2, "fuelTank", "FL-T400 Fuel Tank"))
}

fn init_count(universe: &SimUniverse, vessel: VesselId) -> usize {
    universe.sim_vessel(vessel).unwrap().part(PartId(1)).unwrap().core(0).unwrap().init_count()
}

#[test]
fn test_active_only_prunes_and_ignores_inactive() {
    let mut universe = SimUniverse::new();
    let a = universe.add_vessel(engine_vessel(1, "A", VesselType::Ship));
    let b = universe.add_vessel(engine_vessel(2, "B", VesselType::Ship));
    universe.set_active(Some(a));
    let store = FlightDataStore::new();
    let mut tracker = ObjectTracker::new();

    let admitted = tracker.cache_vessels(&mut universe, TrackingPolicy::ActiveVessel, &store, 1.0);
    assert_eq!(admitted, vec![a]);
    assert!(tracker.contains(a));
    assert!(!tracker.contains(b));

    universe.remove_vessel(a);
    let admitted = tracker.cache_vessels(&mut universe, TrackingPolicy::ActiveVessel, &store, 1.0);
    assert!(admitted.is_empty());
    assert!(tracker.is_empty());
}

#[test]
fn test_debris_is_pruned_while_present() {
    let mut universe = SimUniverse::new();
    let a = universe.add_vessel(engine_vessel(1, "A", VesselType::Ship));
    let store = FlightDataStore::new();
    let mut tracker = ObjectTracker::new();
    tracker.cache_vessels(&mut universe, TrackingPolicy::AllVessels, &store, 1.0);
    assert!(tracker.contains(a));

    universe.sim_vessel_mut(a).unwrap().set_type(VesselType::Debris);
    tracker.cache_vessels(&mut universe, TrackingPolicy::AllVessels, &store, 1.0);
    assert!(!tracker.contains(a));
    assert!(universe.sim_vessel(a).is_some());
}

#[test]
fn test_all_vessels_policy_filters_categories() {
    let mut universe = SimUniverse::new();
    let ids: Vec<_> = [
        VesselType::Lander,
        VesselType::Probe,
        VesselType::Rover,
        VesselType::Ship,
        VesselType::Station,
        VesselType::Debris,
        VesselType::Flag,
        VesselType::Eva,
        VesselType::Plane,
    ]
    .into_iter()
    .enumerate()
    .map(|(i, t)| universe.add_vessel(engine_vessel(i as u128 + 1, &t.to_string(), t)))
    .collect();

    let mut tracker = ObjectTracker::new();
    let mut admitted = tracker.cache_vessels(&mut universe, TrackingPolicy::AllVessels, &FlightDataStore::new(), 1.0);
    admitted.sort();
    assert_eq!(admitted, ids[..5].to_vec());
}

#[test]
fn test_admission_initializes_once() {
    let mut universe = SimUniverse::new();
    universe.set_time(42.0);
    let a = universe.add_vessel(engine_vessel(7, "A", VesselType::Probe));
    let mut store = FlightDataStore::new();
    store.load_packed(&["liquidEngine:Atmosphere,120,0 Space,30,0 "]);
    let mut tracker = ObjectTracker::new();

    for _ in 0..5 {
        tracker.cache_vessels(&mut universe, TrackingPolicy::AllVessels, &store, 1.0);
        universe.advance(1.0);
    }
    assert_eq!(tracker.len(), 1);
    assert_eq!(tracker.first_seen(a), Some(42.0));
    assert_eq!(init_count(&universe, a), 1);

    let core = universe.sim_vessel(a).unwrap().part(PartId(1)).unwrap().core(0).unwrap();
    assert_eq!(core.history().len(), 2);
    assert!(core.history().iter().any(|r| r.scope() == "Space" && r.flight_data() == 30.0));
}

#[test]
fn test_readmission_after_removal_initializes_again() {
    let mut universe = SimUniverse::new();
    let a = universe.add_vessel(engine_vessel(3, "A", VesselType::Ship));
    universe.set_active(Some(a));
    let store = FlightDataStore::new();
    let mut tracker = ObjectTracker::new();
    tracker.cache_vessels(&mut universe, TrackingPolicy::ActiveVessel, &store, 1.0);

    let vessel = universe.remove_vessel(a).unwrap();
    tracker.cache_vessels(&mut universe, TrackingPolicy::ActiveVessel, &store, 1.0);
    assert!(!tracker.contains(a));

    universe.add_vessel(vessel);
    universe.set_active(Some(a));
    universe.set_time(99.0);
    let admitted = tracker.cache_vessels(&mut universe, TrackingPolicy::ActiveVessel, &store, 1.0);
    assert_eq!(admitted, vec![a]);
    assert_eq!(tracker.first_seen(a), Some(99.0));
    assert_eq!(init_count(&universe, a), 2);
}

#[test]
fn test_unknown_part_type_gets_empty_history() {
    let mut universe = SimUniverse::new();
    let a = universe.add_vessel(engine_vessel(5, "A", VesselType::Rover));
    let mut tracker = ObjectTracker::new();
    tracker.cache_vessels(&mut universe, TrackingPolicy::AllVessels, &FlightDataStore::new(), 0.8);
    let core = universe.sim_vessel(a).unwrap().part(PartId(1)).unwrap().core(0).unwrap();
    assert_eq!(core.init_count(), 1);
    assert!(core.history().is_empty());
}
