use super::{FlightDataRecord, FlightDataStore, PartFlightData};
use crate::config_node::ConfigNode;
use rand::Rng;

fn engine_data() -> PartFlightData {
    PartFlightData::from_packed("Engine:Test,10,0 Orbit,25,0").unwrap()
}

#[test]
fn test_packed_merge_end_to_end() {
    let mut data = engine_data();
    assert_eq!(data.part_name(), "Engine");
    assert_eq!(
        data.flight_data(),
        &[FlightDataRecord::stored("Test", 10.0), FlightDataRecord::stored("Orbit", 25.0)]
    );

    data.add_flight_data(&FlightDataRecord::new("Test", 15.0, 120.0));
    assert_eq!(data.get("Test").unwrap().flight_data(), 15.0);
    data.add_flight_data(&FlightDataRecord::new("Test", 5.0, 30.0));
    assert_eq!(data.get("Test").unwrap().flight_data(), 15.0);

    assert_eq!(data.to_packed(), "Engine:Test,15,0 Orbit,25,0 ");
}

#[test]
fn test_merge_keeps_running_max() {
    let mut rng = rand::rng();
    let mut data = PartFlightData::new("liquidEngine");
    let mut expected = 0.0_f64;
    for i in 0..200 {
        let value = rng.random_range(0.0..10_000.0);
        let flight_time = rng.random_range(0.0..500.0);
        data.add_flight_data(&FlightDataRecord::new("Atmosphere", value, flight_time));
        expected = if i == 0 { value } else { expected.max(value) };
        let stored = data.get("Atmosphere").unwrap();
        assert_eq!(stored.flight_data(), expected);
        assert_eq!(stored.flight_time(), 0.0);
    }
    assert_eq!(data.flight_data().len(), 1);
}

#[test]
fn test_new_scope_is_seeded_in_order() {
    let mut data = PartFlightData::new("srb");
    data.add_flight_data(&FlightDataRecord::new("Space", 3.5, 12.0));
    data.add_flight_data(&FlightDataRecord::new("Atmosphere", 1.0, 4.0));
    data.add_flight_data(&FlightDataRecord::new("Space", 2.0, 8.0));
    let scopes: Vec<_> = data.flight_data().iter().map(FlightDataRecord::scope).collect();
    assert_eq!(scopes, vec!["Space", "Atmosphere"]);
    assert!(data.flight_data().iter().all(|r| r.flight_time() == 0.0));
    assert_eq!(data.get("Space").unwrap().flight_data(), 3.5);
}

#[test]
fn test_decode_without_colon_is_none() {
    assert!(PartFlightData::from_packed("Engine Test,10,0").is_none());
    assert!(PartFlightData::from_packed("").is_none());
}

#[test]
fn test_decode_skips_malformed_records() {
    let data = PartFlightData::from_packed("Engine:Test,10 Orbit,25,0  Broken,1,0,9 Space,x,0 Vac,7.25,0 ")
        .unwrap();
    let pairs: Vec<_> = data.flight_data().iter().map(|r| (r.scope(), r.flight_data())).collect();
    assert_eq!(pairs, vec![("Orbit", 25.0), ("Vac", 7.25)]);
}

#[test]
fn test_decode_merges_repeated_scope() {
    let mut data = PartFlightData::from_packed("Engine:Test,10,0 Orbit,4,0 Test,20,0").unwrap();
    assert_eq!(data.flight_data(), &[FlightDataRecord::stored("Test", 20.0), FlightDataRecord::stored("Orbit", 4.0)]);

    data.add_flight_data(&FlightDataRecord::new("Test", 15.0, 3.0));
    assert_eq!(data.get("Test").unwrap().flight_data(), 20.0);
    assert_eq!(data.to_packed(), "Engine:Test,20,0 Orbit,4,0 ");
}

#[test]
fn test_decode_resolves_escapes_in_unescaped_input() {
    let data = PartFlightData::from_packed("Engine:Low%20Orbit,5,0 100%25,1,0 ").unwrap();
    let scopes: Vec<_> = data.flight_data().iter().map(FlightDataRecord::scope).collect();
    assert_eq!(scopes, vec!["Low Orbit", "100%"]);
}

#[test]
fn test_decode_empty_data() {
    let data = PartFlightData::from_packed("Engine:").unwrap();
    assert_eq!(data.part_name(), "Engine");
    assert!(data.is_empty());
    assert_eq!(data.to_packed(), "Engine:");
}

#[test]
fn test_codec_preserves_pairs() {
    let mut rng = rand::rng();
    let mut data = PartFlightData::new("radialDecoupler");
    for i in 0..25 {
        let value: f64 = rng.random_range(0.0..1.0e7);
        data.add_flight_data(&FlightDataRecord::new(format!("scope{i}"), value, 0.0));
    }
    data.add_flight_data(&FlightDataRecord::new("Low Orbit, Kerbin: 100%", 0.1, 0.0));
    let decoded = PartFlightData::from_packed(&data.to_packed()).unwrap();
    assert_eq!(decoded, data);
}

#[test]
fn test_plain_names_are_not_escaped() {
    let mut data = PartFlightData::new("Engine");
    data.add_flight_data(&FlightDataRecord::new("Low Orbit", 2.5, 0.0));
    assert_eq!(data.to_packed(), "Engine:Low%20Orbit,2.5,0 ");
    let mut plain = PartFlightData::new("Engine");
    plain.add_flight_data(&FlightDataRecord::new("LowOrbit", 2.5, 0.0));
    assert_eq!(plain.to_packed(), "Engine:LowOrbit,2.5,0 ");
}

#[test]
fn test_node_round_trip() {
    let data = engine_data();
    let mut node = ConfigNode::new(PartFlightData::NODE_NAME);
    data.save(&mut node);
    assert_eq!(node.get_value("partName"), Some("Engine"));
    let records: Vec<_> = node.get_nodes("FLIGHTDATA").collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].get_value("scope"), Some("Orbit"));
    assert_eq!(records[1].get_value("flightData"), Some("25"));
    assert_eq!(PartFlightData::load(&node), Some(data));
}

#[test]
fn test_node_load_tolerates_bad_records() {
    let mut node = ConfigNode::new(PartFlightData::NODE_NAME);
    assert!(PartFlightData::load(&node).is_none());
    node.add_value("partName", "Engine");
    node.add_node("FLIGHTDATA").add_value("flightData", 3);
    node.add_node("FLIGHTDATA").add_value("scope", "NoValue");
    let bad = node.add_node("FLIGHTDATA");
    bad.add_value("scope", "Bad");
    bad.add_value("flightData", "lots");
    let data = PartFlightData::load(&node).unwrap();
    assert_eq!(data.flight_data(), &[FlightDataRecord::stored("NoValue", 0.0)]);
}

#[test]
fn test_node_load_merges_repeated_scope() {
    let mut node = ConfigNode::new(PartFlightData::NODE_NAME);
    node.add_value("partName", "Engine");
    for value in [10, 20, 5] {
        let record = node.add_node("FLIGHTDATA");
        record.add_value("scope", "Test");
        record.add_value("flightData", value);
    }
    let data = PartFlightData::load(&node).unwrap();
    assert_eq!(data.flight_data(), &[FlightDataRecord::stored("Test", 20.0)]);
}

#[test]
fn test_store_upsert_and_merge() {
    let mut store = FlightDataStore::new();
    assert!(store.get("Engine").is_none());
    store.add_flight_data("Engine", &FlightDataRecord::new("Test", 4.0, 9.0));
    store.add_flight_data("Engine", &FlightDataRecord::new("Test", 2.0, 9.0));
    store.add_flight_data("Tank", &FlightDataRecord::new("Orbit", 1.0, 9.0));
    assert_eq!(store.len(), 2);
    assert_eq!(store.get("Engine").unwrap().get("Test").unwrap().flight_data(), 4.0);

    store.set("Engine", engine_data());
    store.set("Probe", PartFlightData::new("Probe"));
    let names: Vec<_> = store.iter().map(PartFlightData::part_name).collect();
    assert_eq!(names, vec!["Engine", "Tank", "Probe"]);
    assert_eq!(store.get("Engine").unwrap().flight_data().len(), 2);
}

#[test]
fn test_store_tree_round_trip_rebuilds_cache() {
    let mut store = FlightDataStore::new();
    store.load_packed(&["Engine:Test,10,0 Orbit,25,0", "Tank:Orbit,1.5,0 "]);
    assert_eq!(store.packed_cache(), &["Engine:Test,10,0 Orbit,25,0 ", "Tank:Orbit,1.5,0 "]);

    let mut root = ConfigNode::new("SCENARIO");
    store.save(&mut root);
    assert_eq!(root.get_nodes("FLIGHTDATA_PART").count(), 2);

    let mut restored = FlightDataStore::new();
    restored.load(&root);
    assert_eq!(restored.len(), 2);
    assert_eq!(restored.packed_cache(), store.packed_cache());
    assert_eq!(restored.get("Tank").unwrap().get("Orbit").unwrap().flight_data(), 1.5);
}

#[test]
fn test_store_duplicates_last_wins() {
    let mut store = FlightDataStore::new();
    store.load_packed(&["Engine:Test,10,0 ", "not packed", "Engine:Orbit,3,0 "]);
    assert_eq!(store.len(), 1);
    let engine = store.get("Engine").unwrap();
    assert!(engine.get("Test").is_none());
    assert_eq!(engine.get("Orbit").unwrap().flight_data(), 3.0);
    assert_eq!(store.packed_cache(), &["Engine:Orbit,3,0 "]);
}
