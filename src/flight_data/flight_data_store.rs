use super::{flight_data_record::FlightDataRecord, part_flight_data::PartFlightData};
use crate::config_node::ConfigNode;
use crate::{event, log};

/// The durable owner of all per-part-type flight data of a session.
///
/// Besides the sets themselves the store keeps the packed string cache: one packed string per
/// part type, regenerated from the sets whenever they are loaded from or saved to a tree.
#[derive(Debug, Clone, Default)]
pub struct FlightDataStore {
    parts: Vec<PartFlightData>,
    packed_cache: Vec<String>,
}

impl FlightDataStore {
    pub fn new() -> Self { Self::default() }

    pub fn len(&self) -> usize { self.parts.len() }
    pub fn is_empty(&self) -> bool { self.parts.is_empty() }
    pub fn iter(&self) -> impl Iterator<Item = &PartFlightData> { self.parts.iter() }
    pub fn packed_cache(&self) -> &[String] { &self.packed_cache }

    pub fn get(&self, part_name: &str) -> Option<&PartFlightData> {
        self.parts.iter().find(|p| p.part_name() == part_name)
    }

    pub fn get_mut(&mut self, part_name: &str) -> Option<&mut PartFlightData> {
        self.parts.iter_mut().find(|p| p.part_name() == part_name)
    }

    /// Replaces the set stored under `part_name`, or appends it if there is none.
    pub fn set(&mut self, part_name: &str, data: PartFlightData) {
        match self.parts.iter().position(|p| p.part_name() == part_name) {
            Some(i) => self.parts[i] = data,
            None => self.parts.push(data),
        }
    }

    /// Merges an observed sample into the set of `part_name`, creating the set if needed.
    pub fn add_flight_data(&mut self, part_name: &str, data: &FlightDataRecord) {
        if let Some(part_data) = self.get_mut(part_name) {
            part_data.add_flight_data(data);
        } else {
            let mut part_data = PartFlightData::new(part_name);
            part_data.add_flight_data(data);
            self.parts.push(part_data);
        }
    }

    /// Hydrates the store from every `FLIGHTDATA_PART` child of `node` and rebuilds the
    /// packed cache. Duplicate part names are resolved last-loaded-wins.
    pub fn load(&mut self, node: &ConfigNode) {
        let mut loaded = 0;
        for part_node in node.get_nodes(PartFlightData::NODE_NAME) {
            if let Some(part_data) = PartFlightData::load(part_node) {
                let name = part_data.part_name().to_string();
                self.set(&name, part_data);
                loaded += 1;
            }
        }
        self.rebuild_packed_cache();
        event!("Loaded flight data for {loaded} part types from tree");
    }

    /// Emits one `FLIGHTDATA_PART` child per set into `node` and mirrors the sets into the
    /// packed cache, dropping cache entries of part types no longer stored.
    pub fn save(&mut self, node: &mut ConfigNode) {
        for part_data in &self.parts {
            part_data.save(node.add_node(PartFlightData::NODE_NAME));
        }
        self.rebuild_packed_cache();
    }

    /// Hydrates the store from packed strings. Undecodable strings are skipped.
    pub fn load_packed<S: AsRef<str>>(&mut self, packed: &[S]) {
        for packed_str in packed {
            match PartFlightData::from_packed(packed_str.as_ref()) {
                Some(part_data) => {
                    let name = part_data.part_name().to_string();
                    self.set(&name, part_data);
                }
                None => log!("Ignoring packed flight data without part name: '{}'", packed_str.as_ref()),
            }
        }
        self.rebuild_packed_cache();
    }

    fn rebuild_packed_cache(&mut self) {
        self.packed_cache = self.parts.iter().map(PartFlightData::to_packed).collect();
    }
}
