use super::{scenario_error::ScenarioError, settings::Settings};
use crate::config_node::ConfigNode;
use crate::flight_data::{FlightDataStore, PartFlightData};
use crate::{info, log};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared access to the session's scenario; every mutation goes through the write lock.
pub type ScenarioHandle = Arc<RwLock<FlightDataScenario>>;

/// On-disk checkpoint: the authoritative tree plus the packed cache mirrored from it.
#[derive(serde::Serialize, serde::Deserialize, Debug, Default)]
pub(super) struct ScenarioSnapshot {
    pub(super) tree: ConfigNode,
    pub(super) packed_cache: Vec<String>,
}

/// Session state that outlives the tick loop: the settings and the flight data store.
#[derive(Debug, Default)]
pub struct FlightDataScenario {
    settings: Settings,
    store: FlightDataStore,
}

impl FlightDataScenario {
    pub const ROOT_NODE: &'static str = "SCENARIO";

    pub fn new(settings: Settings) -> Self { Self { settings, store: FlightDataStore::new() } }

    /// Creates a scenario hydrated from the packed cache, for starts without tree data.
    pub fn on_awake<S: AsRef<str>>(settings: Settings, packed_cache: &[S]) -> Self {
        let mut scenario = Self::new(settings);
        scenario.store.load_packed(packed_cache);
        scenario
    }

    pub fn settings(&self) -> &Settings { &self.settings }
    pub fn settings_mut(&mut self) -> &mut Settings { &mut self.settings }
    pub fn store(&self) -> &FlightDataStore { &self.store }
    pub fn store_mut(&mut self) -> &mut FlightDataStore { &mut self.store }

    /// Splits the scenario for the tick loop, which reads settings while merging into the store.
    pub(crate) fn split_mut(&mut self) -> (&Settings, &mut FlightDataStore) { (&self.settings, &mut self.store) }

    /// Reads settings and flight data from a scenario tree.
    pub fn on_load(&mut self, node: &ConfigNode) {
        if let Some(settings_node) = node.get_node(Settings::NODE_NAME) {
            self.settings.load(settings_node);
        }
        if node.has_node(PartFlightData::NODE_NAME) {
            self.store.load(node);
        }
    }

    pub fn on_save(&mut self, node: &mut ConfigNode) {
        node.remove_nodes(Settings::NODE_NAME);
        self.settings.save(node.add_node(Settings::NODE_NAME));
        self.store.save(node);
    }

    /// Writes the scenario tree and packed cache to `path` as a binary checkpoint.
    ///
    /// # Errors
    /// Returns an error if encoding fails or the file cannot be written.
    pub async fn save_checkpoint<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ScenarioError> {
        let mut tree = ConfigNode::new(Self::ROOT_NODE);
        self.on_save(&mut tree);
        let snapshot = ScenarioSnapshot { tree, packed_cache: self.store.packed_cache().to_vec() };
        let bytes = bincode::serde::encode_to_vec(&snapshot, bincode::config::standard())?;
        tokio::fs::write(path.as_ref(), bytes).await?;
        log!(
            "Saved flight data of {} part types to {}",
            self.store.len(),
            path.as_ref().display()
        );
        Ok(())
    }

    /// Restores a scenario from a binary checkpoint.
    ///
    /// The tree is preferred; the packed cache is only used if the tree holds no flight data.
    /// A missing file yields a fresh scenario with default settings.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or decoded.
    pub async fn load_checkpoint<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioError> {
        let bytes = match tokio::fs::read(path.as_ref()).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No checkpoint at {}, starting without flight data", path.as_ref().display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        let (snapshot, _): (ScenarioSnapshot, usize) =
            bincode::serde::decode_from_slice(&bytes, bincode::config::standard())?;

        let mut scenario = if snapshot.tree.has_node(PartFlightData::NODE_NAME) {
            Self::default()
        } else {
            Self::on_awake(Settings::default(), &snapshot.packed_cache)
        };
        scenario.on_load(&snapshot.tree);
        info!(
            "Restored flight data of {} part types from {}",
            scenario.store.len(),
            path.as_ref().display()
        );
        Ok(scenario)
    }
}
