use super::flight_data_scenario::{FlightDataScenario, ScenarioHandle};
use crate::info;
use std::sync::Arc;
use tokio::sync::{RwLock, watch};

/// Publication point of the session scenario.
///
/// The scenario is published once it is started; consumers wait on a receiver until then.
pub struct ScenarioSlot {
    tx: watch::Sender<Option<ScenarioHandle>>,
}

impl ScenarioSlot {
    pub fn new() -> (Self, watch::Receiver<Option<ScenarioHandle>>) {
        let (tx, rx) = watch::channel(None);
        (Self { tx }, rx)
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<ScenarioHandle>> { self.tx.subscribe() }

    pub fn is_ready(&self) -> bool { self.tx.borrow().is_some() }

    /// Marks `scenario` ready and hands it to every waiting consumer.
    pub fn start(&self, scenario: FlightDataScenario) -> ScenarioHandle {
        let handle = Arc::new(RwLock::new(scenario));
        self.tx.send_replace(Some(Arc::clone(&handle)));
        info!("Flight data scenario started");
        handle
    }
}
