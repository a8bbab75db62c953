use crate::config_node::ConfigNode;
use crate::warn;
use std::str::FromStr;

/// Tunables of the tracking core.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Settings {
    /// Track every lander, probe, rover, ship and station instead of only the active vessel.
    pub process_all_vessels: bool,
    /// Cooldown between master status reconciliation sweeps, in seconds of simulation time.
    pub master_status_update_frequency: f64,
    pub global_reliability_modifier: f64,
    pub min_time_between_data_poll: f64,
    pub min_time_between_failure_poll: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            process_all_vessels: false,
            master_status_update_frequency: 10.0,
            global_reliability_modifier: 1.0,
            min_time_between_data_poll: 5.0,
            min_time_between_failure_poll: 60.0,
        }
    }
}

impl Settings {
    pub(crate) const NODE_NAME: &'static str = "SETTINGS";

    /// Node keys and the environment variables overriding them.
    const PROCESS_ALL: (&'static str, &'static str) = ("processAllVessels", "TF_PROCESS_ALL_VESSELS");
    const MASTER_STATUS: (&'static str, &'static str) =
        ("masterStatusUpdateFrequency", "TF_MASTER_STATUS_INTERVAL");
    const RELIABILITY: (&'static str, &'static str) = ("globalReliabilityModifier", "TF_RELIABILITY_MODIFIER");
    const DATA_POLL: (&'static str, &'static str) = ("minTimeBetweenDataPoll", "TF_DATA_POLL_INTERVAL");
    const FAILURE_POLL: (&'static str, &'static str) =
        ("minTimeBetweenFailurePoll", "TF_FAILURE_POLL_INTERVAL");

    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        settings.apply_overrides(|key| std::env::var(key).ok());
        settings
    }

    /// Applies every `TF_*` variable `lookup` yields. Unparsable values are ignored.
    pub fn apply_overrides<F: Fn(&str) -> Option<String>>(&mut self, lookup: F) {
        self.apply(|(_, var)| lookup(var).map(|v| (var.to_string(), v)));
    }

    /// Reads the values present in a `SETTINGS` node, keeping the current value for the rest.
    pub fn load(&mut self, node: &ConfigNode) {
        self.apply(|(key, _)| node.get_value(key).map(|v| (key.to_string(), v.to_string())));
    }

    pub fn save(&self, node: &mut ConfigNode) {
        node.set_value(Self::PROCESS_ALL.0, self.process_all_vessels);
        node.set_value(Self::MASTER_STATUS.0, self.master_status_update_frequency);
        node.set_value(Self::RELIABILITY.0, self.global_reliability_modifier);
        node.set_value(Self::DATA_POLL.0, self.min_time_between_data_poll);
        node.set_value(Self::FAILURE_POLL.0, self.min_time_between_failure_poll);
    }

    fn apply<F: Fn((&str, &str)) -> Option<(String, String)>>(&mut self, source: F) {
        Self::read(&source, Self::PROCESS_ALL, &mut self.process_all_vessels);
        Self::read(&source, Self::MASTER_STATUS, &mut self.master_status_update_frequency);
        Self::read(&source, Self::RELIABILITY, &mut self.global_reliability_modifier);
        Self::read(&source, Self::DATA_POLL, &mut self.min_time_between_data_poll);
        Self::read(&source, Self::FAILURE_POLL, &mut self.min_time_between_failure_poll);
    }

    fn read<T: FromStr, F: Fn((&str, &str)) -> Option<(String, String)>>(
        source: &F,
        keys: (&'static str, &'static str),
        target: &mut T,
    ) {
        if let Some((name, raw)) = source(keys) {
            match raw.trim().parse::<T>() {
                Ok(v) => *target = v,
                Err(_) => warn!("Ignoring invalid setting {name}='{raw}'"),
            }
        }
    }
}
