//! A minimal structured tree store: ordered key/value pairs plus named child nodes.
//!
//! Mirrors the node primitives the scenario persistence needs (`has_node`, `get_nodes`,
//! `has_value`, `get_value`, `add_node`, `add_value`). Serde support lets a whole tree be
//! embedded into a binary checkpoint.


use std::fmt::Display;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ConfigNode {
    name: String,
    values: Vec<(String, String)>,
    nodes: Vec<ConfigNode>,
}

impl ConfigNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), values: Vec::new(), nodes: Vec::new() }
    }

    pub fn name(&self) -> &str { &self.name }

    pub fn has_node(&self, name: &str) -> bool { self.nodes.iter().any(|n| n.name == name) }

    /// Returns all child nodes tagged `name`, in insertion order.
    pub fn get_nodes<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ConfigNode> + 'a {
        self.nodes.iter().filter(move |n| n.name == name)
    }

    pub fn get_node(&self, name: &str) -> Option<&ConfigNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn has_value(&self, key: &str) -> bool { self.values.iter().any(|(k, _)| k == key) }

    /// Returns the first value stored under `key`.
    pub fn get_value(&self, key: &str) -> Option<&str> {
        self.values.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Appends a new child node and hands it back for population.
    pub fn add_node(&mut self, name: impl Into<String>) -> &mut ConfigNode {
        self.nodes.push(ConfigNode::new(name));
        let last = self.nodes.len() - 1;
        &mut self.nodes[last]
    }

    pub fn add_value(&mut self, key: impl Into<String>, value: impl Display) {
        self.values.push((key.into(), value.to_string()));
    }

    /// Overwrites the first value under `key` or appends it.
    pub fn set_value(&mut self, key: &str, value: impl Display) {
        if let Some(entry) = self.values.iter_mut().find(|(k, _)| k == key) {
            entry.1 = value.to_string();
        } else {
            self.add_value(key, value);
        }
    }

    /// Drops every child node tagged `name`.
    pub fn remove_nodes(&mut self, name: &str) { self.nodes.retain(|n| n.name != name); }

    pub fn is_empty(&self) -> bool { self.values.is_empty() && self.nodes.is_empty() }
}
