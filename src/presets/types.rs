use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::scoring::WeightMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetStore {
    pub version: u32,
    #[serde(default)]
    pub presets: BTreeMap<String, Preset>,
}

/// A saved set of raw factor weights.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    pub weights: WeightMap,
    pub saved_at: DateTime<Utc>,
}

impl Default for PresetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PresetStore {
    /// Create a new empty store with version 1
    pub fn new() -> Self {
        Self {
            version: 1,
            presets: BTreeMap::new(),
        }
    }

    /// Save weights under a name, replacing any preset already there.
    /// Returns true if an existing preset was replaced.
    pub fn save(&mut self, name: String, weights: WeightMap) -> bool {
        let preset = Preset {
            weights,
            saved_at: Utc::now(),
        };
        self.presets.insert(name, preset).is_some()
    }

    /// Remove a preset. Returns true if it existed.
    pub fn remove(&mut self, name: &str) -> bool {
        self.presets.remove(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.presets.get(name)
    }

    /// Presets in name order
    pub fn list(&self) -> impl Iterator<Item = (&String, &Preset)> {
        self.presets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::default_weights;

    fn value_weights() -> WeightMap {
        [("PEG".to_string(), 80.0), ("Rating".to_string(), 20.0)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_new_store_empty() {
        let store = PresetStore::new();
        assert_eq!(store.version, 1);
        assert!(store.presets.is_empty());
    }

    #[test]
    fn test_save_and_get() {
        let mut store = PresetStore::new();
        assert!(!store.save("value".to_string(), value_weights()));
        let preset = store.get("value").unwrap();
        assert_eq!(preset.weights.get("PEG"), Some(&80.0));
        assert!(store.get("growth").is_none());
    }

    #[test]
    fn test_save_replaces_existing() {
        let mut store = PresetStore::new();
        store.save("mine".to_string(), default_weights());
        assert!(store.save("mine".to_string(), value_weights()));
        assert_eq!(store.presets.len(), 1);
        assert_eq!(store.get("mine").unwrap().weights, value_weights());
    }

    #[test]
    fn test_remove() {
        let mut store = PresetStore::new();
        store.save("value".to_string(), value_weights());
        assert!(store.remove("value"));
        assert!(!store.remove("value"));
        assert!(store.get("value").is_none());
    }

    #[test]
    fn test_list_sorted_by_name() {
        let mut store = PresetStore::new();
        store.save("zeta".to_string(), default_weights());
        store.save("alpha".to_string(), value_weights());
        let names: Vec<&str> = store.list().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }
}
