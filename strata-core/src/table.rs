//! Depth Table
//!
//! Immutable lookup from node name or id to depth. Each participating node
//! is written under two keys, its short name and its id. When two nodes
//! share a short name, the later write replaces the value but the key keeps
//! its original position.
//!
//! Lookups try the exact key first, then scan keys in insertion order for
//! the first one ending in `separator + name`.

use indexmap::IndexMap;

use crate::config::EngineConfig;

/// A published set of depths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthTable {
    entries: IndexMap<String, u32>,
    separator: char,
    suffix_fallback: bool,
    generation: u64,
}

impl DepthTable {
    /// Create an empty table for the given configuration.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            entries: IndexMap::new(),
            separator: config.separator,
            suffix_fallback: config.suffix_fallback,
            generation: 0,
        }
    }

    /// Record a node under both its name and its id.
    pub fn insert(&mut self, name: &str, id: &str, depth: u32) {
        self.entries.insert(name.to_string(), depth);
        self.entries.insert(id.to_string(), depth);
    }

    /// Look up a depth by name or id.
    ///
    /// Returns `None` for unknown names, which callers treat as "nothing
    /// to annotate".
    pub fn get_depth(&self, name: &str) -> Option<u32> {
        if let Some(&depth) = self.entries.get(name) {
            return Some(depth);
        }
        if !self.suffix_fallback || name.is_empty() {
            return None;
        }

        let mut suffix = String::with_capacity(name.len() + 1);
        suffix.push(self.separator);
        suffix.push_str(name);

        self.entries
            .iter()
            .find(|(key, _)| key.ends_with(&suffix))
            .map(|(_, &depth)| depth)
    }

    /// Whether `key` is present without any fallback.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys and depths in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(key, &depth)| (key.as_str(), depth))
    }

    /// Number of keys (not nodes).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The deepest depth in the table, if any.
    pub fn max_depth(&self) -> Option<u32> {
        self.entries.values().copied().max()
    }

    /// Sequence number assigned when the table was published.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }
}

impl Default for DepthTable {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}
