//! Dependency Manifest
//!
//! The raw node/edge description supplied by whatever loads the project
//! manifest. Shape:
//!
//! ```json
//! {
//!   "nodes": { "model.shop.orders": { "id": "...", "name": "orders", "kind": "model" } },
//!   "parent_map": { "model.shop.orders": ["model.shop.stg_orders", "source.shop.raw"] }
//! }
//! ```
//!
//! `unique_id` and `resource_type` are accepted in place of `id` and `kind`.
//! Unknown fields are ignored.
//!
//! Individual entries are read leniently. A field of the wrong type counts
//! as missing, a parent entry that is not an array means no parents, and
//! non-string parent ids are skipped. Only a container that is not an
//! object of this shape fails to parse.

use std::io::Read;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::graph::{Node, NodeKind};

/// A node record as it appears on the wire. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawNode {
    #[serde(default, alias = "unique_id", deserialize_with = "lenient_string")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,

    #[serde(default, alias = "resource_type", deserialize_with = "lenient_string")]
    pub kind: Option<String>,
}

impl RawNode {
    /// Fill in missing fields.
    ///
    /// A missing id takes the map key, a missing name takes the last id
    /// segment, and a missing kind never participates.
    pub fn resolve(&self, key: &str, config: &EngineConfig) -> Node {
        let id = self.id.clone().unwrap_or_else(|| key.to_string());
        let name = match &self.name {
            Some(name) => name.clone(),
            None => config.short_name(&id).to_string(),
        };
        let kind = self
            .kind
            .as_deref()
            .map(NodeKind::from)
            .unwrap_or(NodeKind::Other);

        Node { id, name, kind }
    }
}

impl From<&Node> for RawNode {
    fn from(node: &Node) -> Self {
        Self {
            id: Some(node.id.clone()),
            name: Some(node.name.clone()),
            kind: Some(node.kind.namespace().to_string()),
        }
    }
}

/// The full node/edge description consumed by a refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    #[serde(default, deserialize_with = "lenient_nodes")]
    pub nodes: IndexMap<String, RawNode>,

    /// Node id to the ids it depends on.
    #[serde(default, deserialize_with = "lenient_parent_map")]
    pub parent_map: IndexMap<String, Vec<String>>,
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_nodes<'de, D>(
    deserializer: D,
) -> std::result::Result<IndexMap<String, RawNode>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Option<IndexMap<String, Value>> = Option::deserialize(deserializer)?;
    Ok(entries
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| {
            // A record that is not an object resolves like an empty one.
            let raw: RawNode = serde_json::from_value(value).unwrap_or_default();
            (key, raw)
        })
        .collect())
}

fn lenient_parent_map<'de, D>(
    deserializer: D,
) -> std::result::Result<IndexMap<String, Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Option<IndexMap<String, Value>> = Option::deserialize(deserializer)?;
    Ok(entries
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| {
            let parents = match value {
                Value::Array(items) => items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(parent) => Some(parent),
                        _ => None,
                    })
                    .collect(),
                _ => Vec::new(),
            };
            (key, parents)
        })
        .collect())
}

impl Manifest {
    /// Create an empty manifest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a manifest from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::Manifest)
    }

    /// Parse a manifest from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        serde_json::from_reader(reader).map_err(Error::Manifest)
    }

    /// Add a node together with its raw parent ids.
    pub fn with_node<I, S>(mut self, node: Node, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let parents: Vec<String> = parents.into_iter().map(Into::into).collect();
        self.parent_map.insert(node.id.clone(), parents);
        self.nodes.insert(node.id.clone(), RawNode::from(&node));
        self
    }

    /// Resolved nodes in manifest order.
    pub fn resolved_nodes<'a>(
        &'a self,
        config: &'a EngineConfig,
    ) -> impl Iterator<Item = Node> + 'a {
        self.nodes.iter().map(move |(key, raw)| raw.resolve(key, config))
    }

    /// Number of node records, participating or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
