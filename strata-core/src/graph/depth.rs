//! Depth Engine
//!
//! Computes the longest-path depth of every participating node.
//!
//! # Algorithm
//!
//! Kahn-style propagation over the filtered graph:
//!
//! 1. Every node starts with an in-degree equal to its participating parent
//!    count. Roots (in-degree 0) get depth 1, everything else 0.
//! 2. Roots seed a FIFO queue.
//! 3. Popping `u` relaxes each child `v` to `max(depth[v], depth[u] + 1)`
//!    and decrements its in-degree; `v` is queued once it reaches 0.
//!
//! A child is only dequeued after every parent has contributed, so its
//! depth is the longest path to it. Runs in O(V + E).
//!
//! Nodes whose in-degree never reaches 0 (they sit on a cycle, or depend on
//! a namespaced id that is not a participant) are not finalized. They are
//! still written to the table with the largest depth their finalized
//! parents reached (at least 1), and listed in [`DepthReport::unresolved`].

use std::collections::{HashMap, VecDeque};

use tracing::{debug, warn};

use super::builder::DependencyGraph;
use crate::config::EngineConfig;
use crate::table::DepthTable;

/// Output of a depth computation.
#[derive(Debug, Clone, Default)]
pub struct DepthReport {
    /// Depths keyed by name and id.
    pub table: DepthTable,

    /// Ids of participants that never finalized, in participant order.
    /// Their table entries are lower bounds.
    pub unresolved: Vec<String>,
}

impl DepthReport {
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Compute depths for every participant of `graph`.
pub fn compute_depths(graph: &DependencyGraph, config: &EngineConfig) -> DepthReport {
    let participants = graph.participants();
    let mut in_degree: HashMap<&str, usize> = HashMap::with_capacity(participants.len());
    let mut depth: HashMap<&str, u32> = HashMap::with_capacity(participants.len());
    let mut queue = VecDeque::new();

    for node in participants {
        let degree = graph.parents(&node.id).len();
        in_degree.insert(node.id.as_str(), degree);
        if degree == 0 {
            depth.insert(node.id.as_str(), 1);
            queue.push_back(node.id.as_str());
        } else {
            depth.insert(node.id.as_str(), 0);
        }
    }

    while let Some(node_id) = queue.pop_front() {
        let next = depth.get(node_id).copied().unwrap_or(1) + 1;

        for child_id in graph.children(node_id) {
            let child_id = child_id.as_str();

            if let Some(child_depth) = depth.get_mut(child_id) {
                *child_depth = (*child_depth).max(next);
            }
            if let Some(degree) = in_degree.get_mut(child_id) {
                *degree = degree.saturating_sub(1);
                if *degree == 0 {
                    queue.push_back(child_id);
                }
            }
        }
    }

    let mut table = DepthTable::new(config);
    let mut unresolved = Vec::new();

    for node in participants {
        let id = node.id.as_str();
        if in_degree.get(id).copied().unwrap_or(0) > 0 {
            unresolved.push(node.id.clone());
        }
        // Unfinalized nodes keep the partial max their finalized parents gave them.
        let d = depth.get(id).copied().unwrap_or(0).max(1);
        table.insert(&node.name, &node.id, d);
    }

    if !unresolved.is_empty() {
        warn!(
            count = unresolved.len(),
            first = %unresolved[0],
            "some nodes never finalized; their depth is a lower bound"
        );
    }
    debug!(
        nodes = participants.len(),
        unresolved = unresolved.len(),
        max_depth = table.max_depth().unwrap_or(0),
        "computed depths"
    );

    DepthReport { table, unresolved }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Node;
    use crate::manifest::Manifest;

    fn depths(manifest: &Manifest) -> DepthReport {
        let config = EngineConfig::default();
        let graph = DependencyGraph::from_manifest(manifest, &config);
        compute_depths(&graph, &config)
    }

    fn model(name: &str) -> Node {
        Node::model(format!("model.p.{name}"), name)
    }

    fn id(name: &str) -> String {
        format!("model.p.{name}")
    }

    #[test]
    fn linear_chain() {
        let manifest = Manifest::new()
            .with_node(model("a"), Vec::<String>::new())
            .with_node(model("b"), [id("a")])
            .with_node(model("c"), [id("b")]);
        let report = depths(&manifest);

        assert!(report.is_complete());
        assert_eq!(report.table.get_depth("a"), Some(1));
        assert_eq!(report.table.get_depth("b"), Some(2));
        assert_eq!(report.table.get_depth("c"), Some(3));
    }

    #[test]
    fn input_order_does_not_matter() {
        let manifest = Manifest::new()
            .with_node(model("c"), [id("b")])
            .with_node(model("b"), [id("a")])
            .with_node(model("a"), Vec::<String>::new());
        let report = depths(&manifest);

        assert_eq!(report.table.get_depth("c"), Some(3));
    }

    #[test]
    fn longest_path_wins() {
        let manifest = Manifest::new()
            .with_node(model("target"), [id("a"), id("d")])
            .with_node(model("a"), Vec::<String>::new())
            .with_node(model("b"), Vec::<String>::new())
            .with_node(model("c"), [id("b")])
            .with_node(model("d"), [id("c")]);
        let report = depths(&manifest);

        assert_eq!(report.table.get_depth("target"), Some(4));
        assert_eq!(report.table.max_depth(), Some(4));
    }

    #[test]
    fn cycle_nodes_keep_partial_depth() {
        let manifest = Manifest::new()
            .with_node(model("root"), Vec::<String>::new())
            .with_node(model("x"), [id("root"), id("y")])
            .with_node(model("y"), [id("x")])
            .with_node(model("after"), [id("y")]);
        let report = depths(&manifest);

        assert_eq!(report.table.get_depth("root"), Some(1));
        assert_eq!(report.table.get_depth(&id("x")), Some(2));
        assert_eq!(report.table.get_depth(&id("y")), Some(1));
        assert_eq!(report.table.get_depth(&id("after")), Some(1));
        assert_eq!(report.table.len(), 8);
        assert_eq!(report.unresolved, vec![id("x"), id("y"), id("after")]);
    }

    #[test]
    fn dangling_namespaced_parent_under_reports() {
        let manifest = Manifest::new()
            .with_node(model("a"), Vec::<String>::new())
            .with_node(model("b"), [id("a"), id("disabled")])
            .with_node(model("c"), [id("b")]);
        let report = depths(&manifest);

        assert_eq!(report.table.len(), 6);
        assert_eq!(report.table.get_depth("a"), Some(1));
        assert_eq!(report.table.get_depth("b"), Some(2));
        assert_eq!(report.table.get_depth("c"), Some(1));
        assert_eq!(report.unresolved, vec![id("b"), id("c")]);
    }

    #[test]
    fn lone_dangling_parent_floors_to_one() {
        let manifest = Manifest::new().with_node(model("a"), [id("disabled")]);
        let report = depths(&manifest);

        assert_eq!(report.table.get_depth("a"), Some(1));
        assert_eq!(report.table.get_depth(&id("a")), Some(1));
        assert!(!report.is_complete());
    }

    #[test]
    fn duplicate_parent_entries_still_finalize() {
        let manifest = Manifest::new()
            .with_node(model("a"), Vec::<String>::new())
            .with_node(model("b"), [id("a"), id("a")]);
        let report = depths(&manifest);

        assert_eq!(report.table.get_depth("b"), Some(2));
    }
}
