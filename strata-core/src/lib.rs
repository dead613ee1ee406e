//! Strata Core
//!
//! Computes, for every model in a dependency manifest, its depth: the
//! length of the longest chain of model ancestors back to a root, counting
//! the model itself. Depths are published as an immutable table that can be
//! queried by short name or fully-qualified id.
//!
//! # Architecture
//!
//! - `manifest`: raw node/edge description and JSON parsing
//! - `graph`: participant filtering, adjacency and the depth engine
//! - `table`: dual-keyed lookup with suffix fallback
//! - `index`: owner of the published table, refresh and subscriptions
//!
//! # Example
//!
//! ```rust
//! use strata_core::{DepthIndex, Manifest};
//!
//! let json = r#"{
//!     "nodes": {
//!         "model.shop.stg_orders": {"name": "stg_orders", "kind": "model"},
//!         "model.shop.orders": {"name": "orders", "kind": "model"}
//!     },
//!     "parent_map": {
//!         "model.shop.orders": ["model.shop.stg_orders"]
//!     }
//! }"#;
//!
//! let index = DepthIndex::default();
//! index.refresh_from_json(json).unwrap();
//!
//! assert_eq!(index.get_depth("stg_orders"), Some(1));
//! assert_eq!(index.get_depth("orders"), Some(2));
//! assert_eq!(index.get_depth("model.shop.orders"), Some(2));
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod index;
pub mod manifest;
pub mod subscriber;
pub mod table;

pub use config::EngineConfig;
pub use error::{Error, Result};
pub use graph::{build_graph, compute_depths, DependencyGraph, DepthReport, Node, NodeKind};
pub use index::DepthIndex;
pub use manifest::{Manifest, RawNode};
pub use subscriber::{Subscriber, SubscriberId};
pub use table::DepthTable;
