//! Depth Index
//!
//! The index owns the currently published depth table and coordinates
//! refreshes.
//!
//! # How It Works
//!
//! 1. A refresh loads a manifest (possibly asynchronously).
//!
//! 2. The graph is built and depths are computed into a brand new table.
//!
//! 3. The new table is swapped in under a short write lock and stamped with
//!    the next generation number.
//!
//! 4. Subscribers are notified with the new table after the lock is
//!    released.
//!
//! Readers take an `Arc` snapshot, so a lookup that started before a swap
//! keeps reading the table it started with. A failed refresh never touches
//! the published table and never notifies.
//!
//! Concurrent refreshes are not serialised. Each produces a complete table
//! and the last one to install wins. Subscribers never receive a table
//! older than one already published; a notification round stops as soon as
//! a newer table has been installed.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::graph::{compute_depths, DependencyGraph};
use crate::manifest::Manifest;
use crate::subscriber::{Subscriber, SubscriberId};
use crate::table::DepthTable;

/// Owner of the published depth table.
///
/// Share it behind an `Arc`; every method takes `&self`.
#[derive(Debug)]
pub struct DepthIndex {
    config: EngineConfig,
    current: RwLock<Arc<DepthTable>>,
    subscribers: RwLock<Vec<Subscriber>>,
}

impl DepthIndex {
    /// Create an index holding an empty table (generation 0).
    pub fn new(config: EngineConfig) -> Self {
        let empty = Arc::new(DepthTable::new(&config));
        Self {
            config,
            current: RwLock::new(empty),
            subscribers: RwLock::new(Vec::new()),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The currently published table.
    pub fn snapshot(&self) -> Arc<DepthTable> {
        self.current.read().clone()
    }

    /// Look up a depth in the currently published table.
    pub fn get_depth(&self, name: &str) -> Option<u32> {
        self.current.read().get_depth(name)
    }

    /// Generation of the currently published table.
    pub fn generation(&self) -> u64 {
        self.current.read().generation()
    }

    /// Rebuild depths from `manifest`, publish them and notify subscribers.
    pub fn recompute(&self, manifest: &Manifest) -> Arc<DepthTable> {
        let graph = DependencyGraph::from_manifest(manifest, &self.config);
        let report = compute_depths(&graph, &self.config);

        let published = {
            let mut current = self.current.write();
            let generation = current.generation() + 1;
            let table = Arc::new(report.table.with_generation(generation));
            *current = Arc::clone(&table);
            table
        };

        info!(
            generation = published.generation(),
            nodes = graph.node_count(),
            unresolved = report.unresolved.len(),
            max_depth = published.max_depth().unwrap_or(0),
            "published depth table"
        );

        self.notify(&published);
        published
    }

    /// Parse `json` as a manifest and recompute.
    ///
    /// On a parse error the published table is left untouched.
    pub fn refresh_from_json(&self, json: &str) -> Result<Arc<DepthTable>> {
        let manifest = Manifest::from_json(json).inspect_err(|err| {
            warn!(error = %err, "refresh failed; keeping previous table");
        })?;
        Ok(self.recompute(&manifest))
    }

    /// Await a manifest from `load` and recompute.
    ///
    /// On a load error the published table is left untouched.
    pub async fn refresh<Fut>(&self, load: Fut) -> Result<Arc<DepthTable>>
    where
        Fut: Future<Output = Result<Manifest>>,
    {
        match load.await {
            Ok(manifest) => Ok(self.recompute(&manifest)),
            Err(err) => {
                warn!(error = %err, "refresh failed; keeping previous table");
                Err(err)
            }
        }
    }

    /// Read the manifest at `path` and recompute.
    pub async fn refresh_from_path(&self, path: impl AsRef<Path>) -> Result<Arc<DepthTable>> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading manifest");

        let load = async {
            let json = tokio::fs::read_to_string(path)
                .await
                .map_err(|source| Error::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
            Manifest::from_json(&json)
        };
        self.refresh(load).await
    }

    /// Register a callback to run after every successful recompute.
    ///
    /// Callbacks may be skipped for a table that was superseded before they
    /// ran; the newer table's round notifies them instead.
    pub fn subscribe<F>(&self, notify: F) -> SubscriberId
    where
        F: Fn(&Arc<DepthTable>) + Send + Sync + 'static,
    {
        let subscriber = Subscriber::new(notify);
        let id = subscriber.id();
        self.subscribers.write().push(subscriber);
        id
    }

    /// Remove a subscriber. Returns whether it was registered.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut subscribers = self.subscribers.write();
        let before = subscribers.len();
        subscribers.retain(|s| s.id() != id);
        subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }

    fn notify(&self, table: &Arc<DepthTable>) {
        // Clone out of the lock so callbacks may subscribe or read the index.
        let subscribers = self.subscribers.read().clone();
        for subscriber in &subscribers {
            if table.generation() < self.generation() {
                debug!(generation = table.generation(), "table superseded; skipping notify");
                return;
            }
            subscriber.notify(table);
        }
    }
}

impl Default for DepthIndex {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
