//! Subscriber types for table updates.
//!
//! A Subscriber is anything that wants to know when a new depth table has
//! been published, such as an overlay that re-reads depths.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::table::DepthTable;

/// Unique identifier for a subscriber.
///
/// Returned by `DepthIndex::subscribe` and used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

impl SubscriberId {
    /// Generate a new unique subscriber ID.
    ///
    /// Uses an atomic counter to ensure uniqueness across threads.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for SubscriberId {
    fn default() -> Self {
        Self::new()
    }
}

type Callback = Arc<dyn Fn(&Arc<DepthTable>) + Send + Sync>;

/// A callback invoked after each successful table swap.
#[derive(Clone)]
pub struct Subscriber {
    id: SubscriberId,
    notify: Callback,
}

impl Subscriber {
    /// Create a new subscriber with the given notification callback.
    pub fn new<F>(notify: F) -> Self
    where
        F: Fn(&Arc<DepthTable>) + Send + Sync + 'static,
    {
        Self {
            id: SubscriberId::new(),
            notify: Arc::new(notify),
        }
    }

    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Hand the freshly published table to the callback.
    pub fn notify(&self, table: &Arc<DepthTable>) {
        (self.notify)(table);
    }
}

impl fmt::Debug for Subscriber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriber").field("id", &self.id).finish()
    }
}
