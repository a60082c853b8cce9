//! Per-resource write gates serialising validate-then-insert sequences.
//!
//! The conflict scan and the insert that follows it are two separate store
//! calls. Two requests for the same resource interleaving between them
//! could both pass the scan and double-book the slot, so booking writes for
//! a resource take that resource's gate first. Writes against different
//! resources proceed in parallel.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::resource::ResourceId;

/// Lazily populated map from resource id to its write gate.
#[derive(Debug, Default)]
pub struct ResourceLockMap {
    gates: Mutex<HashMap<ResourceId, Arc<Mutex<()>>>>,
}

impl ResourceLockMap {
    /// Create an empty lock map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the write gate for `resource_id`, waiting if it is held.
    ///
    /// The returned guard keeps the gate closed until dropped. The outer
    /// map lock is only held long enough to look up or create the gate, so
    /// holding one resource's guard never blocks acquiring another's.
    pub async fn acquire(&self, resource_id: &ResourceId) -> OwnedMutexGuard<()> {
        let gate = {
            let mut gates = self.gates.lock().await;
            Arc::clone(
                gates
                    .entry(*resource_id)
                    .or_insert_with(|| Arc::new(Mutex::new(()))),
            )
        };
        gate.lock_owned().await
    }
}
