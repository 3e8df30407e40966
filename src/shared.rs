//! Shared ownership of a registry.
//!
//! The registry itself is plain single-threaded state: the application root
//! creates one [`crate::state::layers::LayerRegistry`] and hands out
//! references. A host that *does* run UI and render work on different
//! threads wraps it in [`SharedRegistry`] instead, which serializes writers
//! behind a lock so that the synchronous-notification contract still holds
//! (subscribers run under the write lock, before the mutating closure's
//! caller resumes).

use std::sync::Arc;

use crate::state::layers::{LayerRegistry, Snapshot};

/// Cheaply clonable handle to one registry. All clones see the same state.
#[derive(Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<parking_lot::RwLock<LayerRegistry>>,
}
impl SharedRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    /// Wrap an already-populated registry.
    #[must_use]
    pub fn from_registry(registry: LayerRegistry) -> Self {
        Self {
            inner: Arc::new(parking_lot::RwLock::new(registry)),
        }
    }
    /// Read the state during the span of the closure.
    ///
    /// Do not call mutating methods of this handle from inside - the lock is
    /// held and parking_lot locks are not reentrant.
    pub fn read<T>(&self, read: impl FnOnce(&LayerRegistry) -> T) -> T {
        read(&self.inner.read())
    }
    /// Mutate the state during the span of the closure. Subscribers are
    /// notified (synchronously, per mutation) before this returns.
    pub fn write_with<T>(&self, write: impl FnOnce(&mut LayerRegistry) -> T) -> T {
        write(&mut self.inner.write())
    }
    /// A helper to view the state as it is at this moment as a clone.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.read(LayerRegistry::snapshot)
    }
}
