//! Mounted instance tracking
//!
//! Membership is driven only by the proxy's lifecycle hooks. Entries hold
//! weak references: tracking never keeps an instance alive.

use hotswap_object::{ObjectHandle, ObjectId, WeakObjectHandle};
use parking_lot::Mutex;
use std::sync::Arc;

/// Live, ordered view of the instances mounted against one proxy
///
/// Cloning shares the underlying list. Every read observes the current
/// state; nothing here is a snapshot.
#[derive(Debug, Clone, Default)]
pub struct MountedInstances {
    entries: Arc<Mutex<Vec<WeakObjectHandle>>>,
}

impl MountedInstances {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append `instance`, returning the new count
    pub(crate) fn push(&self, instance: &ObjectHandle) -> usize {
        let mut entries = self.entries.lock();
        entries.push(instance.downgrade());
        entries.len()
    }

    /// Remove the first entry referring to `instance`
    pub(crate) fn remove(&self, instance: &ObjectHandle) -> bool {
        let id = instance.id();
        let mut entries = self.entries.lock();
        match entries.iter().position(|e| e.id() == id) {
            Some(index) => {
                entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Number of mount hooks without a matching unmount
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// True if nothing is mounted
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// True if `instance` is mounted
    #[must_use]
    pub fn contains(&self, instance: &ObjectHandle) -> bool {
        let id = instance.id();
        self.entries.lock().iter().any(|e| e.id() == id)
    }

    /// Ids of mounted instances in mount order, including instances that
    /// were dropped without unmounting
    #[must_use]
    pub fn ids(&self) -> Vec<ObjectId> {
        self.entries.lock().iter().map(WeakObjectHandle::id).collect()
    }

    /// Mounted instances still alive, in mount order
    #[must_use]
    pub fn instances(&self) -> Vec<ObjectHandle> {
        self.entries
            .lock()
            .iter()
            .filter_map(WeakObjectHandle::upgrade)
            .collect()
    }

    /// Iterate over [`MountedInstances::instances`]
    pub fn iter(&self) -> impl Iterator<Item = ObjectHandle> {
        self.instances().into_iter()
    }
}
