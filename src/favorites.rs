use parking_lot::Mutex;
use std::collections::HashSet;

use crate::models::RepositoryId;

/// In-memory set of favorited repository ids.
///
/// Every method holds the lock only for one set operation, never across an
/// `.await`, so operations are linearizable with respect to each other.
/// Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct FavoritesStore {
    ids: Mutex<HashSet<RepositoryId>>,
}

impl FavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `id`. Adding an id twice is a no-op.
    pub fn add(&self, id: RepositoryId) {
        self.ids.lock().insert(id);
    }

    /// Remove `id`. Removing an absent id is a no-op.
    pub fn remove(&self, id: RepositoryId) {
        self.ids.lock().remove(&id);
    }

    pub fn exists(&self, id: RepositoryId) -> bool {
        self.ids.lock().contains(&id)
    }

    /// Snapshot of the current favorites, in no particular order.
    pub fn list(&self) -> Vec<RepositoryId> {
        self.ids.lock().iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.ids.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
