//! In-memory document collections (default backend).

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::collection::{Collection, Document, Mutation};
use crate::error::{StoreError, StoreResult};

/// In-memory collection. A `BTreeMap` keyed by UUIDv7 keeps documents in
/// creation order, which gives list endpoints a stable pagination order.
#[derive(Debug)]
pub struct MemoryCollection<T> {
    inner: RwLock<BTreeMap<Uuid, T>>,
}

impl<T> MemoryCollection<T> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<T> Default for MemoryCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Document> Collection<T> for MemoryCollection<T> {
    async fn insert(&self, doc: T) -> StoreResult<T> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::backend("collection lock poisoned"))?;
        map.insert(doc.doc_id(), doc.clone());
        Ok(doc)
    }

    async fn find(&self, id: Uuid) -> StoreResult<Option<T>> {
        let map = self
            .inner
            .read()
            .map_err(|_| StoreError::backend("collection lock poisoned"))?;
        Ok(map.get(&id).cloned())
    }

    async fn all(&self) -> StoreResult<Vec<T>> {
        let map = self
            .inner
            .read()
            .map_err(|_| StoreError::backend("collection lock poisoned"))?;
        Ok(map.values().cloned().collect())
    }

    async fn mutate(&self, id: Uuid, mutation: Mutation<T>) -> StoreResult<T> {
        // The write lock is the document-level critical section: concurrent
        // joins/RSVPs serialize here instead of racing read-then-save.
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::backend("collection lock poisoned"))?;
        let doc = map.get_mut(&id).ok_or(StoreError::NotFound)?;

        // Apply to a copy so a rejected mutation cannot leave a half-applied
        // document behind.
        let mut candidate = doc.clone();
        mutation(&mut candidate)?;
        *doc = candidate.clone();
        Ok(candidate)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::backend("collection lock poisoned"))?;
        Ok(map.remove(&id).is_some())
    }
}
