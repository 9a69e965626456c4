//! A collection whose backend is permanently unreachable.
//!
//! Used to exercise degraded-mode behavior end-to-end: every operation fails
//! with [`StoreError::Unavailable`], exactly as a down database would.

use std::marker::PhantomData;

use async_trait::async_trait;
use uuid::Uuid;

use crate::collection::{Collection, Document, Mutation};
use crate::error::{StoreError, StoreResult};

#[derive(Debug)]
pub struct UnavailableCollection<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> UnavailableCollection<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for UnavailableCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn unreachable_backend() -> StoreError {
    StoreError::unavailable("backend unreachable")
}

#[async_trait]
impl<T: Document> Collection<T> for UnavailableCollection<T> {
    async fn insert(&self, _doc: T) -> StoreResult<T> {
        Err(unreachable_backend())
    }

    async fn find(&self, _id: Uuid) -> StoreResult<Option<T>> {
        Err(unreachable_backend())
    }

    async fn all(&self) -> StoreResult<Vec<T>> {
        Err(unreachable_backend())
    }

    async fn mutate(&self, _id: Uuid, _mutation: Mutation<T>) -> StoreResult<T> {
        Err(unreachable_backend())
    }

    async fn delete(&self, _id: Uuid) -> StoreResult<bool> {
        Err(unreachable_backend())
    }
}
