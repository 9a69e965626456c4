//! The document collection abstraction.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use campusconnect_core::DomainResult;

use crate::error::StoreResult;

/// A storable document: anything with a stable UUID primary key that can
/// round-trip through JSON.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    fn doc_id(&self) -> Uuid;
}

/// A boxed single-shot mutation applied under the collection's document-level
/// critical section. Returning an error aborts the mutation without
/// persisting anything.
pub type Mutation<T> = Box<dyn FnOnce(&mut T) -> DomainResult<()> + Send>;

/// One collection of documents.
///
/// `mutate` is the atomic conditional-update primitive: implementations must
/// guarantee no other writer observes or interleaves with the closure's
/// read-modify-write of the single document.
#[async_trait]
pub trait Collection<T: Document>: Send + Sync {
    async fn insert(&self, doc: T) -> StoreResult<T>;

    async fn find(&self, id: Uuid) -> StoreResult<Option<T>>;

    /// All documents, oldest first (ids are time-ordered).
    async fn all(&self) -> StoreResult<Vec<T>>;

    /// Atomically mutate one document; returns the updated document.
    async fn mutate(&self, id: Uuid, mutation: Mutation<T>) -> StoreResult<T>;

    async fn delete(&self, id: Uuid) -> StoreResult<bool>;
}
