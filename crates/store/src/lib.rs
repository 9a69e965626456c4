//! `campusconnect-store` — document persistence for campus entities.
//!
//! Each entity lives in its own collection behind the object-safe
//! [`Collection`] trait. The in-memory backend is the default; a Postgres
//! JSONB backend is available behind the `postgres` feature. Membership
//! changes (RSVPs, group joins, read markers, likes) go through
//! [`Collection::mutate`], which applies the change atomically at the
//! document level rather than read-modify-write at the application level.

pub mod collection;
pub mod documents;
pub mod error;
pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod sample;
pub mod store;
pub mod unavailable;

pub use collection::{Collection, Document, Mutation};
pub use error::{StoreError, StoreResult};
pub use memory::MemoryCollection;
pub use store::Store;
pub use unavailable::UnavailableCollection;
