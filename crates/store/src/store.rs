//! The bundle of collections the handlers work against.

use std::sync::Arc;

use campusconnect_domain::{
    Assignment, CampusResource, Course, Discussion, Event, Group, Notification, User,
};

use crate::collection::Collection;
use crate::memory::MemoryCollection;
use crate::unavailable::UnavailableCollection;

/// One collection per entity, behind trait objects so backends can be mixed
/// (and swapped wholesale in tests).
#[derive(Clone)]
pub struct Store {
    pub users: Arc<dyn Collection<User>>,
    pub courses: Arc<dyn Collection<Course>>,
    pub assignments: Arc<dyn Collection<Assignment>>,
    pub events: Arc<dyn Collection<Event>>,
    pub discussions: Arc<dyn Collection<Discussion>>,
    pub groups: Arc<dyn Collection<Group>>,
    pub resources: Arc<dyn Collection<CampusResource>>,
    pub notifications: Arc<dyn Collection<Notification>>,
}

impl Store {
    /// In-memory backend (dev/test and the default runtime mode).
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(MemoryCollection::new()),
            courses: Arc::new(MemoryCollection::new()),
            assignments: Arc::new(MemoryCollection::new()),
            events: Arc::new(MemoryCollection::new()),
            discussions: Arc::new(MemoryCollection::new()),
            groups: Arc::new(MemoryCollection::new()),
            resources: Arc::new(MemoryCollection::new()),
            notifications: Arc::new(MemoryCollection::new()),
        }
    }

    /// A store whose every collection reports the backend as unreachable.
    /// Drives degraded-mode behavior in tests.
    pub fn unavailable() -> Self {
        Self {
            users: Arc::new(UnavailableCollection::new()),
            courses: Arc::new(UnavailableCollection::new()),
            assignments: Arc::new(UnavailableCollection::new()),
            events: Arc::new(UnavailableCollection::new()),
            discussions: Arc::new(UnavailableCollection::new()),
            groups: Arc::new(UnavailableCollection::new()),
            resources: Arc::new(UnavailableCollection::new()),
            notifications: Arc::new(UnavailableCollection::new()),
        }
    }

    /// Postgres JSONB backend.
    #[cfg(feature = "postgres")]
    pub fn postgres(pool: sqlx::PgPool) -> Self {
        use crate::postgres::PgCollection;

        Self {
            users: Arc::new(PgCollection::new(pool.clone(), "users")),
            courses: Arc::new(PgCollection::new(pool.clone(), "courses")),
            assignments: Arc::new(PgCollection::new(pool.clone(), "assignments")),
            events: Arc::new(PgCollection::new(pool.clone(), "events")),
            discussions: Arc::new(PgCollection::new(pool.clone(), "discussions")),
            groups: Arc::new(PgCollection::new(pool.clone(), "groups")),
            resources: Arc::new(PgCollection::new(pool.clone(), "resources")),
            notifications: Arc::new(PgCollection::new(pool, "notifications")),
        }
    }
}
