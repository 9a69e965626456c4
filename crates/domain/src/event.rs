//! Campus events and RSVP rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campusconnect_core::{DomainError, DomainResult, EventId, Identity, UserId};

use crate::require;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub location: String,
    /// Organizer reference; `None` for demo-created events.
    pub organizer: Option<UserId>,
    pub organizer_name: String,
    pub is_public: bool,
    pub approved: bool,
    pub max_attendees: Option<u32>,
    /// Registered caller ids in normalized string form (demo callers included).
    pub attendees: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub location: String,
    pub is_public: bool,
    pub max_attendees: Option<u32>,
}

impl Event {
    pub fn create(
        input: NewEvent,
        organizer: Option<UserId>,
        organizer_name: String,
        approved: bool,
        now: DateTime<Utc>,
    ) -> DomainResult<Event> {
        require("title", &input.title)?;
        require("description", &input.description)?;
        require("location", &input.location)?;

        if input.date <= now {
            return Err(DomainError::validation("event date must be in the future"));
        }

        Ok(Event {
            id: EventId::new(),
            title: input.title.trim().to_string(),
            description: input.description.trim().to_string(),
            date: input.date,
            location: input.location.trim().to_string(),
            organizer,
            organizer_name,
            is_public: input.is_public,
            approved,
            max_attendees: input.max_attendees,
            attendees: Vec::new(),
            created_at: now,
        })
    }

    pub fn organizer_ref(&self) -> Option<String> {
        self.organizer.map(|id| id.to_string())
    }

    /// Approved public events are the only anonymously visible surface.
    pub fn publicly_visible(&self) -> bool {
        self.approved && self.is_public
    }

    /// Authenticated visibility: the public surface, plus the organizer's own
    /// pending events, plus everything for admins.
    pub fn visible_to(&self, viewer: &Identity) -> bool {
        self.publicly_visible()
            || viewer.role.is_admin()
            || viewer.owns(self.organizer_ref().as_deref())
    }

    pub fn is_full(&self) -> bool {
        self.max_attendees
            .is_some_and(|cap| self.attendees.len() as u32 >= cap)
    }

    /// Register the caller. Each failure carries a distinct message; callers
    /// run this inside an atomic document mutation so concurrent RSVPs cannot
    /// race past the capacity or duplicate checks.
    pub fn rsvp(&mut self, caller_id: &str, now: DateTime<Utc>) -> DomainResult<()> {
        if !self.approved {
            return Err(DomainError::validation("event is not approved"));
        }
        if !self.is_public {
            return Err(DomainError::validation("event is not open to the public"));
        }
        if self.date <= now {
            return Err(DomainError::validation("event date has passed"));
        }
        if self.attendees.iter().any(|a| a == caller_id) {
            return Err(DomainError::validation("already registered for this event"));
        }
        if self.is_full() {
            return Err(DomainError::validation("event is at capacity"));
        }

        self.attendees.push(caller_id.to_string());
        Ok(())
    }

    /// Cancel the caller's registration; fails if not registered.
    pub fn cancel_rsvp(&mut self, caller_id: &str) -> DomainResult<()> {
        let before = self.attendees.len();
        self.attendees.retain(|a| a != caller_id);
        if self.attendees.len() == before {
            return Err(DomainError::validation("not registered for this event"));
        }
        Ok(())
    }
}
