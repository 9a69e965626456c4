//! The fixed demo dataset served in degraded mode.
//!
//! When the persistence layer is unreachable, the read-heavy list endpoints
//! (events, assignments, notifications) serve this data instead of failing
//! the request. Ids are fixed so repeated degraded responses are stable.

use chrono::{Duration, Utc};
use uuid::Uuid;

use campusconnect_core::{AssignmentId, CourseId, EventId, NotificationId, Role};
use campusconnect_domain::{Assignment, Event, Notification};

fn fixed_id(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

pub fn sample_events() -> Vec<Event> {
    let now = Utc::now();
    vec![
        Event {
            id: EventId::from_uuid(fixed_id(0xCC_0001)),
            title: "Welcome Week Orientation".to_string(),
            description: "Campus tour and orientation for new students.".to_string(),
            date: now + Duration::days(3),
            location: "Main Auditorium".to_string(),
            organizer: None,
            organizer_name: "Student Affairs".to_string(),
            is_public: true,
            approved: true,
            max_attendees: Some(300),
            attendees: Vec::new(),
            created_at: now,
        },
        Event {
            id: EventId::from_uuid(fixed_id(0xCC_0002)),
            title: "Career Fair".to_string(),
            description: "Meet employers from across the region.".to_string(),
            date: now + Duration::days(14),
            location: "Sports Hall".to_string(),
            organizer: None,
            organizer_name: "Career Services".to_string(),
            is_public: true,
            approved: true,
            max_attendees: None,
            attendees: Vec::new(),
            created_at: now,
        },
        Event {
            id: EventId::from_uuid(fixed_id(0xCC_0003)),
            title: "Guest Lecture: Distributed Systems".to_string(),
            description: "An evening lecture on consensus in practice.".to_string(),
            date: now + Duration::days(7),
            location: "Room B-204".to_string(),
            organizer: None,
            organizer_name: "CS Department".to_string(),
            is_public: true,
            approved: true,
            max_attendees: Some(80),
            attendees: Vec::new(),
            created_at: now,
        },
    ]
}

pub fn sample_assignments() -> Vec<Assignment> {
    let now = Utc::now();
    vec![
        Assignment {
            id: AssignmentId::from_uuid(fixed_id(0xCC_1001)),
            course_id: CourseId::from_uuid(fixed_id(0xCC_2001)),
            title: "Problem Set 1".to_string(),
            description: "Chapters 1-3 exercises.".to_string(),
            due_date: now + Duration::days(10),
            published: true,
            created_by: None,
            created_at: now,
        },
        Assignment {
            id: AssignmentId::from_uuid(fixed_id(0xCC_1002)),
            course_id: CourseId::from_uuid(fixed_id(0xCC_2001)),
            title: "Lab Report".to_string(),
            description: "Write up the week 2 lab.".to_string(),
            due_date: now + Duration::days(17),
            published: true,
            created_by: None,
            created_at: now,
        },
    ]
}

pub fn sample_notifications() -> Vec<Notification> {
    let now = Utc::now();
    vec![
        Notification {
            id: NotificationId::from_uuid(fixed_id(0xCC_3001)),
            title: "Library hours extended".to_string(),
            message: "The main library is open until midnight during finals.".to_string(),
            recipients: Vec::new(),
            roles: vec![Role::Student, Role::Faculty, Role::Admin],
            created_by: None,
            read_by: Vec::new(),
            created_at: now,
        },
        Notification {
            id: NotificationId::from_uuid(fixed_id(0xCC_3002)),
            title: "Course registration opens Monday".to_string(),
            message: "Spring registration opens Monday at 9am.".to_string(),
            recipients: Vec::new(),
            roles: vec![Role::Student],
            created_by: None,
            read_by: Vec::new(),
            created_at: now,
        },
    ]
}
