//! [`Document`] implementations for the campus entities.

use uuid::Uuid;

use campusconnect_domain::{
    Assignment, CampusResource, Course, Discussion, Event, Group, Notification, User,
};

use crate::collection::Document;

macro_rules! impl_document {
    ($t:ty) => {
        impl Document for $t {
            fn doc_id(&self) -> Uuid {
                self.id.into()
            }
        }
    };
}

impl_document!(User);
impl_document!(Course);
impl_document!(Assignment);
impl_document!(Event);
impl_document!(Discussion);
impl_document!(Group);
impl_document!(CampusResource);
impl_document!(Notification);
