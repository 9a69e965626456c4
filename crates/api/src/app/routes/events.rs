//! Campus events and RSVPs.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::HeaderMap,
    response::Response,
    routing::{get, post, put},
};
use chrono::Utc;
use serde_json::json;

use campusconnect_auth::{Action, ResourceKind, authorize};
use campusconnect_core::{EventId, Identity, PageRequest, paginate};
use campusconnect_domain::{Event, NewEvent};
use campusconnect_store::{StoreError, sample};

use crate::app::AppServices;
use crate::app::dto;
use crate::app::errors::{self, ApiError};
use crate::app::routes::{fetch, parse_id};
use crate::context::CallerContext;

const DEFAULT_LIMIT: u32 = 10;

/// Ungated read surface. Anonymous callers see approved public events;
/// authenticated organizers and admins also see pending ones.
pub fn public_router() -> Router {
    Router::new()
        .route("/events", get(list_events))
        .route("/events/:id", get(get_event))
}

/// Authenticated event operations; merged into the gated router.
pub fn router() -> Router {
    Router::new()
        .route("/events", post(create_event))
        .route("/events/:id", put(update_event).delete(delete_event))
        .route("/events/:id/rsvp", post(rsvp).delete(cancel_rsvp))
}

pub async fn create_event(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Json(body): Json<dto::CreateEventRequest>,
) -> Result<Response, ApiError> {
    authorize(caller.identity(), ResourceKind::Event, Action::Create, None)?;

    // Admin-created events go live immediately; faculty events wait for an
    // admin to flip `approved` via update.
    let approved = caller.role().is_admin();
    let event = Event::create(
        NewEvent {
            title: body.title,
            description: body.description,
            date: body.date,
            location: body.location,
            is_public: body.is_public,
            max_attendees: body.max_attendees,
        },
        caller.user_ref(),
        caller.name().to_string(),
        approved,
        Utc::now(),
    )?;

    let event = services.store.events.insert(event).await?;
    Ok(errors::created(json!({ "event": event })))
}

/// Resolve an optional caller on the anonymous surface: a valid credential
/// widens visibility (organizers see their own pending events, admins see
/// all), an absent or bad one falls back to the public view instead of 401.
fn optional_viewer(services: &AppServices, headers: &HeaderMap) -> Option<Identity> {
    let token = crate::middleware::extract_token(headers, &services.cookie_name)?;
    services.tokens.verify(&token)
}

pub async fn list_events(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::PageQuery>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let req = PageRequest::resolve(query.page, query.limit, DEFAULT_LIMIT);
    let viewer = optional_viewer(&services, &headers);

    let (events, degraded) = match services.store.events.all().await {
        Ok(events) => (events, false),
        Err(StoreError::Unavailable(msg)) => {
            tracing::warn!(error = %msg, "serving sample events (degraded)");
            (sample::sample_events(), true)
        }
        Err(other) => return Err(other.into()),
    };

    let visible: Vec<Event> = match &viewer {
        Some(viewer) => events.into_iter().filter(|e| e.visible_to(viewer)).collect(),
        None => events.into_iter().filter(Event::publicly_visible).collect(),
    };
    let page = paginate(visible, req);

    let mut body = json!({
        "items": page.items,
        "pagination": page.pagination,
    });
    if degraded {
        body["degraded"] = json!(true);
    }
    Ok(errors::ok(body))
}

pub async fn get_event(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let id: EventId = parse_id(&id)?;
    let event = fetch(&services.store.events, id.into()).await?;

    let visible = match optional_viewer(&services, &headers) {
        Some(viewer) => event.visible_to(&viewer),
        None => event.publicly_visible(),
    };
    if !visible {
        return Err(ApiError::NotFound);
    }
    Ok(errors::ok(json!({ "event": event })))
}

pub async fn update_event(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateEventRequest>,
) -> Result<Response, ApiError> {
    let id: EventId = parse_id(&id)?;
    let event = fetch(&services.store.events, id.into()).await?;
    authorize(
        caller.identity(),
        ResourceKind::Event,
        Action::Update,
        event.organizer_ref().as_deref(),
    )?;

    if body.approved.is_some() && !caller.role().is_admin() {
        return Err(ApiError::Forbidden(
            "only admins can change event approval".to_string(),
        ));
    }

    let now = Utc::now();
    let updated = services
        .store
        .events
        .mutate(
            id.into(),
            Box::new(move |event: &mut Event| {
                if let Some(title) = body.title {
                    if title.trim().is_empty() {
                        return Err(campusconnect_core::DomainError::validation(
                            "title is required",
                        ));
                    }
                    event.title = title.trim().to_string();
                }
                if let Some(description) = body.description {
                    event.description = description.trim().to_string();
                }
                if let Some(location) = body.location {
                    event.location = location.trim().to_string();
                }
                if let Some(date) = body.date {
                    if date <= now {
                        return Err(campusconnect_core::DomainError::validation(
                            "event date must be in the future",
                        ));
                    }
                    event.date = date;
                }
                if let Some(is_public) = body.is_public {
                    event.is_public = is_public;
                }
                if let Some(max_attendees) = body.max_attendees {
                    event.max_attendees = Some(max_attendees);
                }
                if let Some(approved) = body.approved {
                    event.approved = approved;
                }
                Ok(())
            }),
        )
        .await?;

    Ok(errors::ok(json!({ "event": updated })))
}

pub async fn delete_event(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id: EventId = parse_id(&id)?;
    let event = fetch(&services.store.events, id.into()).await?;
    authorize(
        caller.identity(),
        ResourceKind::Event,
        Action::Delete,
        event.organizer_ref().as_deref(),
    )?;

    services.store.events.delete(id.into()).await?;
    Ok(errors::ok(json!({})))
}

pub async fn rsvp(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id: EventId = parse_id(&id)?;
    let caller_id = caller.id().to_string();
    let now = Utc::now();

    let updated = services
        .store
        .events
        .mutate(
            id.into(),
            Box::new(move |event: &mut Event| event.rsvp(&caller_id, now)),
        )
        .await?;

    let attendees = updated.attendees.len();
    Ok(errors::ok(json!({ "event": updated, "attendees": attendees })))
}

pub async fn cancel_rsvp(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id: EventId = parse_id(&id)?;
    let caller_id = caller.id().to_string();

    let updated = services
        .store
        .events
        .mutate(
            id.into(),
            Box::new(move |event: &mut Event| event.cancel_rsvp(&caller_id)),
        )
        .await?;

    let attendees = updated.attendees.len();
    Ok(errors::ok(json!({ "event": updated, "attendees": attendees })))
}
