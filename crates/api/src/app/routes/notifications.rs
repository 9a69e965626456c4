//! Notifications with per-caller read markers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    response::Response,
    routing::{get, post},
};
use serde_json::json;

use campusconnect_auth::{Action, ResourceKind, authorize};
use campusconnect_core::{DomainError, NotificationId, PageRequest, Role, paginate};
use campusconnect_domain::{NewNotification, Notification};
use campusconnect_store::{StoreError, sample};

use crate::app::AppServices;
use crate::app::dto::{self, notification_to_json};
use crate::app::errors::{self, ApiError};
use crate::app::routes::parse_id;
use crate::context::CallerContext;

const DEFAULT_LIMIT: u32 = 20;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_notifications).post(create_notification))
        .route("/:id/read", post(mark_read))
        .route("/:id/unread", post(mark_unread))
}

pub async fn create_notification(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Json(body): Json<dto::CreateNotificationRequest>,
) -> Result<Response, ApiError> {
    authorize(
        caller.identity(),
        ResourceKind::Notification,
        Action::Create,
        None,
    )?;

    let roles = body
        .roles
        .iter()
        .map(|r| r.parse::<Role>())
        .collect::<Result<Vec<_>, _>>()?;

    if body.recipients.is_empty() && roles.is_empty() {
        return Err(ApiError::validation(
            "notification needs recipients or roles",
        ));
    }

    let notification = Notification::create(
        NewNotification {
            title: body.title,
            message: body.message,
            recipients: body.recipients,
            roles,
        },
        caller.user_ref(),
    )?;

    let notification = services.store.notifications.insert(notification).await?;
    Ok(errors::created(json!({ "notification": notification })))
}

pub async fn list_notifications(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Query(query): Query<dto::NotificationQuery>,
) -> Result<Response, ApiError> {
    authorize(
        caller.identity(),
        ResourceKind::Notification,
        Action::Read,
        None,
    )?;

    let (notifications, degraded) = match services.store.notifications.all().await {
        Ok(notifications) => (notifications, false),
        Err(StoreError::Unavailable(msg)) => {
            tracing::warn!(error = %msg, "serving sample notifications (degraded)");
            (sample::sample_notifications(), true)
        }
        Err(other) => return Err(other.into()),
    };

    let unread_only = query.unread.unwrap_or(false);
    let mine: Vec<Notification> = notifications
        .into_iter()
        .filter(|n| n.is_for(caller.identity()))
        .filter(|n| !unread_only || !n.is_read_by(caller.id()))
        .collect();

    let req = PageRequest::resolve(query.page, query.limit, DEFAULT_LIMIT);
    let page = paginate(mine, req);
    let items: Vec<serde_json::Value> = page
        .items
        .iter()
        .map(|n| notification_to_json(n, caller.identity()))
        .collect();

    let mut body = json!({
        "items": items,
        "pagination": page.pagination,
    });
    if degraded {
        body["degraded"] = json!(true);
    }
    Ok(errors::ok(body))
}

pub async fn mark_read(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    set_read_marker(&services, &caller, &id, true).await
}

pub async fn mark_unread(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    set_read_marker(&services, &caller, &id, false).await
}

/// Move the caller's own read marker. Notifications not addressed to the
/// caller are reported as missing rather than forbidden.
async fn set_read_marker(
    services: &AppServices,
    caller: &CallerContext,
    raw_id: &str,
    read: bool,
) -> Result<Response, ApiError> {
    authorize(
        caller.identity(),
        ResourceKind::Notification,
        Action::Update,
        None,
    )?;

    let id: NotificationId = parse_id(raw_id)?;
    let identity = caller.identity().clone();

    let updated = services
        .store
        .notifications
        .mutate(
            id.into(),
            Box::new(move |notification: &mut Notification| {
                if !notification.is_for(&identity) {
                    return Err(DomainError::not_found());
                }
                if read {
                    notification.mark_read(&identity.id);
                } else {
                    notification.mark_unread(&identity.id);
                }
                Ok(())
            }),
        )
        .await?;

    Ok(errors::ok(json!({
        "notification": notification_to_json(&updated, caller.identity()),
    })))
}
