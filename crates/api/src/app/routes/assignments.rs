//! Course assignments.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    response::Response,
    routing::get,
};
use serde_json::json;

use campusconnect_auth::{Action, ResourceKind, authorize};
use campusconnect_core::{AssignmentId, CourseId, PageRequest, paginate};
use campusconnect_domain::{Assignment, NewAssignment};
use campusconnect_store::{StoreError, sample};

use crate::app::AppServices;
use crate::app::dto;
use crate::app::errors::{self, ApiError};
use crate::app::routes::{fetch, parse_id};
use crate::context::CallerContext;

const DEFAULT_LIMIT: u32 = 10;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_assignments).post(create_assignment))
        .route("/:id", get(get_assignment))
}

pub async fn create_assignment(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Json(body): Json<dto::CreateAssignmentRequest>,
) -> Result<Response, ApiError> {
    authorize(
        caller.identity(),
        ResourceKind::Assignment,
        Action::Create,
        None,
    )?;

    let course_id: CourseId = parse_id(&body.course_id)?;
    // The course must exist; a dangling course reference is a 404 here.
    fetch(&services.store.courses, course_id.into()).await?;

    let assignment = Assignment::create(
        NewAssignment {
            course_id,
            title: body.title,
            description: body.description,
            due_date: body.due_date,
            published: body.published,
        },
        caller.user_ref(),
    )?;

    let assignment = services.store.assignments.insert(assignment).await?;
    Ok(errors::created(json!({ "assignment": assignment })))
}

pub async fn list_assignments(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Query(query): Query<dto::PageQuery>,
) -> Result<Response, ApiError> {
    authorize(
        caller.identity(),
        ResourceKind::Assignment,
        Action::Read,
        None,
    )?;

    let req = PageRequest::resolve(query.page, query.limit, DEFAULT_LIMIT);

    // Degraded mode: connectivity failures fall back to the fixed dataset.
    // Any other failure propagates.
    let (assignments, degraded) = match services.store.assignments.all().await {
        Ok(assignments) => (assignments, false),
        Err(StoreError::Unavailable(msg)) => {
            tracing::warn!(error = %msg, "serving sample assignments (degraded)");
            (sample::sample_assignments(), true)
        }
        Err(other) => return Err(other.into()),
    };

    let visible: Vec<Assignment> = if degraded {
        assignments
    } else {
        assignments
            .into_iter()
            .filter(|a| a.visible_to(caller.identity()))
            .collect()
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

pub async fn get_assignment(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    authorize(
        caller.identity(),
        ResourceKind::Assignment,
        Action::Read,
        None,
    )?;

    let id: AssignmentId = parse_id(&id)?;
    let assignment = fetch(&services.store.assignments, id.into()).await?;
    if !assignment.visible_to(caller.identity()) {
        return Err(ApiError::NotFound);
    }
    Ok(errors::ok(json!({ "assignment": assignment })))
}
