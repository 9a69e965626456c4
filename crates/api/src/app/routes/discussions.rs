//! Discussion board.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    response::Response,
    routing::get,
};
use serde_json::json;

use campusconnect_auth::{Action, ResourceKind, authorize};
use campusconnect_core::{DiscussionId, PageRequest, paginate};
use campusconnect_domain::{Discussion, NewDiscussion};

use crate::app::AppServices;
use crate::app::dto;
use crate::app::errors::{self, ApiError};
use crate::app::routes::{fetch, parse_id};
use crate::context::CallerContext;

const DEFAULT_LIMIT: u32 = 10;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_discussions).post(create_discussion))
        .route("/:id", get(get_discussion))
}

pub async fn create_discussion(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Json(body): Json<dto::CreateDiscussionRequest>,
) -> Result<Response, ApiError> {
    authorize(
        caller.identity(),
        ResourceKind::Discussion,
        Action::Create,
        None,
    )?;

    // Staff posts publish immediately; student posts await approval.
    let discussion = Discussion::create(
        NewDiscussion {
            title: body.title,
            content: body.content,
            category: body.category,
        },
        caller.user_ref(),
        caller.name().to_string(),
        caller.role().is_staff(),
    )?;

    let discussion = services.store.discussions.insert(discussion).await?;
    Ok(errors::created(json!({ "discussion": discussion })))
}

pub async fn list_discussions(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Query(query): Query<dto::PageQuery>,
) -> Result<Response, ApiError> {
    authorize(
        caller.identity(),
        ResourceKind::Discussion,
        Action::Read,
        None,
    )?;

    let discussions = services.store.discussions.all().await?;
    let approved: Vec<Discussion> = discussions.into_iter().filter(|d| d.approved).collect();

    let req = PageRequest::resolve(query.page, query.limit, DEFAULT_LIMIT);
    let page = paginate(approved, req);

    Ok(errors::ok(json!({
        "items": page.items,
        "pagination": page.pagination,
    })))
}

pub async fn get_discussion(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    authorize(
        caller.identity(),
        ResourceKind::Discussion,
        Action::Read,
        None,
    )?;

    let id: DiscussionId = parse_id(&id)?;
    let discussion = fetch(&services.store.discussions, id.into()).await?;
    if !discussion.approved {
        return Err(ApiError::NotFound);
    }
    Ok(errors::ok(json!({ "discussion": discussion })))
}
