//! Groups and membership.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    response::Response,
    routing::{get, post},
};
use serde_json::json;

use campusconnect_auth::{Action, ResourceKind, authorize, guard_creator_leave};
use campusconnect_core::{GroupId, PageRequest, paginate};
use campusconnect_domain::{Group, NewGroup};

use crate::app::AppServices;
use crate::app::dto;
use crate::app::errors::{self, ApiError};
use crate::app::routes::{fetch, parse_id};
use crate::context::CallerContext;

const DEFAULT_LIMIT: u32 = 10;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_groups).post(create_group))
        .route("/:id", get(get_group))
        .route("/:id/join", post(join_group))
        .route("/:id/leave", post(leave_group))
}

pub async fn create_group(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Json(body): Json<dto::CreateGroupRequest>,
) -> Result<Response, ApiError> {
    authorize(caller.identity(), ResourceKind::Group, Action::Create, None)?;

    let group = Group::create(
        NewGroup {
            name: body.name,
            description: body.description,
            is_public: body.is_public,
            max_members: body.max_members,
        },
        caller.user_ref(),
        caller.id(),
    )?;

    let group = services.store.groups.insert(group).await?;
    Ok(errors::created(json!({ "group": group })))
}

pub async fn list_groups(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Query(query): Query<dto::PageQuery>,
) -> Result<Response, ApiError> {
    authorize(caller.identity(), ResourceKind::Group, Action::Read, None)?;

    let groups = services.store.groups.all().await?;
    let visible: Vec<Group> = groups
        .into_iter()
        .filter(|g| g.visible_to(caller.identity()))
        .collect();

    let req = PageRequest::resolve(query.page, query.limit, DEFAULT_LIMIT);
    let page = paginate(visible, req);

    Ok(errors::ok(json!({
        "items": page.items,
        "pagination": page.pagination,
    })))
}

pub async fn get_group(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    authorize(caller.identity(), ResourceKind::Group, Action::Read, None)?;

    let id: GroupId = parse_id(&id)?;
    let group = fetch(&services.store.groups, id.into()).await?;
    if !group.visible_to(caller.identity()) {
        return Err(ApiError::NotFound);
    }
    Ok(errors::ok(json!({ "group": group })))
}

pub async fn join_group(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    authorize(caller.identity(), ResourceKind::Group, Action::Update, None)?;

    let id: GroupId = parse_id(&id)?;
    let caller_id = caller.id().to_string();

    // Duplicate/capacity checks run inside the atomic mutation; two racing
    // joins cannot both pass the capacity check.
    let updated = services
        .store
        .groups
        .mutate(
            id.into(),
            Box::new(move |group: &mut Group| group.join(&caller_id).map(|_| ())),
        )
        .await?;

    let joined = updated.is_member(caller.id());
    let message = if joined {
        "joined group"
    } else {
        "join request submitted"
    };
    Ok(errors::ok(json!({ "group": updated, "message": message })))
}

pub async fn leave_group(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    authorize(caller.identity(), ResourceKind::Group, Action::Update, None)?;

    let id: GroupId = parse_id(&id)?;

    // The creator reference is immutable, so this guard cannot race with the
    // membership mutation below.
    let group = fetch(&services.store.groups, id.into()).await?;
    guard_creator_leave(caller.identity(), Some(group.creator_ref()))?;

    let caller_id = caller.id().to_string();
    let updated = services
        .store
        .groups
        .mutate(
            id.into(),
            Box::new(move |group: &mut Group| group.leave(&caller_id)),
        )
        .await?;

    Ok(errors::ok(json!({ "group": updated })))
}
