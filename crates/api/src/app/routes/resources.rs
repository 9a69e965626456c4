//! Shared resources: links and files-by-URL.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    response::Response,
    routing::{get, post},
};
use serde_json::json;

use campusconnect_auth::{Action, ResourceKind, authorize};
use campusconnect_core::{PageRequest, ResourceId, paginate};
use campusconnect_domain::{CampusResource, NewResource};

use crate::app::AppServices;
use crate::app::dto;
use crate::app::errors::{self, ApiError};
use crate::app::routes::{fetch, parse_id};
use crate::context::CallerContext;

const DEFAULT_LIMIT: u32 = 10;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_resources).post(create_resource))
        .route("/:id", get(get_resource))
        .route("/:id/like", post(toggle_like))
        .route("/:id/download", post(download))
}

pub async fn create_resource(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Json(body): Json<dto::CreateResourceRequest>,
) -> Result<Response, ApiError> {
    authorize(
        caller.identity(),
        ResourceKind::Resource,
        Action::Create,
        None,
    )?;

    let resource = CampusResource::create(
        NewResource {
            title: body.title,
            description: body.description,
            url: body.url,
            resource_type: body.resource_type,
            is_public: body.is_public,
        },
        caller.user_ref(),
        caller.name().to_string(),
        caller.role().is_staff(),
    )?;

    let resource = services.store.resources.insert(resource).await?;
    Ok(errors::created(json!({ "resource": resource })))
}

pub async fn list_resources(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Query(query): Query<dto::PageQuery>,
) -> Result<Response, ApiError> {
    authorize(caller.identity(), ResourceKind::Resource, Action::Read, None)?;

    let resources = services.store.resources.all().await?;
    let visible: Vec<CampusResource> = resources
        .into_iter()
        .filter(|r| r.visible_to(caller.identity()))
        .collect();

    let req = PageRequest::resolve(query.page, query.limit, DEFAULT_LIMIT);
    let page = paginate(visible, req);

    Ok(errors::ok(json!({
        "items": page.items,
        "pagination": page.pagination,
    })))
}

pub async fn get_resource(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    authorize(caller.identity(), ResourceKind::Resource, Action::Read, None)?;

    let id: ResourceId = parse_id(&id)?;
    let resource = fetch(&services.store.resources, id.into()).await?;
    if !resource.visible_to(caller.identity()) {
        return Err(ApiError::NotFound);
    }
    Ok(errors::ok(json!({ "resource": resource })))
}

pub async fn toggle_like(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    authorize(
        caller.identity(),
        ResourceKind::Resource,
        Action::Update,
        None,
    )?;

    let id: ResourceId = parse_id(&id)?;
    let caller_id = caller.id().to_string();

    let updated = services
        .store
        .resources
        .mutate(
            id.into(),
            Box::new(move |resource: &mut CampusResource| {
                resource.toggle_like(&caller_id);
                Ok(())
            }),
        )
        .await?;

    let liked = updated.likes.iter().any(|l| l == caller.id());
    let likes = updated.likes.len();
    Ok(errors::ok(json!({ "liked": liked, "likes": likes })))
}

pub async fn download(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    authorize(
        caller.identity(),
        ResourceKind::Resource,
        Action::Update,
        None,
    )?;

    let id: ResourceId = parse_id(&id)?;
    let role = caller.role();

    let updated = services
        .store
        .resources
        .mutate(
            id.into(),
            Box::new(move |resource: &mut CampusResource| resource.record_download(role)),
        )
        .await?;

    Ok(errors::ok(json!({
        "url": updated.url,
        "downloads": updated.downloads,
    })))
}
