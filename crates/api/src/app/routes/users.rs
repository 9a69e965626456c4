//! Admin user management.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    response::Response,
    routing::{get, patch},
};
use serde_json::json;

use campusconnect_auth::{
    Action, ResourceKind, authorize, guard_self_deactivate, guard_self_delete, hash_password,
};
use campusconnect_core::{PageRequest, UserId, paginate};
use campusconnect_domain::{NewUser, User, validate_password};

use crate::app::AppServices;
use crate::app::dto;
use crate::app::errors::{self, ApiError};
use crate::app::routes::{auth::ensure_unique, fetch, parse_id};
use crate::context::CallerContext;

const DEFAULT_LIMIT: u32 = 20;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .route("/:id/active", patch(set_active))
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Query(query): Query<dto::PageQuery>,
) -> Result<Response, ApiError> {
    authorize(caller.identity(), ResourceKind::User, Action::Read, None)?;

    let users = services.store.users.all().await?;
    let req = PageRequest::resolve(query.page, query.limit, DEFAULT_LIMIT);
    let page = paginate(users.iter().map(User::public).collect(), req);

    Ok(errors::ok(json!({
        "items": page.items,
        "pagination": page.pagination,
    })))
}

pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Json(body): Json<dto::RegisterRequest>,
) -> Result<Response, ApiError> {
    authorize(caller.identity(), ResourceKind::User, Action::Create, None)?;

    let role = body
        .role
        .as_deref()
        .unwrap_or("student")
        .parse::<campusconnect_core::Role>()?;
    validate_password(&body.password)?;
    let password_hash = hash_password(&body.password).map_err(|e| {
        tracing::error!(error = %e, "password hashing failed");
        ApiError::Internal
    })?;

    let user = User::create(NewUser {
        name: body.name,
        email: body.email,
        password_hash,
        role,
        department: body.department,
        student_id: body.student_id,
        faculty_id: body.faculty_id,
    })?;

    if services.demo.contains(&user.email) {
        return Err(ApiError::Conflict("email already registered".to_string()));
    }
    let existing = services.store.users.all().await?;
    ensure_unique(&existing, &user, None)?;

    let user = services.store.users.insert(user).await?;
    Ok(errors::created(json!({ "user": user.public() })))
}

pub async fn get_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    authorize(caller.identity(), ResourceKind::User, Action::Read, None)?;

    let id: UserId = parse_id(&id)?;
    let user = fetch(&services.store.users, id.into()).await?;
    Ok(errors::ok(json!({ "user": user.public() })))
}

pub async fn update_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateUserRequest>,
) -> Result<Response, ApiError> {
    authorize(caller.identity(), ResourceKind::User, Action::Update, None)?;

    let id: UserId = parse_id(&id)?;

    // Uniqueness of the new student/faculty id is checked against the
    // current table before the atomic write; ids are only ever set here and
    // at creation, both admin-gated.
    if body.student_id.is_some() || body.faculty_id.is_some() {
        let existing = services.store.users.all().await?;
        let mut candidate = fetch(&services.store.users, id.into()).await?;
        if let Some(student_id) = &body.student_id {
            candidate.student_id = Some(student_id.clone());
        }
        if let Some(faculty_id) = &body.faculty_id {
            candidate.faculty_id = Some(faculty_id.clone());
        }
        ensure_unique(&existing, &candidate, Some(id))?;
    }

    let updated = services
        .store
        .users
        .mutate(
            id.into(),
            Box::new(move |user: &mut User| {
                if let Some(name) = body.name {
                    if name.trim().is_empty() {
                        return Err(campusconnect_core::DomainError::validation(
                            "name is required",
                        ));
                    }
                    user.name = name.trim().to_string();
                }
                if let Some(department) = body.department {
                    user.department = Some(department);
                }
                if let Some(student_id) = body.student_id {
                    user.student_id = Some(student_id);
                }
                if let Some(faculty_id) = body.faculty_id {
                    user.faculty_id = Some(faculty_id);
                }
                if let Some(avatar) = body.avatar {
                    user.avatar = Some(avatar);
                }
                if let Some(bio) = body.bio {
                    user.bio = Some(bio);
                }
                if let Some(phone) = body.phone {
                    user.phone = Some(phone);
                }
                Ok(())
            }),
        )
        .await?;

    Ok(errors::ok(json!({ "user": updated.public() })))
}

pub async fn set_active(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::SetActiveRequest>,
) -> Result<Response, ApiError> {
    authorize(caller.identity(), ResourceKind::User, Action::Update, None)?;

    let id: UserId = parse_id(&id)?;
    guard_self_deactivate(caller.identity(), &id.to_string(), body.is_active)?;

    let updated = services
        .store
        .users
        .mutate(
            id.into(),
            Box::new(move |user: &mut User| {
                user.is_active = body.is_active;
                Ok(())
            }),
        )
        .await?;

    Ok(errors::ok(json!({ "user": updated.public() })))
}

pub async fn delete_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    authorize(caller.identity(), ResourceKind::User, Action::Delete, None)?;

    let id: UserId = parse_id(&id)?;
    guard_self_delete(caller.identity(), &id.to_string())?;

    if !services.store.users.delete(id.into()).await? {
        return Err(ApiError::NotFound);
    }
    Ok(errors::ok(json!({})))
}
