//! Login, registration, session inspection, logout.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::{HeaderValue, header},
    response::Response,
    routing::post,
};
use serde_json::{Value, json};

use campusconnect_auth::{DemoAccount, TOKEN_TTL_SECS, hash_password, verify_password};
use campusconnect_core::Identity;
use campusconnect_domain::{NewUser, User, validate_password};

use crate::app::AppServices;
use crate::app::dto;
use crate::app::errors::{self, ApiError};
use crate::context::CallerContext;

pub fn public_router() -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> Result<Response, ApiError> {
    let email = body.email.trim().to_lowercase();

    // Demo accounts short-circuit before any store access, so demo logins
    // keep working when persistence is down. A demo email with the wrong
    // password fails here; it never falls through to the user table.
    if let Some(account) = services.demo.resolve(&email) {
        if account.password != body.password {
            return Err(ApiError::unauthorized("invalid credentials"));
        }
        let identity = account.identity();
        let token = services.tokens.issue(&identity)?;
        tracing::info!(role = %identity.role, "demo login");
        let res = errors::ok(json!({ "user": demo_user_json(account), "token": token }));
        return with_session_cookie(res, &services, &token);
    }

    let users = services.store.users.all().await?;
    let user = users
        .into_iter()
        .find(|u| u.email == email)
        .ok_or_else(|| ApiError::unauthorized("invalid credentials"))?;

    if !verify_password(&body.password, &user.password_hash) {
        return Err(ApiError::unauthorized("invalid credentials"));
    }
    if !user.is_active {
        return Err(ApiError::unauthorized("account is deactivated"));
    }

    let identity = user.identity();
    let token = services.tokens.issue(&identity)?;
    let res = errors::ok(json!({ "user": user.public(), "token": token }));
    with_session_cookie(res, &services, &token)
}

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::RegisterRequest>,
) -> Result<Response, ApiError> {
    let role = body
        .role
        .as_deref()
        .unwrap_or("student")
        .parse::<campusconnect_core::Role>()?;

    validate_password(&body.password)?;
    let password_hash = hash_password(&body.password)
        .map_err(|e| {
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
    let identity = user.identity();
    let token = services.tokens.issue(&identity)?;

    let res = errors::created(json!({ "user": user.public(), "token": token }));
    with_session_cookie(res, &services, &token)
}

pub async fn me(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
) -> Result<Response, ApiError> {
    if caller.is_demo() {
        let account = services
            .demo
            .resolve(&caller.identity().email)
            .ok_or_else(|| ApiError::unauthorized("unknown demo account"))?;
        return Ok(errors::ok(json!({
            "user": demo_user_json(account),
            "isDemo": true,
        })));
    }

    let id = caller
        .user_ref()
        .ok_or_else(|| ApiError::unauthorized("invalid subject"))?;
    let user = services
        .store
        .users
        .find(id.into())
        .await?
        .ok_or_else(|| ApiError::unauthorized("user no longer exists"))?;

    Ok(errors::ok(json!({ "user": user.public(), "isDemo": false })))
}

pub async fn logout(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(_caller): Extension<CallerContext>,
) -> Result<Response, ApiError> {
    let mut res = errors::ok(json!({}));
    let cookie = format!(
        "{}=; Path=/; HttpOnly; SameSite=Strict; Max-Age=0{}",
        services.cookie_name,
        secure_suffix(&services),
    );
    res.headers_mut().append(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie).map_err(|_| ApiError::Internal)?,
    );
    Ok(res)
}

/// Check email / student id / faculty id uniqueness against existing users.
/// `exclude` skips the record being updated.
pub fn ensure_unique(
    existing: &[User],
    candidate: &User,
    exclude: Option<campusconnect_core::UserId>,
) -> Result<(), ApiError> {
    for other in existing {
        if exclude.is_some_and(|id| id == other.id) {
            continue;
        }
        if other.email == candidate.email {
            return Err(ApiError::Conflict("email already registered".to_string()));
        }
        if candidate.student_id.is_some() && other.student_id == candidate.student_id {
            return Err(ApiError::Conflict(
                "student id already registered".to_string(),
            ));
        }
        if candidate.faculty_id.is_some() && other.faculty_id == candidate.faculty_id {
            return Err(ApiError::Conflict(
                "faculty id already registered".to_string(),
            ));
        }
    }
    Ok(())
}

fn demo_user_json(account: &DemoAccount) -> Value {
    let identity: Identity = account.identity();
    json!({
        "id": identity.id,
        "name": account.name,
        "email": account.email,
        "role": account.role,
        "department": account.department,
        "studentId": account.student_id,
        "facultyId": account.faculty_id,
        "isActive": true,
    })
}

fn secure_suffix(services: &AppServices) -> &'static str {
    if services.secure_cookies {
        "; Secure"
    } else {
        ""
    }
}

/// Attach the session cookie to a response.
fn with_session_cookie(
    mut res: Response,
    services: &AppServices,
    token: &str,
) -> Result<Response, ApiError> {
    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Strict; Max-Age={}{}",
        services.cookie_name,
        token,
        TOKEN_TTL_SECS,
        secure_suffix(services),
    );
    res.headers_mut().append(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie).map_err(|_| ApiError::Internal)?,
    );
    Ok(res)
}
