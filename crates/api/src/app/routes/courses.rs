//! Course catalog.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    response::Response,
    routing::get,
};
use serde_json::json;

use campusconnect_auth::{Action, ResourceKind, authorize};
use campusconnect_core::{CourseId, PageRequest, paginate};
use campusconnect_domain::{Course, NewCourse};

use crate::app::AppServices;
use crate::app::dto;
use crate::app::errors::{self, ApiError};
use crate::app::routes::{fetch, parse_id};
use crate::context::CallerContext;

const DEFAULT_LIMIT: u32 = 10;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_courses).post(create_course))
        .route("/:id", get(get_course).put(update_course))
}

pub async fn create_course(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Json(body): Json<dto::CreateCourseRequest>,
) -> Result<Response, ApiError> {
    authorize(caller.identity(), ResourceKind::Course, Action::Create, None)?;

    let course = Course::create(
        NewCourse {
            code: body.code,
            title: body.title,
            description: body.description,
        },
        caller.user_ref(),
        caller.name().to_string(),
    )?;

    let existing = services.store.courses.all().await?;
    if existing.iter().any(|c| c.code == course.code) {
        return Err(ApiError::Conflict("course code already exists".to_string()));
    }

    let course = services.store.courses.insert(course).await?;
    Ok(errors::created(json!({ "course": course })))
}

pub async fn list_courses(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Query(query): Query<dto::PageQuery>,
) -> Result<Response, ApiError> {
    authorize(caller.identity(), ResourceKind::Course, Action::Read, None)?;

    let courses = services.store.courses.all().await?;
    let visible: Vec<Course> = courses
        .into_iter()
        .filter(|c| c.visible_to(caller.identity()))
        .collect();

    let req = PageRequest::resolve(query.page, query.limit, DEFAULT_LIMIT);
    let page = paginate(visible, req);

    Ok(errors::ok(json!({
        "items": page.items,
        "pagination": page.pagination,
    })))
}

pub async fn get_course(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    authorize(caller.identity(), ResourceKind::Course, Action::Read, None)?;

    let id: CourseId = parse_id(&id)?;
    let course = fetch(&services.store.courses, id.into()).await?;
    if !course.visible_to(caller.identity()) {
        return Err(ApiError::NotFound);
    }
    Ok(errors::ok(json!({ "course": course })))
}

pub async fn update_course(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateCourseRequest>,
) -> Result<Response, ApiError> {
    let id: CourseId = parse_id(&id)?;
    let course = fetch(&services.store.courses, id.into()).await?;
    authorize(
        caller.identity(),
        ResourceKind::Course,
        Action::Update,
        course.instructor_ref().as_deref(),
    )?;

    let updated = services
        .store
        .courses
        .mutate(
            id.into(),
            Box::new(move |course: &mut Course| {
                if let Some(title) = body.title {
                    if title.trim().is_empty() {
                        return Err(campusconnect_core::DomainError::validation(
                            "title is required",
                        ));
                    }
                    course.title = title.trim().to_string();
                }
                if let Some(description) = body.description {
                    course.description = description.trim().to_string();
                }
                if let Some(is_active) = body.is_active {
                    course.is_active = is_active;
                }
                Ok(())
            }),
        )
        .await?;

    Ok(errors::ok(json!({ "course": updated })))
}
