//! Request handlers.
//!
//! Tenant-scoped handlers never see a tenant id: the flow context set
//! by the resolution middleware drives the row filter inside the
//! repositories, and the membership middleware has already vouched for
//! the caller by the time these run.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde_json::{Value, json};
use skolaris_core::models::course::{Course, CreateCourse};
use skolaris_core::models::student::{CreateStudent, Student, UpdateStudent};
use skolaris_core::repository::{
    CourseRepository, PaginatedResult, Pagination, StudentRepository,
};
use skolaris_tenancy::scope;
use surrealdb::Connection;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;

pub async fn healthz() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

/// Reports the tenant context the current request resolved to.
pub async fn organization() -> Result<Json<Value>, ApiError> {
    let context = scope::require()?;
    Ok(Json(json!({
        "tenant_id": context.tenant_id,
        "mode": context.mode,
        "tier": context.tier,
    })))
}

pub async fn list_students<C: Connection>(
    State(state): State<AppState<C>>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<PaginatedResult<Student>>, ApiError> {
    Ok(Json(state.students.list(pagination).await?))
}

pub async fn create_student<C: Connection>(
    State(state): State<AppState<C>>,
    Json(input): Json<CreateStudent>,
) -> Result<(StatusCode, Json<Student>), ApiError> {
    let student = state.students.create(input).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

pub async fn get_student<C: Connection>(
    State(state): State<AppState<C>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Student>, ApiError> {
    Ok(Json(state.students.get_by_id(id).await?))
}

pub async fn update_student<C: Connection>(
    State(state): State<AppState<C>>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateStudent>,
) -> Result<Json<Student>, ApiError> {
    Ok(Json(state.students.update(id, input).await?))
}

pub async fn delete_student<C: Connection>(
    State(state): State<AppState<C>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.students.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_courses<C: Connection>(
    State(state): State<AppState<C>>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<PaginatedResult<Course>>, ApiError> {
    Ok(Json(state.courses.list(pagination).await?))
}

pub async fn create_course<C: Connection>(
    State(state): State<AppState<C>>,
    Json(input): Json<CreateCourse>,
) -> Result<(StatusCode, Json<Course>), ApiError> {
    let course = state.courses.create(input).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

pub async fn get_course<C: Connection>(
    State(state): State<AppState<C>>,
    Path(code): Path<String>,
) -> Result<Json<Course>, ApiError> {
    Ok(Json(state.courses.get_by_code(&code).await?))
}
