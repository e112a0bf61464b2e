use super::query::{StudentQuery, StudentQueryParams};
use super::types::{HealthResponse, StudentStats, StudentsResponse};
use crate::error::AppError;
use crate::storage::StudentStore;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::{Extension, Json};
use std::sync::Arc;

/// Executes a built query: a single record for id lookups, the filtered and
/// sorted list otherwise.
pub async fn run_query<S: StudentStore>(
    store: &S,
    query: StudentQuery,
) -> Result<StudentsResponse, AppError> {
    match query {
        StudentQuery::ById(id) => match store.find_by_id(&id).await? {
            Some(record) => Ok(StudentsResponse::One(record)),
            None => {
                tracing::debug!("Student {} not found", id);
                Err(AppError::NotFound)
            }
        },
        StudentQuery::Find(find) => Ok(StudentsResponse::Many(store.find(&find).await?)),
    }
}

pub async fn handle_get_students<S: StudentStore>(
    Extension(store): Extension<Arc<S>>,
    Query(params): Query<StudentQueryParams>,
) -> Result<Json<StudentsResponse>, AppError> {
    let query = StudentQuery::from_params(&params)?;
    tracing::debug!("GET /students resolved to {:?}", query);

    let response = run_query(store.as_ref(), query).await?;
    Ok(Json(response))
}

pub async fn handle_student_stats<S: StudentStore>(
    Extension(store): Extension<Arc<S>>,
    Query(params): Query<StudentQueryParams>,
) -> Result<Json<StudentStats>, AppError> {
    let query = StudentQuery::from_params(&params)?;
    let records = run_query(store.as_ref(), query).await?.into_records();

    Ok(Json(StudentStats::summarize(&records)))
}

pub async fn handle_health<S: StudentStore>(
    Extension(store): Extension<Arc<S>>,
) -> (StatusCode, Json<HealthResponse>) {
    match store.count().await {
        Ok(students) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
                students,
            }),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unavailable".to_string(),
                    students: 0,
                }),
            )
        }
    }
}
