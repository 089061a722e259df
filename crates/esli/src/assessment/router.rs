use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::repository::{AssessmentId, AssessmentRepository, AssessmentSubmission, RepositoryError};
use super::service::{AssessmentService, AssessmentServiceError};

/// Router builder exposing scoring and lookup endpoints.
pub fn assessment_router<R>(service: Arc<AssessmentService<R>>) -> Router
where
    R: AssessmentRepository + 'static,
{
    Router::new()
        .route("/api/v1/assessments", post(submit_handler::<R>))
        .route(
            "/api/v1/assessments/:assessment_id",
            get(assessment_handler::<R>),
        )
        .route("/api/v1/unmapped-questions", get(unmapped_handler::<R>))
        .with_state(service)
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    axum::Json(submission): axum::Json<AssessmentSubmission>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    // Scoring may append to a file-backed audit log; keep it off the runtime workers.
    let outcome = tokio::task::spawn_blocking(move || service.submit(submission)).await;
    let result = match outcome {
        Ok(result) => result,
        Err(join_error) => {
            tracing::error!(error = %join_error, "assessment scoring task failed");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "assessment scoring task failed".to_string(),
            );
        }
    };

    match result {
        Ok(record) => (StatusCode::ACCEPTED, axum::Json(record.view())).into_response(),
        Err(AssessmentServiceError::InvalidSubmission(error)) => {
            error_response(StatusCode::UNPROCESSABLE_ENTITY, error.to_string())
        }
        Err(error @ AssessmentServiceError::Scoring(_))
        | Err(error @ AssessmentServiceError::Reference(_)) => {
            error_response(StatusCode::SERVICE_UNAVAILABLE, error.to_string())
        }
        Err(AssessmentServiceError::Repository(RepositoryError::Conflict)) => {
            error_response(StatusCode::CONFLICT, "assessment already exists".to_string())
        }
        Err(other) => error_response(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    }
}

pub(crate) async fn assessment_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    let id = AssessmentId(assessment_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(AssessmentServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "assessment_id": id.0,
                "error": "assessment not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => error_response(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    }
}

pub(crate) async fn unmapped_handler<R>(State(service): State<Arc<AssessmentService<R>>>) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.unmapped_questions() {
        Ok(entries) => (StatusCode::OK, axum::Json(entries)).into_response(),
        Err(other) => error_response(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, axum::Json(json!({ "error": message }))).into_response()
}
