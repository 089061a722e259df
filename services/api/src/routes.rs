use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use esli::assessment::{
    assessment_router, AssessmentRepository, AssessmentService, ReferenceSnapshot, SchoolLevel,
    SurveyCatalog, SurveyPart,
};
use esli::error::AppError;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Serialize)]
pub(crate) struct ReferenceLevelSummary {
    pub(crate) level: SchoolLevel,
    pub(crate) level_label: &'static str,
    pub(crate) categories: usize,
    pub(crate) missing: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReferenceSummary {
    pub(crate) loaded_at: chrono::DateTime<chrono::Utc>,
    pub(crate) levels: Vec<ReferenceLevelSummary>,
    pub(crate) percentile_entries: usize,
    pub(crate) exact_patterns: usize,
    pub(crate) keywords: usize,
}

impl ReferenceSummary {
    pub(crate) fn from_snapshot(snapshot: &ReferenceSnapshot) -> Self {
        let levels = SchoolLevel::ordered()
            .into_iter()
            .map(|level| {
                let missing: Vec<&'static str> = snapshot
                    .missing_categories(level)
                    .into_iter()
                    .map(|category| category.label())
                    .collect();
                ReferenceLevelSummary {
                    level,
                    level_label: level.label(),
                    categories: esli::assessment::Category::ordered().len() - missing.len(),
                    missing,
                }
            })
            .collect();

        Self {
            loaded_at: snapshot.loaded_at(),
            levels,
            percentile_entries: snapshot.percentiles().len(),
            exact_patterns: snapshot.questions().exact_patterns().len(),
            keywords: snapshot.questions().keywords().len(),
        }
    }
}

pub(crate) fn with_assessment_routes<R>(service: Arc<AssessmentService<R>>) -> axum::Router
where
    R: AssessmentRepository + 'static,
{
    assessment_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/survey", axum::routing::get(survey_endpoint))
        .route("/api/v1/reference", axum::routing::get(reference_endpoint))
        .route(
            "/api/v1/reference/refresh",
            axum::routing::post(reference_refresh_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn survey_endpoint() -> Json<&'static [SurveyPart]> {
    Json(SurveyCatalog::standard().parts())
}

pub(crate) async fn reference_endpoint(
    Extension(state): Extension<AppState>,
) -> Result<Json<ReferenceSummary>, AppError> {
    let snapshot = state.references.snapshot()?;
    Ok(Json(ReferenceSummary::from_snapshot(&snapshot)))
}

pub(crate) async fn reference_refresh_endpoint(
    Extension(state): Extension<AppState>,
) -> Result<Json<ReferenceSummary>, AppError> {
    let snapshot = state.references.refresh()?;
    info!(levels = ?snapshot.levels(), "reference data refreshed");
    Ok(Json(ReferenceSummary::from_snapshot(&snapshot)))
}
