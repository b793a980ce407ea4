use crate::render::{self, DashboardView};
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use fnd_core::{Error, LabelCount};
use fnd_sources::AnalysisReport;
use fnd_storage::export::to_csv_string;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, warn};

pub const CSV_FILENAME: &str = "combined_analysis.csv";

/// JSON error body with a status derived from the pipeline error.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn not_found(message: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.to_string(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match &err {
            Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::Api { .. } | Error::Http(_) | Error::Inference(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error!("❌ Request failed: {}", err);
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DashboardParams {
    pub keyword: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisParams {
    pub keyword: String,
    pub page: Option<u32>,
}

async fn analyze_and_remember(state: &AppState, keyword: &str, page: Option<u32>) -> Result<AnalysisReport, Error> {
    let report = state.manager.analyze(keyword, page).await?;
    *state.last_report.write().await = Some(report.clone());
    Ok(report)
}

pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DashboardParams>,
) -> Html<String> {
    let mut view = DashboardView {
        keyword: params.keyword.as_deref().map(str::trim).unwrap_or_default().to_string(),
        ..DashboardView::default()
    };

    let page = match params.page.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<u32>()
            .ok()
            .filter(|p| *p > 0)
            .map(Some)
            .ok_or_else(|| format!("Page must be a positive number, got '{}'", raw)),
    };

    match page {
        Err(message) => view.errors.push(message),
        Ok(page) if !view.keyword.is_empty() => {
            view.page = page;
            match analyze_and_remember(&state, &view.keyword, page).await {
                Ok(report) => {
                    if let Err(e) = state.manager.persist(&report).await {
                        warn!("⚠️ Could not store results: {}", e);
                        view.errors.push(format!("Results were not stored: {}", e));
                    }
                    view.report = Some(report);
                }
                Err(e) => view.errors.push(e.to_string()),
            }
        }
        Ok(_) => view.report = state.last_report.read().await.clone(),
    }

    match state.manager.clickbait_counts().await {
        Ok(counts) => view.counts = counts,
        Err(e) => view.errors.push(e.to_string()),
    }

    Html(render::dashboard(&view))
}

pub async fn run_analysis(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AnalysisParams>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let report = analyze_and_remember(&state, &params.keyword, params.page).await?;
    state.manager.persist(&report).await?;
    Ok(Json(report))
}

pub async fn last_report(State(state): State<Arc<AppState>>) -> Result<Json<AnalysisReport>, ApiError> {
    state
        .last_report
        .read()
        .await
        .clone()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("no analysis has been run yet"))
}

pub async fn clickbait_counts(State(state): State<Arc<AppState>>) -> Result<Json<Vec<LabelCount>>, ApiError> {
    Ok(Json(state.manager.clickbait_counts().await?))
}

pub async fn export_csv(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let guard = state.last_report.read().await;
    let report = guard
        .as_ref()
        .ok_or_else(|| ApiError::not_found("no analysis has been run yet"))?;
    let csv = to_csv_string(&report.rows)?;
    let disposition = format!("attachment; filename=\"{}\"", CSV_FILENAME);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    )
        .into_response())
}
