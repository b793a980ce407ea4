use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod handlers;
pub mod render;
pub mod state;

pub use state::AppState;

pub async fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/api/analysis", get(handlers::run_analysis))
        .route("/api/report", get(handlers::last_report))
        .route("/api/clickbait-counts", get(handlers::clickbait_counts))
        .route("/export.csv", get(handlers::export_csv))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use crate::{create_app, AppState};
    pub use fnd_core::{Error, Result};
}
