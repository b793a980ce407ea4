use fnd_sources::{AnalysisManager, AnalysisReport};
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct AppState {
    pub manager: Arc<AnalysisManager>,
    /// Most recent report, served by `/api/report` and `/export.csv`.
    pub last_report: RwLock<Option<AnalysisReport>>,
}

impl AppState {
    pub fn new(manager: Arc<AnalysisManager>) -> Self {
        Self {
            manager,
            last_report: RwLock::new(None),
        }
    }
}
