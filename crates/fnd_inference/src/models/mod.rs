use std::sync::Arc;
use fnd_core::{ModelConfig, ModelKind, Result, SentimentModel};
use tracing::info;

pub mod huggingface;
pub mod lexicon;

pub use huggingface::HuggingFaceModel;
pub use lexicon::LexiconModel;

/// Build the sentiment model selected in the configuration. Load failures are
/// reported as `Error::ModelLoad` so callers can abort before any work is done.
pub fn create_model(config: &ModelConfig) -> Result<Arc<dyn SentimentModel>> {
    let model: Arc<dyn SentimentModel> = match config.kind {
        ModelKind::Lexicon => Arc::new(LexiconModel::new()),
        ModelKind::HuggingFace => Arc::new(HuggingFaceModel::new(config)?),
    };
    info!("🧠 Sentiment model ready: {}", model.name());
    Ok(model)
}
