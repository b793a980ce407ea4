use fnd_core::{ArticleSource, Error, NewsApiConfig, Result};
use std::sync::Arc;
use tracing::info;

pub mod cleaner;
pub mod logging;
pub mod manager;
pub mod newsapi;
pub mod sample;

pub use cleaner::{clean, clean_text, CleanOutcome, DropCounts};
pub use logging::{init_logging, Logger};
pub use manager::{AnalysisManager, AnalysisReport};
pub use newsapi::NewsApiSource;
pub use sample::SampleSource;

pub const AVAILABLE_SOURCES: &[&str] = &["newsapi", "sample"];

pub fn create_source(kind: &str, config: &NewsApiConfig) -> Result<Arc<dyn ArticleSource>> {
    let source: Arc<dyn ArticleSource> = match kind.trim().to_lowercase().as_str() {
        "newsapi" => Arc::new(NewsApiSource::new(config)?),
        "sample" => Arc::new(SampleSource::new()),
        other => {
            return Err(Error::Config(format!(
                "Unknown article source '{}'. Available sources: {}",
                other,
                AVAILABLE_SOURCES.join(", ")
            )))
        }
    };
    info!("🌐 Using {} article source", source.name());
    Ok(source)
}

pub mod prelude {
    pub use super::create_source;
    pub use super::logging::{init_logging, Logger};
    pub use super::manager::{AnalysisManager, AnalysisReport};
    pub use fnd_core::{ArticleSource, Error, Result};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_source() {
        assert_eq!(create_source("sample", &NewsApiConfig::default()).unwrap().name(), "sample");
        assert!(matches!(create_source("newsapi", &NewsApiConfig::default()), Err(Error::Config(_))));
        assert!(matches!(create_source("rss", &NewsApiConfig::default()), Err(Error::Config(_))));
    }
}
