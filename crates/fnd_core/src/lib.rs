pub mod config;
pub mod error;
pub mod highlight;
pub mod models;
pub mod source;
pub mod storage;
pub mod types;

pub use config::{Config, ModelConfig, ModelKind, NewsApiConfig};
pub use error::{Error, Result};
pub use models::SentimentModel;
pub use source::{ArticleSource, FetchQuery};
pub use storage::ResultStorage;
pub use types::*;

pub mod prelude {
    pub use crate::{
        AnalyzedArticle, Article, ArticleSource, ClickbaitLabel, Error, RawArticle, Result,
        ResultStorage, Sentiment, SentimentLabel, SentimentModel,
    };
}
