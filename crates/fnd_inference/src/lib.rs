pub mod clickbait;
pub mod models;
pub mod scorer;

pub use clickbait::ClickbaitClassifier;
pub use models::create_model;
pub use scorer::SentimentScorer;

pub mod prelude {
    pub use super::clickbait::ClickbaitClassifier;
    pub use super::models::create_model;
    pub use super::scorer::SentimentScorer;
    pub use fnd_core::{Error, Result, Sentiment, SentimentLabel, SentimentModel};
}
