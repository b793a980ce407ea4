use crate::{Error, Result};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_NEWS_API_URL: &str = "https://newsapi.org/v2";
pub const DEFAULT_HF_API_URL: &str = "https://router.huggingface.co/hf-inference/models";
pub const DEFAULT_SENTIMENT_MODEL: &str = "distilbert-base-uncased-finetuned-sst-2-english";

pub const DEFAULT_CLICKBAIT_PHRASES: &[&str] = &[
    "shocking",
    "unbelievable",
    "you won't believe",
    "secret",
    "exposed",
    "surprising",
    "this will change",
    "the truth about",
    "miracle",
    "guaranteed",
    "instantly",
    "click here",
];

#[derive(Clone)]
pub struct NewsApiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub page_size: u32,
    pub sort_by: String,
    pub language: String,
}

impl fmt::Debug for NewsApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiConfig")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("page_size", &self.page_size)
            .field("sort_by", &self.sort_by)
            .field("language", &self.language)
            .finish()
    }
}

impl Default for NewsApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_NEWS_API_URL.to_string(),
            page_size: 20,
            sort_by: "publishedAt".to_string(),
            language: "en".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Lexicon,
    HuggingFace,
}

impl ModelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Lexicon => "lexicon",
            ModelKind::HuggingFace => "huggingface",
        }
    }
}

impl FromStr for ModelKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "lexicon" => Ok(ModelKind::Lexicon),
            "huggingface" | "hf" => Ok(ModelKind::HuggingFace),
            other => Err(Error::Config(format!(
                "Unknown sentiment model '{}'. Available models: lexicon, huggingface",
                other
            ))),
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone)]
pub struct ModelConfig {
    pub kind: ModelKind,
    pub model_name: String,
    pub api_token: Option<String>,
    pub base_url: String,
    pub max_input_chars: usize,
}

impl fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfig")
            .field("kind", &self.kind)
            .field("model_name", &self.model_name)
            .field("api_token", &self.api_token.as_deref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("max_input_chars", &self.max_input_chars)
            .finish()
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            kind: ModelKind::HuggingFace,
            model_name: DEFAULT_SENTIMENT_MODEL.to_string(),
            api_token: None,
            base_url: DEFAULT_HF_API_URL.to_string(),
            max_input_chars: 512,
        }
    }
}

/// Application configuration, loaded from `.env` and the process environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub news_api: NewsApiConfig,
    pub model: ModelConfig,
    pub clickbait_phrases: Vec<String>,
    pub database_path: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            news_api: NewsApiConfig::default(),
            model: ModelConfig::default(),
            clickbait_phrases: DEFAULT_CLICKBAIT_PHRASES.iter().map(|p| p.to_string()).collect(),
            database_path: PathBuf::from("data/fake_news_analysis.db"),
            output_dir: PathBuf::from("data"),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        config.news_api.api_key = get("NEWS_API_KEY");
        if let Some(url) = get("NEWS_API_URL") {
            config.news_api.base_url = validate_url("NEWS_API_URL", &url)?;
        }
        if let Some(size) = get("FND_PAGE_SIZE") {
            config.news_api.page_size = parse_page_size(&size)?;
        }
        if let Some(sort_by) = get("FND_SORT_BY") {
            config.news_api.sort_by = sort_by;
        }
        if let Some(language) = get("FND_LANGUAGE") {
            config.news_api.language = language;
        }

        if let Some(kind) = get("FND_MODEL") {
            config.model.kind = kind.parse()?;
        }
        if let Some(name) = get("FND_MODEL_NAME") {
            config.model.model_name = name;
        }
        config.model.api_token = get("HF_API_TOKEN");
        if let Some(url) = get("HF_API_URL") {
            config.model.base_url = validate_url("HF_API_URL", &url)?;
        }
        if let Some(chars) = get("FND_MAX_INPUT_CHARS") {
            config.model.max_input_chars = chars
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| Error::Config(format!("FND_MAX_INPUT_CHARS must be a positive number, got '{}'", chars)))?;
        }

        if let Some(phrases) = get("FND_CLICKBAIT_PHRASES") {
            config.clickbait_phrases = parse_phrases(&phrases);
            if config.clickbait_phrases.is_empty() {
                return Err(Error::Config("FND_CLICKBAIT_PHRASES must contain at least one phrase".to_string()));
            }
        }
        if let Some(path) = get("FND_DATABASE") {
            config.database_path = PathBuf::from(path);
        }
        if let Some(dir) = get("FND_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }

        Ok(config)
    }
}

pub fn parse_page_size(value: &str) -> Result<u32> {
    value
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|n| (1..=100).contains(n))
        .ok_or_else(|| Error::Config(format!("Page size must be between 1 and 100, got '{}'", value)))
}

fn parse_phrases(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

fn validate_url(key: &str, value: &str) -> Result<String> {
    url::Url::parse(value).map_err(|e| Error::Config(format!("{} is not a valid URL: {}", key, e)))?;
    Ok(value.trim_end_matches('/').to_string())
}
