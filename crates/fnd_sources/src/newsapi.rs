use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fnd_core::{ArticleSource, Error, FetchQuery, NewsApiConfig, RawArticle, Result};
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    status: Option<String>,
    message: Option<String>,
    articles: Option<Vec<NewsApiArticle>>,
}

#[derive(Debug, Deserialize)]
struct NewsApiArticle {
    source: Option<NewsApiSourceRef>,
    title: Option<String>,
    description: Option<String>,
    content: Option<String>,
    url: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsApiSourceRef {
    name: Option<String>,
}

impl From<NewsApiArticle> for RawArticle {
    fn from(article: NewsApiArticle) -> Self {
        RawArticle {
            title: article.title,
            description: article.description,
            content: article.content,
            url: article.url,
            source: article.source.and_then(|s| s.name),
            // Unparseable timestamps are left for the cleaner to drop.
            published_at: article
                .published_at
                .as_deref()
                .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
                .map(|ts| ts.with_timezone(&Utc)),
        }
    }
}

/// Client for the NewsAPI `everything` search endpoint.
pub struct NewsApiSource {
    client: Client,
    config: NewsApiConfig,
    api_key: String,
}

impl NewsApiSource {
    pub fn new(config: &NewsApiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| Error::Config("NEWS_API_KEY is not set (add it to .env or use --source sample)".to_string()))?;
        Ok(Self {
            client: Client::new(),
            config: config.clone(),
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/everything", self.config.base_url.trim_end_matches('/'))
    }
}

impl fmt::Debug for NewsApiSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiSource")
            .field("config", &self.config)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl ArticleSource for NewsApiSource {
    fn name(&self) -> &str {
        "newsapi"
    }

    async fn fetch(&self, query: &FetchQuery) -> Result<Vec<RawArticle>> {
        let endpoint = self.endpoint();
        debug!("GET {} q={} page={} pageSize={}", endpoint, query.keyword, query.page, query.page_size);

        let page_size = query.page_size.to_string();
        let page = query.page.to_string();
        let response = self
            .client
            .get(&endpoint)
            .query(&[
                ("q", query.keyword.as_str()),
                ("pageSize", page_size.as_str()),
                ("page", page.as_str()),
                ("sortBy", self.config.sort_by.as_str()),
                ("language", self.config.language.as_str()),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        let articles = parse_response(status, &body)?;
        info!("📰 Fetched {} articles from page {}", articles.len(), query.page);
        Ok(articles)
    }
}

/// Turn an HTTP status and response body into raw articles or an API error.
pub fn parse_response(status: u16, body: &str) -> Result<Vec<RawArticle>> {
    let parsed = serde_json::from_str::<NewsApiResponse>(body);

    if !(200..300).contains(&status) {
        let message = parsed
            .ok()
            .and_then(|r| r.message)
            .unwrap_or_else(|| body.trim().to_string());
        return Err(Error::Api { status, message });
    }

    let response = parsed.map_err(|e| Error::Api {
        status,
        message: format!("unexpected response body: {}", e),
    })?;
    if response.status.as_deref() != Some("ok") {
        return Err(Error::Api {
            status,
            message: response.message.unwrap_or_else(|| "Unknown error".to_string()),
        });
    }
    let articles = response.articles.ok_or_else(|| Error::Api {
        status,
        message: response.message.unwrap_or_else(|| "response has no articles".to_string()),
    })?;

    Ok(articles.into_iter().map(RawArticle::from).collect())
}
