use async_trait::async_trait;
use crate::types::RawArticle;
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchQuery {
    pub keyword: String,
    pub page_size: u32,
    pub page: u32,
}

impl FetchQuery {
    pub fn new(keyword: &str, page_size: u32, page: u32) -> Result<Self> {
        let keyword = keyword.trim().to_lowercase();
        if keyword.is_empty() {
            return Err(Error::InvalidInput("keyword must not be empty".to_string()));
        }
        if !(1..=100).contains(&page_size) {
            return Err(Error::InvalidInput(format!("page size must be between 1 and 100, got {}", page_size)));
        }
        if page == 0 {
            return Err(Error::InvalidInput("page numbers start at 1".to_string()));
        }
        Ok(Self { keyword, page_size, page })
    }
}

#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Human readable name of the source
    fn name(&self) -> &str;

    /// Fetch one page of raw articles for the query
    async fn fetch(&self, query: &FetchQuery) -> Result<Vec<RawArticle>>;
}
