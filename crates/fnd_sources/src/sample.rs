use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use fnd_core::{ArticleSource, FetchQuery, RawArticle, Result};
use tracing::info;

// (title, source, body, url slug, day of March 2024)
const SAMPLES: &[(&str, &str, &str, &str, u32)] = &[
    (
        "You Won't Believe What This Celebrity Did Next!",
        "ClickbaitNews",
        "This shocking revelation will change everything you thought you knew about celebrities.",
        "celebrity-next",
        1,
    ),
    (
        "Federal Reserve Announces New Interest Rate Policy",
        "Financial Times",
        "The Federal Reserve has announced a new monetary policy framework targeting inflation control.",
        "fed-rate-policy",
        2,
    ),
    (
        "Scientists Discover New Species in Amazon Rainforest",
        "Nature Journal",
        "Researchers have identified a previously unknown primate species in the Amazon basin.",
        "amazon-species",
        3,
    ),
    (
        "This Simple Trick Will Double Your Income Overnight!",
        "MoneyHacks",
        "Financial experts hate this one weird trick that can transform your finances instantly.",
        "income-trick",
        4,
    ),
    (
        "Climate Change Report Shows Alarming Temperature Trends",
        "Environmental Science",
        "Latest IPCC report reveals concerning data about global temperature increases over the past decade.",
        "climate-report",
        5,
    ),
    (
        "The Secret iPhone Setting Apple Doesn't Want You To Know",
        "GadgetBuzz",
        "A hidden iPhone menu lets you boost battery life, and it is surprisingly easy to find.",
        "iphone-secret-setting",
        6,
    ),
    (
        "Apple Reports Strong iPhone Sales in Asia",
        "Reuters",
        "Apple said iPhone revenue grew in Asia as demand for its latest models stayed strong.",
        "iphone-sales-asia",
        7,
    ),
    (
        "Regulators Question Apple Over iPhone Battery Claims",
        "BBC News",
        "Consumer regulators asked Apple to explain complaints about poor iPhone battery performance.",
        "iphone-battery-claims",
        8,
    ),
];

/// Fixed set of offline articles for demos and runs without an API key.
#[derive(Debug, Clone, Default)]
pub struct SampleSource;

impl SampleSource {
    pub fn new() -> Self {
        Self
    }

    pub fn articles() -> Vec<RawArticle> {
        SAMPLES
            .iter()
            .map(|&(title, source, body, slug, day)| RawArticle {
                title: Some(title.to_string()),
                description: Some(body.to_string()),
                content: None,
                url: Some(format!("https://example.com/news/{}", slug)),
                source: Some(source.to_string()),
                published_at: Utc.with_ymd_and_hms(2024, 3, day, 9, 30, 0).single(),
            })
            .collect()
    }
}

#[async_trait]
impl ArticleSource for SampleSource {
    fn name(&self) -> &str {
        "sample"
    }

    async fn fetch(&self, query: &FetchQuery) -> Result<Vec<RawArticle>> {
        let mentions = |a: &RawArticle| {
            [&a.title, &a.description]
                .into_iter()
                .flatten()
                .any(|text| text.to_lowercase().contains(&query.keyword))
        };
        let (mut matching, rest): (Vec<RawArticle>, Vec<RawArticle>) =
            Self::articles().into_iter().partition(|a| mentions(a));
        matching.extend(rest);
        matching.truncate(query.page_size as usize);
        info!("📦 Serving {} sample articles", matching.len());
        Ok(matching)
    }
}
