use std::fmt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use fnd_core::{Error, ModelConfig, Result, Sentiment, SentimentLabel, SentimentModel};
use tracing::debug;

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassifyResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
    Error { error: String },
}

/// Text classification through the Hugging Face inference API.
pub struct HuggingFaceModel {
    client: Client,
    api_token: String,
    endpoint: String,
    model_name: String,
}

impl HuggingFaceModel {
    pub fn new(config: &ModelConfig) -> Result<Self> {
        let api_token = config
            .api_token
            .clone()
            .ok_or_else(|| Error::ModelLoad("HF_API_TOKEN is required for the huggingface model".to_string()))?;
        if config.model_name.trim().is_empty() {
            return Err(Error::ModelLoad("model name must not be empty".to_string()));
        }
        Ok(Self {
            client: Client::new(),
            api_token,
            endpoint: format!("{}/{}", config.base_url.trim_end_matches('/'), config.model_name),
            model_name: config.model_name.clone(),
        })
    }
}

impl fmt::Debug for HuggingFaceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuggingFaceModel")
            .field("client", &"<reqwest::Client>")
            .field("api_token", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

#[async_trait::async_trait]
impl SentimentModel for HuggingFaceModel {
    fn name(&self) -> &str {
        &self.model_name
    }

    async fn classify(&self, text: &str) -> Result<Sentiment> {
        debug!("Classifying {} chars with {}", text.chars().count(), self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_token)
            .json(&ClassifyRequest { inputs: text })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let message = match serde_json::from_str::<ClassifyResponse>(&body) {
                Ok(ClassifyResponse::Error { error }) => error,
                _ => body,
            };
            return Err(Error::Inference(format!("{} ({})", message, status)));
        }
        parse_response(&body)
    }
}

/// Pick the highest scoring label out of an inference API response body.
pub fn parse_response(body: &str) -> Result<Sentiment> {
    let scores = match serde_json::from_str::<ClassifyResponse>(body) {
        Ok(ClassifyResponse::Nested(mut nested)) if !nested.is_empty() => nested.swap_remove(0),
        Ok(ClassifyResponse::Flat(flat)) => flat,
        Ok(ClassifyResponse::Error { error }) => return Err(Error::Inference(error)),
        Ok(ClassifyResponse::Nested(_)) => Vec::new(),
        Err(e) => return Err(Error::Inference(format!("unexpected response: {}", e))),
    };

    let best = scores
        .into_iter()
        .filter(|s| s.score.is_finite())
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .ok_or_else(|| Error::Inference("model returned no labels".to_string()))?;

    let label = map_label(&best.label)
        .ok_or_else(|| Error::Inference(format!("unknown sentiment label '{}'", best.label)))?;
    Ok(Sentiment {
        label,
        score: best.score,
    })
}

/// SST-2 models answer POSITIVE/NEGATIVE, three-class models often use
/// LABEL_0 (negative), LABEL_1 (neutral), LABEL_2 (positive).
pub fn map_label(label: &str) -> Option<SentimentLabel> {
    match label.trim().to_uppercase().as_str() {
        "POSITIVE" | "POS" | "LABEL_2" => Some(SentimentLabel::Positive),
        "NEGATIVE" | "NEG" | "LABEL_0" => Some(SentimentLabel::Negative),
        "NEUTRAL" | "NEU" | "LABEL_1" => Some(SentimentLabel::Neutral),
        _ => None,
    }
}
