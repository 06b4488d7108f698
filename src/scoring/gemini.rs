//! Gemini (Generative Language API) client for LLM-based scoring.
//!
//! The model is asked for a label and a 0–1 confidence as a small JSON
//! object; the confidence goes through the same exponential rescaling as
//! the local scorers' polarities.
//! See: <https://ai.google.dev/api/generate-content>

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use super::intensity::scale_intensity;
use super::traits::SentimentScorer;
use crate::types::{Method, Score, SentimentLabel};
use crate::{Result, SentimentSyncError};

/// Default base URL for the Generative Language API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Models offered for selection; any other name is accepted as a custom model.
pub const KNOWN_MODELS: &[&str] = &[
    "gemini-1.5-flash",
    "gemini-pro",
    "gemini-1.5-pro-latest",
    "gemini-vision",
];

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Connection settings for the Gemini scorer.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            model: model.into(),
            ..Self::default()
        }
    }

    /// Point the client at a different host (for testing with wiremock).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for the Gemini generateContent API.
#[derive(Clone)]
pub struct GeminiClient {
    api_key: Option<String>,
    model: String,
    http: Client,
    base_url: String,
}

impl GeminiClient {
    /// Create a client from its configuration.
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                SentimentSyncError::Configuration(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            api_key: config.api_key.filter(|key| !key.trim().is_empty()),
            model: config.model,
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or(SentimentSyncError::MissingCredential(Method::Gemini))
    }

    /// List the model names available to this API key (without the `models/` prefix).
    pub async fn list_models(&self) -> Result<Vec<String>> {
        let api_key = self.api_key()?;
        let url = format!("{}/v1beta/models", self.base_url);
        let mut names = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self.http.get(&url).header("x-goog-api-key", api_key);
            if let Some(ref token) = page_token {
                request = request.query(&[("pageToken", token)]);
            }
            let response = request
                .send()
                .await
                .map_err(|e| SentimentSyncError::Http(e.to_string()))?;
            let response = check_status(response).await?;

            let page: ListModelsResponse = response
                .json()
                .await
                .map_err(|e| SentimentSyncError::Http(e.to_string()))?;

            names.extend(page.models.into_iter().map(|m| {
                m.name
                    .rsplit('/')
                    .next()
                    .unwrap_or(m.name.as_str())
                    .to_string()
            }));

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }
        Ok(names)
    }

    /// Send a single-turn prompt; returns the first candidate's text, if any.
    pub async fn generate(&self, prompt: &str) -> Result<Option<String>> {
        let api_key = self.api_key()?;
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&GenerateRequest {
                contents: vec![RequestContent {
                    parts: vec![RequestPart { text: prompt }],
                }],
            })
            .send()
            .await
            .map_err(|e| SentimentSyncError::Http(e.to_string()))?;
        let response = check_status(response).await?;

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| SentimentSyncError::Http(e.to_string()))?;

        Ok(body.candidates.into_iter().next().map(|candidate| {
            candidate
                .content
                .map(|content| {
                    content
                        .parts
                        .into_iter()
                        .filter_map(|part| part.text)
                        .collect::<String>()
                })
                .unwrap_or_default()
        }))
    }
}

/// Map non-success responses to errors, keeping the API's message.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorEnvelope>(&body)
        .map(|envelope| envelope.error.message)
        .unwrap_or(body);

    match status.as_u16() {
        401 | 403 => Err(SentimentSyncError::AuthenticationFailed),
        // Gemini reports a bad key as 400 INVALID_ARGUMENT
        400 if message.contains("API key") => Err(SentimentSyncError::AuthenticationFailed),
        code => Err(SentimentSyncError::Api {
            status: code,
            message: format!("Gemini API error: {message}"),
        }),
    }
}

/// Prompt asking for a label and a confidence as JSON.
pub fn classification_prompt(sentence: &str) -> String {
    format!(
        "Classify the sentiment of this text as POSITIVE, NEGATIVE, or NEUTRAL. \
         Also provide a confidence score between 0 and 1. \
         Return only valid JSON like this:\n\
         {{\"sentiment\": \"POSITIVE\", \"score\": 0.85}}\n\n\
         Text: \"{sentence}\""
    )
}

/// Extract a score from a model reply.
///
/// Code fences are stripped and the first `{...}` object is parsed. Returns
/// `None` when no usable object is found.
pub fn parse_reply(raw: &str) -> Option<Score> {
    let text = raw.trim_matches(|c: char| c == '`' || c.is_whitespace());
    let start = text.find('{')?;
    let end = start + text[start..].find('}')?;
    let object: ReplyObject = serde_json::from_str(&text[start..=end]).ok()?;

    let label = SentimentLabel::parse(&object.sentiment)?;
    let confidence = match object.score {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    Some(Score::new(label, scale_intensity(confidence)))
}

#[async_trait]
impl SentimentScorer for GeminiClient {
    fn method(&self) -> Method {
        Method::Gemini
    }

    /// Reject a missing key or a model this key cannot use.
    #[instrument(skip(self), fields(model = %self.model))]
    async fn validate(&self) -> Result<()> {
        self.api_key()?;
        let available = self.list_models().await.map_err(|e| match e {
            SentimentSyncError::AuthenticationFailed => e,
            other => SentimentSyncError::Setup {
                method: Method::Gemini,
                message: format!("Failed to fetch Gemini model list: {other}"),
            },
        })?;
        if !available.iter().any(|name| *name == self.model) {
            return Err(SentimentSyncError::ModelNotFound {
                model: self.model.clone(),
                available,
            });
        }
        Ok(())
    }

    #[instrument(skip(self, sentence), fields(model = %self.model))]
    async fn score(&self, sentence: &str) -> Result<Score> {
        let reply = self.generate(&classification_prompt(sentence)).await?;
        match reply.as_deref().and_then(parse_reply) {
            Some(score) => Ok(score),
            None => {
                warn!(reply = ?reply, "unusable Gemini reply, scoring as neutral");
                Ok(Score::new(SentimentLabel::Neutral, 0.0))
            }
        }
    }
}

#[derive(Deserialize)]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelEntry>,
    #[serde(default, rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
struct ModelEntry {
    name: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct ReplyObject {
    sentiment: String,
    score: serde_json::Value,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_json_reply() {
        let score = parse_reply(r#"{"sentiment": "POSITIVE", "score": 0.85}"#).unwrap();
        assert_eq!(score.label, SentimentLabel::Positive);
        assert_eq!(score.intensity, scale_intensity(0.85));
    }

    #[test]
    fn parse_fenced_reply() {
        let raw = "```json\n{\"sentiment\": \" negative \", \"score\": \"0.4\"}\n```";
        let score = parse_reply(raw).unwrap();
        assert_eq!(score.label, SentimentLabel::Negative);
        assert_eq!(score.intensity, scale_intensity(0.4));
    }

    #[test]
    fn parse_reply_with_surrounding_prose() {
        let raw = "Sure! Here it is: {\"sentiment\": \"NEUTRAL\", \"score\": 0.1} Hope that helps.";
        assert_eq!(parse_reply(raw).unwrap().label, SentimentLabel::Neutral);
    }

    #[test]
    fn unusable_replies_yield_none() {
        assert!(parse_reply("I cannot answer that.").is_none());
        assert!(parse_reply(r#"{"sentiment": "MIXED", "score": 0.5}"#).is_none());
        assert!(parse_reply(r#"{"sentiment": "POSITIVE"}"#).is_none());
        assert!(parse_reply(r#"{"sentiment": "POSITIVE", "score": "high"}"#).is_none());
    }

    #[test]
    fn prompt_embeds_sentence() {
        let prompt = classification_prompt("I love this!");
        assert!(prompt.contains("Text: \"I love this!\""));
        assert!(prompt.contains("POSITIVE, NEGATIVE, or NEUTRAL"));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let client = GeminiClient::new(GeminiConfig::new("  ", DEFAULT_MODEL)).unwrap();
        assert!(matches!(
            client.api_key(),
            Err(SentimentSyncError::MissingCredential(Method::Gemini))
        ));
    }

    #[test]
    fn default_config_uses_default_model() {
        let config = GeminiConfig::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(KNOWN_MODELS.contains(&config.model.as_str()));
        assert!(config.api_key.is_none());
    }
}
