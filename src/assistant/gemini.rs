//! HTTP backend for the Generative Language `generateContent` endpoint.

use super::{AssistantError, TextAssistant, MAX_TAGS, SUMMARY_LIMIT};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Client for a hosted generative-text model.
#[derive(Clone)]
pub struct GeminiAssistant {
    http: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GeminiAssistant {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    async fn generate(&self, prompt: String, json_reply: bool) -> Result<String, AssistantError> {
        if self.api_key.trim().is_empty() {
            return Err(AssistantError::MissingCredential);
        }

        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: Some(prompt) }],
            }],
            generation_config: json_reply.then(|| GenerationConfig {
                response_mime_type: "application/json".to_string(),
            }),
        };

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssistantError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: GenerateResponse = response.json().await?;
        extract_text(reply)
    }
}

fn summary_prompt(text: &str) -> String {
    format!(
        "You are an assistant for a delivery and errand app.\n\
         Analyze the customer's raw request: \"{text}\".\n\n\
         Return a concise, polite summary that a delivery rider would find useful. \
         Include implied urgency, item type, or special handling if detected. \
         Limit to {SUMMARY_LIMIT} characters."
    )
}

fn tags_prompt(text: &str) -> String {
    format!(
        "Based on this errand request: \"{text}\", suggest {MAX_TAGS} short tags \
         (e.g. \"Urgent\", \"Fragile\", \"Food\"). \
         Return ONLY a JSON array of strings. Example: [\"Urgent\", \"Fragile\"]."
    )
}

/// Concatenates the text parts of the first candidate.
fn extract_text(reply: GenerateResponse) -> Result<String, AssistantError> {
    let text: String = reply
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().filter_map(|part| part.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(AssistantError::EmptyResponse);
    }
    Ok(text)
}

/// Parses a JSON array of strings, tolerating a surrounding markdown code fence.
fn parse_tags(raw: &str) -> Result<Vec<String>, AssistantError> {
    let trimmed = raw.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed)
        .trim();

    serde_json::from_str::<Vec<String>>(body).map_err(|e| AssistantError::Malformed(e.to_string()))
}

#[async_trait]
impl TextAssistant for GeminiAssistant {
    #[instrument(skip(self, text), fields(model = %self.model))]
    async fn summarize(&self, text: &str) -> Result<String, AssistantError> {
        let summary = self.generate(summary_prompt(text), false).await?;
        debug!(chars = summary.chars().count(), "Summary received");
        Ok(summary)
    }

    #[instrument(skip(self, text), fields(model = %self.model))]
    async fn suggest_tags(&self, text: &str) -> Result<Vec<String>, AssistantError> {
        let raw = self.generate(tags_prompt(text), true).await?;
        let tags = parse_tags(&raw)?;
        debug!(?tags, "Tags received");
        Ok(tags)
    }
}
