//! Best-effort text analysis for the consumer order flow.
//!
//! A [`TextAssistant`] backend turns a free-text request into a rider-facing
//! summary and a few short tags. Backends are fallible; the [`Assistant`]
//! facade is not. Every failure is mapped to a fixed fallback so order
//! creation always proceeds.

pub mod error;
pub mod gemini;

pub use error::AssistantError;
pub use gemini::GeminiAssistant;

use crate::config::Config;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

/// Maximum length of a summary, in characters.
pub const SUMMARY_LIMIT: usize = 150;
/// Maximum number of suggested tags.
pub const MAX_TAGS: usize = 3;

pub const MISSING_KEY_SUMMARY: &str = "API key missing. Cannot analyze.";
pub const EMPTY_SUMMARY: &str = "Could not analyze the request, please retry.";
pub const UNAVAILABLE_SUMMARY: &str = "Smart analysis is temporarily unavailable.";

pub const MISSING_KEY_TAG: &str = "standard";
pub const EMPTY_TAG: &str = "daily";
pub const UNAVAILABLE_TAG: &str = "general";

/// A text-analysis backend.
#[async_trait]
pub trait TextAssistant: Send + Sync {
    /// Rider-facing summary of a customer request.
    async fn summarize(&self, text: &str) -> Result<String, AssistantError>;

    /// Short categorical tags for a customer request.
    async fn suggest_tags(&self, text: &str) -> Result<Vec<String>, AssistantError>;
}

/// Result of analyzing one request.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub summary: String,
    pub tags: Vec<String>,
}

/// Infallible front for an optional [`TextAssistant`].
#[derive(Clone, Default)]
pub struct Assistant {
    backend: Option<Arc<dyn TextAssistant>>,
}

impl Assistant {
    pub fn new(backend: Arc<dyn TextAssistant>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// An assistant with no credential: every call returns the missing-key fallback.
    pub fn disabled() -> Self {
        Self { backend: None }
    }

    /// Uses the hosted model when an API key is configured, otherwise [`Assistant::disabled`].
    pub fn from_config(config: &Config) -> Self {
        match &config.api_key {
            Some(key) => {
                info!(model = %config.model, "Text assistant enabled");
                let backend = GeminiAssistant::new(key.clone())
                    .with_model(config.model.clone())
                    .with_endpoint(config.endpoint.clone());
                Self::new(Arc::new(backend))
            }
            None => {
                info!("No API key configured; text assistant disabled");
                Self::disabled()
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    pub async fn summarize(&self, text: &str) -> String {
        let Some(backend) = &self.backend else {
            return MISSING_KEY_SUMMARY.to_string();
        };

        match backend.summarize(text).await {
            Ok(summary) if !summary.trim().is_empty() => cap_summary(&summary),
            Ok(_) | Err(AssistantError::EmptyResponse) => EMPTY_SUMMARY.to_string(),
            Err(AssistantError::MissingCredential) => MISSING_KEY_SUMMARY.to_string(),
            Err(e) => {
                warn!(error = %e, "Summary failed");
                UNAVAILABLE_SUMMARY.to_string()
            }
        }
    }

    pub async fn suggest_tags(&self, text: &str) -> Vec<String> {
        let Some(backend) = &self.backend else {
            return vec![MISSING_KEY_TAG.to_string()];
        };

        match backend.suggest_tags(text).await {
            Ok(tags) => {
                let tags = clean_tags(tags);
                if tags.is_empty() {
                    vec![EMPTY_TAG.to_string()]
                } else {
                    tags
                }
            }
            Err(AssistantError::EmptyResponse) => vec![EMPTY_TAG.to_string()],
            Err(AssistantError::MissingCredential) => vec![MISSING_KEY_TAG.to_string()],
            Err(e) => {
                warn!(error = %e, "Tag suggestion failed");
                vec![UNAVAILABLE_TAG.to_string()]
            }
        }
    }

    /// Runs both calls concurrently.
    pub async fn analyze(&self, text: &str) -> Analysis {
        let (summary, tags) = tokio::join!(self.summarize(text), self.suggest_tags(text));
        Analysis { summary, tags }
    }
}

fn cap_summary(summary: &str) -> String {
    summary.trim().chars().take(SUMMARY_LIMIT).collect()
}

fn clean_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .take(MAX_TAGS)
        .collect()
}
