use anyhow::Result;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::ai::config::AiConfig;
use crate::ai::fallback::FallbackSelector;
use crate::ai::upstream::{build_generation_body, request_generation, UpstreamError};
use crate::category::Category;
use crate::messages::{NOTE_FALLBACK, NOTE_UNCONFIGURED};

/// Reply envelope sent to the front-end.
///
/// `success` is true whenever a reply is present, including canned replies;
/// `note` is only set when the reply did not come from the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub success: bool,
    pub reply: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ChatResponse {
    fn generated(reply: String, category: Category) -> Self {
        Self {
            success: true,
            reply,
            category: Some(category.as_str().to_string()),
            note: None,
        }
    }

    fn fallback(reply: &str, note: &str) -> Self {
        Self {
            success: true,
            reply: reply.to_string(),
            category: None,
            note: Some(note.to_string()),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("message is required")]
    MissingMessage,
}

#[derive(Clone)]
struct Upstream {
    client: reqwest::Client,
    config: AiConfig,
}

impl Upstream {
    fn new(config: AiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    async fn generate(&self, category: Category, message: &str) -> Result<String, UpstreamError> {
        let body = build_generation_body(&self.config.model, category, message);
        request_generation(&self.client, &self.config.api_key, &body, &self.config.chat_url).await
    }
}

/// Routes a message to the upstream model with the persona for its category,
/// substituting a canned reply when the model is unavailable.
#[derive(Clone)]
pub struct PromptRouter {
    upstream: Option<Upstream>,
    fallback: FallbackSelector,
}

impl PromptRouter {
    /// Without an [`AiConfig`] every request is answered from the fallback pools.
    pub fn new(ai: Option<AiConfig>, fallback: FallbackSelector) -> Result<Self> {
        let upstream = ai.map(Upstream::new).transpose()?;
        Ok(Self { upstream, fallback })
    }

    pub fn is_configured(&self) -> bool {
        self.upstream.is_some()
    }

    /// Answer one message.
    ///
    /// Only a missing or blank message is an error. Upstream failures are
    /// logged and answered with a fallback reply.
    #[instrument(level = "debug", skip(self, message))]
    pub async fn handle(
        &self,
        message: Option<&str>,
        category: Category,
    ) -> Result<ChatResponse, ValidationError> {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .ok_or(ValidationError::MissingMessage)?;

        let Some(upstream) = &self.upstream else {
            debug!(%category, "No upstream credential, answering with fallback reply");
            return Ok(ChatResponse::fallback(
                self.fallback.pick(category),
                NOTE_UNCONFIGURED,
            ));
        };

        match upstream.generate(category, message).await {
            Ok(reply) => {
                debug!(%category, reply_len = reply.len(), "Upstream reply received");
                Ok(ChatResponse::generated(reply, category))
            }
            Err(err) => {
                warn!(%category, error = %err, "Upstream generation failed, using fallback reply");
                Ok(ChatResponse::fallback(
                    self.fallback.pick(category),
                    NOTE_FALLBACK,
                ))
            }
        }
    }
}

impl std::fmt::Debug for PromptRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptRouter")
            .field("ai", &self.upstream.as_ref().map(|u| &u.config))
            .finish_non_exhaustive()
    }
}
