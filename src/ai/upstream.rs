use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, instrument, trace};

use crate::ai::prompts::system_prompt;
use crate::category::Category;

pub const DASHSCOPE_CHAT_URL: &str =
    "https://dashscope.aliyuncs.com/api/v1/services/aigc/text-generation/generation";

pub const TEMPERATURE: f64 = 0.7;
pub const TOP_P: f64 = 0.8;
pub const MAX_TOKENS: u32 = 1500;

/// Why a generation request produced no usable reply.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream request timed out")]
    Timeout,
    #[error("upstream transport error: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("upstream returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("malformed upstream response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout
        } else {
            UpstreamError::Transport(err)
        }
    }
}

#[derive(Deserialize)]
struct GenerationResponse {
    output: GenerationOutput,
}

#[derive(Deserialize)]
struct GenerationOutput {
    #[serde(default)]
    choices: Vec<GenerationChoice>,
    text: Option<String>,
}

#[derive(Deserialize)]
struct GenerationChoice {
    message: GenerationMessage,
}

#[derive(Deserialize)]
struct GenerationMessage {
    content: String,
}

/// Build the request body: the category persona as `system`, the user's
/// text verbatim as `user`, plus fixed sampling parameters.
pub fn build_generation_body(model: &str, category: Category, message: &str) -> Value {
    json!({
        "model": model,
        "input": {
            "messages": [
                { "role": "system", "content": system_prompt(category) },
                { "role": "user", "content": message }
            ]
        },
        "parameters": {
            "result_format": "message",
            "temperature": TEMPERATURE,
            "top_p": TOP_P,
            "max_tokens": MAX_TOKENS
        }
    })
}

/// Extract the first generated message from a raw response body. The text is
/// returned unchanged; only a blank message is rejected.
pub fn parse_generation(raw: &str) -> Result<String, UpstreamError> {
    let resp: GenerationResponse =
        serde_json::from_str(raw).map_err(|e| UpstreamError::Malformed(e.to_string()))?;
    let content = match resp.output.choices.into_iter().next() {
        Some(choice) => choice.message.content,
        None => resp
            .output
            .text
            .ok_or_else(|| UpstreamError::Malformed("missing generation choice".to_string()))?,
    };
    if content.trim().is_empty() {
        return Err(UpstreamError::Malformed("empty generation".to_string()));
    }
    Ok(content)
}

/// One round-trip to the generation endpoint. Timeouts come from the client.
#[instrument(level = "trace", skip(client, api_key, body))]
pub async fn request_generation(
    client: &reqwest::Client,
    api_key: &str,
    body: &Value,
    url: &str,
) -> Result<String, UpstreamError> {
    debug!(url, "sending generation request");

    let resp = client
        .post(url)
        .bearer_auth(api_key)
        .json(body)
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let body: String = body.chars().take(200).collect();
        return Err(UpstreamError::Status { status, body });
    }

    let raw = resp.text().await?;
    let snippet: String = raw.chars().take(200).collect();
    debug!(snippet = %snippet, "generation response body");
    trace!(raw = %raw, "generation response");
    parse_generation(&raw)
}
