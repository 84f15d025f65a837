use std::env;
use std::time::Duration;

use crate::ai::upstream::DASHSCOPE_CHAT_URL;

pub const DEFAULT_MODEL: &str = "qwen-turbo";
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

#[derive(Clone)]
pub struct AiConfig {
    pub api_key: String,
    pub model: String,
    pub chat_url: String,
    pub timeout: Duration,
}

impl AiConfig {
    /// Returns `None` when no credential is configured; the relay then serves
    /// canned replies only.
    pub fn from_env() -> Option<Self> {
        let api_key = match env::var("DASHSCOPE_API_KEY") {
            Ok(k) if !k.trim().is_empty() => k.trim().to_string(),
            _ => return None,
        };
        let timeout_secs = env::var("DASHSCOPE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Some(Self {
            api_key,
            model: env::var("DASHSCOPE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            chat_url: env::var("DASHSCOPE_CHAT_URL")
                .unwrap_or_else(|_| DASHSCOPE_CHAT_URL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            chat_url: DASHSCOPE_CHAT_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_chat_url(mut self, url: impl Into<String>) -> Self {
        self.chat_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl std::fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let preview: String = self.api_key.chars().take(6).collect();
        f.debug_struct("AiConfig")
            .field("api_key", &format_args!("{preview}…"))
            .field("model", &self.model)
            .field("chat_url", &self.chat_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
