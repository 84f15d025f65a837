//! Shared text returned to the front-end.
//!
//! Keep all user-facing strings in this module so they stay in one place and are
//! easy to update or translate.

/// Advisory note when no upstream credential is configured.
pub const NOTE_UNCONFIGURED: &str = "请配置API密钥以体验完整AI功能";

/// Advisory note when the upstream call failed and a canned reply was used.
pub const NOTE_FALLBACK: &str = "使用备用回复";

pub const MESSAGE_REQUIRED: &str = "Message is required";
pub const INVALID_JSON: &str = "Invalid JSON body";
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";
