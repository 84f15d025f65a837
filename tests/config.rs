use std::time::Duration;

use companion_relay::ai::config::{AiConfig, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use companion_relay::Config;
use serial_test::serial;

fn clear_env() {
    for key in [
        "DASHSCOPE_API_KEY",
        "DASHSCOPE_MODEL",
        "DASHSCOPE_CHAT_URL",
        "DASHSCOPE_TIMEOUT_SECS",
        "BIND_ADDR",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
#[serial]
fn missing_dashscope_key_disables_upstream() {
    clear_env();
    assert!(AiConfig::from_env().is_none());
}

#[test]
#[serial]
fn blank_dashscope_key_disables_upstream() {
    clear_env();
    std::env::set_var("DASHSCOPE_API_KEY", "   ");
    assert!(AiConfig::from_env().is_none());
}

#[test]
#[serial]
fn dashscope_defaults_to_qwen_turbo() {
    clear_env();
    std::env::set_var("DASHSCOPE_API_KEY", "k");
    let cfg = AiConfig::from_env().unwrap();
    assert_eq!(cfg.api_key, "k");
    assert_eq!(cfg.model, DEFAULT_MODEL);
    assert!(cfg.chat_url.starts_with("https://dashscope.aliyuncs.com/"));
    assert_eq!(cfg.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
}

#[test]
#[serial]
fn dashscope_model_url_and_timeout_overrides() {
    clear_env();
    std::env::set_var("DASHSCOPE_API_KEY", "k");
    std::env::set_var("DASHSCOPE_MODEL", "qwen-plus");
    std::env::set_var("DASHSCOPE_CHAT_URL", "http://localhost:8080/gen");
    std::env::set_var("DASHSCOPE_TIMEOUT_SECS", "5");
    let cfg = AiConfig::from_env().unwrap();
    assert_eq!(cfg.model, "qwen-plus");
    assert_eq!(cfg.chat_url, "http://localhost:8080/gen");
    assert_eq!(cfg.timeout, Duration::from_secs(5));
}

#[test]
#[serial]
fn ai_config_ignores_bad_timeout() {
    clear_env();
    std::env::set_var("DASHSCOPE_API_KEY", "k");
    std::env::set_var("DASHSCOPE_TIMEOUT_SECS", "soon");
    let cfg = AiConfig::from_env().unwrap();
    assert_eq!(cfg.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
}

#[test]
#[serial]
fn config_reads_bind_addr_and_dashscope_key() {
    clear_env();
    std::env::set_var("BIND_ADDR", "127.0.0.1:8088");
    std::env::set_var("DASHSCOPE_API_KEY", "k");
    let cfg = Config::from_env();
    assert_eq!(cfg.bind_addr, "127.0.0.1:8088");
    assert_eq!(cfg.ai.unwrap().api_key, "k");
}

#[test]
#[serial]
fn api_key_is_not_printed_in_full() {
    let cfg = AiConfig::new("sk-1234567890abcdef");
    let printed = format!("{cfg:?}");
    assert!(!printed.contains("sk-1234567890abcdef"));
    assert!(printed.contains("sk-123"));
}
