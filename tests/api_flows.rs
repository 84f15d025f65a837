use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use companion_relay::ai::config::AiConfig;
use companion_relay::messages::NOTE_FALLBACK;
use companion_relay::{
    api_router, fallback_pool, Category, ChatResponse, FallbackSelector, PromptRouter, CHAT_PATH,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn chat_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(CHAT_PATH)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn app_for(server: &MockServer) -> axum::Router {
    let ai = AiConfig::new("k")
        .with_chat_url(format!("{}/generation", server.uri()))
        .with_timeout(Duration::from_secs(2));
    api_router(PromptRouter::new(Some(ai), FallbackSelector::default()).unwrap())
}

#[tokio::test]
async fn api_returns_model_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generation"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"output":{"choices":[{"message":{"role":"assistant","content":"早上好！"}}]}}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let response = app_for(&server)
        .oneshot(chat_request(json!({ "message": "早上好", "type": "chat" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let payload: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        payload,
        json!({ "success": true, "reply": "早上好！", "type": "chat" })
    );
}

#[tokio::test]
async fn api_stays_ok_when_upstream_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generation"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let response = app_for(&server)
        .oneshot(chat_request(json!({ "message": "养老院推荐", "type": "nursing-home" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let payload: ChatResponse = serde_json::from_slice(&body).unwrap();
    assert!(payload.success);
    assert!(fallback_pool(Category::NursingHome).contains(&payload.reply));
    assert_eq!(payload.note.as_deref(), Some(NOTE_FALLBACK));
}

#[tokio::test]
async fn api_rejects_empty_message_without_calling_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let response = app_for(&server)
        .oneshot(chat_request(json!({ "message": "", "type": "recipe" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn api_defaults_missing_type_to_chat() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generation"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"output":{"choices":[{"message":{"content":"陪您聊聊天"}}]}}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let response = app_for(&server)
        .oneshot(chat_request(json!({ "message": "我有点孤单" })))
        .await
        .unwrap();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let payload: ChatResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(payload.category.as_deref(), Some("chat"));
    assert_eq!(payload.reply, "陪您聊聊天");
}
