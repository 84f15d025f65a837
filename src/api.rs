use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
        HeaderName, HeaderValue, Request, StatusCode,
    },
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::Instrument;
use uuid::Uuid;

use crate::category::Category;
use crate::messages::{INVALID_JSON, MESSAGE_REQUIRED, METHOD_NOT_ALLOWED};
use crate::relay::{PromptRouter, ValidationError};

pub const CHAT_PATH: &str = "/api/chat";

const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

#[derive(Debug, Deserialize)]
struct ChatRequest {
    message: Option<String>,
    #[serde(rename = "type")]
    category: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: &'static str,
}

pub fn router(relay: PromptRouter) -> Router {
    let cors_layer = middleware::from_fn(allow_cors);
    let request_id_layer = middleware::from_fn(assign_request_id);
    Router::new()
        .route(
            CHAT_PATH,
            post(chat).options(preflight).fallback(method_not_allowed),
        )
        .with_state(relay)
        .layer(cors_layer)
        .layer(request_id_layer)
}

async fn chat(
    State(relay): State<PromptRouter>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected chat request body");
            return error_response(StatusCode::BAD_REQUEST, INVALID_JSON);
        }
    };

    let category = Category::from_optional_tag(payload.category.as_deref());
    match relay.handle(payload.message.as_deref(), category).await {
        Ok(reply) => {
            tracing::debug!(
                %category,
                fallback = reply.note.is_some(),
                "Answered chat request"
            );
            (StatusCode::OK, Json(reply)).into_response()
        }
        Err(ValidationError::MissingMessage) => {
            tracing::debug!("Chat request without message");
            error_response(StatusCode::BAD_REQUEST, MESSAGE_REQUIRED)
        }
    }
}

async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn method_not_allowed() -> Response {
    error_response(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED)
}

async fn allow_cors(req: Request<Body>, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}

/// Tags the request with a fresh id, attached as a span field to every log
/// line emitted while serving it and echoed as `x-request-id`.
async fn assign_request_id(req: Request<Body>, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %req.method(),
        uri = %req.uri(),
    );
    let mut response = next.run(req).instrument(span.clone()).await;

    match HeaderValue::from_str(&request_id) {
        Ok(value) => {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        Err(err) => {
            span.in_scope(|| tracing::warn!(error = %err, "Request id is not a valid header value"));
        }
    }
    span.in_scope(|| tracing::debug!(status = %response.status(), "API request completed"));
    response
}

fn error_response(status: StatusCode, error: &'static str) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}
