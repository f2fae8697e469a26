//! HTTP endpoint for reading and changing a live level.
//!
//! # Responsibilities
//! - `GET` reports the current threshold as `{"level":"info"}`
//! - `PUT`/`POST` accept `{"level":"debug"}` (JSON) or `level=debug` (form)
//! - Bad input is a 400 with `{"error":"..."}`; the cell is left alone
//!
//! # Design Decisions
//! - The route owns a clone of the cell handle, never a copy of the value
//! - Generic over router state so it mounts on any `Router<S>`

use axum::{
    body,
    extract::{FromRequest, Request},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, MethodRouter},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::level::{AtomicLevel, Level, LevelError};

/// Upper bound on accepted request bodies.
const MAX_BODY_BYTES: usize = 1024;

/// Body returned on success.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LevelBody {
    pub level: Level,
}

#[derive(Debug, Deserialize)]
struct LevelRequest {
    level: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Errors reported to the HTTP caller.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Level(#[from] LevelError),

    #[error("invalid request body: {0}")]
    Body(String),

    #[error("Only GET, PUT and POST are supported.")]
    MethodNotAllowed,
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = match self {
            HandlerError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            HandlerError::Level(_) | HandlerError::Body(_) => StatusCode::BAD_REQUEST,
        };
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

/// Build the method router serving `level`.
pub fn level_routes<S>(level: AtomicLevel) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    any(move |request: Request| {
        let level = level.clone();
        async move { serve_level(&level, request).await }
    })
}

async fn serve_level(level: &AtomicLevel, request: Request) -> Result<Json<LevelBody>, HandlerError> {
    let method = request.method().clone();
    if method == Method::GET {
        return Ok(Json(LevelBody { level: level.level() }));
    }
    if method != Method::PUT && method != Method::POST {
        return Err(HandlerError::MethodNotAllowed);
    }

    let requested = decode_level(request).await?;
    let previous = level.level();
    level.set_level(requested);
    tracing::info!(from = %previous, to = %requested, "Log level changed");

    Ok(Json(LevelBody { level: requested }))
}

async fn decode_level(request: Request) -> Result<Level, HandlerError> {
    let is_form = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

    let payload: LevelRequest = if is_form {
        let Form(payload) = Form::<LevelRequest>::from_request(request, &())
            .await
            .map_err(|e| HandlerError::Body(e.body_text()))?;
        payload
    } else {
        let bytes = body::to_bytes(request.into_body(), MAX_BODY_BYTES)
            .await
            .map_err(|e| HandlerError::Body(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| HandlerError::Body(e.to_string()))?
    };

    Ok(payload.level.parse()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, Router};
    use tower::ServiceExt;

    async fn call(app: Router, method: Method, content_type: Option<&str>, payload: &str) -> (StatusCode, String) {
        let mut builder = axum::http::Request::builder().method(method).uri("/level");
        if let Some(ct) = content_type {
            builder = builder.header(header::CONTENT_TYPE, ct);
        }
        let response = app
            .oneshot(builder.body(Body::from(payload.to_string())).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn app(level: &AtomicLevel) -> Router {
        Router::new().route("/level", level_routes(level.clone()))
    }

    #[tokio::test]
    async fn test_get_reports_level() {
        let level = AtomicLevel::new(Level::Warn);
        let (status, body) = call(app(&level), Method::GET, None, "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"level":"warn"}"#);
    }

    #[tokio::test]
    async fn test_put_json_sets_level() {
        let level = AtomicLevel::new(Level::Info);
        let (status, body) = call(
            app(&level),
            Method::PUT,
            Some("application/json"),
            r#"{"level":"debug"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"level":"debug"}"#);
        assert_eq!(level.level(), Level::Debug);
    }

    #[tokio::test]
    async fn test_post_form_sets_level() {
        let level = AtomicLevel::new(Level::Info);
        let (status, _) = call(
            app(&level),
            Method::POST,
            Some("application/x-www-form-urlencoded"),
            "level=error",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(level.level(), Level::Error);
    }

    #[tokio::test]
    async fn test_unknown_level_is_rejected() {
        let level = AtomicLevel::new(Level::Info);
        let (status, body) = call(app(&level), Method::PUT, None, r#"{"level":"loud"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("\"error\""), "body: {}", body);
        assert_eq!(level.level(), Level::Info);
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let level = AtomicLevel::new(Level::Info);
        let (status, _) = call(app(&level), Method::PUT, None, "not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(level.level(), Level::Info);
    }

    #[tokio::test]
    async fn test_other_methods_not_allowed() {
        let level = AtomicLevel::new(Level::Info);
        let (status, body) = call(app(&level), Method::DELETE, None, "").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert!(body.contains("Only GET, PUT and POST"));
    }
}
