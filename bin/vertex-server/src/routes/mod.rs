//! Axum router construction.
//!
//! [`build`] assembles the complete application router, including:
//! - Middleware layers (per-request trace-ID span, CORS headers on `/api`)
//! - Optional OpenAPI document (disable with `VERTEX_ENABLE_DOCS=false`)
//! - Health / heartbeat route
//! - `/api/submit-form` and `/api/chat`

mod chat;
pub mod doc;
mod health;
mod submit_form;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router, middleware};

use crate::error::ServerError;
use crate::middleware::{cors, trace};
use crate::state::AppState;

/// Build the complete Axum [`Router`] for the application.
pub fn build(state: Arc<AppState>) -> Router {
    let api_router = cors::with_cors_headers(
        Router::new()
            .merge(submit_form::router())
            .merge(chat::router()),
        &state.config.cors_allow_origin,
    );

    let mut app = Router::new().merge(health::router()).merge(api_router);

    if state.config.enable_docs {
        app = app.route("/api-docs/openapi.json", get(|| async { Json(doc::get_docs()) }));
    }

    app.layer(middleware::from_fn(trace::trace_middleware))
        .with_state(state)
}

/// `OPTIONS` preflight: an empty 200; the CORS layer adds the headers.
pub(crate) async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Fallback for any method a route does not handle.
pub(crate) async fn method_not_allowed() -> ServerError {
    ServerError::MethodNotAllowed
}

#[cfg(test)]
mod test {
    use axum::body::Body;
    use axum::http::{Method, Request};

    use super::*;
    use crate::config::Config;
    use crate::test_support::{call, state_with};

    #[tokio::test]
    async fn unknown_route_is_404() {
        let app = build(state_with(Config::default()));
        let (status, _, _) = call(app, Request::get("/nope").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn responses_carry_a_trace_id() {
        let app = build(state_with(Config::default()));
        let id = "6f1c0a8e-6a53-4a51-9a57-0b3d3f6f1c2a";
        let req = Request::builder()
            .method(Method::GET)
            .uri("/health")
            .header(trace::X_TRACE_ID, id)
            .body(Body::empty())
            .unwrap();
        let (_, headers, _) = call(app, req).await;
        assert_eq!(headers[trace::X_TRACE_ID], id);
    }

    #[tokio::test]
    async fn openapi_document_lists_api_routes() {
        let app = build(state_with(Config::default()));
        let (status, _, body) =
            call(app, Request::get("/api-docs/openapi.json").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"].get("/api/submit-form").is_some());
        assert!(body["paths"].get("/api/chat").is_some());
    }

    #[tokio::test]
    async fn openapi_document_can_be_disabled() {
        let app = build(state_with(Config {
            enable_docs: false,
            ..Config::default()
        }));
        let (status, _, _) =
            call(app, Request::get("/api-docs/openapi.json").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
