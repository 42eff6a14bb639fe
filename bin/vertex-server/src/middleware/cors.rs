use axum::Router;
use axum::http::{HeaderValue, header};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::warn;

/// Attach the permissive CORS headers the site's form and widget rely on to
/// every response from `router`, preflight and errors included.
pub fn with_cors_headers<S>(router: Router<S>, allow_origin: &str) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let origin = HeaderValue::from_str(allow_origin).unwrap_or_else(|e| {
        warn!(value = %allow_origin, error = %e, "invalid VERTEX_CORS_ORIGIN; using '*'");
        HeaderValue::from_static("*")
    });

    router
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static("true"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            origin,
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET,OPTIONS,POST"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
}
