//! In-process fakes for the hosted database and completion API, plus helpers
//! for driving the router without a socket.

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use vertex_core::{CompletionConfig, DatabaseConfig};

use crate::config::Config;
use crate::state::AppState;

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

pub fn state_with(config: Config) -> Arc<AppState> {
    Arc::new(AppState::from_config(config))
}

pub fn config_with_database(url: &str) -> Config {
    Config {
        database: DatabaseConfig {
            url: Some(url.to_owned()),
            service_key: Some("service-key".into()),
            anon_key: Some("anon-key".into()),
        },
        ..Config::default()
    }
}

pub fn config_with_completions(url: &str) -> Config {
    Config {
        completion: CompletionConfig {
            api_key: Some("completion-key".into()),
            api_url: url.to_owned(),
        },
        ..Config::default()
    }
}

pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Run one request through `app`; an empty body comes back as `Value::Null`.
pub async fn call(app: Router, req: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, body)
}

// ── Fake PostgREST ───────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct RecordedInsert {
    pub apikey: Option<String>,
    pub prefer: Option<String>,
    pub body: Value,
}

#[derive(Clone, Default)]
struct DatabaseState {
    inserts: Arc<Mutex<Vec<RecordedInsert>>>,
    fail: bool,
}

pub struct FakeDatabase {
    pub url: String,
    inserts: Arc<Mutex<Vec<RecordedInsert>>>,
}

impl FakeDatabase {
    pub async fn spawn() -> Self {
        Self::start(false).await
    }

    /// Every insert is refused with a PostgREST-style 403.
    pub async fn spawn_failing() -> Self {
        Self::start(true).await
    }

    async fn start(fail: bool) -> Self {
        let state = DatabaseState {
            fail,
            ..Default::default()
        };
        let inserts = state.inserts.clone();
        let router = Router::new()
            .route("/rest/v1/contact_submissions", post(fake_insert))
            .with_state(state);
        Self {
            url: spawn_upstream(router).await,
            inserts,
        }
    }

    pub fn inserts(&self) -> Vec<RecordedInsert> {
        self.inserts.lock().unwrap().clone()
    }
}

async fn fake_insert(
    State(state): State<DatabaseState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let text = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
    };
    if state.fail {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({
                "code": "42501",
                "message": "permission denied for table contact_submissions",
            })),
        );
    }
    state.inserts.lock().unwrap().push(RecordedInsert {
        apikey: text("apikey"),
        prefer: text("prefer"),
        body: body.clone(),
    });

    let mut row = body[0].clone();
    row["id"] = json!(1);
    row["created_at"] = json!("2026-01-01T00:00:00+00:00");
    (StatusCode::CREATED, Json(json!([row])))
}

// ── Fake completion API ──────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct RecordedCompletion {
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct CompletionsState {
    calls: Arc<Mutex<Vec<RecordedCompletion>>>,
    reply: Option<String>,
}

pub struct FakeCompletions {
    pub url: String,
    calls: Arc<Mutex<Vec<RecordedCompletion>>>,
}

impl FakeCompletions {
    pub async fn spawn(reply: &str) -> Self {
        Self::start(Some(reply.to_owned())).await
    }

    /// Every call is answered with an OpenAI-style 429.
    pub async fn spawn_failing() -> Self {
        Self::start(None).await
    }

    async fn start(reply: Option<String>) -> Self {
        let state = CompletionsState {
            calls: Arc::default(),
            reply,
        };
        let calls = state.calls.clone();
        let router = Router::new()
            .route("/chat/completions", post(fake_completion))
            .with_state(state);
        Self {
            url: spawn_upstream(router).await,
            calls,
        }
    }

    pub fn calls(&self) -> Vec<RecordedCompletion> {
        self.calls.lock().unwrap().clone()
    }
}

async fn fake_completion(
    State(state): State<CompletionsState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state.calls.lock().unwrap().push(RecordedCompletion {
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned),
        body,
    });
    match &state.reply {
        Some(reply) => (
            StatusCode::OK,
            Json(json!({
                "choices": [{ "message": { "role": "assistant", "content": reply } }],
            })),
        ),
        None => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "error": { "message": "rate limit reached", "type": "requests" } })),
        ),
    }
}
