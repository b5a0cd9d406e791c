//! Reusable test helpers for HTTP integration tests.
//!
//! Provides `TestApp` for building and sending requests through the full axum
//! router with in-memory collaborators, plus a loopback server for exercising
//! the real HTTP clients.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{self, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tokio::task::JoinHandle;
use tower::ServiceExt;
use quake_bot::api::{create_router, AppState};
use quake_bot::config::Config;
use quake_bot::line::signing::{sign_payload, SIGNATURE_HEADER};
use quake_bot::line::{MessagingError, Messenger};
use quake_bot::quake::{EventSource, FetchError, QuakeEvent};
use quake_bot::state::MemoryStore;

// ============================================================================
// Doubles
// ============================================================================

/// Event source returning a fixed list and counting calls.
#[derive(Default)]
pub struct StubSource {
    events: Mutex<Vec<QuakeEvent>>,
    fail: AtomicBool,
    calls: AtomicUsize,
}

impl StubSource {
    pub fn set_events(&self, events: Vec<QuakeEvent>) {
        *self.events.lock().unwrap() = events;
    }

    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EventSource for StubSource {
    async fn fetch_recent(&self) -> Result<Vec<QuakeEvent>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(FetchError::Status(500));
        }
        Ok(self.events.lock().unwrap().clone())
    }
}

/// Messenger that records pushes and replies instead of sending them.
#[derive(Default)]
pub struct RecordingMessenger {
    pub pushes: Mutex<Vec<(String, String)>>,
    pub replies: Mutex<Vec<(String, String)>>,
    fail: AtomicBool,
}

impl RecordingMessenger {
    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn pushes(&self) -> Vec<(String, String)> {
        self.pushes.lock().unwrap().clone()
    }

    pub fn replies(&self) -> Vec<(String, String)> {
        self.replies.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), MessagingError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(MessagingError::Api {
                status: 500,
                body: "upstream down".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn push_text(&self, to: &str, text: &str) -> Result<(), MessagingError> {
        self.check()?;
        self.pushes
            .lock()
            .unwrap()
            .push((to.to_string(), text.to_string()));
        Ok(())
    }

    async fn reply_text(&self, reply_token: &str, text: &str) -> Result<(), MessagingError> {
        self.check()?;
        self.replies
            .lock()
            .unwrap()
            .push((reply_token.to_string(), text.to_string()));
        Ok(())
    }
}

/// Build a quake event with fixed magnitude and place.
pub fn quake(id: &str, occurred_at_ms: i64) -> QuakeEvent {
    QuakeEvent {
        id: id.into(),
        magnitude: Some(5.2),
        place: Some("off the coast".into()),
        occurred_at_ms,
    }
}

// ============================================================================
// Test App
// ============================================================================

/// A test application wrapping the full axum router.
pub struct TestApp {
    pub router: Router,
    pub config: Arc<Config>,
    pub source: Arc<StubSource>,
    pub store: MemoryStore,
    pub messenger: Arc<RecordingMessenger>,
}

impl TestApp {
    /// Create a new test app using the default test config.
    pub fn new() -> Self {
        Self::with_config(Config::default_for_test())
    }

    /// Create a test app with a custom config.
    pub fn with_config(config: Config) -> Self {
        let source = Arc::new(StubSource::default());
        let store = MemoryStore::new();
        let messenger = Arc::new(RecordingMessenger::default());

        let state = AppState::new(
            config.clone(),
            source.clone(),
            Arc::new(store.clone()),
            messenger.clone(),
        );
        let router = create_router(state);

        Self {
            router,
            config: Arc::new(config),
            source,
            store,
            messenger,
        }
    }

    /// Build an HTTP request with the given method and URI.
    pub fn request(method: Method, uri: &str) -> http::request::Builder {
        Request::builder().method(method).uri(uri)
    }

    /// Send a request through the router via `tower::ServiceExt::oneshot`.
    pub async fn oneshot(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("oneshot request failed")
    }

    /// `GET uri` and return status plus body text.
    pub async fn get(&self, uri: &str) -> (u16, String) {
        let req = Self::request(Method::GET, uri)
            .body(Body::empty())
            .unwrap();
        let resp = self.oneshot(req).await;
        let status = resp.status().as_u16();
        (status, body_to_string(resp).await)
    }

    /// Post a webhook body signed with this app's channel secret.
    pub async fn post_signed_callback(&self, body: &str) -> (u16, String) {
        let signature = sign_payload(&self.config.line_channel_secret, body.as_bytes());
        self.post_callback(body, Some(&signature)).await
    }

    /// Post a webhook body with an arbitrary (or missing) signature.
    pub async fn post_callback(&self, body: &str, signature: Option<&str>) -> (u16, String) {
        let mut req = Self::request(Method::POST, "/callback")
            .header(http::header::CONTENT_TYPE, "application/json");
        if let Some(sig) = signature {
            req = req.header(SIGNATURE_HEADER, sig);
        }
        let resp = self.oneshot(req.body(Body::from(body.to_string())).unwrap()).await;
        let status = resp.status().as_u16();
        (status, body_to_string(resp).await)
    }
}

/// Collect a response body into a string.
pub async fn body_to_string(resp: Response<Body>) -> String {
    let bytes = resp
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}

/// Webhook body with a single text message from `user_id`.
pub fn text_event_body(reply_token: &str, user_id: &str, text: &str) -> String {
    serde_json::json!({
        "destination": "Ubot",
        "events": [{
            "type": "message",
            "mode": "active",
            "timestamp": 1_700_000_000_000_i64,
            "replyToken": reply_token,
            "source": {"type": "user", "userId": user_id},
            "message": {"id": "1", "type": "text", "text": text}
        }]
    })
    .to_string()
}

// ============================================================================
// Test Server
// ============================================================================

/// A running test server bound to a random port.
pub struct TestServer {
    /// Server address (127.0.0.1:PORT).
    pub addr: SocketAddr,
    /// Base URL for HTTP requests (e.g., `http://127.0.0.1:12345`).
    pub url: String,
    /// Handle to the server task for cleanup.
    _handle: JoinHandle<()>,
}

/// Spawn a real HTTP server on a random port.
pub async fn spawn_test_server(router: Router) -> TestServer {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test server");
    let addr = listener.local_addr().expect("Failed to get local addr");
    let url = format!("http://{addr}");

    let handle = tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Test server failed");
    });

    TestServer {
        addr,
        url,
        _handle: handle,
    }
}
