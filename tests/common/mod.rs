//! Test helpers for pipeline tests.
//!
//! Provides a local HTTP stub that serves a canned review feed and records
//! every webhook POST it receives.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::routing::{get, post};
use axum::Router;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};

use appreview_notifier::config::Config;
use appreview_notifier::{CliArgs, FixedClock};

/// A recorded webhook request.
#[derive(Debug, Clone)]
pub struct RecordedPost {
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RecordedPost {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("webhook body is JSON")
    }

    pub fn text(&self) -> String {
        self.json()["blocks"][0]["text"]["text"]
            .as_str()
            .expect("message text")
            .to_string()
    }
}

struct StubState {
    feed_status: StatusCode,
    feed_body: String,
    hook_status: StatusCode,
    feed_requests: Mutex<Vec<String>>,
    posts: Mutex<Vec<RecordedPost>>,
}

/// Local feed + webhook server.
pub struct TestStub {
    pub addr: SocketAddr,
    state: Arc<StubState>,
}

impl TestStub {
    /// Serve `feed_body` with 200 and accept every webhook POST.
    pub async fn start(feed_body: impl Into<String>) -> Self {
        Self::start_with(StatusCode::OK, feed_body, StatusCode::OK).await
    }

    /// Serve with explicit feed and webhook statuses.
    pub async fn start_with(
        feed_status: StatusCode,
        feed_body: impl Into<String>,
        hook_status: StatusCode,
    ) -> Self {
        let state = Arc::new(StubState {
            feed_status,
            feed_body: feed_body.into(),
            hook_status,
            feed_requests: Mutex::new(Vec::new()),
            posts: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/:country/rss/customerreviews/*rest", get(serve_feed))
            .route("/hook", post(record_post))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn webhook_url(&self) -> String {
        format!("http://{}/hook", self.addr)
    }

    /// Config pointing the feed at this stub.
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.feed.base_url = self.base_url();
        config
    }

    pub fn args(&self, app_id: &str) -> CliArgs {
        CliArgs {
            app_id: app_id.to_string(),
            webhook_url: self.webhook_url(),
        }
    }

    /// Paths of feed requests received so far.
    pub fn feed_requests(&self) -> Vec<String> {
        self.state.feed_requests.lock().unwrap().clone()
    }

    /// Webhook POSTs received so far, in arrival order.
    pub fn posts(&self) -> Vec<RecordedPost> {
        self.state.posts.lock().unwrap().clone()
    }
}

async fn serve_feed(State(state): State<Arc<StubState>>, uri: Uri) -> (StatusCode, String) {
    state.feed_requests.lock().unwrap().push(uri.path().to_string());
    (state.feed_status, state.feed_body.clone())
}

async fn record_post(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.posts.lock().unwrap().push(RecordedPost {
        content_type,
        body: body.to_vec(),
    });
    state.hook_status
}

/// Instant the tests treat as "now": 2024-06-15T00:00:00Z.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap()
}

/// Cutoff for [`now`] with the default window: 2024-05-14T00:00:00Z.
pub fn default_cutoff() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 14, 0, 0, 0).unwrap()
}

pub fn clock() -> FixedClock {
    FixedClock(now())
}

/// One feed entry in the store's labeled-wrapper shape.
pub fn entry(title: &str, author: &str, content: &str, rating: &str, updated: &str) -> Value {
    json!({
        "author": {
            "uri": {"label": format!("https://itunes.apple.com/jp/reviews/{author}")},
            "name": {"label": author},
            "label": ""
        },
        "updated": {"label": updated},
        "im:rating": {"label": rating},
        "im:version": {"label": "1.0.0"},
        "id": {"label": "1"},
        "title": {"label": title},
        "content": {"label": content, "attributes": {"type": "text"}},
        "link": {"attributes": {"rel": "related", "href": "https://itunes.apple.com/jp/review?id=1"}}
    })
}

/// A feed document holding `entries`.
pub fn feed(entries: Vec<Value>) -> String {
    json!({
        "feed": {
            "author": {"name": {"label": "iTunes Store"}, "uri": {"label": "http://www.apple.com/jp/itunes/"}},
            "entry": entries,
            "updated": {"label": "2024-06-14T23:00:00-07:00"}
        }
    })
    .to_string()
}
