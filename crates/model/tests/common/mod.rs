//! In-process mock provider endpoint.

#![allow(dead_code)]

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
};
use serde_json::Value;
use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};
use tokio::net::TcpListener;

/// A request the mock received.
#[derive(Debug, Clone)]
pub struct Captured {
    pub path: String,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Handle to a running mock server.
#[derive(Clone)]
pub struct Mock {
    pub base: String,
    status: StatusCode,
    reply: Arc<String>,
    delay: Duration,
    hits: Arc<AtomicUsize>,
    last: Arc<Mutex<Option<Captured>>>,
}

impl Mock {
    /// Start a mock answering every request with `status` and `reply`.
    pub async fn start(status: StatusCode, reply: impl Into<String>) -> Self {
        Self::start_delayed(status, reply, Duration::ZERO).await
    }

    /// Start a mock that waits `delay` before answering.
    pub async fn start_delayed(
        status: StatusCode,
        reply: impl Into<String>,
        delay: Duration,
    ) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let mock = Self {
            base: format!("http://{addr}"),
            status,
            reply: Arc::new(reply.into()),
            delay,
            hits: Arc::default(),
            last: Arc::default(),
        };
        let app = Router::new().fallback(handle).with_state(mock.clone());
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        mock
    }

    /// Start a mock answering 200 with `reply` serialized as JSON.
    pub async fn ok(reply: Value) -> Self {
        Self::start(StatusCode::OK, reply.to_string()).await
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn last(&self) -> Captured {
        self.last.lock().unwrap().clone().expect("no request received")
    }
}

async fn handle(
    State(mock): State<Mock>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    mock.hits.fetch_add(1, Ordering::SeqCst);
    *mock.last.lock().unwrap() = Some(Captured {
        path: uri.path().to_owned(),
        headers,
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });
    if !mock.delay.is_zero() {
        tokio::time::sleep(mock.delay).await;
    }
    (mock.status, mock.reply.as_str().to_owned())
}

/// A base URL nothing listens on.
pub async fn dead_base() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
