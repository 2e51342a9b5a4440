#![allow(dead_code)]

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use client::{ClientConfig, JobsClient};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::task::JoinHandle;

/// One request as the stub saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub content_type: Option<String>,
    /// How many `Content-Type` headers arrived.
    pub content_type_count: usize,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body is JSON")
    }
}

#[derive(Clone)]
struct StubState {
    requests: Arc<Mutex<Vec<Recorded>>>,
    status: StatusCode,
    reply: Value,
    delay: Option<Duration>,
}

/// Backend that records every request and answers them all the same way.
pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
    handle: JoinHandle<()>,
}

impl StubServer {
    pub async fn start(status: u16, reply: Value) -> Self {
        Self::start_with_delay(status, reply, None).await
    }

    pub async fn start_with_delay(status: u16, reply: Value, delay: Option<Duration>) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            requests: requests.clone(),
            status: StatusCode::from_u16(status).unwrap(),
            reply,
            delay,
        };
        let app = Router::new().fallback(record).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
            handle,
        }
    }

    pub fn client(&self) -> JobsClient {
        JobsClient::new(ClientConfig::new(self.base_url.clone())).unwrap()
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn record(
    State(state): State<StubState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.requests.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        content_type_count: headers.get_all(header::CONTENT_TYPE).iter().count(),
        body: body.to_vec(),
    });

    if let Some(delay) = state.delay {
        tokio::time::sleep(delay).await;
    }
    (state.status, Json(state.reply)).into_response()
}

/// Backend that sends a status line and headers, then never finishes the
/// body. Returns its base URL.
pub async fn start_stalled_body(status_line: &'static str) -> (String, JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let head = format!(
                    "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: 64\r\n\r\n{{"
                );
                let _ = socket.write_all(head.as_bytes()).await;
                tokio::time::sleep(Duration::from_secs(30)).await;
            });
        }
    });

    (format!("http://{addr}"), handle)
}

/// Address nothing is listening on.
pub fn closed_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

/// Client pointed at an address that refuses connections.
pub fn unreachable_client() -> JobsClient {
    JobsClient::new(ClientConfig::new(format!("http://{}", closed_addr()))).unwrap()
}

/// Real dev server seeded with `count` jobs.
pub async fn spawn_dev_server(count: usize) -> (String, JoinHandle<()>) {
    let jobs = (1..=count)
        .map(|i| common::Job {
            title: format!("Job {i}"),
            kind: "Full-Time".to_string(),
            ..common::Job::default()
        })
        .collect();
    let store = server::JobStore::with_jobs(jobs);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, server::app(store)).await.unwrap();
    });
    (format!("http://{addr}"), handle)
}
