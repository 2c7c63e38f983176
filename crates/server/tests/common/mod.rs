#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use mercado_core::store::{DocumentStore, StoreError, StorePath};
use mercado_server::api::{self, AppState};
use mercado_server::store::MemoryStore;
use serde_json::{Map, Value};
use tower::ServiceExt;

/// Memory store that counts reads and mutations.
#[derive(Clone)]
pub struct CountingStore {
    inner: Arc<MemoryStore>,
    reads: Arc<AtomicUsize>,
    writes: Arc<AtomicUsize>,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::with_data(Value::Object(Map::new()))
    }

    pub fn with_data(data: Value) -> Self {
        let data = match data {
            Value::Object(map) => map,
            other => panic!("seed data must be an object, got {other}"),
        };
        Self {
            inner: Arc::new(MemoryStore::with_data(data)),
            reads: Arc::new(AtomicUsize::new(0)),
            writes: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Raw value stored at `path`, bypassing the counters.
    pub async fn raw(&self, path: &str) -> Option<Value> {
        let mut segments = path.split('/');
        let root = segments.next().expect("path has a collection");
        let mut store_path = StorePath::collection(collection(root));
        for segment in segments {
            store_path = store_path.child(segment).expect("valid key");
        }
        self.inner.read(&store_path).await.expect("memory store never fails")
    }
}

fn collection(name: &str) -> mercado_core::store::Collection {
    use mercado_core::store::Collection;
    match name {
        "productos" => Collection::Products,
        "usuarios" => Collection::Users,
        "chats" => Collection::Chats,
        "mensaje" => Collection::Messages,
        other => panic!("unknown collection {other}"),
    }
}

#[async_trait]
impl DocumentStore for CountingStore {
    async fn read(&self, path: &StorePath) -> Result<Option<Value>, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.read(path).await
    }

    async fn push(&self, path: &StorePath, value: Value) -> Result<String, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.push(path, value).await
    }

    async fn update(&self, path: &StorePath, fields: Map<String, Value>) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.update(path, fields).await
    }

    async fn delete(&self, path: &StorePath) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(path).await
    }
}

/// Store whose every call fails, as an unreachable database would.
pub struct FailingStore;

#[async_trait]
impl DocumentStore for FailingStore {
    async fn read(&self, _path: &StorePath) -> Result<Option<Value>, StoreError> {
        Err(StoreError::Transport("connection refused".to_string()))
    }

    async fn push(&self, _path: &StorePath, _value: Value) -> Result<String, StoreError> {
        Err(StoreError::Transport("connection refused".to_string()))
    }

    async fn update(&self, _path: &StorePath, _fields: Map<String, Value>) -> Result<(), StoreError> {
        Err(StoreError::Transport("connection refused".to_string()))
    }

    async fn delete(&self, _path: &StorePath) -> Result<(), StoreError> {
        Err(StoreError::Transport("connection refused".to_string()))
    }
}

pub fn app(store: Arc<dyn DocumentStore>) -> Router {
    api::router(AppState::new(store), &[])
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    send_request(app, request).await
}

pub async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body should be JSON")
    };
    (status, body)
}
