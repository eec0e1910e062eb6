//! Shared fixtures: an in-memory resource store that counts calls, and request helpers.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, HeaderMap, Method, Request, StatusCode},
    Router,
};
use resource_service::{AppError, AppState, Resource, ResourcePayload, ResourceRepository};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    Create,
    Read,
    ReadAll,
    Update,
    Delete,
}

#[derive(Default)]
struct Inner {
    rows: BTreeMap<i32, String>,
    next_id: i32,
    calls: HashMap<Op, usize>,
    failures: HashMap<Op, String>,
    created: Vec<String>,
    updated: Vec<(i32, String)>,
}

#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(InMemoryStore::default())
    }

    pub fn with_rows(rows: &[(i32, &str)]) -> Arc<Self> {
        let store = InMemoryStore::default();
        {
            let mut inner = store.inner.lock().unwrap();
            for (id, name) in rows {
                inner.rows.insert(*id, name.to_string());
            }
            inner.next_id = rows.iter().map(|(id, _)| *id).max().unwrap_or(0);
        }
        Arc::new(store)
    }

    /// Make every later call to `op` fail with a database error carrying `message`.
    pub fn fail(&self, op: Op, message: &str) {
        self.inner.lock().unwrap().failures.insert(op, message.to_string());
    }

    pub fn calls(&self, op: Op) -> usize {
        self.inner.lock().unwrap().calls.get(&op).copied().unwrap_or(0)
    }

    pub fn created(&self) -> Vec<String> {
        self.inner.lock().unwrap().created.clone()
    }

    pub fn updated(&self) -> Vec<(i32, String)> {
        self.inner.lock().unwrap().updated.clone()
    }

    pub fn name_of(&self, id: i32) -> Option<String> {
        self.inner.lock().unwrap().rows.get(&id).cloned()
    }

    fn enter(&self, op: Op) -> Result<std::sync::MutexGuard<'_, Inner>, AppError> {
        let mut inner = self.inner.lock().unwrap();
        *inner.calls.entry(op).or_default() += 1;
        if let Some(message) = inner.failures.get(&op) {
            return Err(AppError::Db(sqlx::Error::Protocol(message.clone())));
        }
        Ok(inner)
    }
}

#[async_trait]
impl ResourceRepository for InMemoryStore {
    async fn create(&self, payload: &ResourcePayload) -> Result<i32, AppError> {
        let mut inner = self.enter(Op::Create)?;
        inner.next_id += 1;
        let id = inner.next_id;
        inner.rows.insert(id, payload.name.clone());
        inner.created.push(payload.name.clone());
        Ok(id)
    }

    async fn read(&self, id: i32) -> Result<Resource, AppError> {
        let inner = self.enter(Op::Read)?;
        inner
            .rows
            .get(&id)
            .map(|name| Resource { id, name: name.clone() })
            .ok_or_else(|| AppError::NotFound(format!("resource {} not found", id)))
    }

    async fn read_all(&self) -> Result<Vec<Resource>, AppError> {
        let inner = self.enter(Op::ReadAll)?;
        Ok(inner
            .rows
            .iter()
            .map(|(id, name)| Resource { id: *id, name: name.clone() })
            .collect())
    }

    async fn update(&self, id: i32, payload: &ResourcePayload) -> Result<(), AppError> {
        let mut inner = self.enter(Op::Update)?;
        inner.updated.push((id, payload.name.clone()));
        if let Some(name) = inner.rows.get_mut(&id) {
            *name = payload.name.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        let mut inner = self.enter(Op::Delete)?;
        inner.rows.remove(&id);
        Ok(())
    }
}

pub fn state(store: &Arc<InMemoryStore>) -> AppState {
    AppState::new(store.clone())
}

pub fn app(store: &Arc<InMemoryStore>) -> Router {
    resource_service::resource_routes(state(store))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    TestResponse {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

pub fn empty(method: Method, uri: &str) -> Request<Body> {
    Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
}

pub fn json(method: Method, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn untyped(method: Method, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(body.to_string()))
        .unwrap()
}
