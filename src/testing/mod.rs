use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;

use crate::database::manager::DatabaseError;
use crate::database::models::{ColumnValue, Columns, Folder, Note, Resource};
use crate::database::store::Store;
use crate::services::{FoldersService, NotesService};
use crate::state::AppState;

/// Rows that the in-memory store knows how to build and patch
pub trait MemoryRecord: Resource {
    fn create(id: i32, columns: Columns) -> Self;
    fn apply(&mut self, columns: Columns);
}

impl MemoryRecord for Note {
    fn create(id: i32, columns: Columns) -> Self {
        let mut note = Note {
            id,
            name: String::new(),
            content: String::new(),
            folderid: None,
            modified: Utc::now(),
        };
        note.apply(columns);
        note
    }

    fn apply(&mut self, columns: Columns) {
        for (name, value) in columns {
            match (name, value) {
                ("name", ColumnValue::Text(s)) => self.name = s,
                ("content", ColumnValue::Text(s)) => self.content = s,
                ("folderid", ColumnValue::Integer(n)) => self.folderid = n,
                (other, _) => panic!("notes has no column {}", other),
            }
        }
    }
}

impl MemoryRecord for Folder {
    fn create(id: i32, columns: Columns) -> Self {
        let mut folder = Folder {
            id,
            name: String::new(),
        };
        folder.apply(columns);
        folder
    }

    fn apply(&mut self, columns: Columns) {
        for (name, value) in columns {
            match (name, value) {
                ("name", ColumnValue::Text(s)) => self.name = s,
                (other, _) => panic!("folders has no column {}", other),
            }
        }
    }
}

/// Store that keeps rows in a vector, ids starting at 1
pub struct MemoryStore<R> {
    rows: Mutex<Vec<R>>,
    next_id: AtomicI32,
}

impl<R> MemoryStore<R> {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI32::new(1),
        }
    }
}

#[async_trait]
impl<R: MemoryRecord> Store<R> for MemoryStore<R> {
    async fn select_all(&self) -> Result<Vec<R>, DatabaseError> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn select_by_id(&self, id: i32) -> Result<Option<R>, DatabaseError> {
        Ok(self.rows.lock().unwrap().iter().find(|r| r.id() == id).cloned())
    }

    async fn insert(&self, columns: Columns) -> Result<R, DatabaseError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = R::create(id, columns);
        self.rows.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: i32, columns: Columns) -> Result<u64, DatabaseError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|r| r.id() == id) {
            Some(record) => {
                record.apply(columns);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i32) -> Result<u64, DatabaseError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id() != id);
        Ok((before - rows.len()) as u64)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

pub fn memory_state() -> AppState {
    AppState::new(
        NotesService::new(Arc::new(MemoryStore::<Note>::new())),
        FoldersService::new(Arc::new(MemoryStore::<Folder>::new())),
    )
}

/// Full router over empty in-memory tables
pub fn test_app() -> Router {
    crate::routes::app(memory_state())
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// `Value::Null` for an empty body
    pub body: Value,
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    match body {
        Some(json) => send_raw(app, method, uri, Some("application/json"), &json.to_string()).await,
        None => send_raw(app, method, uri, None, "").await,
    }
}

/// Like `send`, with full control over the content type and raw body
pub async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
) -> TestResponse {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        request = request.header("content-type", content_type);
    }

    let response = app
        .clone()
        .oneshot(request.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    TestResponse { status, headers, body }
}
