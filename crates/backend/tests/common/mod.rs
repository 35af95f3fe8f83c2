#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use wms_backend::routes::configure_routes;
use wms_backend::shared::data::db::initialize_database;
use wms_backend::shared::llm::{ChatMessage, LlmError, LlmProvider, LlmResponse};
use wms_backend::shared::local_store::{LocalStore, MemoryLocalStore};
use wms_backend::shared::AppState;

/// Провайдер с заранее заданным ответом; запоминает отправленные сообщения
pub struct FakeProvider {
    reply: Result<Option<String>, LlmError>,
    pub calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl FakeProvider {
    pub fn answering(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(Some(text.to_string())),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(error: LlmError) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(error),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmProvider for FakeProvider {
    async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<LlmResponse, LlmError> {
        self.calls.lock().unwrap().push(messages);
        match &self.reply {
            Ok(content) => Ok(LlmResponse {
                content: content.clone(),
                tokens_used: None,
                model: "fake".into(),
                finish_reason: Some("stop".into()),
            }),
            Err(e) => Err(e.clone()),
        }
    }

    fn provider_name(&self) -> &str {
        "Fake"
    }
}

/// Приложение поверх временной SQLite-базы и хранилища в памяти
pub struct TestApp {
    pub state: AppState,
    pub router: Router,
    _dir: TempDir,
}

pub async fn spawn_app(provider: Arc<dyn LlmProvider>) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let db = initialize_database(&dir.path().join("wms.db")).await.unwrap();
    let local_store: Arc<dyn LocalStore> = Arc::new(MemoryLocalStore::new());
    let state = AppState::new(db, local_store, provider).unwrap();
    let router = configure_routes(state.clone());
    TestApp {
        state,
        router,
        _dir: dir,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, body)
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(json_request("POST", uri, body.to_string())).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }
}

pub fn json_request(method: &str, uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

pub const SAMPLE_CSV: &str = "SKU,Quantity,ProductName\nGLD,5,Golden\nGA123,2,Golden 2\nRDB,3,Banana\n";
