//! Shared helpers for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use caregp_chat::error::{ChatError, Result};
use caregp_chat::providers::{CompletionResponse, Provider};
use caregp_chat::{build_router, AppState, JsonFileStore, KnowledgeLoader};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tower::ServiceExt;

/// Provider that replays a fixed reply and records every prompt it receives
pub struct ScriptedProvider {
    reply: std::result::Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn answering(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> String {
        "scripted-model".to_string()
    }

    async fn complete(&self, prompt: &str) -> Result<CompletionResponse> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Ok(text) => Ok(CompletionResponse::new(text.clone())),
            Err(message) => Err(ChatError::Provider(message.clone()).into()),
        }
    }
}

/// A router wired to temp-dir backed collaborators
pub struct TestApp {
    pub router: Router,
    pub provider: Arc<ScriptedProvider>,
    pub session_log: PathBuf,
    pub knowledge_path: PathBuf,
    pub dir: TempDir,
}

pub fn test_app(provider: ScriptedProvider, knowledge: Option<&str>) -> TestApp {
    let dir = TempDir::new().expect("failed to create tempdir");
    let session_log = dir.path().join("user_sessions.json");
    let knowledge_path = dir.path().join("knowledge.txt");
    if let Some(text) = knowledge {
        std::fs::write(&knowledge_path, text).expect("failed to write knowledge file");
    }
    test_app_with_paths(provider, dir, session_log, knowledge_path)
}

pub fn test_app_with_paths(
    provider: ScriptedProvider,
    dir: TempDir,
    session_log: PathBuf,
    knowledge_path: PathBuf,
) -> TestApp {
    let provider = Arc::new(provider);
    let state = AppState::new(
        provider.clone(),
        Arc::new(JsonFileStore::new(&session_log)),
        KnowledgeLoader::new(&knowledge_path),
    );

    TestApp {
        router: build_router(state),
        provider,
        session_log,
        knowledge_path,
        dir,
    }
}

/// Send a request and return the status and raw body
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, String) {
    let request = match body {
        Some(b) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// POST a JSON value to `/chat` and parse the JSON reply
pub async fn post_chat(
    router: &Router,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let (status, text) = send(router, Method::POST, "/chat", Some(&body.to_string())).await;
    (status, serde_json::from_str(&text).unwrap())
}

/// Read the session log as raw JSON
pub fn read_log(path: &Path) -> serde_json::Value {
    let contents = std::fs::read_to_string(path).expect("session log missing");
    serde_json::from_str(&contents).expect("session log is not JSON")
}
