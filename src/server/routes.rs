//! Route handlers
//!
//! `GET /` answers a fixed liveness message. `POST /chat` validates the
//! message, resolves the chat identifier, grounds the prompt in the knowledge
//! document, calls the model once and records the exchange.

use super::error::{ApiError, ApiResult};
use super::AppState;
use crate::chat_id::generate_chat_id;
use crate::prompts::compose_prompt;
use anyhow::Context;
use axum::{body::Bytes, extract::State, Json};
use serde::{Deserialize, Serialize};

/// Body of the liveness endpoint
pub const LIVENESS_MESSAGE: &str = "CareGP Chatbot is running!";

/// Chat request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's question
    #[serde(default)]
    pub message: Option<String>,
    /// Existing session to continue; a new one is started when absent or empty
    #[serde(default)]
    pub chat_id: Option<String>,
}

/// Successful chat response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Trimmed model answer
    pub response: String,
    /// Session the exchange was recorded under
    pub chat_id: String,
}

/// `GET /`
pub async fn home() -> &'static str {
    LIVENESS_MESSAGE
}

/// `POST /chat`
pub async fn chat(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<ChatResponse>> {
    let request: ChatRequest =
        serde_json::from_slice(&body).context("Invalid JSON request body")?;

    let question = request
        .message
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();
    if question.is_empty() {
        return Err(ApiError::bad_request("Empty message"));
    }

    let chat_id = match request.chat_id.filter(|id| !id.is_empty()) {
        Some(id) => {
            tracing::debug!(chat_id = %id, "Continuing session");
            id
        }
        None => {
            let id = generate_chat_id();
            tracing::debug!(chat_id = %id, "Starting new session");
            id
        }
    };

    let loader = state.knowledge.clone();
    let knowledge = tokio::task::spawn_blocking(move || loader.load()).await?;
    let prompt = compose_prompt(&knowledge, &question);
    tracing::debug!(
        chat_id = %chat_id,
        question = %question,
        knowledge_missing = knowledge.is_missing(),
        "Composed prompt"
    );

    let completion = state.provider.complete(&prompt).await?;
    let answer = completion.text.trim().to_string();
    tracing::debug!(chat_id = %chat_id, response = %answer, "Model answered");

    let store = state.store.clone();
    let (log_id, log_question, log_answer) = (chat_id.clone(), question, answer.clone());
    tokio::task::spawn_blocking(move || store.append(&log_id, &log_question, &log_answer))
        .await?
        .context("Failed to record chat session")?;

    Ok(Json(ChatResponse {
        response: answer,
        chat_id,
    }))
}
