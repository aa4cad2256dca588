//! Base provider trait and common types
//!
//! This module defines the Provider trait that language-model backends
//! implement, along with the completion result types.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Token usage information from a completion
///
/// Tracks the number of tokens used in prompts and completions,
/// as reported by the AI provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of tokens in the prompt
    pub prompt_tokens: usize,
    /// Number of tokens in the completion
    pub completion_tokens: usize,
    /// Total tokens used (prompt + completion)
    pub total_tokens: usize,
}

impl TokenUsage {
    /// Create a new TokenUsage instance
    ///
    /// # Examples
    ///
    /// ```
    /// use caregp_chat::providers::TokenUsage;
    ///
    /// let usage = TokenUsage::new(100, 50);
    /// assert_eq!(usage.total_tokens, 150);
    /// ```
    pub fn new(prompt_tokens: usize, completion_tokens: usize) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// Response from a completion request
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    /// Generated text, untrimmed
    pub text: String,
    /// Optional token usage information
    pub usage: Option<TokenUsage>,
    /// Why generation stopped, when reported
    pub finish_reason: Option<String>,
}

impl CompletionResponse {
    /// Create a new CompletionResponse with text only
    ///
    /// # Examples
    ///
    /// ```
    /// use caregp_chat::providers::CompletionResponse;
    ///
    /// let response = CompletionResponse::new("Hello!");
    /// assert_eq!(response.text, "Hello!");
    /// assert!(response.usage.is_none());
    /// ```
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            usage: None,
            finish_reason: None,
        }
    }

    /// Attach token usage information
    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = Some(usage);
        self
    }
}

/// Language-model backend
///
/// Implementations perform one synchronous-from-the-caller's-view completion
/// per call. No retries are performed.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Short provider name used in logs
    fn name(&self) -> &str;

    /// Model identifier requests are sent to
    fn model(&self) -> String;

    /// Whether a credential is configured
    ///
    /// The default implementation assumes none is needed.
    fn has_credentials(&self) -> bool {
        true
    }

    /// Generate a completion for a single text prompt
    ///
    /// # Errors
    ///
    /// Returns error if the API call fails or the response carries no text
    async fn complete(&self, prompt: &str) -> Result<CompletionResponse>;
}
