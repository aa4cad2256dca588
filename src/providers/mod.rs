//! Provider module for CareGP Chat
//!
//! This module contains the language-model provider abstraction and the
//! Google Gemini implementation.

pub mod base;
pub mod gemini;

pub use base::{CompletionResponse, Provider, TokenUsage};
pub use gemini::GeminiProvider;

use crate::config::ProviderConfig;
use crate::error::{ChatError, Result};

/// Create a provider instance based on configuration
///
/// # Errors
///
/// Returns error if the provider type is unknown or initialization fails
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn Provider>> {
    match config.provider_type.as_str() {
        "gemini" => Ok(Box::new(GeminiProvider::new(config.gemini.clone())?)),
        other => Err(ChatError::Provider(format!("Unknown provider type: {}", other)).into()),
    }
}
