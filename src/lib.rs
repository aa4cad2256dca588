//! CareGP Chat - knowledge-grounded chat gateway library
//!
//! Forwards user questions to a hosted language model, grounds each prompt in
//! a static knowledge document and keeps a per-session transcript in a JSON
//! session log.
//!
//! # Architecture
//!
//! - `server`: axum routes and request handling
//! - `storage`: session log model and the file-backed store
//! - `knowledge`: knowledge document loading
//! - `prompts`: prompt composition
//! - `chat_id`: session identifier generation
//! - `providers`: language-model provider abstraction (Gemini)
//! - `config`: configuration management and validation
//! - `error`: error types and result aliases
//! - `cli` / `commands`: command-line entry points
//!
//! # Example
//!
//! ```no_run
//! use caregp_chat::{server, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     config.validate()?;
//!     server::start_server(&config).await
//! }
//! ```

pub mod chat_id;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod knowledge;
pub mod prompts;
pub mod providers;
pub mod server;
pub mod storage;

// Re-export commonly used types
pub use config::Config;
pub use error::{ChatError, Result};
pub use knowledge::{Knowledge, KnowledgeLoader};
pub use server::{build_router, AppState};
pub use storage::{JsonFileStore, SessionLoad, SessionStore};

#[cfg(test)]
pub mod test_utils;
