//! Knowledge document loading
//!
//! The knowledge document is read from disk on every request; there is no
//! caching. A read failure is reported as [`Knowledge::Missing`] and rendered
//! as a fixed placeholder in prompts.

use std::path::{Path, PathBuf};

/// Text substituted into prompts when the knowledge document cannot be read
pub const KNOWLEDGE_PLACEHOLDER: &str = "Knowledge base file not found.";

/// Result of loading the knowledge document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Knowledge {
    /// Full document text
    Document(String),
    /// The document could not be read
    Missing,
}

impl Knowledge {
    /// Text to place in the prompt
    pub fn prompt_text(&self) -> &str {
        match self {
            Knowledge::Document(text) => text,
            Knowledge::Missing => KNOWLEDGE_PLACEHOLDER,
        }
    }

    /// Whether the document was found
    pub fn is_missing(&self) -> bool {
        matches!(self, Knowledge::Missing)
    }
}

/// Reads the configured knowledge document
#[derive(Debug, Clone)]
pub struct KnowledgeLoader {
    path: PathBuf,
}

impl KnowledgeLoader {
    /// Create a loader for the document at `path`
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Path of the knowledge document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document; any failure yields [`Knowledge::Missing`]
    pub fn load(&self) -> Knowledge {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Knowledge::Document(text),
            Err(e) => {
                tracing::warn!(
                    "Knowledge document {} unavailable: {}",
                    self.path.display(),
                    e
                );
                Knowledge::Missing
            }
        }
    }
}
