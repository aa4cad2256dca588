//! Session log persistence
//!
//! The session log is a single JSON document holding every chat session in
//! creation order. Handlers only see the [`SessionStore`] capability set
//! (`load` and `append`), so the flat-file backend can be replaced by a
//! transactional store without touching request handling.

use crate::error::{ChatError, Result};
use anyhow::Context;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub mod types;
pub use types::{utc_timestamp, Message, Session};

/// Outcome of reading the session log
///
/// A missing or unreadable document is a valid outcome rather than an error:
/// request handling treats both as an empty collection, while tests and the
/// CLI can still tell them apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionLoad {
    /// The document was read and parsed
    Loaded(Vec<Session>),
    /// No document exists yet
    Missing,
    /// The document exists but does not match the expected shape
    Malformed(String),
}

impl SessionLoad {
    /// Consume the outcome, yielding the session collection (empty unless loaded)
    pub fn into_sessions(self) -> Vec<Session> {
        match self {
            SessionLoad::Loaded(sessions) => sessions,
            SessionLoad::Missing | SessionLoad::Malformed(_) => Vec::new(),
        }
    }

    /// Borrow the session collection (empty unless loaded)
    pub fn sessions(&self) -> &[Session] {
        match self {
            SessionLoad::Loaded(sessions) => sessions,
            SessionLoad::Missing | SessionLoad::Malformed(_) => &[],
        }
    }

    /// Find a session by chat identifier
    pub fn find(&self, chat_id: &str) -> Option<&Session> {
        self.sessions().iter().find(|s| s.chat_id == chat_id)
    }
}

/// Storage capability for chat transcripts
pub trait SessionStore: Send + Sync {
    /// Read the full session collection
    ///
    /// # Errors
    ///
    /// Returns error only for I/O failures other than a missing document
    fn load(&self) -> Result<SessionLoad>;

    /// Append an exchange to the session for `chat_id`, creating it if absent,
    /// and persist the collection. Returns the updated session.
    ///
    /// # Errors
    ///
    /// Returns error if the collection cannot be written back
    fn append(&self, chat_id: &str, question: &str, response: &str) -> Result<Session>;
}

/// Session store backed by a single pretty-printed JSON file
///
/// The load-modify-save cycle is serialised within the process. Separate
/// processes writing the same file are not coordinated and can lose updates.
pub struct JsonFileStore {
    path: PathBuf,
    max_sessions: Option<usize>,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Create a store for the given session log path
    ///
    /// # Examples
    ///
    /// ```
    /// use caregp_chat::storage::{JsonFileStore, SessionStore};
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let store = JsonFileStore::new(dir.path().join("user_sessions.json"));
    /// assert!(store.load().unwrap().sessions().is_empty());
    /// ```
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            max_sessions: None,
            write_lock: Mutex::new(()),
        }
    }

    /// Keep at most `max_sessions` sessions, dropping the oldest on append
    pub fn with_max_sessions(mut self, max_sessions: Option<usize>) -> Self {
        self.max_sessions = max_sessions;
        self
    }

    /// Path of the session log document
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<SessionLoad> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(SessionLoad::Missing),
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Ok(SessionLoad::Malformed(e.to_string()))
            }
            Err(e) => {
                return Err(ChatError::Storage(format!(
                    "Failed to read session log {}: {}",
                    self.path.display(),
                    e
                ))
                .into())
            }
        };

        // Invalid UTF-8 is reported by serde_json as a parse error
        match serde_json::from_slice::<Vec<Session>>(&bytes) {
            Ok(sessions) => Ok(SessionLoad::Loaded(sessions)),
            Err(e) => Ok(SessionLoad::Malformed(e.to_string())),
        }
    }

    fn write(&self, sessions: &[Session]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(ChatError::from)
                    .context("Failed to create session log directory")?;
            }
        }

        let contents = serde_json::to_string_pretty(sessions).map_err(ChatError::from)?;

        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| {
                ChatError::Storage(format!(
                    "Session log path has no file name: {}",
                    self.path.display()
                ))
            })?
            .to_string_lossy();
        let tmp_path = self.path.with_file_name(format!("{}.tmp", file_name));

        std::fs::write(&tmp_path, contents).map_err(|e| {
            ChatError::Storage(format!("Failed to write {}: {}", tmp_path.display(), e))
        })?;
        std::fs::rename(&tmp_path, &self.path).map_err(|e| {
            ChatError::Storage(format!(
                "Failed to replace session log {}: {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(())
    }
}

impl SessionStore for JsonFileStore {
    fn load(&self) -> Result<SessionLoad> {
        self.read()
    }

    fn append(&self, chat_id: &str, question: &str, response: &str) -> Result<Session> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let loaded = self.read()?;
        match &loaded {
            SessionLoad::Loaded(_) => {}
            SessionLoad::Missing => {
                tracing::debug!("Session log {} not found, starting empty", self.path.display());
            }
            SessionLoad::Malformed(reason) => {
                tracing::warn!(
                    "Session log {} is malformed ({}), previous history will be replaced",
                    self.path.display(),
                    reason
                );
            }
        }
        let mut sessions = loaded.into_sessions();

        let index = match sessions.iter().position(|s| s.chat_id == chat_id) {
            Some(index) => index,
            None => {
                tracing::info!(chat_id = %chat_id, "Creating new session");
                sessions.push(Session::new(chat_id));
                sessions.len() - 1
            }
        };
        sessions[index].messages.push(Message::new(question, response));
        let updated = sessions[index].clone();

        if let Some(max_sessions) = self.max_sessions {
            apply_retention(&mut sessions, max_sessions, chat_id);
        }

        self.write(&sessions)?;

        tracing::debug!(
            chat_id = %chat_id,
            messages = updated.messages.len(),
            sessions = sessions.len(),
            "Session log updated"
        );

        Ok(updated)
    }
}

/// Drop the oldest sessions beyond `keep`, never the session for `chat_id`
fn apply_retention(sessions: &mut Vec<Session>, keep: usize, chat_id: &str) {
    let mut excess = sessions.len().saturating_sub(keep);
    if excess == 0 {
        return;
    }
    tracing::debug!("Dropping {} session(s) past retention limit {}", excess, keep);
    sessions.retain(|s| {
        if excess > 0 && s.chat_id != chat_id {
            excess -= 1;
            false
        } else {
            true
        }
    });
}
