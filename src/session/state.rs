//! The state container for a chat session.
//!
//! Holds the append-only message list, the derived (question, answer)
//! history sent to the backend on the next turn, and the single
//! in-flight pending turn. All mutation goes through the transition
//! methods; each one is total over the current state.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
}

/// A retrieved passage with provenance metadata, passed through from
/// the backend unmodified. The wire field names match what the
/// retrieval service emits.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct SourceDocument {
    #[serde(rename = "pageContent")]
    pub content: String,
    #[serde(default)]
    pub metadata: serde_json::Map<String, Value>,
}

impl SourceDocument {
    pub fn source(&self) -> Option<&str> {
        self.metadata.get("source").and_then(Value::as_str)
    }

    pub fn page_number(&self) -> Option<i64> {
        self.metadata.get("page_number").and_then(Value::as_i64)
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Message {
    pub role: Role,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_documents: Option<Vec<SourceDocument>>,
}

impl Message {
    pub fn user(text: &str) -> Self {
        Message {
            role: Role::User,
            text: text.to_string(),
            source_documents: None,
        }
    }

    pub fn assistant(text: &str, source_documents: Option<Vec<SourceDocument>>) -> Self {
        Message {
            role: Role::Assistant,
            text: text.to_string(),
            source_documents,
        }
    }
}

/// Errors surfaced to the session's user-visible error slot. Cleared
/// independently of the conversation itself.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SessionError {
    #[error("chat stream failed: {0}")]
    Transport(String),
    #[error("unrecognized stream event: {0}")]
    MalformedEvent(String),
}

/// The answer being assembled for the current turn. Exists only
/// between turn start and the terminal event or cancellation.
#[derive(Debug, Clone, PartialEq)]
struct PendingTurn {
    question: String,
    text: String,
    source_docs: Option<Vec<SourceDocument>>,
}

#[derive(Default)]
pub struct SessionState {
    messages: Vec<Message>,
    history: Vec<(String, String)>,
    pending: Option<PendingTurn>,
    loading: bool,
    last_error: Option<SessionError>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn history(&self) -> &[(String, String)] {
        &self.history
    }

    pub fn pending_text(&self) -> Option<&str> {
        self.pending.as_ref().map(|p| p.text.as_str())
    }

    pub fn pending_source_docs(&self) -> Option<&[SourceDocument]> {
        self.pending
            .as_ref()
            .and_then(|p| p.source_docs.as_deref())
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&SessionError> {
        self.last_error.as_ref()
    }

    pub fn push_user_message(&mut self, text: &str) {
        self.messages.push(Message::user(text));
    }

    pub fn push_assistant_message(&mut self, text: &str) {
        self.messages.push(Message::assistant(text, None));
    }

    /// Start assembling the answer for a new turn and raise the
    /// loading flag. There is never more than one pending turn.
    pub fn start_pending(&mut self, question: &str) {
        self.pending = Some(PendingTurn {
            question: question.to_string(),
            text: String::new(),
            source_docs: None,
        });
        self.loading = true;
    }

    /// Append a streamed fragment to the pending answer. Fragments
    /// arrive in order and are concatenated as-is.
    pub fn append_token(&mut self, fragment: &str) {
        if let Some(pending) = self.pending.as_mut() {
            pending.text.push_str(fragment);
        }
    }

    /// Replace the source documents awaiting attachment to the
    /// pending answer. If the backend announces sources more than
    /// once, the last write wins.
    pub fn set_source_docs(&mut self, docs: Vec<SourceDocument>) {
        if let Some(pending) = self.pending.as_mut() {
            pending.source_docs = Some(docs);
        }
    }

    /// Commit the pending turn: extend the history with the completed
    /// (question, answer) pair and append the assistant message with
    /// whatever sources accumulated.
    pub fn commit_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.history
                .push((pending.question, pending.text.clone()));
            self.messages
                .push(Message::assistant(&pending.text, pending.source_docs));
        }
        self.loading = false;
    }

    /// Drop the pending turn without committing it. A half-received
    /// answer never becomes permanent history.
    pub fn discard_pending(&mut self) {
        self.pending = None;
        self.loading = false;
    }

    pub fn set_error(&mut self, err: SessionError) {
        self.last_error = Some(err);
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }
}
