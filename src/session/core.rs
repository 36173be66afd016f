//! The session controller: validates submissions, opens one streaming
//! request per turn, and applies stream events to the session state.
//!
//! A turn runs as a spawned transport task feeding an unbounded
//! channel; the controller drains the channel one event at a time so
//! state is only ever touched from the submission path and the
//! event-application points. At most one turn is in flight.

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::event::StreamEvent;
use super::state::{SessionError, SessionState};
use super::transport;
use crate::core::AppConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("a question is required")]
    EmptyInput,
    #[error("a turn is already in progress")]
    TurnInProgress,
}

/// What a single-key trigger should do given the current input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// Run the submission path
    Submit,
    /// Swallow the key's default newline insertion
    Suppress,
    /// Let the key through unchanged
    PassThrough,
}

/// Enter with text submits; Enter with an empty input suppresses the
/// newline it would otherwise insert. Any other key passes through.
pub fn on_key_trigger(key: char, has_text: bool) -> KeyDisposition {
    match (key, has_text) {
        ('\n', true) => KeyDisposition::Submit,
        ('\n', false) => KeyDisposition::Suppress,
        _ => KeyDisposition::PassThrough,
    }
}

struct ActiveTurn {
    rx: mpsc::UnboundedReceiver<String>,
    handle: JoinHandle<anyhow::Result<()>>,
}

pub struct Session {
    api_url: String,
    state: SessionState,
    turn: Option<ActiveTurn>,
}

impl Session {
    pub fn new(config: &AppConfig) -> Self {
        let mut state = SessionState::new();
        if !config.greeting.is_empty() {
            state.push_assistant_message(&config.greeting);
        }
        Self {
            api_url: config.api_url.clone(),
            state,
            turn: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn clear_error(&mut self) {
        self.state.clear_error();
    }

    /// Validates the input and starts a new turn. The history carried
    /// by the request is captured before this turn's user message is
    /// appended so the backend sees prior turns only.
    pub fn submit(&mut self, raw_input: &str) -> Result<(), SubmitError> {
        let question = raw_input.trim();
        if question.is_empty() {
            return Err(SubmitError::EmptyInput);
        }
        if self.state.loading() {
            return Err(SubmitError::TurnInProgress);
        }

        self.state.clear_error();
        let question = question.to_string();
        let history = self.state.history().to_vec();
        self.state.push_user_message(&question);
        self.state.start_pending(&question);

        let (tx, rx) = mpsc::unbounded_channel();
        let api_url = self.api_url.clone();
        let handle = tokio::spawn(async move {
            transport::stream_answer(tx, &question, &history, &api_url).await
        });
        self.turn = Some(ActiveTurn { rx, handle });

        Ok(())
    }

    /// Receives and applies the next event of the active turn.
    /// Returns `None` once the turn has committed, failed, or when no
    /// turn is active. Malformed payloads are reported to the error
    /// slot and skipped; the stream keeps listening.
    pub async fn next_event(&mut self) -> Option<StreamEvent> {
        loop {
            let data = match self.turn.as_mut()?.rx.recv().await {
                Some(data) => data,
                None => {
                    // The channel closed without the terminal
                    // sentinel: the transport dropped mid-turn
                    let turn = self.turn.take()?;
                    let reason = match turn.handle.await {
                        Ok(Ok(())) => "stream ended before the terminal event".to_string(),
                        Ok(Err(err)) => err.to_string(),
                        Err(err) => err.to_string(),
                    };
                    tracing::error!("chat stream failed: {}", reason);
                    self.state.set_error(SessionError::Transport(reason));
                    self.state.discard_pending();
                    return None;
                }
            };

            match StreamEvent::decode(&data) {
                Ok(StreamEvent::Done) => {
                    self.state.commit_pending();
                    self.turn = None;
                    return Some(StreamEvent::Done);
                }
                Ok(StreamEvent::SourceDocs(docs)) => {
                    self.state.set_source_docs(docs.clone());
                    return Some(StreamEvent::SourceDocs(docs));
                }
                Ok(StreamEvent::Token(fragment)) => {
                    self.state.append_token(&fragment);
                    return Some(StreamEvent::Token(fragment));
                }
                Err(err) => {
                    tracing::warn!("{}", err);
                    self.state.set_error(err);
                }
            }
        }
    }

    /// Drives the active turn until it commits or fails.
    pub async fn run_turn(&mut self) {
        while let Some(event) = self.next_event().await {
            if event == StreamEvent::Done {
                break;
            }
        }
    }

    /// Tears down the active turn without committing it. No further
    /// events from the aborted stream can reach the session state.
    pub fn cancel(&mut self) {
        if let Some(turn) = self.turn.take() {
            turn.handle.abort();
        }
        self.state.discard_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(api_url: &str) -> AppConfig {
        AppConfig {
            api_url: api_url.to_string(),
            storage_path: "./".to_string(),
            db_path: "./db".to_string(),
            greeting: String::new(),
        }
    }

    #[test]
    fn test_on_key_trigger() {
        assert_eq!(on_key_trigger('\n', true), KeyDisposition::Submit);
        assert_eq!(on_key_trigger('\n', false), KeyDisposition::Suppress);
        assert_eq!(on_key_trigger('a', true), KeyDisposition::PassThrough);
        assert_eq!(on_key_trigger('a', false), KeyDisposition::PassThrough);
    }

    #[tokio::test]
    async fn test_submit_rejects_blank_input() {
        let mut session = Session::new(&test_config("http://127.0.0.1:9"));

        for input in ["", "   ", "\n", " \t "] {
            assert_eq!(session.submit(input), Err(SubmitError::EmptyInput));
        }
        assert!(session.state().messages().is_empty());
        assert!(!session.state().loading());
    }

    #[tokio::test]
    async fn test_submit_rejects_overlapping_turns() {
        let mut session = Session::new(&test_config("http://127.0.0.1:9"));

        session.submit("first question").unwrap();
        assert!(session.state().loading());

        assert_eq!(
            session.submit("second question"),
            Err(SubmitError::TurnInProgress)
        );
        // No second user message was appended
        assert_eq!(session.state().messages().len(), 1);

        session.cancel();
        assert!(!session.state().loading());
    }

    #[tokio::test]
    async fn test_submit_trims_and_appends_user_message() {
        let mut session = Session::new(&test_config("http://127.0.0.1:9"));

        session.submit("  a question  ").unwrap();
        assert_eq!(session.state().messages().len(), 1);
        assert_eq!(session.state().messages()[0].text, "a question");
        assert_eq!(session.state().pending_text(), Some(""));

        session.cancel();
    }

    #[tokio::test]
    async fn test_greeting_is_seeded_without_history() {
        let mut config = test_config("http://127.0.0.1:9");
        config.greeting = "Hi. What would you like to know?".to_string();
        let session = Session::new(&config);

        assert_eq!(session.state().messages().len(), 1);
        assert_eq!(
            session.state().messages()[0].text,
            "Hi. What would you like to know?"
        );
        assert!(session.state().history().is_empty());
    }
}
