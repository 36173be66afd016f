//! The streaming session engine: state, event decoding, transport,
//! and the single-flight turn controller.

pub mod core;
pub mod event;
pub mod state;
pub mod transport;

pub use self::core::{KeyDisposition, Session, SubmitError, on_key_trigger};
pub use event::StreamEvent;
pub use state::{Message, Role, SessionError, SessionState, SourceDocument};
