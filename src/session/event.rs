//! Decoding of stream event payloads at the transport boundary.
//!
//! Each SSE `data` payload is one of three shapes: the terminal
//! sentinel, a source-document announcement, or a token fragment.
//! Anything else is a malformed event and never an unchecked field
//! access.

use serde::Deserialize;

use super::state::{SessionError, SourceDocument};

/// The literal payload signaling that no further tokens will arrive
/// for the current turn.
pub const DONE_SENTINEL: &str = "[DONE]";

#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    Done,
    SourceDocs(Vec<SourceDocument>),
    Token(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    SourceDocs {
        #[serde(rename = "sourceDocs")]
        source_docs: Vec<SourceDocument>,
    },
    Token {
        data: String,
    },
}

impl StreamEvent {
    pub fn decode(data: &str) -> Result<Self, SessionError> {
        if data == DONE_SENTINEL {
            return Ok(StreamEvent::Done);
        }
        match serde_json::from_str::<Payload>(data) {
            Ok(Payload::SourceDocs { source_docs }) => Ok(StreamEvent::SourceDocs(source_docs)),
            Ok(Payload::Token { data }) => Ok(StreamEvent::Token(data)),
            Err(_) => Err(SessionError::MalformedEvent(data.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_done() {
        assert_eq!(StreamEvent::decode("[DONE]").unwrap(), StreamEvent::Done);
    }

    #[test]
    fn test_decode_token() {
        let event = StreamEvent::decode(r#"{"data":"Hel"}"#).unwrap();
        assert_eq!(event, StreamEvent::Token("Hel".to_string()));
    }

    #[test]
    fn test_decode_source_docs() {
        let payload = r#"{
            "sourceDocs": [
                {"pageContent": "A passage", "metadata": {"source": "manual.pdf", "page_number": 3}},
                {"pageContent": "Another", "metadata": {"source": "manual.pdf"}}
            ]
        }"#;
        let event = StreamEvent::decode(payload).unwrap();
        match event {
            StreamEvent::SourceDocs(docs) => {
                assert_eq!(docs.len(), 2);
                assert_eq!(docs[0].content, "A passage");
                assert_eq!(docs[0].page_number(), Some(3));
                assert_eq!(docs[1].page_number(), None);
            }
            other => panic!("Expected SourceDocs, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_malformed_payloads() {
        for data in [
            "not json at all",
            r#"{"data": 5}"#,
            r#"{"sourceDocs": "nope"}"#,
            r#"{"something": "else"}"#,
        ] {
            match StreamEvent::decode(data) {
                Err(SessionError::MalformedEvent(payload)) => assert_eq!(payload, data),
                other => panic!("Expected MalformedEvent for {}, got {:?}", data, other),
            }
        }
    }
}
