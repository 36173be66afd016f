//! Streaming transport for the question-answering backend.

use std::time::Duration;

use anyhow::{Error, Result};
use futures_util::StreamExt;
use serde_json::json;
use tokio::sync::mpsc;

use super::event::DONE_SENTINEL;

/// Opens the streaming request for one turn and forwards each SSE
/// `data` payload over the channel. Returns once the terminal
/// sentinel has been forwarded; dropping the response aborts the
/// underlying connection.
pub async fn stream_answer(
    tx: mpsc::UnboundedSender<String>,
    question: &str,
    history: &[(String, String)],
    api_url: &str,
) -> Result<(), Error> {
    let payload = json!({
        "question": question,
        "history": history,
    });
    let response = reqwest::Client::new()
        .post(api_url)
        .header("Content-Type", "application/json")
        .timeout(Duration::from_secs(60 * 5))
        .json(&payload)
        .send()
        .await?
        .error_for_status()?;

    let mut stream = response.bytes_stream();
    let mut buffer = String::new();

    'outer: while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        let chunk_str = std::str::from_utf8(&chunk)?;

        // Append new data to buffer. This is necessary to handle SSE
        // fragmentation over HTTP/2 frames.
        buffer.push_str(chunk_str);

        // Process all complete SSE events from the buffer
        while let Some(event_end) = buffer.find("\n\n") {
            let event_data = buffer[..event_end].to_string();
            buffer = buffer[event_end + 2..].to_string();

            // Skip empty events
            let event_data = event_data.trim();
            if event_data.is_empty() {
                continue;
            }

            if !event_data.starts_with("data: ") {
                continue;
            }

            // Extract the payload (after "data: ")
            let data = event_data[6..].trim();
            if data.is_empty() {
                continue;
            }

            // A send failure means the receiver was dropped by
            // cancellation so there is nothing left to do
            if tx.send(data.to_string()).is_err() {
                break 'outer;
            }

            if data == DONE_SENTINEL {
                break 'outer;
            }
        }
    }

    Ok(())
}
