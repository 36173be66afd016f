//! Display labels for stored document chunks.

/// A stored fragment of a document with the section header it was
/// chunked under. A missing header is stored as the empty string.
#[derive(Clone, Debug, PartialEq)]
pub struct Chunk {
    pub id: i64,
    pub header: String,
    pub body: String,
}

/// A chunk ready for display with a disambiguated section label.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayChunk {
    pub id: i64,
    pub label: String,
    pub body: String,
}

/// Resolves duplicate section headers into stable display labels.
///
/// Sections large enough to span multiple storage records share a
/// header; the first occurrence keeps the bare header and each
/// consecutive repeat is suffixed "Part 2", "Part 3", and so on. A
/// header that reappears after a different one interrupts the run
/// restarts its own numbering. Chunk order is preserved.
///
/// Operates on stored headers, not on its own output: applying it to
/// already-suffixed labels is not supported.
pub fn prepare_labels(chunks: &[Chunk]) -> Vec<DisplayChunk> {
    let mut prev_header: Option<&str> = None;
    let mut part = 1;
    let mut display = Vec::with_capacity(chunks.len());

    for chunk in chunks {
        let header = chunk.header.as_str();
        let label = if prev_header == Some(header) {
            part += 1;
            format!("{} Part {}", header, part)
        } else {
            prev_header = Some(header);
            part = 1;
            header.to_string()
        };
        display.push(DisplayChunk {
            id: chunk.id,
            label,
            body: chunk.body.clone(),
        });
    }

    display
}
