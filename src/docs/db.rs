//! Document store reads backed by SQLite.

use anyhow::{Error, Result};
use tokio_rusqlite::Connection;

use super::labels::Chunk;

/// Returns a document's chunks in storage order.
pub async fn find_document_chunks(db: &Connection, document: &str) -> Result<Vec<Chunk>, Error> {
    let document = document.to_owned();
    let chunks = db
        .call(move |conn| {
            let mut stmt =
                conn.prepare("SELECT id, header, body FROM chunk WHERE document = ? ORDER BY id")?;
            let rows = stmt
                .query_map([document], |row| {
                    Ok(Chunk {
                        id: row.get(0)?,
                        header: row.get(1)?,
                        body: row.get(2)?,
                    })
                })?
                .filter_map(Result::ok)
                .collect::<Vec<Chunk>>();
            Ok(rows)
        })
        .await?;
    Ok(chunks)
}

pub async fn insert_chunk(
    db: &Connection,
    document: &str,
    header: &str,
    body: &str,
) -> Result<usize, Error> {
    let document = document.to_owned();
    let header = header.to_owned();
    let body = body.to_owned();
    let result = db
        .call(move |conn| {
            let mut stmt =
                conn.prepare("INSERT INTO chunk (document, header, body) VALUES (?, ?, ?)")?;
            let result = stmt.execute([document, header, body])?;
            Ok(result)
        })
        .await?;
    Ok(result)
}
