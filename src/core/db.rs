use anyhow::{Error, Result};
use tokio_rusqlite::Connection;

/// Open the document store database at the given storage path.
pub async fn async_db(db_path: &str) -> Result<Connection, Error> {
    let db = Connection::open(format!("{}/docchat.sqlite3", db_path)).await?;
    Ok(db)
}

/// Create the schema if it doesn't already exist. Chunk rows keep
/// their insertion order via the autoincrement ID which is also the
/// display order of a document's sections.
pub fn initialize_db(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS chunk (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            document TEXT NOT NULL,
            header TEXT NOT NULL DEFAULT '',
            body TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_chunk_document ON chunk (document);
        "#,
    )?;
    Ok(())
}
