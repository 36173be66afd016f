use anyhow::Result;

use crate::core::AppConfig;
use crate::core::db::async_db;
use crate::docs::db::find_document_chunks;
use crate::docs::prepare_labels;

pub async fn run(name: &str, config: &AppConfig) -> Result<()> {
    let db = async_db(&config.db_path).await?;
    let chunks = find_document_chunks(&db, name).await?;

    if chunks.is_empty() {
        println!("No chunks found for document {}", name);
        return Ok(());
    }

    for chunk in prepare_labels(&chunks) {
        println!("{}", chunk.label);
        println!("{}\n", chunk.body);
    }

    Ok(())
}
