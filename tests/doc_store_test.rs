//! Integration tests for the document store read path and display
//! label preparation.

use docchat::core::db::{async_db, initialize_db};
use docchat::docs::db::{find_document_chunks, insert_chunk};
use docchat::docs::prepare_labels;

async fn test_db() -> (tempfile::TempDir, tokio_rusqlite::Connection) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db = async_db(dir.path().to_str().unwrap())
        .await
        .expect("Failed to connect to db");
    db.call(|conn| {
        initialize_db(conn).expect("DB initialization failed");
        Ok(())
    })
    .await
    .unwrap();
    (dir, db)
}

#[tokio::test]
async fn it_returns_chunks_in_storage_order() {
    let (_dir, db) = test_db().await;

    insert_chunk(&db, "manual", "Overview", "first body")
        .await
        .unwrap();
    insert_chunk(&db, "manual", "Overview", "second body")
        .await
        .unwrap();
    insert_chunk(&db, "manual", "Pinout", "third body")
        .await
        .unwrap();
    // A different document must not leak into the result
    insert_chunk(&db, "other", "Overview", "unrelated")
        .await
        .unwrap();

    let chunks = find_document_chunks(&db, "manual").await.unwrap();
    assert_eq!(chunks.len(), 3);
    let bodies: Vec<&str> = chunks.iter().map(|c| c.body.as_str()).collect();
    assert_eq!(bodies, vec!["first body", "second body", "third body"]);
}

#[tokio::test]
async fn it_prepares_labels_for_stored_chunks() {
    let (_dir, db) = test_db().await;

    for (header, body) in [
        ("Overview", "a"),
        ("Overview", "b"),
        ("Pinout", "c"),
        ("Overview", "d"),
    ] {
        insert_chunk(&db, "manual", header, body).await.unwrap();
    }

    let chunks = find_document_chunks(&db, "manual").await.unwrap();
    let labels: Vec<String> = prepare_labels(&chunks)
        .into_iter()
        .map(|c| c.label)
        .collect();
    assert_eq!(
        labels,
        vec!["Overview", "Overview Part 2", "Pinout", "Overview"]
    );
}

#[tokio::test]
async fn it_returns_empty_for_unknown_documents() {
    let (_dir, db) = test_db().await;
    let chunks = find_document_chunks(&db, "missing").await.unwrap();
    assert!(chunks.is_empty());
    assert!(prepare_labels(&chunks).is_empty());
}
