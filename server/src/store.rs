//! SQLite-backed document store.
//!
//! Documents are JSON bodies grouped into named collections. The store only
//! appends and lists; there is no update, delete or query support.

use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use chrono::Utc;
use displaydoc::Display;
use rusqlite::{params, Connection};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Document store failures.
#[derive(Debug, Display, Error)]
pub enum StoreError {
    /// Database error: {0}
    Database(#[from] rusqlite::Error),

    /// Document encoding error: {0}
    Json(#[from] serde_json::Error),

    /// Store lock poisoned
    LockPoisoned,
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Thread-safe handle to the document store.
#[derive(Clone)]
pub struct DocumentStore {
    conn: Arc<Mutex<Connection>>,
}

impl DocumentStore {
    /// Open or create the store at `path`.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open a store that lives only as long as this handle (and its clones).
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Create the schema if it does not exist yet.
    pub fn migrate(&self) -> StoreResult<()> {
        let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                collection TEXT NOT NULL,
                id TEXT NOT NULL,
                body TEXT NOT NULL,
                created_at INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents(collection, seq);
            "#,
        )?;

        Ok(())
    }

    /// Append a document to `collection`.
    pub fn insert<T: Serialize>(
        &self,
        collection: &str,
        id: &str,
        document: &T,
    ) -> StoreResult<()> {
        let body = serde_json::to_string(document)?;
        let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;

        conn.execute(
            "INSERT INTO documents (collection, id, body, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![collection, id, body, Utc::now().timestamp()],
        )?;

        Ok(())
    }

    /// List up to `limit` documents of `collection` in insertion order.
    pub fn list_all<T: DeserializeOwned>(
        &self,
        collection: &str,
        limit: usize,
    ) -> StoreResult<Vec<T>> {
        let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;

        let mut stmt = conn.prepare(
            "SELECT body FROM documents WHERE collection = ?1 ORDER BY seq ASC LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![collection, limit as i64], |row| {
            row.get::<_, String>(0)
        })?;

        let mut documents = Vec::new();
        for row in rows {
            documents.push(serde_json::from_str(&row?)?);
        }

        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: String,
        text: String,
    }

    fn note(id: &str, text: &str) -> Note {
        Note {
            id: id.to_string(),
            text: text.to_string(),
        }
    }

    fn count(store: &DocumentStore, collection: &str) -> i64 {
        let conn = store.conn.lock().unwrap();
        conn.query_row(
            "SELECT COUNT(*) FROM documents WHERE collection = ?1",
            params![collection],
            |row| row.get(0),
        )
        .unwrap()
    }

    fn memory_store() -> DocumentStore {
        let store = DocumentStore::open_in_memory().unwrap();
        store.migrate().unwrap();
        store
    }

    #[test]
    fn test_insert_and_list_in_order() {
        let store = memory_store();
        for i in 0..5 {
            let n = note(&i.to_string(), &format!("note {}", i));
            store.insert("notes", &n.id, &n).unwrap();
        }

        let notes: Vec<Note> = store.list_all("notes", 1000).unwrap();
        assert_eq!(notes.len(), 5);
        assert_eq!(notes[0], note("0", "note 0"));
        assert_eq!(notes[4], note("4", "note 4"));
    }

    #[test]
    fn test_collections_are_separate() {
        let store = memory_store();
        store.insert("a", "1", &note("1", "in a")).unwrap();
        store.insert("b", "2", &note("2", "in b")).unwrap();

        let a: Vec<Note> = store.list_all("a", 10).unwrap();
        assert_eq!(a, vec![note("1", "in a")]);
        assert_eq!(count(&store, "b"), 1);
        assert_eq!(count(&store, "missing"), 0);
    }

    #[test]
    fn test_list_respects_limit() {
        let store = memory_store();
        for i in 0..10 {
            let n = note(&i.to_string(), "x");
            store.insert("notes", &n.id, &n).unwrap();
        }

        let notes: Vec<Note> = store.list_all("notes", 3).unwrap();
        assert_eq!(notes.len(), 3);
        assert_eq!(notes[2].id, "2");
    }

    #[test]
    fn test_persists_across_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("wlx.db");

        {
            let store = DocumentStore::open(&path).unwrap();
            store.migrate().unwrap();
            store.insert("notes", "1", &note("1", "kept")).unwrap();
        }

        let store = DocumentStore::open(&path).unwrap();
        store.migrate().unwrap();
        let notes: Vec<Note> = store.list_all("notes", 10).unwrap();
        assert_eq!(notes, vec![note("1", "kept")]);
    }

    #[test]
    fn test_wrong_shape_is_json_error() {
        let store = memory_store();
        store
            .insert("notes", "1", &serde_json::json!({ "unexpected": true }))
            .unwrap();

        let result: StoreResult<Vec<Note>> = store.list_all("notes", 10);
        assert!(matches!(result, Err(StoreError::Json(_))));
    }
}
