use crate::domain::error::DomainError;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), DomainError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS vectors (
            id TEXT PRIMARY KEY,
            vector BLOB NOT NULL,
            dimension INTEGER NOT NULL,
            source_id TEXT NOT NULL,
            vector_type TEXT NOT NULL,
            timestamp REAL,
            metadata TEXT NOT NULL DEFAULT '{}',
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_vectors_source ON vectors(source_id);
        CREATE INDEX IF NOT EXISTS idx_vectors_type ON vectors(vector_type);
        ",
    )
    .map_err(|e| DomainError::Storage(format!("Migration failed: {e}")))
}
