use crate::domain::entities::vector_metadata::VectorMetadata;
use crate::domain::entities::vector_record::{rank_hits, validate_vector, SearchHit, VectorRecord};
use crate::domain::error::DomainError;
use crate::domain::ports::vector_store::{SearchOptions, VectorStore};
use crate::domain::values::similarity::cosine_similarity;
use crate::domain::values::storage_config::VectorStorageConfig;
use crate::infrastructure::sqlite::migrations::run_migrations;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

const SELECT_COLS: &str = "id, vector, source_id, vector_type, timestamp, metadata";

/// Row as read from the `vectors` table, before domain validation.
struct RawRow {
    id: String,
    blob: Vec<u8>,
    source_id: String,
    vector_type: String,
    timestamp: Option<f64>,
    metadata: String,
}

/// Store persisted in a single SQLite table. Each row carries both the
/// vector and its metadata, so the two can never drift apart.
pub struct SqliteVectorStore {
    config: VectorStorageConfig,
    conn: Mutex<Connection>,
}

impl SqliteVectorStore {
    /// Opens (or creates) the database at `path`. `":memory:"` gives a
    /// private in-memory database.
    pub fn open(path: &str, config: VectorStorageConfig) -> Result<Self, DomainError> {
        let conn = Connection::open(path).map_err(|e| DomainError::Storage(format!("DB error: {e}")))?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DomainError::Storage(format!("WAL error: {e}")))?;
        Self::new(conn, config)
    }

    /// Fails with `DimensionMismatch` when the database already holds
    /// vectors of another dimension.
    pub fn new(conn: Connection, config: VectorStorageConfig) -> Result<Self, DomainError> {
        run_migrations(&conn)?;
        if let Some(stored) = Self::stored_dimension(&conn)? {
            if stored != config.dimension {
                return Err(DomainError::DimensionMismatch {
                    expected: config.dimension,
                    actual: stored,
                });
            }
        }
        Ok(Self {
            config,
            conn: Mutex::new(conn),
        })
    }

    fn stored_dimension(conn: &Connection) -> Result<Option<usize>, DomainError> {
        let dim: Option<i64> = conn
            .query_row("SELECT dimension FROM vectors LIMIT 1", [], |r| r.get(0))
            .optional()?;
        Ok(dim.map(|d| d as usize))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, DomainError> {
        self.conn.lock().map_err(|e| DomainError::Storage(e.to_string()))
    }

    fn serialize_vector(v: &[f32]) -> Vec<u8> {
        v.iter().flat_map(|f| f.to_le_bytes()).collect()
    }

    fn deserialize_vector(bytes: &[u8]) -> Vec<f32> {
        bytes
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect()
    }

    fn read_row(row: &rusqlite::Row) -> Result<RawRow, rusqlite::Error> {
        Ok(RawRow {
            id: row.get(0)?,
            blob: row.get(1)?,
            source_id: row.get(2)?,
            vector_type: row.get(3)?,
            timestamp: row.get(4)?,
            metadata: row.get(5)?,
        })
    }

    fn to_record(&self, raw: RawRow) -> Result<VectorRecord, DomainError> {
        let vector = Self::deserialize_vector(&raw.blob);
        if vector.len() != self.config.dimension {
            return Err(DomainError::Storage(format!(
                "corrupt vector '{}': {} components stored, expected {}",
                raw.id,
                vector.len(),
                self.config.dimension
            )));
        }
        let vector_type = raw.vector_type.parse().map_err(DomainError::Parse)?;
        let metadata = VectorMetadata {
            vector_id: raw.id,
            source_id: raw.source_id,
            vector_type,
            timestamp: raw.timestamp,
            metadata: serde_json::from_str(&raw.metadata)?,
        };
        Ok(VectorRecord::new(vector, metadata))
    }

    fn contains(conn: &Connection, vector_id: &str) -> Result<bool, DomainError> {
        Ok(conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM vectors WHERE id = ?1)",
            params![vector_id],
            |r| r.get(0),
        )?)
    }

    fn count(conn: &Connection) -> Result<usize, DomainError> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM vectors", [], |r| r.get(0))?;
        Ok(count as usize)
    }

    /// Writes one already validated record. Callers hold a transaction, so a
    /// failure here rolls back everything written with it.
    fn insert(&self, conn: &Connection, record: &VectorRecord) -> Result<(), DomainError> {
        let attributes = serde_json::to_string(&record.metadata.metadata)?;
        conn.execute(
            "INSERT OR REPLACE INTO vectors (id, vector, dimension, source_id, vector_type, timestamp, metadata, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                record.vector_id(),
                Self::serialize_vector(&record.vector),
                self.config.dimension as i64,
                record.metadata.source_id,
                record.metadata.vector_type.to_string(),
                record.metadata.timestamp,
                attributes,
                chrono::Utc::now().to_rfc3339(),
            ],
        )
        .map_err(|e| DomainError::Storage(format!("Failed to store vector: {e}")))?;
        Ok(())
    }

    fn load_all(&self, conn: &Connection) -> Result<Vec<VectorRecord>, DomainError> {
        let mut stmt = conn.prepare(&format!("SELECT {SELECT_COLS} FROM vectors ORDER BY id"))?;
        let rows = stmt
            .query_map([], Self::read_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(|raw| self.to_record(raw)).collect()
    }
}

impl VectorStore for SqliteVectorStore {
    fn config(&self) -> &VectorStorageConfig {
        &self.config
    }

    fn add(&self, vector_id: &str, vector: &[f32], metadata: VectorMetadata) -> Result<(), DomainError> {
        let record = VectorRecord::new(vector.to_vec(), metadata);
        record.validate(vector_id, self.config.dimension)?;

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let exists = Self::contains(&tx, vector_id)?;
        if !exists && Self::count(&tx)? >= self.config.max_vectors {
            return Err(DomainError::CapacityExceeded {
                max: self.config.max_vectors,
            });
        }
        self.insert(&tx, &record)?;
        tx.commit()?;
        debug!(vector_id, replaced = exists, "vector stored");
        Ok(())
    }

    fn add_batch(&self, records: Vec<VectorRecord>) -> Result<usize, DomainError> {
        for record in &records {
            record.validate(record.vector_id(), self.config.dimension)?;
        }

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let mut new_ids = HashSet::new();
        for record in &records {
            if !Self::contains(&tx, record.vector_id())? {
                new_ids.insert(record.vector_id());
            }
        }
        if Self::count(&tx)? + new_ids.len() > self.config.max_vectors {
            return Err(DomainError::CapacityExceeded {
                max: self.config.max_vectors,
            });
        }
        for record in &records {
            self.insert(&tx, record)?;
        }
        tx.commit()?;
        debug!(total = records.len(), new_ids = new_ids.len(), "batch stored");
        Ok(records.len())
    }

    fn get(&self, vector_id: &str) -> Result<VectorRecord, DomainError> {
        let conn = self.lock()?;
        let raw = conn
            .query_row(
                &format!("SELECT {SELECT_COLS} FROM vectors WHERE id = ?1"),
                params![vector_id],
                Self::read_row,
            )
            .optional()?
            .ok_or_else(|| DomainError::NotFound(vector_id.to_string()))?;
        self.to_record(raw)
    }

    fn delete(&self, vector_id: &str) -> Result<(), DomainError> {
        let conn = self.lock()?;
        let removed = conn.execute("DELETE FROM vectors WHERE id = ?1", params![vector_id])?;
        debug!(vector_id, removed, "vector deleted");
        Ok(())
    }

    fn search_filtered(&self, query: &[f32], options: &SearchOptions) -> Result<Vec<SearchHit>, DomainError> {
        validate_vector(query, self.config.dimension)?;
        let threshold = options.effective_threshold(&self.config)?;
        if options.top_k == 0 {
            return Ok(vec![]);
        }

        let records = {
            let conn = self.lock()?;
            self.load_all(&conn)?
        };
        let scanned = records.len();
        let hits: Vec<SearchHit> = records
            .into_iter()
            .filter(|r| options.filter.matches(&r.metadata))
            .filter_map(|r| {
                let score = cosine_similarity(query, &r.vector);
                (score >= threshold).then(|| SearchHit {
                    vector_id: r.metadata.vector_id.clone(),
                    score,
                    metadata: r.metadata,
                })
            })
            .collect();

        let hits = rank_hits(hits, options.top_k);
        debug!(scanned, returned = hits.len(), threshold, "search completed");
        Ok(hits)
    }

    fn clear(&self) -> Result<(), DomainError> {
        let conn = self.lock()?;
        let dropped = conn.execute("DELETE FROM vectors", [])?;
        info!(dropped, "store cleared");
        Ok(())
    }

    fn size(&self) -> Result<usize, DomainError> {
        let conn = self.lock()?;
        Self::count(&conn)
    }

    fn records(&self) -> Result<Vec<VectorRecord>, DomainError> {
        let conn = self.lock()?;
        self.load_all(&conn)
    }
}
