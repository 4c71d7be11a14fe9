use crate::application::ingest::IngestUseCase;
use crate::domain::entities::vector_record::VectorRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::vector_store::VectorStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

pub const SNAPSHOT_VERSION: u32 = 1;

/// Portable JSON dump of a store's contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub dimension: usize,
    pub exported_at: DateTime<Utc>,
    pub records: Vec<VectorRecord>,
}

pub struct SnapshotUseCase {
    store: Arc<dyn VectorStore>,
    ingest: IngestUseCase,
}

impl SnapshotUseCase {
    pub fn new(store: Arc<dyn VectorStore>) -> Self {
        Self {
            ingest: IngestUseCase::new(store.clone()),
            store,
        }
    }

    pub fn export(&self) -> Result<Snapshot, DomainError> {
        Ok(Snapshot {
            version: SNAPSHOT_VERSION,
            dimension: self.store.config().dimension,
            exported_at: Utc::now(),
            records: self.store.records()?,
        })
    }

    /// Loads a snapshot through the regular insert path. Nothing is written
    /// unless the whole snapshot fits.
    pub fn import(&self, snapshot: Snapshot) -> Result<usize, DomainError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(DomainError::Parse(format!(
                "unsupported snapshot version {}",
                snapshot.version
            )));
        }
        DomainError::check_dimension(self.store.config().dimension, snapshot.dimension)?;
        let count = self.ingest.add_batch(snapshot.records)?;
        info!(count, exported_at = %snapshot.exported_at, "snapshot imported");
        Ok(count)
    }

    pub fn import_json(&self, json: &str) -> Result<usize, DomainError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        self.import(snapshot)
    }

    pub fn import_file(&self, path: &Path) -> Result<usize, DomainError> {
        let json = std::fs::read_to_string(path)?;
        self.import_json(&json)
    }
}
