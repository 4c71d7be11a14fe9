use crate::domain::entities::vector_record::VectorRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::vector_store::VectorStore;
use std::sync::Arc;
use tracing::{info, warn};

pub struct IngestUseCase {
    store: Arc<dyn VectorStore>,
}

impl IngestUseCase {
    pub fn new(store: Arc<dyn VectorStore>) -> Self {
        Self { store }
    }

    pub fn add_one(&self, record: VectorRecord) -> Result<(), DomainError> {
        let id = record.metadata.vector_id.clone();
        self.store.add(&id, &record.vector, record.metadata)
    }

    /// Adds every record or none of them. The store validates, checks
    /// capacity and inserts under a single lock, so concurrent batches cannot
    /// interleave past `max_vectors`.
    pub fn add_batch(&self, records: Vec<VectorRecord>) -> Result<usize, DomainError> {
        let total = records.len();
        match self.store.add_batch(records) {
            Ok(applied) => {
                info!(applied, "batch ingested");
                Ok(applied)
            }
            Err(e) => {
                warn!(total, error = %e, "batch rejected");
                Err(e)
            }
        }
    }

    /// Removes every vector derived from `source_id`, e.g. before a video is
    /// re-processed. Returns how many were removed.
    pub fn delete_source(&self, source_id: &str) -> Result<usize, DomainError> {
        let ids: Vec<String> = self
            .store
            .records()?
            .into_iter()
            .filter(|r| r.metadata.source_id == source_id)
            .map(|r| r.metadata.vector_id)
            .collect();
        for id in &ids {
            self.store.delete(id)?;
        }
        info!(source_id, removed = ids.len(), "source removed");
        Ok(ids.len())
    }
}
