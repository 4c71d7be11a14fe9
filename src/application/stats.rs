use crate::domain::error::DomainError;
use crate::domain::ports::vector_store::VectorStore;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct StoreStats {
    pub backend: String,
    pub dimension: usize,
    pub max_vectors: usize,
    pub total_vectors: usize,
    pub by_type: Vec<(String, usize)>,
    pub sources: usize,
}

pub struct StatsUseCase {
    store: Arc<dyn VectorStore>,
}

impl StatsUseCase {
    pub fn new(store: Arc<dyn VectorStore>) -> Self {
        Self { store }
    }

    pub fn stats(&self) -> Result<StoreStats, DomainError> {
        let config = self.store.config();
        let records = self.store.records()?;

        let mut by_type: BTreeMap<String, usize> = BTreeMap::new();
        let mut sources = HashSet::new();
        for r in &records {
            *by_type.entry(r.metadata.vector_type.to_string()).or_default() += 1;
            sources.insert(r.metadata.source_id.as_str());
        }

        Ok(StoreStats {
            backend: config.backend.clone(),
            dimension: config.dimension,
            max_vectors: config.max_vectors,
            total_vectors: records.len(),
            by_type: by_type.into_iter().collect(),
            sources: sources.len(),
        })
    }
}
