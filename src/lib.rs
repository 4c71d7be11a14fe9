pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logger;

use crate::application::factory::StoreFactory;
use crate::application::ingest::IngestUseCase;
use crate::application::search::SearchUseCase;
use crate::application::snapshot::{Snapshot, SnapshotUseCase};
use crate::application::stats::{StatsUseCase, StoreStats};
use crate::config::AppConfig;
use crate::domain::entities::vector_metadata::VectorMetadata;
use crate::domain::entities::vector_record::{SearchHit, VectorRecord};
use crate::domain::error::DomainError;
use crate::domain::ports::vector_store::{SearchOptions, VectorStore};
use std::path::Path;
use std::sync::Arc;

pub struct VideoVec {
    store: Arc<dyn VectorStore>,
    backends: Vec<String>,
    ingest_uc: IngestUseCase,
    search_uc: SearchUseCase,
    stats_uc: StatsUseCase,
    snapshot_uc: SnapshotUseCase,
}

impl VideoVec {
    pub fn new(config: &AppConfig) -> Result<Self, DomainError> {
        let factory = StoreFactory::with_builtin_backends(&config.db_path);
        let store = factory.create(&config.storage_config()?)?;
        let mut vv = Self::with_store(store);
        vv.backends = factory.backends();
        Ok(vv)
    }

    pub fn with_store(store: Arc<dyn VectorStore>) -> Self {
        Self {
            ingest_uc: IngestUseCase::new(store.clone()),
            search_uc: SearchUseCase::new(store.clone()),
            stats_uc: StatsUseCase::new(store.clone()),
            snapshot_uc: SnapshotUseCase::new(store.clone()),
            backends: vec![store.config().backend.clone()],
            store,
        }
    }

    pub fn store(&self) -> &Arc<dyn VectorStore> {
        &self.store
    }

    /// Names of the backends this instance could have been built with.
    pub fn backends(&self) -> &[String] {
        &self.backends
    }

    // Delegating methods
    pub fn add(&self, vector_id: &str, vector: &[f32], metadata: VectorMetadata) -> Result<(), DomainError> {
        self.store.add(vector_id, vector, metadata)
    }

    pub fn add_batch(&self, records: Vec<VectorRecord>) -> Result<usize, DomainError> {
        self.ingest_uc.add_batch(records)
    }

    pub fn get(&self, vector_id: &str) -> Result<VectorRecord, DomainError> {
        self.store.get(vector_id)
    }

    pub fn delete(&self, vector_id: &str) -> Result<(), DomainError> {
        self.store.delete(vector_id)
    }

    pub fn delete_source(&self, source_id: &str) -> Result<usize, DomainError> {
        self.ingest_uc.delete_source(source_id)
    }

    pub fn search(&self, query: &[f32], options: &SearchOptions) -> Result<Vec<SearchHit>, DomainError> {
        self.search_uc.similar(query, options)
    }

    pub fn similar_to(&self, vector_id: &str, options: &SearchOptions) -> Result<Vec<SearchHit>, DomainError> {
        self.search_uc.similar_to(vector_id, options)
    }

    pub fn clear(&self) -> Result<(), DomainError> {
        self.store.clear()
    }

    pub fn size(&self) -> Result<usize, DomainError> {
        self.store.size()
    }

    pub fn stats(&self) -> Result<StoreStats, DomainError> {
        self.stats_uc.stats()
    }

    pub fn export(&self) -> Result<Snapshot, DomainError> {
        self.snapshot_uc.export()
    }

    pub fn import(&self, snapshot: Snapshot) -> Result<usize, DomainError> {
        self.snapshot_uc.import(snapshot)
    }

    pub fn import_json(&self, json: &str) -> Result<usize, DomainError> {
        self.snapshot_uc.import_json(json)
    }

    pub fn import_file(&self, path: &Path) -> Result<usize, DomainError> {
        self.snapshot_uc.import_file(path)
    }
}
