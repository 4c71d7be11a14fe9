use crate::domain::error::DomainError;
use crate::domain::ports::vector_store::VectorStore;
use crate::domain::values::storage_config::VectorStorageConfig;
use crate::infrastructure::memory::flat_store::FlatVectorStore;
use crate::infrastructure::sqlite::vector_store::SqliteVectorStore;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

pub const MEMORY_BACKEND: &str = "memory";
pub const SQLITE_BACKEND: &str = "sqlite";

type Constructor =
    Box<dyn Fn(&VectorStorageConfig) -> Result<Arc<dyn VectorStore>, DomainError> + Send + Sync>;

/// Registry of named backends. Has no fallback: `create` only succeeds for
/// the backend the config names.
#[derive(Default)]
pub struct StoreFactory {
    backends: BTreeMap<String, Constructor>,
}

impl StoreFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// `memory` plus `sqlite` backed by the database at `db_path`.
    pub fn with_builtin_backends(db_path: &str) -> Self {
        let db_path = db_path.to_string();
        let mut factory = Self::new();
        factory.register(MEMORY_BACKEND, |config| {
            Ok(Arc::new(FlatVectorStore::new(config.clone())) as Arc<dyn VectorStore>)
        });
        factory.register(SQLITE_BACKEND, move |config| {
            Ok(Arc::new(SqliteVectorStore::open(&db_path, config.clone())?) as Arc<dyn VectorStore>)
        });
        factory
    }

    /// Registers `constructor` under `name`, replacing any previous entry.
    pub fn register<F>(&mut self, name: &str, constructor: F)
    where
        F: Fn(&VectorStorageConfig) -> Result<Arc<dyn VectorStore>, DomainError> + Send + Sync + 'static,
    {
        self.backends.insert(name.to_string(), Box::new(constructor));
    }

    pub fn backends(&self) -> Vec<String> {
        self.backends.keys().cloned().collect()
    }

    pub fn create(&self, config: &VectorStorageConfig) -> Result<Arc<dyn VectorStore>, DomainError> {
        let constructor = self
            .backends
            .get(&config.backend)
            .ok_or_else(|| DomainError::UnknownBackend(config.backend.clone()))?;
        let store = constructor(config)?;
        info!(
            backend = %config.backend,
            dimension = config.dimension,
            max_vectors = config.max_vectors,
            "vector store created"
        );
        Ok(store)
    }
}
