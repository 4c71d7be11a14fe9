//! Shared test helpers.

use std::sync::Arc;
use videovec::domain::entities::vector_metadata::VectorMetadata;
use videovec::domain::entities::vector_record::VectorRecord;
use videovec::domain::ports::vector_store::VectorStore;
use videovec::domain::values::storage_config::VectorStorageConfig;
use videovec::domain::values::vector_type::VectorType;
use videovec::infrastructure::memory::flat_store::FlatVectorStore;
use videovec::infrastructure::sqlite::vector_store::SqliteVectorStore;

pub fn config(backend: &str, dimension: usize, max_vectors: usize, threshold: f64) -> VectorStorageConfig {
    VectorStorageConfig::builder(dimension, backend)
        .max_vectors(max_vectors)
        .similarity_threshold(threshold)
        .build()
        .unwrap()
}

/// One instance of every backend, all with the same settings.
pub fn stores(dimension: usize, max_vectors: usize, threshold: f64) -> Vec<Arc<dyn VectorStore>> {
    vec![
        Arc::new(FlatVectorStore::new(config("memory", dimension, max_vectors, threshold))),
        Arc::new(
            SqliteVectorStore::open(":memory:", config("sqlite", dimension, max_vectors, threshold)).unwrap(),
        ),
    ]
}

pub fn memory_store(dimension: usize, max_vectors: usize, threshold: f64) -> Arc<dyn VectorStore> {
    Arc::new(FlatVectorStore::new(config("memory", dimension, max_vectors, threshold)))
}

pub fn meta(id: &str, source: &str, vector_type: VectorType) -> VectorMetadata {
    VectorMetadata::new(id, source, vector_type)
}

pub fn frame(id: &str, source: &str, vector: Vec<f32>) -> VectorRecord {
    VectorRecord::new(vector, meta(id, source, VectorType::Frame))
}
