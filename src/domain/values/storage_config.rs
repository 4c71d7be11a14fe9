use crate::domain::error::DomainError;
use crate::domain::values::similarity::SimilarityThreshold;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_VECTORS: usize = 1_000_000;

/// Immutable settings a store is constructed with.
///
/// There is no `Default`: the dimension and the backend name must always be
/// chosen by the caller. Use [`VectorStorageConfig::builder`] to fill in the
/// remaining fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorStorageConfig {
    pub dimension: usize,
    pub max_vectors: usize,
    pub similarity_threshold: SimilarityThreshold,
    pub backend: String,
}

impl VectorStorageConfig {
    pub fn builder(dimension: usize, backend: impl Into<String>) -> VectorStorageConfigBuilder {
        VectorStorageConfigBuilder {
            dimension,
            backend: backend.into(),
            max_vectors: DEFAULT_MAX_VECTORS,
            similarity_threshold: SimilarityThreshold::default().value(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct VectorStorageConfigBuilder {
    dimension: usize,
    backend: String,
    max_vectors: usize,
    similarity_threshold: f64,
}

impl VectorStorageConfigBuilder {
    pub fn max_vectors(mut self, max_vectors: usize) -> Self {
        self.max_vectors = max_vectors;
        self
    }

    pub fn similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    pub fn build(self) -> Result<VectorStorageConfig, DomainError> {
        if self.dimension == 0 {
            return Err(DomainError::InvalidConfig(
                "dimension must be greater than 0".into(),
            ));
        }
        if self.max_vectors == 0 {
            return Err(DomainError::InvalidConfig(
                "max_vectors must be greater than 0".into(),
            ));
        }
        if self.backend.trim().is_empty() {
            return Err(DomainError::InvalidConfig("backend must be named".into()));
        }
        let similarity_threshold =
            SimilarityThreshold::new(self.similarity_threshold).map_err(DomainError::InvalidConfig)?;

        Ok(VectorStorageConfig {
            dimension: self.dimension,
            max_vectors: self.max_vectors,
            similarity_threshold,
            backend: self.backend,
        })
    }
}
