use crate::domain::entities::vector_metadata::VectorMetadata;
use crate::domain::entities::vector_record::{SearchHit, VectorRecord};
use crate::domain::error::DomainError;
use crate::domain::values::storage_config::VectorStorageConfig;
use crate::domain::values::vector_type::VectorType;

pub const DEFAULT_TOP_K: usize = 10;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilter {
    pub source_id: Option<String>,
    pub vector_type: Option<VectorType>,
}

impl SearchFilter {
    pub fn matches(&self, metadata: &VectorMetadata) -> bool {
        if let Some(source) = &self.source_id {
            if &metadata.source_id != source {
                return false;
            }
        }
        if let Some(vt) = self.vector_type {
            if metadata.vector_type != vt {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    pub top_k: usize,
    /// Overrides the store's configured threshold when set.
    pub threshold: Option<f64>,
    pub filter: SearchFilter,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            threshold: None,
            filter: SearchFilter::default(),
        }
    }
}

impl SearchOptions {
    pub fn top_k(top_k: usize) -> Self {
        Self { top_k, ..Self::default() }
    }

    /// The threshold a search actually applies. Explicit thresholds may go
    /// down to -1.0 since cosine similarity does.
    pub fn effective_threshold(&self, config: &VectorStorageConfig) -> Result<f64, DomainError> {
        match self.threshold {
            None => Ok(config.similarity_threshold.value()),
            Some(t) if (-1.0..=1.0).contains(&t) => Ok(t),
            Some(t) => Err(DomainError::InvalidInput(format!(
                "search threshold must be between -1.0 and 1.0, got {t}"
            ))),
        }
    }
}

/// Keyed collection of (vector, metadata) pairs with cosine-similarity search.
///
/// Every mutating call either fully applies or leaves the store untouched.
/// `delete` of an absent id and a `search` with no qualifying vectors are not
/// errors; only `get` reports `NotFound`.
pub trait VectorStore: Send + Sync {
    fn config(&self) -> &VectorStorageConfig;

    /// Inserts or replaces the entry for `vector_id`. Replacing an existing id
    /// does not count against `max_vectors`.
    fn add(&self, vector_id: &str, vector: &[f32], metadata: VectorMetadata) -> Result<(), DomainError>;

    /// Adds every record or none of them. Validation, the capacity check and
    /// all inserts happen under one lock (or one transaction), keyed by each
    /// record's `metadata.vector_id`. Returns the number of records applied.
    fn add_batch(&self, records: Vec<VectorRecord>) -> Result<usize, DomainError>;

    fn get(&self, vector_id: &str) -> Result<VectorRecord, DomainError>;

    fn delete(&self, vector_id: &str) -> Result<(), DomainError>;

    fn search_filtered(&self, query: &[f32], options: &SearchOptions) -> Result<Vec<SearchHit>, DomainError>;

    fn clear(&self) -> Result<(), DomainError>;

    fn size(&self) -> Result<usize, DomainError>;

    fn records(&self) -> Result<Vec<VectorRecord>, DomainError>;

    fn search(&self, query: &[f32], top_k: usize, threshold: Option<f64>) -> Result<Vec<SearchHit>, DomainError> {
        self.search_filtered(
            query,
            &SearchOptions {
                top_k,
                threshold,
                filter: SearchFilter::default(),
            },
        )
    }
}
