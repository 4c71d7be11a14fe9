use crate::domain::entities::vector_metadata::VectorMetadata;
use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    pub vector: Vec<f32>,
    pub metadata: VectorMetadata,
}

impl VectorRecord {
    pub fn new(vector: Vec<f32>, metadata: VectorMetadata) -> Self {
        Self { vector, metadata }
    }

    pub fn vector_id(&self) -> &str {
        &self.metadata.vector_id
    }

    /// Checks everything `add` requires of a record before any state is touched.
    pub fn validate(&self, vector_id: &str, dimension: usize) -> Result<(), DomainError> {
        validate_vector(&self.vector, dimension)?;
        if self.metadata.vector_id != vector_id {
            return Err(DomainError::InvalidInput(format!(
                "metadata vector_id '{}' does not match '{}'",
                self.metadata.vector_id, vector_id
            )));
        }
        if let Some(ts) = self.metadata.timestamp {
            if !ts.is_finite() {
                return Err(DomainError::InvalidInput(format!(
                    "timestamp of '{vector_id}' is not finite"
                )));
            }
        }
        Ok(())
    }
}

pub fn validate_vector(vector: &[f32], dimension: usize) -> Result<(), DomainError> {
    DomainError::check_dimension(dimension, vector.len())?;
    if let Some(pos) = vector.iter().position(|x| !x.is_finite()) {
        return Err(DomainError::InvalidInput(format!(
            "vector component {pos} is not finite"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub vector_id: String,
    pub score: f64,
    pub metadata: VectorMetadata,
}

/// Orders hits by descending score and keeps the first `top_k`.
pub fn rank_hits(mut hits: Vec<SearchHit>, top_k: usize) -> Vec<SearchHit> {
    hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    hits.truncate(top_k);
    hits
}
