use crate::domain::values::vector_type::VectorType;
use serde::{Deserialize, Serialize};

/// Provenance of one stored vector. The store keeps it exactly as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorMetadata {
    pub vector_id: String,
    pub source_id: String,
    pub vector_type: VectorType,
    /// Offset into the source, in seconds.
    #[serde(default)]
    pub timestamp: Option<f64>,
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl VectorMetadata {
    pub fn new(
        vector_id: impl Into<String>,
        source_id: impl Into<String>,
        vector_type: VectorType,
    ) -> Self {
        Self {
            vector_id: vector_id.into(),
            source_id: source_id.into(),
            vector_type,
            timestamp: None,
            metadata: serde_json::Map::new(),
        }
    }

    pub fn with_timestamp(mut self, seconds: f64) -> Self {
        self.timestamp = Some(seconds);
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}
