use crate::domain::entities::vector_metadata::VectorMetadata;
use crate::domain::entities::vector_record::VectorRecord;
use crate::domain::error::DomainError;
use crate::domain::values::vector_type::VectorType;
use serde_json::Value;

/// Builds a record from `add` input. A missing id gets a fresh UUID.
///
/// Optional fields may be absent or `null`; any other value of the wrong
/// type is rejected rather than dropped.
pub fn parse_record(data: &Value) -> Result<VectorRecord, DomainError> {
    let data = data
        .as_object()
        .ok_or_else(|| DomainError::InvalidInput("record must be a JSON object".into()))?;
    let present = |key: &str| data.get(key).filter(|v| !v.is_null());

    let id = match present("id") {
        None => uuid::Uuid::new_v4().to_string(),
        Some(v) => v
            .as_str()
            .map(String::from)
            .ok_or_else(|| wrong_type("id", "a string"))?,
    };
    let vector: Vec<f32> = serde_json::from_value(
        present("vector")
            .cloned()
            .ok_or_else(|| missing("vector"))?,
    )
    .map_err(|e| DomainError::InvalidInput(format!("field 'vector' must be an array of numbers: {e}")))?;
    let source_id = present("source_id")
        .ok_or_else(|| missing("source_id"))?
        .as_str()
        .ok_or_else(|| wrong_type("source_id", "a string"))?;
    let vector_type: VectorType = present("vector_type")
        .ok_or_else(|| missing("vector_type"))?
        .as_str()
        .ok_or_else(|| wrong_type("vector_type", "a string"))?
        .parse()
        .map_err(DomainError::InvalidInput)?;

    let mut metadata = VectorMetadata::new(id, source_id, vector_type);
    if let Some(ts) = present("timestamp") {
        metadata.timestamp = Some(ts.as_f64().ok_or_else(|| wrong_type("timestamp", "a number"))?);
    }
    if let Some(extra) = present("metadata") {
        metadata.metadata = extra
            .as_object()
            .cloned()
            .ok_or_else(|| wrong_type("metadata", "an object"))?;
    }
    Ok(VectorRecord::new(vector, metadata))
}

/// Parses `add-batch` input: a JSON array of `add` records.
pub fn parse_batch(data: &Value) -> Result<Vec<VectorRecord>, DomainError> {
    data.as_array()
        .ok_or_else(|| DomainError::InvalidInput("batch must be a JSON array".into()))?
        .iter()
        .map(parse_record)
        .collect()
}

fn missing(field: &str) -> DomainError {
    DomainError::InvalidInput(format!("missing required field: {field}"))
}

fn wrong_type(field: &str, expected: &str) -> DomainError {
    DomainError::InvalidInput(format!("field '{field}' must be {expected}"))
}
