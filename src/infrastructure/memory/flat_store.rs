use crate::domain::entities::vector_metadata::VectorMetadata;
use crate::domain::entities::vector_record::{rank_hits, validate_vector, SearchHit, VectorRecord};
use crate::domain::error::DomainError;
use crate::domain::ports::vector_store::{SearchOptions, VectorStore};
use crate::domain::values::similarity::cosine_similarity;
use crate::domain::values::storage_config::VectorStorageConfig;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

/// The two maps always hold the same key set.
#[derive(Default)]
struct Maps {
    vectors: HashMap<String, Vec<f32>>,
    metadata: HashMap<String, VectorMetadata>,
}

impl Maps {
    fn insert(&mut self, record: VectorRecord) {
        let id = record.metadata.vector_id.clone();
        self.vectors.insert(id.clone(), record.vector);
        self.metadata.insert(id, record.metadata);
    }
}

/// In-memory store answering searches by linear scan. State lives only as
/// long as the instance.
pub struct FlatVectorStore {
    config: VectorStorageConfig,
    maps: Mutex<Maps>,
}

impl FlatVectorStore {
    pub fn new(config: VectorStorageConfig) -> Self {
        Self {
            config,
            maps: Mutex::new(Maps::default()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Maps>, DomainError> {
        self.maps
            .lock()
            .map_err(|e| DomainError::Storage(format!("store lock poisoned: {e}")))
    }
}

impl VectorStore for FlatVectorStore {
    fn config(&self) -> &VectorStorageConfig {
        &self.config
    }

    fn add(&self, vector_id: &str, vector: &[f32], metadata: VectorMetadata) -> Result<(), DomainError> {
        let record = VectorRecord::new(vector.to_vec(), metadata);
        record.validate(vector_id, self.config.dimension)?;

        let mut maps = self.lock()?;
        let is_new = !maps.vectors.contains_key(vector_id);
        if is_new && maps.vectors.len() >= self.config.max_vectors {
            return Err(DomainError::CapacityExceeded {
                max: self.config.max_vectors,
            });
        }
        maps.insert(record);
        debug!(vector_id, replaced = !is_new, size = maps.vectors.len(), "vector stored");
        Ok(())
    }

    fn add_batch(&self, records: Vec<VectorRecord>) -> Result<usize, DomainError> {
        for record in &records {
            record.validate(record.vector_id(), self.config.dimension)?;
        }

        let mut maps = self.lock()?;
        let new_ids = records
            .iter()
            .map(|r| r.vector_id())
            .filter(|id| !maps.vectors.contains_key(*id))
            .collect::<HashSet<_>>()
            .len();
        if maps.vectors.len() + new_ids > self.config.max_vectors {
            return Err(DomainError::CapacityExceeded {
                max: self.config.max_vectors,
            });
        }

        let total = records.len();
        for record in records {
            maps.insert(record);
        }
        debug!(total, new_ids, size = maps.vectors.len(), "batch stored");
        Ok(total)
    }

    fn get(&self, vector_id: &str) -> Result<VectorRecord, DomainError> {
        let maps = self.lock()?;
        match (maps.vectors.get(vector_id), maps.metadata.get(vector_id)) {
            (Some(vector), Some(metadata)) => Ok(VectorRecord::new(vector.clone(), metadata.clone())),
            _ => Err(DomainError::NotFound(vector_id.to_string())),
        }
    }

    fn delete(&self, vector_id: &str) -> Result<(), DomainError> {
        let mut maps = self.lock()?;
        let removed = maps.vectors.remove(vector_id).is_some();
        maps.metadata.remove(vector_id);
        debug!(vector_id, removed, "vector deleted");
        Ok(())
    }

    fn search_filtered(&self, query: &[f32], options: &SearchOptions) -> Result<Vec<SearchHit>, DomainError> {
        validate_vector(query, self.config.dimension)?;
        let threshold = options.effective_threshold(&self.config)?;
        if options.top_k == 0 {
            return Ok(vec![]);
        }

        let maps = self.lock()?;
        let hits: Vec<SearchHit> = maps
            .vectors
            .iter()
            .filter_map(|(id, vector)| {
                let metadata = maps.metadata.get(id)?;
                if !options.filter.matches(metadata) {
                    return None;
                }
                let score = cosine_similarity(query, vector);
                (score >= threshold).then(|| SearchHit {
                    vector_id: id.clone(),
                    score,
                    metadata: metadata.clone(),
                })
            })
            .collect();
        let scanned = maps.vectors.len();
        drop(maps);

        let hits = rank_hits(hits, options.top_k);
        debug!(scanned, returned = hits.len(), threshold, "search completed");
        Ok(hits)
    }

    fn clear(&self) -> Result<(), DomainError> {
        let mut maps = self.lock()?;
        let dropped = maps.vectors.len();
        maps.vectors.clear();
        maps.metadata.clear();
        info!(dropped, "store cleared");
        Ok(())
    }

    fn size(&self) -> Result<usize, DomainError> {
        Ok(self.lock()?.vectors.len())
    }

    fn records(&self) -> Result<Vec<VectorRecord>, DomainError> {
        let maps = self.lock()?;
        Ok(maps
            .vectors
            .iter()
            .filter_map(|(id, vector)| {
                maps.metadata
                    .get(id)
                    .map(|m| VectorRecord::new(vector.clone(), m.clone()))
            })
            .collect())
    }
}
