use crate::domain::entities::vector_record::SearchHit;
use crate::domain::error::DomainError;
use crate::domain::ports::vector_store::{SearchOptions, VectorStore};
use std::sync::Arc;

pub struct SearchUseCase {
    store: Arc<dyn VectorStore>,
}

impl SearchUseCase {
    pub fn new(store: Arc<dyn VectorStore>) -> Self {
        Self { store }
    }

    pub fn similar(&self, query: &[f32], options: &SearchOptions) -> Result<Vec<SearchHit>, DomainError> {
        self.store.search_filtered(query, options)
    }

    /// Neighbours of an already stored vector, excluding the vector itself.
    pub fn similar_to(&self, vector_id: &str, options: &SearchOptions) -> Result<Vec<SearchHit>, DomainError> {
        let record = self.store.get(vector_id)?;
        // One extra slot so dropping the query itself still leaves top_k.
        let widened = SearchOptions {
            top_k: options.top_k.saturating_add(1),
            ..options.clone()
        };
        let mut hits: Vec<SearchHit> = self
            .store
            .search_filtered(&record.vector, &widened)?
            .into_iter()
            .filter(|h| h.vector_id != vector_id)
            .collect();
        hits.truncate(options.top_k);
        Ok(hits)
    }
}
