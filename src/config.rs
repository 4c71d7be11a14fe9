use crate::application::factory::SQLITE_BACKEND;
use crate::domain::error::DomainError;
use crate::domain::values::storage_config::{VectorStorageConfig, DEFAULT_MAX_VECTORS};
use std::str::FromStr;

pub const DEFAULT_DB_PATH: &str = "./videovec.db";
/// Embedding width of the CLIP ViT-B/32 image encoder.
pub const DEFAULT_DIMENSION: usize = 512;
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Application configuration, read from `VIDEOVEC_*` environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: String,
    pub backend: String,
    pub dimension: usize,
    pub max_vectors: usize,
    pub similarity_threshold: Option<f64>,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: DEFAULT_DB_PATH.to_string(),
            backend: SQLITE_BACKEND.to_string(),
            dimension: DEFAULT_DIMENSION,
            max_vectors: DEFAULT_MAX_VECTORS,
            similarity_threshold: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup; unset keys keep their
    /// defaults, malformed ones are an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            db_path: lookup("VIDEOVEC_DB").unwrap_or(defaults.db_path),
            backend: lookup("VIDEOVEC_BACKEND").unwrap_or(defaults.backend),
            dimension: parse_var(&lookup, "VIDEOVEC_DIMENSION")?.unwrap_or(defaults.dimension),
            max_vectors: parse_var(&lookup, "VIDEOVEC_MAX_VECTORS")?.unwrap_or(defaults.max_vectors),
            similarity_threshold: parse_var(&lookup, "VIDEOVEC_THRESHOLD")?,
            log_level: lookup("VIDEOVEC_LOG").unwrap_or(defaults.log_level),
        })
    }

    pub fn storage_config(&self) -> Result<VectorStorageConfig, DomainError> {
        let mut builder = VectorStorageConfig::builder(self.dimension, self.backend.clone())
            .max_vectors(self.max_vectors);
        if let Some(t) = self.similarity_threshold {
            builder = builder.similarity_threshold(t);
        }
        builder.build()
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, DomainError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| DomainError::InvalidConfig(format!("{key}={raw}: {e}"))),
    }
}
