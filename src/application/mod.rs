pub mod factory;
pub mod ingest;
pub mod search;
pub mod snapshot;
pub mod stats;
