pub mod similarity;
pub mod storage_config;
pub mod vector_type;
