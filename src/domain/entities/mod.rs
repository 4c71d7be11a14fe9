pub mod vector_metadata;
pub mod vector_record;
