pub mod vector_store;
