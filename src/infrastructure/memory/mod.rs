pub mod flat_store;
