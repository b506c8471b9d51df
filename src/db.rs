pub mod store;
pub use store::{DataStore, StoreError, UnconfiguredStore};
pub mod pg_store;
pub use pg_store::PgStore;

#[cfg(test)]
pub mod memory_store;
