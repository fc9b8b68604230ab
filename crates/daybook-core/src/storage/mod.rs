//! Storage layer
//!
//! SQLite-backed persistence for journal entries. The schema is
//! created idempotently when the store is opened; every operation is
//! one short statement, so correctness under concurrent writers is
//! whatever SQLite's per-statement atomicity provides.

pub mod schema;
pub mod store;

pub use schema::{get_schema_version, init_schema, needs_init, SCHEMA_VERSION};
pub use store::EntryStore;
