//! Daybook Core Library
//!
//! This crate provides the core functionality for Daybook, a personal
//! journal: entries with a title, a mood tag, and free-text content,
//! stored in SQLite and exportable as styled PDF documents.
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let store = EntryStore::open(&config)?;
//!
//! // Add an entry
//! let draft = EntryDraft::new("First day", Mood::Excited, "We moved in.")?;
//! let id = store.create(&draft)?;
//!
//! // Query entries
//! let recent = store.list(&EntryFilter::new().with_search("moved"))?;
//!
//! // Export one as PDF
//! let pdf = Exporter::new(&config)?.render(&store.get(id)?)?;
//! ```
//!
//! # Modules
//!
//! - `models`: the entry record, mood set, and validated draft
//! - `storage`: SQLite schema and the entry store
//! - `query`: filter criteria compiled to parameterized predicates
//! - `export`: PDF layout and rendering
//! - `config`: application configuration
//! - `error`: typed error taxonomy

pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod query;
pub mod storage;

pub use config::Config;
pub use error::{Error, Result, ValidationError};
pub use export::{document_blocks, export_filename, Block, Exporter};
pub use models::{Entry, EntryDraft, Mood};
pub use query::EntryFilter;
pub use storage::EntryStore;
