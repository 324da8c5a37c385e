//! # dbdoc - Schema Documentation Manager
//!
//! dbdoc maintains a human-curated catalog of descriptive metadata (purpose,
//! data type, nullability, unit, example, constraints) for the tables and
//! columns of a relational database, and renders that catalog to Markdown
//! data-dictionary files.
//!
//! The catalog is an annotation layer, not a schema mirror: it never reads
//! the structure of the database it documents.
//!
//! ## Quick Start
//!
//! ```no_run
//! use dbdoc::catalog::{CatalogStore, TableDescription};
//! use dbdoc::export::DocExporter;
//!
//! # async fn example() -> dbdoc::error::Result<()> {
//! let store = CatalogStore::connect("sqlite://dbdoc.db").await?;
//! store.init_schema().await?;
//!
//! store
//!     .create_table(&TableDescription::new("orders", Some("銷售訂單".to_owned())))
//!     .await?;
//!
//! let exporter = DocExporter::new(store, "docs");
//! let path = exporter.export_table("orders").await?;
//! println!("Wrote {}", path.display());
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Modules
//!
//! - [`catalog`]: the catalog store — CRUD, keyword search, and the atomic
//!   cascading delete over table/column descriptions
//! - [`export`]: the document exporter and its pure Markdown renderer
//! - [`error`]: the error taxonomy shared by both
//! - [`config`], [`logging`], [`cli`]: surrounding application plumbing
//!
//! ## Key Guarantees
//!
//! - Deleting a table description removes its column descriptions in the
//!   same transaction; a partial cascade is never left committed.
//! - Rendering is deterministic: the same catalog data produces the same
//!   document bytes, apart from the embedded generation timestamp.
//! - "No matching row" is a normal result (`None`/`false`), never an error.

#![warn(clippy::all, rust_2018_idioms)]

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
