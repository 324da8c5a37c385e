//! Documentation catalog: curated table and column metadata.
//!
//! The catalog is a human-maintained annotation layer over a relational
//! schema, not a mirror of it: rows exist only because someone documented
//! them. It persists two entity kinds, [`TableDescription`] and
//! [`ColumnDescription`], linked by the table's natural key.
//!
//! ## Core concepts
//!
//! - **Natural keys**: `table_name` (unique) and `(table_name, column_name)`
//!   (unique) identify entries; the store-assigned `id` is only a surrogate.
//! - **Cascade**: deleting a table description also deletes its column
//!   descriptions, in one transaction. There is no enforced foreign key; the
//!   cascade is the integrity mechanism.
//! - **Store-owned timestamps**: `modified_at` is assigned by the store on
//!   every successful write and never taken from the caller.
//!
//! ## Usage
//!
//! ```no_run
//! use dbdoc::catalog::{CatalogStore, TableDescription};
//!
//! # async fn example() -> dbdoc::error::Result<()> {
//! let store = CatalogStore::connect("sqlite://dbdoc.db").await?;
//! store.init_schema().await?;
//!
//! store
//!     .create_table(&TableDescription::new("orders", Some("銷售訂單".to_owned())))
//!     .await?;
//!
//! for table in store.list_tables().await? {
//!     println!("{}", table.table_name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod model;
pub mod store;

pub use model::{ColumnDescription, TableDescription};
pub use store::CatalogStore;
