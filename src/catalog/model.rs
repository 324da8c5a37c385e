//! Entity types for the documentation catalog.
//!
//! Both entities are plain value records: the store assigns `id` on create
//! and refreshes `modified_at` on every successful write. Callers never
//! supply either field themselves.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Curated documentation for one database table.
///
/// `table_name` is the natural key and is immutable after creation; renaming
/// a table means deleting and re-creating its description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TableDescription {
    /// Surrogate identifier assigned by the store.
    pub id: i64,

    /// Unique natural key (case rules follow the backing store's collation).
    pub table_name: String,

    /// Free-text purpose of the table.
    pub description: Option<String>,

    /// Set by the store on create and on every successful update.
    pub modified_at: DateTime<Utc>,
}

impl TableDescription {
    /// Build a description ready for [`create_table`](crate::catalog::CatalogStore::create_table).
    ///
    /// `id` and `modified_at` are placeholders; the store assigns both.
    pub fn new(table_name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: 0,
            table_name: table_name.into(),
            description,
            modified_at: Utc::now(),
        }
    }
}

/// Curated documentation for one column of a table.
///
/// `table_name` references a [`TableDescription`] by natural key. The
/// reference is advisory (no foreign key in the backing store); integrity is
/// maintained by the cascading delete in
/// [`CatalogStore::delete_table`](crate::catalog::CatalogStore::delete_table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ColumnDescription {
    /// Surrogate identifier assigned by the store.
    pub id: i64,

    /// Owning table's natural key.
    pub table_name: String,

    /// Natural key, unique within `table_name`.
    pub column_name: String,

    /// Free-text meaning of the column.
    pub description: Option<String>,

    /// Declared data type, e.g. `int` or `nvarchar`.
    pub data_type: Option<String>,

    /// Tri-state nullability: `None` = unknown.
    pub is_nullable: Option<bool>,

    /// Unit of measure, if any.
    pub unit: Option<String>,

    /// Representative example value.
    pub example: Option<String>,

    /// Constraints worth noting (ranges, enumerations, references).
    pub constraints_note: Option<String>,

    /// Set by the store on create and on every successful update.
    pub modified_at: DateTime<Utc>,
}

impl ColumnDescription {
    /// Build a description ready for [`create_column`](crate::catalog::CatalogStore::create_column).
    ///
    /// `id` and `modified_at` are placeholders; the store assigns both.
    pub fn new(table_name: impl Into<String>, column_name: impl Into<String>) -> Self {
        Self {
            id: 0,
            table_name: table_name.into(),
            column_name: column_name.into(),
            description: None,
            data_type: None,
            is_nullable: None,
            unit: None,
            example: None,
            constraints_note: None,
            modified_at: Utc::now(),
        }
    }
}
