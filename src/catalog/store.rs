//! sqlx-backed persistence for the documentation catalog.
//!
//! One pool, connection-per-operation: every method acquires a connection
//! from the pool for the duration of a single statement (or a single
//! transaction for the cascading delete) and releases it before returning.
//! No connection is ever held across unrelated operations.

use super::model::{ColumnDescription, TableDescription};
use crate::error::Result;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr as _;
use std::time::Duration;

/// Handle to the catalog's backing store.
///
/// Cloning is cheap (the pool is shared), so callers that want to issue
/// operations concurrently can clone the store per task.
#[derive(Clone)]
pub struct CatalogStore {
    pool: Pool<Sqlite>,
}

impl CatalogStore {
    /// Connect to the catalog database at `url` (e.g. `sqlite://dbdoc.db`).
    ///
    /// The database file is created if it does not exist. Call
    /// [`init_schema`](Self::init_schema) afterwards to ensure the tables
    /// are in place.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    /// Create the catalog tables and unique indexes if they are missing.
    ///
    /// Note the deliberate absence of a foreign key from
    /// `column_descriptions` to `table_descriptions`: referential integrity
    /// is maintained by the transactional cascade in
    /// [`delete_table`](Self::delete_table) instead.
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS table_descriptions (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                table_name  TEXT NOT NULL UNIQUE,
                description TEXT,
                modified_at TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS column_descriptions (
                id               INTEGER PRIMARY KEY AUTOINCREMENT,
                table_name       TEXT NOT NULL,
                column_name      TEXT NOT NULL,
                description      TEXT,
                data_type        TEXT,
                is_nullable      INTEGER,
                unit             TEXT,
                example          TEXT,
                constraints_note TEXT,
                modified_at      TEXT NOT NULL,
                UNIQUE (table_name, column_name)
            )",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // Table descriptions

    /// All table descriptions, ordered by `table_name` ascending.
    pub async fn list_tables(&self) -> Result<Vec<TableDescription>> {
        let rows = sqlx::query_as::<_, TableDescription>(
            "SELECT id, table_name, description, modified_at
             FROM table_descriptions
             ORDER BY table_name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Look up one table description by natural key.
    ///
    /// `Ok(None)` when no row matches; this is a normal outcome, not an
    /// error.
    pub async fn get_table(&self, table_name: &str) -> Result<Option<TableDescription>> {
        let row = sqlx::query_as::<_, TableDescription>(
            "SELECT id, table_name, description, modified_at
             FROM table_descriptions
             WHERE table_name = ?",
        )
        .bind(table_name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Insert a table description and return its store-assigned id.
    ///
    /// The input's `id` and `modified_at` are ignored. Fails with
    /// [`DbDocError::Conflict`](crate::error::DbDocError::Conflict) when
    /// `table_name` already exists.
    pub async fn create_table(&self, table: &TableDescription) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO table_descriptions (table_name, description, modified_at)
             VALUES (?, ?, ?)",
        )
        .bind(&table.table_name)
        .bind(&table.description)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Update a table's `description` and refresh `modified_at`, keyed by id.
    ///
    /// Returns `false` when no row matched the id.
    pub async fn update_table(&self, table: &TableDescription) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE table_descriptions
             SET description = ?, modified_at = ?
             WHERE id = ?",
        )
        .bind(&table.description)
        .bind(Utc::now())
        .bind(table.id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a table description together with all of its column
    /// descriptions, atomically.
    ///
    /// Both deletes run in one transaction, columns first, then the table
    /// row; the transaction commits only if both statements succeed and is
    /// rolled back in full otherwise, re-signaling the underlying error. A
    /// partial cascade is never left committed.
    ///
    /// Returns whether the table row itself was deleted. A table with zero
    /// columns still counts as deleted when its row is removed.
    pub async fn delete_table(&self, table_name: &str) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM column_descriptions WHERE table_name = ?")
            .bind(table_name)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM table_descriptions WHERE table_name = ?")
            .bind(table_name)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(table = %table_name, "cascading delete committed");
        Ok(result.rows_affected() > 0)
    }

    /// Substring search over `table_name` and `description`, ordered by
    /// `table_name`.
    ///
    /// Case sensitivity follows the backing store's collation. Treating a
    /// blank keyword as "no filter" is the caller's concern; this operation
    /// matches it literally (every row contains the empty string).
    pub async fn search_tables(&self, keyword: &str) -> Result<Vec<TableDescription>> {
        let pattern = format!("%{keyword}%");
        let rows = sqlx::query_as::<_, TableDescription>(
            "SELECT id, table_name, description, modified_at
             FROM table_descriptions
             WHERE table_name LIKE ? OR description LIKE ?
             ORDER BY table_name",
        )
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // Column descriptions

    /// All column descriptions of one table, ordered by `column_name`.
    pub async fn list_columns(&self, table_name: &str) -> Result<Vec<ColumnDescription>> {
        let rows = sqlx::query_as::<_, ColumnDescription>(
            "SELECT id, table_name, column_name, description, data_type, is_nullable,
                    unit, example, constraints_note, modified_at
             FROM column_descriptions
             WHERE table_name = ?
             ORDER BY column_name",
        )
        .bind(table_name)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Look up one column description by its compound natural key.
    pub async fn get_column(
        &self,
        table_name: &str,
        column_name: &str,
    ) -> Result<Option<ColumnDescription>> {
        let row = sqlx::query_as::<_, ColumnDescription>(
            "SELECT id, table_name, column_name, description, data_type, is_nullable,
                    unit, example, constraints_note, modified_at
             FROM column_descriptions
             WHERE table_name = ? AND column_name = ?",
        )
        .bind(table_name)
        .bind(column_name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Insert a column description and return its store-assigned id.
    ///
    /// Fails with [`DbDocError::Conflict`](crate::error::DbDocError::Conflict)
    /// when `(table_name, column_name)` already exists.
    pub async fn create_column(&self, column: &ColumnDescription) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO column_descriptions
                (table_name, column_name, description, data_type, is_nullable,
                 unit, example, constraints_note, modified_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&column.table_name)
        .bind(&column.column_name)
        .bind(&column.description)
        .bind(&column.data_type)
        .bind(column.is_nullable)
        .bind(&column.unit)
        .bind(&column.example)
        .bind(&column.constraints_note)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Update all mutable fields of a column description and refresh
    /// `modified_at`, keyed by id.
    ///
    /// Returns `false` when no row matched the id.
    pub async fn update_column(&self, column: &ColumnDescription) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE column_descriptions
             SET description = ?, data_type = ?, is_nullable = ?,
                 unit = ?, example = ?, constraints_note = ?, modified_at = ?
             WHERE id = ?",
        )
        .bind(&column.description)
        .bind(&column.data_type)
        .bind(column.is_nullable)
        .bind(&column.unit)
        .bind(&column.example)
        .bind(&column.constraints_note)
        .bind(Utc::now())
        .bind(column.id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete one column description by its compound natural key.
    pub async fn delete_column(&self, table_name: &str, column_name: &str) -> Result<bool> {
        let result =
            sqlx::query("DELETE FROM column_descriptions WHERE table_name = ? AND column_name = ?")
                .bind(table_name)
                .bind(column_name)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Substring search over `column_name` and `description`, ordered by
    /// `(table_name, column_name)`.
    pub async fn search_columns(&self, keyword: &str) -> Result<Vec<ColumnDescription>> {
        let pattern = format!("%{keyword}%");
        let rows = sqlx::query_as::<_, ColumnDescription>(
            "SELECT id, table_name, column_name, description, data_type, is_nullable,
                    unit, example, constraints_note, modified_at
             FROM column_descriptions
             WHERE column_name LIKE ? OR description LIKE ?
             ORDER BY table_name, column_name",
        )
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbDocError;
    use tempfile::TempDir;

    async fn test_store() -> (TempDir, CatalogStore) {
        let dir = tempfile::tempdir().expect("Failed to create tempdir");
        let url = format!("sqlite://{}", dir.path().join("catalog.db").display());
        let store = CatalogStore::connect(&url)
            .await
            .expect("Failed to connect to test database");
        store.init_schema().await.expect("Failed to init schema");
        (dir, store)
    }

    fn orders_table() -> TableDescription {
        TableDescription::new("orders", Some("銷售訂單".to_owned()))
    }

    #[tokio::test]
    async fn test_create_and_get_table() {
        let (_dir, store) = test_store().await;

        let id = store.create_table(&orders_table()).await.unwrap();
        assert!(id > 0, "Store should assign a positive id");

        let got = store.get_table("orders").await.unwrap().unwrap();
        assert_eq!(got.id, id);
        assert_eq!(got.table_name, "orders");
        assert_eq!(got.description.as_deref(), Some("銷售訂單"));
    }

    #[tokio::test]
    async fn test_get_missing_table_is_none_not_error() {
        let (_dir, store) = test_store().await;
        assert!(store.get_table("missing_table").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_table_name_is_conflict() {
        let (_dir, store) = test_store().await;

        store.create_table(&orders_table()).await.unwrap();
        let err = store.create_table(&orders_table()).await.unwrap_err();
        assert!(matches!(err, DbDocError::Conflict(_)), "got: {err}");
    }

    #[tokio::test]
    async fn test_list_tables_ordered_by_name() {
        let (_dir, store) = test_store().await;

        for name in ["b_events", "a_users", "c_orders"] {
            store
                .create_table(&TableDescription::new(name, None))
                .await
                .unwrap();
        }

        let names: Vec<String> = store
            .list_tables()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.table_name)
            .collect();
        assert_eq!(names, ["a_users", "b_events", "c_orders"]);
    }

    #[tokio::test]
    async fn test_update_table_refreshes_modified_at() {
        let (_dir, store) = test_store().await;

        store.create_table(&orders_table()).await.unwrap();
        let mut table = store.get_table("orders").await.unwrap().unwrap();
        let created_at = table.modified_at;

        table.description = Some("updated purpose".to_owned());
        assert!(store.update_table(&table).await.unwrap());

        let got = store.get_table("orders").await.unwrap().unwrap();
        assert_eq!(got.description.as_deref(), Some("updated purpose"));
        assert!(got.modified_at >= created_at);
    }

    #[tokio::test]
    async fn test_update_unknown_id_returns_false() {
        let (_dir, store) = test_store().await;

        let mut table = orders_table();
        table.id = 9999;
        assert!(!store.update_table(&table).await.unwrap());

        let mut column = ColumnDescription::new("orders", "id");
        column.id = 9999;
        assert!(!store.update_column(&column).await.unwrap());
    }

    #[tokio::test]
    async fn test_column_round_trip() {
        let (_dir, store) = test_store().await;
        store.create_table(&orders_table()).await.unwrap();

        let before = Utc::now();
        let mut column = ColumnDescription::new("orders", "amount");
        column.description = Some("訂單金額".to_owned());
        column.data_type = Some("decimal".to_owned());
        column.is_nullable = Some(false);
        column.unit = Some("TWD".to_owned());
        column.example = Some("1200".to_owned());
        column.constraints_note = Some(">= 0".to_owned());

        let id = store.create_column(&column).await.unwrap();
        let got = store.get_column("orders", "amount").await.unwrap().unwrap();

        assert_eq!(got.id, id);
        assert_eq!(got.table_name, column.table_name);
        assert_eq!(got.column_name, column.column_name);
        assert_eq!(got.description, column.description);
        assert_eq!(got.data_type, column.data_type);
        assert_eq!(got.is_nullable, column.is_nullable);
        assert_eq!(got.unit, column.unit);
        assert_eq!(got.example, column.example);
        assert_eq!(got.constraints_note, column.constraints_note);
        assert!(got.modified_at >= before, "modified_at is store-assigned");
    }

    #[tokio::test]
    async fn test_duplicate_column_key_is_conflict() {
        let (_dir, store) = test_store().await;
        store.create_table(&orders_table()).await.unwrap();

        store
            .create_column(&ColumnDescription::new("orders", "id"))
            .await
            .unwrap();
        let err = store
            .create_column(&ColumnDescription::new("orders", "id"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbDocError::Conflict(_)), "got: {err}");

        // Same column name under another table is fine.
        store
            .create_column(&ColumnDescription::new("users", "id"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_list_columns_ordered_by_name() {
        let (_dir, store) = test_store().await;

        for name in ["note", "id", "amount"] {
            store
                .create_column(&ColumnDescription::new("orders", name))
                .await
                .unwrap();
        }

        let names: Vec<String> = store
            .list_columns("orders")
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.column_name)
            .collect();
        assert_eq!(names, ["amount", "id", "note"]);
    }

    #[tokio::test]
    async fn test_delete_column() {
        let (_dir, store) = test_store().await;

        store
            .create_column(&ColumnDescription::new("orders", "note"))
            .await
            .unwrap();
        assert!(store.delete_column("orders", "note").await.unwrap());
        assert!(!store.delete_column("orders", "note").await.unwrap());
        assert!(store.get_column("orders", "note").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_table_cascades_to_columns() {
        let (_dir, store) = test_store().await;

        store.create_table(&orders_table()).await.unwrap();
        for name in ["id", "note"] {
            store
                .create_column(&ColumnDescription::new("orders", name))
                .await
                .unwrap();
        }

        assert!(store.delete_table("orders").await.unwrap());
        assert!(store.get_table("orders").await.unwrap().is_none());
        assert!(store.list_columns("orders").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_table_with_zero_columns_still_succeeds() {
        let (_dir, store) = test_store().await;

        store.create_table(&orders_table()).await.unwrap();
        assert!(store.delete_table("orders").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_missing_table_returns_false() {
        let (_dir, store) = test_store().await;
        assert!(!store.delete_table("missing_table").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_table_rolls_back_on_failure() {
        let (_dir, store) = test_store().await;

        store.create_table(&orders_table()).await.unwrap();
        for name in ["id", "note"] {
            store
                .create_column(&ColumnDescription::new("orders", name))
                .await
                .unwrap();
        }

        // Force the second statement of the cascade to fail: the column
        // deletes succeed inside the transaction, then the table-row delete
        // aborts. The whole cascade must roll back.
        sqlx::query(
            "CREATE TRIGGER block_table_delete
             BEFORE DELETE ON table_descriptions
             BEGIN SELECT RAISE(ABORT, 'delete blocked'); END",
        )
        .execute(&store.pool)
        .await
        .unwrap();

        let err = store.delete_table("orders").await.unwrap_err();
        assert!(matches!(err, DbDocError::Connection(_)), "got: {err}");

        // No partial cascade: both the table row and its columns survive.
        assert!(store.get_table("orders").await.unwrap().is_some());
        let columns = store.list_columns("orders").await.unwrap();
        assert_eq!(columns.len(), 2);
    }

    #[tokio::test]
    async fn test_search_tables_matches_name_or_description() {
        let (_dir, store) = test_store().await;

        store
            .create_table(&TableDescription::new(
                "orders",
                Some("銷售訂單".to_owned()),
            ))
            .await
            .unwrap();
        store
            .create_table(&TableDescription::new(
                "users",
                Some("customer accounts".to_owned()),
            ))
            .await
            .unwrap();
        store
            .create_table(&TableDescription::new("audit_log", None))
            .await
            .unwrap();

        // Substring of a name.
        let hits = store.search_tables("rder").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].table_name, "orders");

        // Substring of a description only.
        let hits = store.search_tables("accounts").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].table_name, "users");

        // No match.
        assert!(store.search_tables("nothing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_tables_ordered_by_name() {
        let (_dir, store) = test_store().await;

        for name in ["z_audit", "m_audit", "a_audit"] {
            store
                .create_table(&TableDescription::new(name, None))
                .await
                .unwrap();
        }

        let names: Vec<String> = store
            .search_tables("audit")
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.table_name)
            .collect();
        assert_eq!(names, ["a_audit", "m_audit", "z_audit"]);
    }

    #[tokio::test]
    async fn test_search_columns_ordered_by_table_then_column() {
        let (_dir, store) = test_store().await;

        let mut described = ColumnDescription::new("users", "email");
        described.description = Some("primary contact".to_owned());
        store.create_column(&described).await.unwrap();
        store
            .create_column(&ColumnDescription::new("orders", "contact_id"))
            .await
            .unwrap();
        store
            .create_column(&ColumnDescription::new("orders", "amount"))
            .await
            .unwrap();

        // "contact" matches orders.contact_id by name and users.email by
        // description; orders sorts before users.
        let hits: Vec<(String, String)> = store
            .search_columns("contact")
            .await
            .unwrap()
            .into_iter()
            .map(|c| (c.table_name, c.column_name))
            .collect();
        assert_eq!(
            hits,
            [
                ("orders".to_owned(), "contact_id".to_owned()),
                ("users".to_owned(), "email".to_owned()),
            ]
        );
    }
}
