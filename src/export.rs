//! Document export: turn catalog entries into Markdown data-dictionary
//! files.
//!
//! The exporter reads through the [`CatalogStore`] and owns nothing but the
//! output directory. Store errors propagate untouched: a document must fully
//! represent its table, so there is no point catching a failed read and
//! writing a partial file.

pub mod renderer;

use crate::catalog::CatalogStore;
use crate::error::{DbDocError, Result};
use chrono::Utc;
use std::path::{Path, PathBuf};

pub use renderer::render_markdown;

/// Writes Markdown data dictionaries for documented tables.
pub struct DocExporter {
    store: CatalogStore,
    out_dir: PathBuf,
}

impl DocExporter {
    /// Create an exporter writing into `out_dir`.
    ///
    /// The directory is created lazily on the first export, not here.
    pub fn new(store: CatalogStore, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            out_dir: out_dir.into(),
        }
    }

    /// The configured output directory.
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Export one table's data dictionary to `<out_dir>/<table_name>.md`.
    ///
    /// Unlike [`CatalogStore::get_table`], an absent table is a hard failure
    /// here ([`DbDocError::NotFound`]): export requires the row to exist, and
    /// no file is written in that case. The document is UTF-8 without a
    /// byte-order mark.
    pub async fn export_table(&self, table_name: &str) -> Result<PathBuf> {
        let table = self
            .store
            .get_table(table_name)
            .await?
            .ok_or_else(|| DbDocError::NotFound(format!("no table description for '{table_name}'")))?;
        let columns = self.store.list_columns(table_name).await?;

        let doc = render_markdown(
            &table.table_name,
            table.description.as_deref(),
            &columns,
            Utc::now(),
        );

        std::fs::create_dir_all(&self.out_dir)?;
        let path = self.out_dir.join(format!("{}.md", table.table_name));
        std::fs::write(&path, doc)?;

        tracing::info!(table = %table.table_name, path = %path.display(), "exported data dictionary");
        Ok(path)
    }

    /// Export every documented table, in `table_name` order.
    ///
    /// Returns the written paths in that same order. The first failure aborts
    /// the remaining batch; there is no partial-success policy.
    pub async fn export_all(&self) -> Result<Vec<PathBuf>> {
        let tables = self.store.list_tables().await?;
        let mut paths = Vec::with_capacity(tables.len());
        for table in tables {
            paths.push(self.export_table(&table.table_name).await?);
        }
        Ok(paths)
    }
}
