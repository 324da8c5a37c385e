//! Markdown rendering for data-dictionary documents.
//!
//! Rendering is a pure function of the table's metadata and the supplied
//! generation timestamp: same inputs, same bytes. The exporter passes the
//! current time; tests pass a fixed one.

use crate::catalog::ColumnDescription;
use chrono::{DateTime, Utc};

/// Render one table's data dictionary as Markdown.
///
/// The document format is a fixed contract:
///
/// ```text
/// # <tableName> — 資料字典
/// **表格用途**：<description>
/// **最後更新**：<yyyy-MM-dd HH:mm:ss> UTC
///
/// | 欄位 | 說明 | 型別 | 可空 | 單位 | 範例 | 限制 |
/// |---|---|---:|:--:|---|---|---|
/// | ... one row per column, in the given order ...
/// ```
///
/// Absent free-text fields render as empty cells. Nullability renders `✔`
/// only for an explicit `Some(true)`; both `Some(false)` and unknown render
/// `✘`.
pub fn render_markdown(
    table_name: &str,
    description: Option<&str>,
    columns: &[ColumnDescription],
    generated_at: DateTime<Utc>,
) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {table_name} — 資料字典\n"));
    md.push_str(&format!(
        "**表格用途**：{}\n",
        description.unwrap_or_default()
    ));
    md.push_str(&format!(
        "**最後更新**：{} UTC\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    md.push('\n');
    md.push_str("| 欄位 | 說明 | 型別 | 可空 | 單位 | 範例 | 限制 |\n");
    md.push_str("|---|---|---:|:--:|---|---|---|\n");

    for col in columns {
        let nullable = if col.is_nullable == Some(true) {
            "✔"
        } else {
            "✘"
        };
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} |\n",
            col.column_name,
            col.description.as_deref().unwrap_or_default(),
            col.data_type.as_deref().unwrap_or_default(),
            nullable,
            col.unit.as_deref().unwrap_or_default(),
            col.example.as_deref().unwrap_or_default(),
            col.constraints_note.as_deref().unwrap_or_default(),
        ));
    }

    md
}
