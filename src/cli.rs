//! Command-line front end.
//!
//! This is the thin presentation layer over the catalog core: every
//! subcommand parses its arguments, calls one store or exporter operation,
//! and prints the result. No business logic lives here.

use crate::catalog::CatalogStore;
use crate::export::DocExporter;
use crate::{config, logging};
use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dbdoc", about = "Data dictionary manager and Markdown exporter")]
pub struct Cli {
    /// Path to the JSON configuration file
    #[arg(short, long, default_value = "dbdoc.json")]
    pub config: PathBuf,

    /// Catalog database URL (overrides the configuration file)
    #[arg(long, env = "DBDOC_DATABASE_URL")]
    pub db_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all documented tables
    Tables,

    /// List the documented columns of a table
    Columns {
        /// Table name
        table: String,
    },

    /// Search tables (or columns with --columns) by keyword
    Search {
        /// Substring to match against names and descriptions
        keyword: String,

        /// Search column descriptions instead of table descriptions
        #[arg(long)]
        columns: bool,
    },

    /// Export one table's data dictionary to Markdown
    Export {
        /// Table name
        table: String,

        /// Output directory (overrides the configuration file)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export every documented table to Markdown
    ExportAll {
        /// Output directory (overrides the configuration file)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete a table description and all of its column descriptions
    DeleteTable {
        /// Table name
        table: String,
    },
}

pub async fn run_command(cli: Cli) -> Result<()> {
    let config = config::load_config(&cli.config);
    logging::init(&config.logging.path)?;

    let db_url = cli.db_url.unwrap_or_else(|| config.database_url.clone());
    let store = CatalogStore::connect(&db_url)
        .await
        .with_context(|| format!("Failed to connect to catalog database at {db_url}"))?;
    store
        .init_schema()
        .await
        .context("Failed to initialize catalog schema")?;

    match cli.command {
        Commands::Tables => {
            for table in store.list_tables().await? {
                println!(
                    "{}\t{}",
                    table.table_name,
                    table.description.as_deref().unwrap_or_default()
                );
            }
        }
        Commands::Columns { table } => {
            for col in store.list_columns(&table).await? {
                println!(
                    "{}\t{}\t{}",
                    col.column_name,
                    col.data_type.as_deref().unwrap_or_default(),
                    col.description.as_deref().unwrap_or_default()
                );
            }
        }
        Commands::Search { keyword, columns } => {
            // A blank keyword means "no filter"; the store itself matches it
            // literally, so the caller special-cases it.
            if columns {
                if keyword.trim().is_empty() {
                    anyhow::bail!("Provide a non-empty keyword for column search.");
                }
                for col in store.search_columns(&keyword).await? {
                    println!(
                        "{}.{}\t{}",
                        col.table_name,
                        col.column_name,
                        col.description.as_deref().unwrap_or_default()
                    );
                }
            } else {
                let hits = if keyword.trim().is_empty() {
                    store.list_tables().await?
                } else {
                    store.search_tables(&keyword).await?
                };
                for table in hits {
                    println!(
                        "{}\t{}",
                        table.table_name,
                        table.description.as_deref().unwrap_or_default()
                    );
                }
            }
        }
        Commands::Export { table, output } => {
            let out_dir = output.unwrap_or(config.export.output_dir);
            let exporter = DocExporter::new(store, out_dir);
            let path = exporter.export_table(&table).await?;
            println!("Exported {}", path.display());
        }
        Commands::ExportAll { output } => {
            let out_dir = output.unwrap_or(config.export.output_dir);
            let exporter = DocExporter::new(store, out_dir);
            let paths = exporter.export_all().await?;
            for path in &paths {
                println!("Exported {}", path.display());
            }
            println!("{} table(s) exported.", paths.len());
        }
        Commands::DeleteTable { table } => {
            if store.delete_table(&table).await? {
                println!("Deleted '{table}' and its column descriptions.");
            } else {
                println!("No table description named '{table}'.");
            }
        }
    }

    Ok(())
}
