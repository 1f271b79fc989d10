//! CLI tool for relation mapping tables.
//!
//! Loads the snapshot from the data directory, runs one command, and saves
//! the snapshot again when the command changed anything.

use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use relmap_core::config::StoreConfig;
use relmap_core::database::Database;
use relmap_core::mapping::{COLUMN_BASE_ID, COLUMN_RELATED_ID};
use relmap_core::persistence::SnapshotManager;
use relmap_core::table::Column;
use relmap_core::types::ColumnType;
use relmap_core::{MappingDao, MappingRef, MappingRows, MappingTable, TableDao};

/// Designated id column names for every command.
struct IdColumns {
    base: String,
    related: String,
}

impl Default for IdColumns {
    fn default() -> Self {
        Self {
            base: COLUMN_BASE_ID.to_string(),
            related: COLUMN_RELATED_ID.to_string(),
        }
    }
}

/// Command-line arguments for the mapping tool.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Data directory for persistence
    #[arg(long, global = true, default_value = "./data")]
    data_dir: String,

    /// Name of the base id column
    #[arg(long, global = true, default_value = COLUMN_BASE_ID)]
    base_column: String,

    /// Name of the related id column
    #[arg(long, global = true, default_value = COLUMN_RELATED_ID)]
    related_column: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a mapping table
    Init {
        table: String,
        /// Extra column as NAME:TYPE (integer, real, text, blob, boolean)
        #[arg(long = "column", value_parser = parse_column)]
        columns: Vec<Column>,
    },
    /// Add a base/related association
    Link {
        table: String,
        base: i64,
        related: i64,
    },
    /// List associations, optionally filtered
    List {
        table: String,
        #[arg(long)]
        base: Option<i64>,
        #[arg(long)]
        related: Option<i64>,
    },
    /// Count associations of a base id
    Count {
        table: String,
        base: i64,
        #[arg(long)]
        related: Option<i64>,
    },
    /// Print each distinct related id once
    UniqueRelated { table: String },
    /// Remove associations by base id, related id, or both
    Unlink {
        table: String,
        #[arg(long)]
        base: Option<i64>,
        #[arg(long)]
        related: Option<i64>,
    },
    /// List stored tables
    Tables,
}

fn parse_column(spec: &str) -> Result<Column, String> {
    let (name, ty) = spec
        .split_once(':')
        .ok_or_else(|| format!("expected NAME:TYPE, got '{}'", spec))?;
    let column_type = match ty.to_ascii_lowercase().as_str() {
        "integer" => ColumnType::Integer,
        "real" => ColumnType::Real,
        "text" => ColumnType::Text,
        "blob" => ColumnType::Blob,
        "boolean" => ColumnType::Boolean,
        other => return Err(format!("unknown column type '{}'", other)),
    };
    Ok(Column::new(name, column_type))
}

fn open_dao(db: &Arc<Database>, ids: &IdColumns, table: &str) -> anyhow::Result<MappingDao> {
    let dao = TableDao::new(db.clone(), table)?;
    let descriptor = MappingTable::with_columns(
        table,
        dao.columns().to_vec(),
        ids.base.as_str(),
        ids.related.as_str(),
    )
    .with_context(|| format!("'{}' is not a mapping table", table))?;
    Ok(MappingDao::new(dao, Some(descriptor))?)
}

fn print_rows(rows: &MappingRows) {
    for row in rows.iter() {
        let id = row.id().map_or_else(|| "-".to_string(), |id| id.to_string());
        let fields: Vec<String> = row
            .table()
            .columns()
            .iter()
            .zip(row.values())
            .map(|(c, v)| format!("{}={}", c.name, v))
            .collect();
        println!("{}\t{}", id, fields.join(" "));
    }
}

/// Runs one command. Returns whether the store changed.
fn run(db: &Arc<Database>, ids: &IdColumns, command: Command) -> anyhow::Result<bool> {
    match command {
        Command::Init { table, columns } => {
            let mut all = vec![
                Column::new(ids.base.as_str(), ColumnType::Integer).not_null(),
                Column::new(ids.related.as_str(), ColumnType::Integer).not_null(),
            ];
            all.extend(columns);
            let schema =
                MappingTable::with_columns(table, all, ids.base.as_str(), ids.related.as_str())?;
            db.create_table(schema.table_name(), schema.columns().to_vec())?;
            println!("Created mapping table {}", schema.table_name());
            Ok(true)
        }
        Command::Link {
            table,
            base,
            related,
        } => {
            let dao = open_dao(db, ids, &table)?;
            let mut row = dao.new_row();
            row.set_base_id(base);
            row.set_related_id(related);
            let id = dao.create(&mut row)?;
            println!("Linked {} -> {} (row {})", base, related, id);
            Ok(true)
        }
        Command::List {
            table,
            base,
            related,
        } => {
            let dao = open_dao(db, ids, &table)?;
            let rows = match (base, related) {
                (Some(base), related) => dao.query_by_ids(base, related.map(MappingRef::from))?,
                (None, Some(related)) => dao.query_by_related_id(related)?,
                (None, None) => dao.query_for_all()?,
            };
            print_rows(&rows);
            Ok(false)
        }
        Command::Count {
            table,
            base,
            related,
        } => {
            let dao = open_dao(db, ids, &table)?;
            println!("{}", dao.count_by_ids(base, related.map(MappingRef::from))?);
            Ok(false)
        }
        Command::UniqueRelated { table } => {
            let dao = open_dao(db, ids, &table)?;
            for id in dao.unique_related_ids()? {
                println!("{}", id);
            }
            Ok(false)
        }
        Command::Unlink {
            table,
            base,
            related,
        } => {
            let dao = open_dao(db, ids, &table)?;
            let deleted = match (base, related) {
                (Some(base), related) => dao.delete_by_ids(base, related.map(MappingRef::from))?,
                (None, Some(related)) => dao.delete_by_related_id(related)?,
                (None, None) => bail!("unlink needs --base, --related, or both"),
            };
            println!("Deleted {} rows", deleted);
            Ok(deleted > 0)
        }
        Command::Tables => {
            for name in db.table_names()? {
                println!("{}", name);
            }
            Ok(false)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    let config = StoreConfig::with_data_dir(&args.data_dir);
    let persistence = SnapshotManager::new(&config);
    let db = Arc::new(
        persistence
            .load()
            .with_context(|| format!("Failed to load snapshot from {}", args.data_dir))?,
    );

    let ids = IdColumns {
        base: args.base_column,
        related: args.related_column,
    };
    tracing::debug!("Running {:?} against {}", args.command, args.data_dir);
    if run(&db, &ids, args.command)? {
        persistence.save(&db).context("Failed to save snapshot")?;
    }
    Ok(())
}
