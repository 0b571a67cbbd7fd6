//! Schema setup and teardown from the SQL files shipped with this crate.
//!
//! `migrations/` holds the schema, `cleanup/` drops it again. Files run in
//! filename order (reversed for cleanup), so numeric prefixes define the order.

use sqlx::PgPool;
use std::fs;
use std::path::{Path, PathBuf};

/// Create the customer and ledger schema.
///
/// # Example
///
/// ```rust,no_run
/// use sqlx::PgPool;
/// use crm_core_postgres::repository::db_init::init_database;
///
/// # async fn example(pool: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// init_database(pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn init_database(pool: &PgPool) -> Result<(), sqlx::Error> {
    let migrations_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("migrations");
    execute_sql_files_in_order(pool, &migrations_dir, true).await
}

/// Drop everything `init_database` created.
pub async fn cleanup_database(pool: &PgPool) -> Result<(), sqlx::Error> {
    let cleanup_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("cleanup");
    execute_sql_files_in_order(pool, &cleanup_dir, false).await
}

async fn execute_sql_files_in_order(
    pool: &PgPool,
    dir: &Path,
    ascending: bool,
) -> Result<(), sqlx::Error> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(sqlx::Error::Io)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("sql"))
        .collect();

    files.sort();
    if !ascending {
        files.reverse();
    }

    for path in files {
        let sql = fs::read_to_string(&path).map_err(sqlx::Error::Io)?;
        tracing::debug!(file = %path.display(), "executing schema file");
        sqlx::raw_sql(&sql).execute(pool).await?;
    }

    Ok(())
}
