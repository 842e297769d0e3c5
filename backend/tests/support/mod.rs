//! Shared helpers for the backend integration suites.
//!
//! Each file under `backend/tests/` compiles as its own crate, so suites pull
//! these helpers in with `mod support;`.

pub mod cluster_skip;
pub mod embedded_postgres;
pub mod pg_embed;

use ballot_backend::outbound::persistence::{DbPool, PoolConfig};
use pg_embedded_setup_unpriv::TemporaryDatabase;
use tokio::runtime::Runtime;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::{drop_table, provision_template_database};
pub use pg_embed::shared_cluster;

/// A migrated throwaway database, a small pool onto it and the runtime that
/// drives the pool.
pub struct PooledDatabase {
    pub pool: DbPool,
    pub runtime: Runtime,
    pub url: String,
    _database: TemporaryDatabase,
}

impl PooledDatabase {
    /// Clone a database from the template on the shared cluster.
    pub fn provision() -> Result<Self, String> {
        let runtime = Runtime::new().map_err(|err| err.to_string())?;
        let database = provision_template_database(shared_cluster()?)?;
        let url = database.url().to_string();

        let config = PoolConfig::new(url.as_str())
            .with_max_size(2)
            .with_min_idle(Some(1));
        let pool = runtime
            .block_on(DbPool::new(config))
            .map_err(|err| err.to_string())?;

        Ok(Self {
            pool,
            runtime,
            url,
            _database: database,
        })
    }
}

/// Render a `postgres` error with its SQLSTATE and server detail.
///
/// `postgres::Error`'s `Display` collapses database errors to `db error`.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    if let Some(hint) = db_error.hint() {
        summary.push_str("; hint: ");
        summary.push_str(hint);
    }
    summary
}
