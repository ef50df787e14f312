//! Import a `name,follow...` user directory file into the configured store.
//!
//! ```sh
//! load-users --file users.csv --database-url postgres://localhost/chirp
//! ```
//!
//! Without `--database-url` or `CHIRP_DATABASE_URL` the import runs against
//! an in-memory store, which validates the file and prints the report
//! without persisting anything.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use chirp::domain::UserDirectoryService;
use chirp::domain::ports::{ImportReport, UserDirectoryCommand, UserRepository};
use chirp::outbound::import_source::CapStdImportSource;
use chirp::outbound::memory::InMemoryUserRepository;
use chirp::outbound::persistence::DieselUserRepository;
use chirp::server::connect_database;
use clap::Parser;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

const DATABASE_URL_VAR: &str = "CHIRP_DATABASE_URL";

/// `load-users` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "load-users",
    about = "Import a user directory file of `name,follow...` lines",
    version
)]
struct CliArgs {
    /// Directory file to import.
    #[arg(long = "file", value_name = "path")]
    file: PathBuf,
    /// Database connection URL. Falls back to `CHIRP_DATABASE_URL`.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
    /// Maximum pooled connections.
    #[arg(long = "max-connections", value_name = "n", default_value_t = 2)]
    max_connections: u32,
}

fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
    {
        eprintln!("tracing init failed: {e}");
    }
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let report = match resolve_database_url(args.database_url, env::var(DATABASE_URL_VAR).ok())? {
        Some(url) => {
            let pool = connect_database(&url, args.max_connections)
                .await
                .map_err(|error| io::Error::other(format!("prepare database: {error}")))?;
            import(DieselUserRepository::new(pool), args.file).await?
        }
        None => {
            warn!("no database URL configured; running a dry import in memory");
            import(InMemoryUserRepository::new(), args.file).await?
        }
    };

    info!(
        created = report.created,
        updated = report.updated,
        skipped_follows = report.skipped_follows.len(),
        "import finished"
    );
    let rendered = serde_json::to_string_pretty(&report)
        .map_err(|error| io::Error::other(format!("render report: {error}")))?;
    println!("{rendered}");
    Ok(())
}

async fn import<U>(users: U, file: PathBuf) -> io::Result<ImportReport>
where
    U: UserRepository + 'static,
{
    let service = UserDirectoryService::new(Arc::new(users), Arc::new(CapStdImportSource::new()));
    service
        .import_file(&file)
        .await
        .map_err(|error| io::Error::other(format!("import '{}': {error}", file.display())))
}

/// Pick the explicit flag over the environment; blank values are errors.
fn resolve_database_url(
    explicit: Option<String>,
    from_env: Option<String>,
) -> io::Result<Option<String>> {
    if let Some(value) = explicit {
        if value.trim().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "--database-url must not be empty when provided",
            ));
        }
        return Ok(Some(value));
    }
    match from_env {
        Some(value) if value.trim().is_empty() => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{DATABASE_URL_VAR} must not be empty"),
        )),
        other => Ok(other),
    }
}
