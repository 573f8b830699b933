//! Running the CLI

// Allow exits because in this file we ideally handle all errors with known exit codes
#![allow(clippy::exit)]

use std::path::{Path, PathBuf};

use crate::db::{self, fixtures::Fixture, models::user, Tx as _};
use crate::server::app::serve_bookstore;
use crate::utils::{
    config::{Config, DEFAULT_CONFIG_FILE},
    password,
};
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

/// Bookstore catalog server.
/// Browse books, authors, publishers and stores over HTTP.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML config file.
    #[arg(short, long, default_value_t = String::from(DEFAULT_CONFIG_FILE))]
    config: String,
    /// Bookstore cli subcommands
    #[command(subcommand)]
    subcommands: Subcommands,
}

/// Subcommands for the Bookstore CLI
#[derive(Clone, clap::Subcommand)]
enum Subcommands {
    /// Serve the catalog over HTTP
    Serve {
        /// Port on which to serve the catalog. Overrides the config file.
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Apply pending database migrations
    Migrate,
    /// Load publishers, stores, authors and books from a JSON fixture
    Load {
        /// Path to the fixture file.
        fixture: PathBuf,
    },
    /// Create a user allowed to edit authors, or reset their password
    CreateUser {
        /// Login name.
        #[arg(short, long)]
        username: String,
        /// Raw password. Stored as a salted digest.
        #[arg(short, long)]
        password: String,
    },
}

/// Install the global tracing subscriber.
/// Logs go to stdout, and additionally to a daily rolling file when `log_dir` is configured.
/// The returned guard must be kept alive for the file writer to flush.
fn init_tracing(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer());
    match log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "bookstore.log");
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            registry
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        None => {
            registry.init();
            None
        }
    }
}

/// Main entrypoint to application
///
/// # Errors
/// Errors if the HTTP server cannot bind to its address.
/// Other failures are logged and exit with code 1.
pub fn run() -> std::io::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(Path::new(&cli.config)).unwrap_or_else(|err| {
        eprintln!("error: {err:?}");
        std::process::exit(1);
    });
    let _guard = init_tracing(config.log_dir.as_deref());
    tracing::debug!("Starting application");

    match cli.subcommands {
        Subcommands::Serve { port } => {
            let mut config = config;
            if let Some(port) = port {
                config.server.port = port;
            }
            serve_bookstore(config)
        }
        Subcommands::Migrate => block_on_or_exit(migrate(&config)),
        Subcommands::Load { fixture } => block_on_or_exit(load(&config, &fixture)),
        Subcommands::CreateUser { username, password } => {
            block_on_or_exit(create_user(&config, &username, &password))
        }
    }
}

/// Run a one-off database command to completion, exiting with 1 on error.
fn block_on_or_exit<F: std::future::Future<Output = anyhow::Result<()>>>(
    command: F,
) -> std::io::Result<()> {
    let result = actix_web::rt::System::new().block_on(command);
    if let Err(err) = result {
        tracing::error!("Error: {err:?}");
        std::process::exit(1);
    }
    Ok(())
}

/// Connect and apply migrations.
async fn migrate(config: &Config) -> anyhow::Result<()> {
    db::init::connect(&config.database.url).await?;
    tracing::info!("Database is up to date");
    Ok(())
}

/// Load a fixture file.
async fn load(config: &Config, path: &Path) -> anyhow::Result<()> {
    let fixture = Fixture::from_path(path)?;
    let conn = db::init::connect(&config.database.url).await?;
    db::fixtures::load(&conn, fixture).await
}

/// Create or update a user.
async fn create_user(config: &Config, username: &str, raw_password: &str) -> anyhow::Result<()> {
    if username.trim().is_empty() || raw_password.is_empty() {
        anyhow::bail!("Username and password must not be empty");
    }
    let password_hash = password::make_password(raw_password)?;
    let conn = db::init::connect(&config.database.url).await?;
    let mut tx = conn.begin().await?;
    user::TxManager::upsert(&mut tx, username.trim(), &password_hash).await?;
    tx.commit().await?;
    tracing::info!("User '{}' saved", username.trim());
    Ok(())
}
