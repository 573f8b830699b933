//! Application configuration, read from a TOML file.
//!
//! Every key is optional; a missing file yields the defaults.
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "bookstore.toml";

/// Config object for the bookstore application.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP server settings.
    pub server: Server,
    /// Database settings.
    pub database: Database,
    /// Pagination settings.
    pub pagination: Pagination,
    /// Login session settings.
    pub auth: Auth,
    /// Directory for daily rolling log files. Logs go to stdout only when unset.
    pub log_dir: Option<PathBuf>,
}

/// HTTP server settings.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Server {
    /// Address to bind to.
    pub bind: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_owned(),
            port: 8080,
        }
    }
}

/// Database settings.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Database {
    /// sqlx connection URL. Overridden by the `DATABASE_URL` environment variable.
    pub url: String,
}

impl Default for Database {
    fn default() -> Self {
        Self {
            url: "sqlite://bookstore.sqlite3?mode=rwc".to_owned(),
        }
    }
}

/// Pagination settings.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Pagination {
    /// Authors shown per page on the paginated author listing.
    pub authors_per_page: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            authors_per_page: 3,
        }
    }
}

/// Login session settings.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Auth {
    /// Seconds after which a login session expires. Two weeks by default.
    pub session_max_age_secs: i64,
}

impl Default for Auth {
    fn default() -> Self {
        Self {
            session_max_age_secs: 14 * 24 * 60 * 60,
        }
    }
}

impl Config {
    /// Parse a config from a TOML string.
    ///
    /// # Errors
    /// Errors if the TOML is malformed or contains unknown keys.
    pub fn parse(config_str: &str) -> anyhow::Result<Self> {
        let conf: Self = toml::from_str(config_str)?;
        if conf.pagination.authors_per_page < 1 {
            anyhow::bail!("pagination.authors_per_page must be at least 1");
        }
        if conf.auth.session_max_age_secs < 1 {
            anyhow::bail!("auth.session_max_age_secs must be at least 1");
        }
        Ok(conf)
    }

    /// Load the config file at `path`, falling back to defaults if it does not exist.
    ///
    /// # Errors
    /// Errors if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!(
                "No config file at '{}', using defaults",
                path.display()
            );
            return Ok(Self::default());
        }
        let config_str = read_to_string(path)
            .with_context(|| format!("Unable to read config file '{}'", path.display()))?;
        Self::parse(&config_str)
            .with_context(|| format!("Unable to parse config file '{}'", path.display()))
    }
}
