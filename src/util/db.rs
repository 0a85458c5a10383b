use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{bail, Result};
use regex::Regex;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlSslMode};
use tracing::{info, instrument, warn};

use crate::util::env as env_util;

pub const DEFAULT_TABLE: &str = "douban_top100_movies";

/// Connection settings for the movie store, read from `DB_*` env vars.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Option<String>,
    pub database: Option<String>,
    /// Dataset table; always a plain SQL identifier.
    pub table: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3306,
            user: "root".to_string(),
            password: None,
            database: None,
            table: DEFAULT_TABLE.to_string(),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(10),
        }
    }
}

impl DbConfig {
    pub fn from_env() -> Result<Self> {
        env_util::init_env();
        let defaults = Self::default();

        let table = env_util::env_opt("MOVIES_TABLE").unwrap_or(defaults.table);
        validate_table_name(&table)?;

        let database = env_util::env_opt("DB_NAME");
        if database.is_none() {
            warn!(target = "env", "DB_NAME not set; queries rely on the server default schema");
        }

        Ok(Self {
            host: env_util::env_opt("DB_HOST").unwrap_or(defaults.host),
            port: env_util::env_parse("DB_PORT", defaults.port),
            user: env_util::env_opt("DB_USER").unwrap_or(defaults.user),
            password: env_util::env_opt("DB_PASSWORD"),
            database,
            table,
            max_connections: env_util::env_parse("DB_MAX_CONNS", defaults.max_connections),
            acquire_timeout: Duration::from_secs(env_util::env_parse(
                "DB_ACQUIRE_TIMEOUT_SECS",
                defaults.acquire_timeout.as_secs(),
            )),
        })
    }

    /// MySQL options: utf8mb4, TLS off.
    pub fn connect_options(&self) -> MySqlConnectOptions {
        let mut opts = MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .charset("utf8mb4")
            .ssl_mode(MySqlSslMode::Disabled);
        if let Some(password) = &self.password {
            opts = opts.password(password);
        }
        if let Some(database) = &self.database {
            opts = opts.database(database);
        }
        opts
    }
}

fn identifier_pattern() -> &'static Regex {
    static IDENT: OnceLock<Regex> = OnceLock::new();
    IDENT.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,63}$").expect("static identifier pattern"))
}

/// The table name is spliced into SQL text, so only bare identifiers pass.
pub fn validate_table_name(name: &str) -> Result<()> {
    if !identifier_pattern().is_match(name) {
        bail!("invalid MOVIES_TABLE {name:?}: expected a plain SQL identifier");
    }
    Ok(())
}

#[derive(Clone)]
pub struct Db {
    pub pool: MySqlPool,
    table: String,
}

impl Db {
    /// Build the pool without touching the server; connections open on first use.
    // SECURITY: never record the password in spans.
    #[instrument(skip(config), fields(host = %config.host, port = config.port))]
    pub fn connect_lazy(config: &DbConfig) -> Self {
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(Duration::from_secs(600))
            .connect_lazy_with(config.connect_options());
        info!(
            table = %config.table,
            max_connections = config.max_connections,
            "database pool ready (lazy)"
        );
        Self {
            pool,
            table: config.table.clone(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_identifiers() {
        assert!(validate_table_name("douban_top100_movies").is_ok());
        assert!(validate_table_name("_movies2").is_ok());
    }

    #[test]
    fn rejects_anything_else() {
        for bad in ["", "1movies", "movies; DROP TABLE x", "db.movies", "movies`", "电影"] {
            assert!(validate_table_name(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn defaults_match_documented_values() {
        let cfg = DbConfig::default();
        assert_eq!(cfg.port, 3306);
        assert_eq!(cfg.table, DEFAULT_TABLE);
        assert_eq!(cfg.user, "root");
        assert!(cfg.password.is_none());
    }

    #[test]
    fn connect_options_carry_target() {
        let cfg = DbConfig {
            host: "db.internal".into(),
            port: 3307,
            database: Some("movies".into()),
            ..DbConfig::default()
        };
        let opts = cfg.connect_options();
        assert_eq!(opts.get_host(), "db.internal");
        assert_eq!(opts.get_port(), 3307);
        assert_eq!(opts.get_database(), Some("movies"));
    }
}
