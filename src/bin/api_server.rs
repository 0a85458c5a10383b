// HTTP server binary: dashboard, movie listing and chart endpoints

use anyhow::Result;
use douban_charts::api::ApiServer;
use douban_charts::tracing::{default_filter, init_tracing};
use douban_charts::util::db::{Db, DbConfig};
use douban_charts::util::env as env_util;

const CONFIG_KEYS: &[&str] = &[
    "DB_HOST",
    "DB_PORT",
    "DB_USER",
    "DB_PASSWORD",
    "DB_NAME",
    "MOVIES_TABLE",
    "HOST",
    "PORT",
    "DEBUG",
    "ALLOWED_ORIGINS",
];

#[actix_web::main]
async fn main() -> Result<()> {
    // Load dotenv/env once (safe to call multiple times)
    env_util::init_env();

    let server = ApiServer::from_env()?;
    init_tracing(default_filter(server.debug))?;

    tracing::info!("Initializing douban-charts server");
    // Every key has a default; nothing is strictly required.
    env_util::preflight_check("api_server", &[], CONFIG_KEYS)?;

    // Lazy pool: /health answers even while MySQL is unreachable
    let config = DbConfig::from_env()?;
    let db = Db::connect_lazy(&config);

    server.run(db).await?;

    Ok(())
}
