// API server implementation using actix-web

use crate::api::{middleware, routes};
use crate::util::db::Db;
use crate::util::env as env_util;
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};

pub struct ApiServer {
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub allowed_origins: Option<String>,
}

impl ApiServer {
    /// Create server from environment variables
    pub fn from_env() -> Result<Self> {
        env_util::init_env();

        let host = env_util::env_opt("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match env_util::env_opt("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT {raw:?}"))?,
            None => 5000,
        };

        Ok(Self {
            host,
            port,
            debug: env_util::env_flag("DEBUG", false),
            allowed_origins: env_util::env_opt("ALLOWED_ORIGINS"),
        })
    }

    /// Start the HTTP server
    pub async fn run(self, db: Db) -> Result<()> {
        let bind_addr = format!("{}:{}", self.host, self.port);

        tracing::info!(
            host = %self.host,
            port = %self.port,
            debug = self.debug,
            table = db.table(),
            "Starting douban-charts server"
        );

        let db_data = web::Data::new(db);
        let allowed_origins = self.allowed_origins.clone();

        HttpServer::new(move || {
            let (logger, compress) = middleware::setup_middleware();
            let cors = middleware::setup_cors(allowed_origins.as_deref());

            App::new()
                .app_data(db_data.clone())
                .wrap(logger)
                .wrap(compress)
                .wrap(cors)
                .configure(routes::configure_routes)
        })
        .bind(&bind_addr)
        .with_context(|| format!("Failed to bind to {}", bind_addr))?
        .run()
        .await
        .context("HTTP server error")?;

        Ok(())
    }
}
