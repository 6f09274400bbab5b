use std::net::SocketAddr;
use anyhow::{anyhow, Context};
use axum::http::HeaderValue;
use bb8_postgres::tokio_postgres;
use clap::Parser;

/// Process configuration. Every flag falls back to its environment variable
/// (`POSTGRES_HOST`, `SERVER_PORT`, ...), which may come from a `.env` file.
#[derive(Parser, Clone)]
pub struct Config {
    #[clap(env, long, default_value = "development")]
    pub environment: String,

    #[clap(env, long, default_value = "localhost")]
    pub postgres_host: String,

    #[clap(env, long, default_value_t = 5432)]
    pub postgres_port: u16,

    #[clap(env, long, default_value = "postgres")]
    pub postgres_user: String,

    #[clap(env, long, default_value = "", hide_env_values = true)]
    pub postgres_password: String,

    #[clap(env, long, default_value = "travel")]
    pub postgres_db: String,

    #[clap(env, long, default_value_t = 10)]
    pub postgres_pool_size: u32,

    #[clap(env, long, default_value = "0.0.0.0")]
    pub server_host: String,

    #[clap(env, long, default_value_t = 8080)]
    pub server_port: u16,

    /// Comma-separated list of origins allowed to call the API from a browser.
    #[clap(env, long, default_value = "")]
    pub origin_urls: String,
}

impl Config {
    pub fn pg_config(&self) -> tokio_postgres::Config {
        let mut pg_config = tokio_postgres::Config::new();
        pg_config
            .host(&self.postgres_host)
            .port(self.postgres_port)
            .user(&self.postgres_user)
            .password(&self.postgres_password)
            .dbname(&self.postgres_db);
        pg_config
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.server_host, self.server_port)
            .parse()
            .with_context(|| format!("Invalid server address {}:{}", self.server_host, self.server_port))
    }

    pub fn allowed_origins(&self) -> anyhow::Result<Vec<HeaderValue>> {
        self.origin_urls
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                // The CORS origin list only accepts concrete origins.
                if origin == "*" {
                    return Err(anyhow!("Wildcard origin (*) is not allowed in origin urls"));
                }
                origin
                    .parse::<HeaderValue>()
                    .with_context(|| format!("Invalid origin url: {}", origin))
            })
            .collect()
    }
}
