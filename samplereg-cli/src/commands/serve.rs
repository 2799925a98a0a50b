//! HTTP server command for the sample service

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

use samplereg_core::ClientConfig;
use samplereg_server::{create_pool, run_server, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// SQLite database file (default: ~/.samplereg/samples.db)
    #[arg(long, env = "SAMPLEREG_DATABASE")]
    pub database: Option<PathBuf>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let database = args
        .database
        .unwrap_or_else(|| ClientConfig::home_dir().join("samples.db"));

    tracing::info!(bind = %args.bind, database = %database.display(), "starting sample service");

    let pool = create_pool(&database)
        .await
        .with_context(|| format!("Failed to open database {}", database.display()))?;

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
        request_timeout: std::time::Duration::from_secs(args.timeout),
    };

    // Run server (blocks until shutdown)
    run_server(pool, config).await.context("Server error")?;

    Ok(())
}
