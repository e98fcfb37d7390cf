// ABOUTME: Server binary for the Nutricost recipe costing API
// ABOUTME: Loads configuration from the environment, applies CLI overrides and serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutricost Contributors

//! # Nutricost API Server Binary
//!
//! Configuration comes from the environment (and `.env`); `--http-port` and
//! `--database-url` take precedence over it.

use anyhow::{Context, Result};
use clap::Parser;
use nutricost_server::{
    config::environment::{DatabaseUrl, ServerConfig},
    logging, server,
};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "nutricost-server")]
#[command(about = "Nutricost API - recipes, ingredients, nutrition facts and cost history")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL (`sqlite:path`, `sqlite::memory:` or `memory://`)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;

    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url {
        config.database.url =
            DatabaseUrl::parse_url(&database_url).context("Invalid --database-url value")?;
    }

    logging::init_from_env()?;

    info!("Starting Nutricost API");
    info!("{}", config.summary());

    if let Err(e) = server::run_server(config).await {
        error!("Server error: {e:#}");
        return Err(e);
    }

    Ok(())
}
