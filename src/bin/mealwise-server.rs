// ABOUTME: Mealwise API server binary
// ABOUTME: Loads configuration once, builds shared resources, and serves HTTP until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Mealwise Server Binary
//!
//! Starts the photo calorie estimation and diet program API.

use anyhow::Result;
use clap::Parser;
use mealwise_server::{config::ServerConfig, logging, resources::ServerResources, server};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "mealwise-server")]
#[command(about = "Mealwise - photo calorie estimation and diet program API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    info!("Starting Mealwise server");
    info!("{}", config.summary());

    let port = config.http_port;
    let resources = Arc::new(ServerResources::from_config(config)?);
    display_available_endpoints(port);

    if let Err(e) = server::run(resources, port).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}

#[allow(clippy::cognitive_complexity)]
fn display_available_endpoints(port: u16) {
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());

    info!("=== Available API Endpoints ===");
    info!("   Health:            GET  http://{host}:{port}/health");
    info!("   Readiness:         GET  http://{host}:{port}/ready");
    info!("   Estimate Calories: POST http://{host}:{port}/estimate-calories");
    info!("   Generate Plan:     POST http://{host}:{port}/generate-plan");
    info!("   Diet Programs:     POST http://{host}:{port}/generate-diet-programs");
    info!("=== End of Endpoint List ===");
}
