// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use nsreaper::config::Config;
use nsreaper::kubernetes::{create_client, KubeClusterApi};
use nsreaper::reaper::Reclaimer;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing, defaulting to info
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("{:#}", e);
            std::process::exit(1);
        }
    };
    info!(
        "Configuration loaded: include_all={}, include=[{}], ignore=[{}], duration={:?}",
        config.include_all,
        config.include.join(", "),
        config.ignore.join(", "),
        config.duration
    );

    info!("Generating the client to connect to Kubernetes");
    let client = match create_client(&config).await {
        Ok(client) => client,
        Err(e) => {
            error!("error connecting to Kubernetes API: {}", e);
            std::process::exit(1);
        }
    };

    let reclaimer = Reclaimer::new(
        KubeClusterApi::new(client),
        config.filter(),
        config.finalizer_policy(),
        config.duration,
    );

    if let Err(e) = reclaimer.run().await {
        error!("{:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
