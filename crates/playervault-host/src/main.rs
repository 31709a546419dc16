//! Demo host for the Playervault persistence provider.
//!
//! Stands in for a game server: it owns the worlds and the item registries,
//! and drives a few scripted player sessions through the provider.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `playervault.yaml`, or use defaults
//! 3. Build the catalog and the world registry
//! 4. Start the provider
//! 5. Run one session per scripted player
//! 6. Give the flush scheduler one interval when autosave is off
//! 7. Close the provider and wait for the flush task

mod error;
mod session;
mod worlds;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use playervault_provider::{Provider, ProviderConfig, StaticCatalog};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::HostError;
use crate::worlds::WorldRegistry;

/// Configuration file read from the working directory.
const CONFIG_FILE: &str = "playervault.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid or a session fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("playervault-host starting");

    let config = load_config().context("loading configuration")?;
    info!(
        path = %config.path.display(),
        autosave = config.autosave,
        flush_interval_ms = config.flush_interval_ms,
        "Configuration loaded"
    );

    let catalog = StaticCatalog::vanilla();
    let worlds = WorldRegistry::standard();

    let provider = Provider::builder(config, Arc::new(catalog.clone()))
        .default_worlds(WorldRegistry::fallback_factory())
        .build()
        .context("starting provider")?;

    for (id, name) in session::scripted_players() {
        session::run(&provider, &worlds, &catalog, id, name)
            .await
            .with_context(|| format!("session for {name}"))?;
    }

    if !provider.config().autosave {
        let wait = provider.config().flush_interval();
        info!(wait_ms = provider.config().flush_interval_ms, "Waiting for flush");
        tokio::time::sleep(wait).await;
    }

    provider.shutdown().await;
    info!("playervault-host stopped");
    Ok(())
}

/// Load the provider configuration from [`CONFIG_FILE`].
///
/// If the file does not exist, defaults are used.
fn load_config() -> Result<ProviderConfig, HostError> {
    let config_path = Path::new(CONFIG_FILE);
    if config_path.exists() {
        Ok(ProviderConfig::from_file(config_path)?)
    } else {
        info!("Config file not found, using defaults");
        let mut config = ProviderConfig::default();
        config.apply_env_overrides();
        Ok(config)
    }
}
