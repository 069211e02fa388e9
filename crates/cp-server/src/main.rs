//! carprice server binary
//!
//! Loads configuration, dataset, schema, and model, cross-validates them,
//! and serves the estimator. Any load failure is fatal; there is nothing
//! useful to serve without the artifacts.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cp_catalog::Catalog;
use cp_config::ConfigManager;
use cp_encoder::FeatureSchema;
use cp_model::PriceModel;
use cp_server::{start_server, AppState};

#[derive(Parser, Debug)]
#[command(name = "carprice", about = "Used car price estimation server")]
struct Args {
    /// Path to settings.yaml (defaults to the per-user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured listen host
    #[arg(long)]
    host: Option<String>,

    /// Override the configured listen port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("carprice=info,cp_server=info,cp_catalog=info,cp_model=info,cp_config=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    let config_manager = match args.config {
        Some(path) => ConfigManager::load_from_path(path).await?,
        None => ConfigManager::load().await?,
    };

    if args.host.is_some() || args.port.is_some() {
        config_manager.update(|cfg| {
            if let Some(host) = args.host {
                cfg.server.host = host;
            }
            if let Some(port) = args.port {
                cfg.server.port = port;
            }
        })?;
    }

    let config = config_manager.get();

    let catalog = Catalog::load(&config.data.dataset_path)?;
    info!("Catalog loaded: {} records", catalog.len());

    let schema = FeatureSchema::load(&config.data.schema_path)?;
    let model = PriceModel::load(&config.data.model_dir)?;
    model.validate_schema(&schema)?;
    info!(
        "Model {} ready ({} features)",
        model.metadata().version,
        model.metadata().feature_count
    );

    let state = AppState::new(
        Arc::new(catalog),
        Arc::new(schema),
        Arc::new(model),
        Arc::new(config_manager),
    );

    let (handle, _port) = start_server(config.server.into(), state).await?;
    handle.await?;

    Ok(())
}
