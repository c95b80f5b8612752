use clap::Parser;
use std::{env::current_dir, path::PathBuf, sync::Arc};
use tracing::info;
use wallman_common::{FsAssetStore, Logger, TracingNotifier};
use wallman_core::{CatalogStore, ModerationDesk, ModerationRules, SchedulingConfig};
use wallman_error::{WMError, WMResult};
use wallman_models::{constants::DEFAULT_CONFIG_FILE_NAME, settings::Settings};
use wallman_storage::WMDbManager;
use wallman_web::{AppState, WMWebServer};

/// Wallman - application catalog and moderation backend for the kiosk wall
#[derive(Parser)]
#[command(name = "wallman")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Wallman", long_about = None)]
struct Cli {
    /// Sets a custom config file with full path
    ///
    /// If not specified, 'wallman.toml' in the current working directory is
    /// used when present.
    #[arg(short, long, env = "WM_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> WMResult<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(p) => p,
        None => {
            let dir = current_dir()
                .map_err(|e| WMError::from(format!("Failed to get current directory: {e}")))?;
            dir.join(DEFAULT_CONFIG_FILE_NAME)
        }
    };
    let settings = Settings::new(config_path.to_string_lossy().to_string())?;

    let mut logger = Logger::from_name(&settings.log.level);
    logger.initialize(&settings.log.dir)?;
    info!(config = %config_path.display(), "configuration loaded");

    let db_manager = WMDbManager::init(&settings).await?;
    let db = db_manager.get_connection()?;

    let notifier = Arc::new(TracingNotifier::new(
        settings.general.notification_sender.as_str(),
    ));
    let assets = Arc::new(FsAssetStore::new(settings.assets.root.as_str()));
    let rules = ModerationRules::new(settings.general.org_email_domain.as_str());

    let state = AppState {
        catalog: Arc::new(CatalogStore::new(
            db.clone(),
            notifier.clone(),
            assets,
            rules.clone(),
        )),
        desk: Arc::new(
            ModerationDesk::new(db.clone(), notifier, rules.clone())
                .with_site_url(settings.general.site_url.as_str()),
        ),
        scheduling: Arc::new(SchedulingConfig::new(db, rules)),
        settings: settings.clone(),
    };
    let web_server = WMWebServer::init(state).await?;
    info!("wallman is ready");

    wait_for_shutdown().await?;

    web_server.stop().await?;
    db_manager.close().await?;
    info!("wallman stopped");
    Ok(())
}

#[cfg(unix)]
async fn wait_for_shutdown() -> WMResult<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    tokio::select! {
        _ = sigterm.recv() => info!("Received SIGTERM signal"),
        _ = sigint.recv() => info!("Received SIGINT signal"),
    }
    Ok(())
}

#[cfg(not(unix))]
async fn wait_for_shutdown() -> WMResult<()> {
    tokio::signal::ctrl_c().await?;
    info!("Received Ctrl+C signal");
    Ok(())
}
