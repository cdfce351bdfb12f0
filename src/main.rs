use anyhow::Result;
use ibanner::config::AppConfig;
use ibanner::premium::{FeatureGate, StaticEntitlement};
use ibanner::storage::BannerStore;
use ibanner::ui::{AppState, BannerApp};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Config path from the first argument, then `IBANNER_CONFIG`
fn config_path() -> Option<PathBuf> {
    std::env::args_os()
        .nth(1)
        .or_else(|| std::env::var_os("IBANNER_CONFIG"))
        .map(PathBuf::from)
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ibanner=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting iBanner");

    let config = AppConfig::load_or_default(config_path().as_deref());
    info!("Data directory: {}", config.data_dir.display());

    let store = BannerStore::from_config(&config)?;
    let gate = FeatureGate::new(
        config.premium_gating,
        Box::new(StaticEntitlement::default()),
    );
    let state = AppState::new(store, config.clone(), gate);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("iBanner")
            .with_inner_size([config.screen_width, config.screen_height])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "iBanner",
        options,
        Box::new(move |cc| Ok(Box::new(BannerApp::new(cc, state)))),
    )
    .map_err(|e| anyhow::anyhow!("UI error: {}", e))?;

    info!("iBanner exited");
    Ok(())
}
