mod app;
mod bridge;
mod components;
mod state;

use crate::app::App;
use crate::state::{Catalog, PlayerController};
use dioxus::desktop::{LogicalSize, WindowBuilder};
use dioxus::prelude::*;
use podcastr_core::{load_catalog, PodcastrConfig, PodcastrError};
use std::fs::File;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const APP_NAME: &str = "Podcastr";

fn main() {
    // Config decides whether logs also go to a file, so tracing starts after it.
    // Config errors are collected and logged once tracing is up.
    let (config, config_error) = match PodcastrConfig::load_or_create() {
        Ok(config) => (config, None),
        Err(e) => (PodcastrConfig::default(), Some(e)),
    };

    init_tracing(config.logging.enabled);

    match config_error {
        None => {}
        Some(PodcastrError::ConfigNotFound { path }) => {
            info!("Created config template at {}, using defaults", path.display());
        }
        Some(e) => {
            error!("{e}");
            warn!("Falling back to the default configuration");
        }
    }

    let catalog = load_episodes(&config);
    info!("Loaded {} episode(s) into the catalog", catalog.0.len());

    let window = WindowBuilder::new()
        .with_title(APP_NAME)
        .with_resizable(true)
        .with_inner_size(LogicalSize::new(
            f64::from(config.ui.window.width),
            f64::from(config.ui.window.height),
        ));

    let dioxus_config = dioxus::desktop::Config::default()
        .with_window(window)
        .with_disable_context_menu(true);

    // Inject config and catalog before launch; the playback store is created
    // by the root component because it lives on the UI thread.
    dioxus::LaunchBuilder::desktop()
        .with_cfg(dioxus_config)
        .with_context(config.player)
        .with_context(config.ui)
        .with_context(catalog)
        .launch(app);
}

/// Root component that creates the playback store and the audio bridge
fn app() -> Element {
    let player_config: podcastr_core::PlayerConfig = use_context();
    let controller = use_context_provider(|| PlayerController::new(&player_config));

    // Forward audio element events into the player view
    use_future(move || controller.run_audio_bridge());

    rsx! {
        document::Title { "{APP_NAME}" },
        App {}
    }
}

fn load_episodes(config: &PodcastrConfig) -> Catalog {
    let Some(path) = config.catalog.episodes_path.as_deref() else {
        warn!("No [catalog] episodes_path configured, the episode list is empty");
        return Catalog::default();
    };

    match load_catalog(path) {
        Ok(episodes) => Catalog(Arc::new(episodes)),
        Err(e) => {
            error!("Failed to load episode catalog: {e}");
            Catalog::default()
        }
    }
}

fn init_tracing(file_logging_enabled: bool) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer();

    if file_logging_enabled {
        let log_path = podcastr_core::paths::log_file_path();

        // Create cache directory if needed
        if let Some(parent) = log_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        match File::create(&log_path) {
            Ok(file) => {
                let file_layer = tracing_subscriber::fmt::layer()
                    .with_writer(Arc::new(file))
                    .with_ansi(false);

                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt_layer)
                    .with(file_layer)
                    .init();

                return;
            }
            Err(e) => {
                eprintln!("Failed to create log file at {}: {e}", log_path.display());
            }
        }
    }

    // Fallback: console only
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
