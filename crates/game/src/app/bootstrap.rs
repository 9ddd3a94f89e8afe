use engine::{resolve_app_paths, AppPaths, LoopConfig, Scene, StartupError};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::gameplay;
use crate::config::{load_game_config, ConfigError};

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) paths: AppPaths,
    pub(crate) scene: Box<dyn Scene>,
}

#[derive(Debug, Error)]
pub(crate) enum BootstrapError {
    #[error(transparent)]
    Startup(#[from] StartupError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub(crate) fn build_app() -> Result<AppWiring, BootstrapError> {
    init_tracing();
    info!(version = env!("CARGO_PKG_VERSION"), "=== LOST SEAS Startup ===");

    let app_paths = resolve_app_paths()?;
    let game_config = load_game_config(&app_paths.config_dir)?;
    info!(
        tile_width = game_config.tile_width,
        reef_count = game_config.reef_count,
        loot_count = game_config.loot_count,
        player_speed = game_config.player_speed,
        seed = ?game_config.seed,
        "game_config"
    );

    Ok(AppWiring {
        config: LoopConfig::default(),
        paths: app_paths,
        scene: gameplay::build_scene(game_config),
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
