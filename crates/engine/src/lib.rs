use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod animate;
pub mod app;
pub mod assets;
pub mod math;
pub mod tile;

pub use animate::{almost_equals, breathing, decay_towards, decay_towards_vec2, DECAY_SNAP_EPSILON};
pub use app::{
    camera_view, orthographic_projection, run_app, screen_to_world, world_to_clip,
    world_to_screen_px, AppError, Color, DrawRequest, InputAction, InputSnapshot, LoopConfig,
    LoopMetricsSnapshot, RenderFrame, Renderer, Scene, SceneCommand, Viewport,
};
pub use assets::{
    AssetError, AssetStore, ImageHandle, LoadedImage, SpriteKeyError, PLACEHOLDER_IMAGE_SIZE,
};
pub use glam::{Mat4, Vec3, Vec4};
pub use math::Vec2;
pub use tile::{TileCoord, TileGrid, DEFAULT_TILE_WIDTH};

pub const ROOT_ENV_VAR: &str = "LOST_SEAS_ROOT";

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub root: PathBuf,
    pub assets_dir: PathBuf,
    pub sprite_dir: PathBuf,
    pub config_dir: PathBuf,
}

impl AppPaths {
    fn from_root(root: PathBuf) -> Self {
        let assets_dir = root.join("assets");
        let sprite_dir = assets_dir.join("sprites");
        let config_dir = root.join("config");
        Self {
            root,
            assets_dir,
            sprite_dir,
            config_dir,
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to read environment variable {var}: {source}")]
    EnvVar {
        var: &'static str,
        #[source]
        source: env::VarError,
    },
    #[error("failed to resolve current executable path: {0}")]
    CurrentExe(#[source] std::io::Error),
    #[error("current executable path has no parent directory: {0}")]
    ExeHasNoParent(PathBuf),
    #[error(
        "LOST_SEAS_ROOT is set but does not point to a valid project root: {path}\n\
A valid root must contain Cargo.toml and either crates/ or assets/."
    )]
    InvalidEnvRoot { path: PathBuf },
    #[error(
        "Could not detect project root by walking upward from executable directory: {start_dir}\n\
Expected a directory containing Cargo.toml and either crates/ or assets/.\n\
Set {env_var} explicitly, for example:\n\
Bash/zsh: export {env_var}=\"/path/to/lost-seas\""
    )]
    RootNotFound {
        start_dir: PathBuf,
        env_var: &'static str,
    },
}

/// Resolves the project root and the asset/config directories beneath it.
///
/// Missing `assets/sprites` or `config` directories are not an error; sprites
/// fall back to placeholders and config falls back to defaults.
pub fn resolve_app_paths() -> Result<AppPaths, StartupError> {
    resolve_root().map(AppPaths::from_root)
}

fn resolve_root() -> Result<PathBuf, StartupError> {
    match env::var(ROOT_ENV_VAR) {
        Ok(value) => {
            let normalized = normalize_path(Path::new(&value));
            if is_repo_marker(&normalized) {
                Ok(normalized)
            } else {
                Err(StartupError::InvalidEnvRoot { path: normalized })
            }
        }
        Err(env::VarError::NotPresent) => {
            let exe = env::current_exe().map_err(StartupError::CurrentExe)?;
            let exe_dir = exe
                .parent()
                .map(Path::to_path_buf)
                .ok_or_else(|| StartupError::ExeHasNoParent(exe.clone()))?;
            find_root_upwards(&exe_dir).ok_or_else(|| StartupError::RootNotFound {
                start_dir: normalize_path(&exe_dir),
                env_var: ROOT_ENV_VAR,
            })
        }
        Err(source) => Err(StartupError::EnvVar {
            var: ROOT_ENV_VAR,
            source,
        }),
    }
}

fn find_root_upwards(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .find(|candidate| is_repo_marker(candidate))
        .map(normalize_path)
}

fn is_repo_marker(path: &Path) -> bool {
    let cargo_toml = path.join("Cargo.toml").is_file();
    let has_crates = path.join("crates").is_dir();
    let has_assets = path.join("assets").is_dir();

    cargo_toml && (has_crates || has_assets)
}

fn normalize_path(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
