//! Image store handed to scenes at load time.
//!
//! Images are decoded once and addressed by [`ImageHandle`]. A key that fails
//! to resolve still yields a handle; it points at a placeholder of
//! [`PLACEHOLDER_IMAGE_SIZE`] so callers never branch on load failures.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use image::ImageReader;
use thiserror::Error;
use tracing::{debug, warn};

use crate::math::Vec2;

pub const PLACEHOLDER_IMAGE_SIZE: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(u32);

impl ImageHandle {
    /// Handle of the built-in placeholder; always valid.
    pub const PLACEHOLDER: Self = Self(0);
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpriteKeyError {
    #[error("sprite key must not be empty")]
    Empty,
    #[error("sprite key must not contain path separators or '..'")]
    PathLike,
    #[error("sprite key contains invalid character '{character}'")]
    InvalidCharacter { character: char },
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("invalid sprite key '{key}': {source}")]
    InvalidKey {
        key: String,
        #[source]
        source: SpriteKeyError,
    },
    #[error("failed to open image {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA8 rows, top row first. `None` for the placeholder.
    pub rgba: Option<Vec<u8>>,
}

impl LoadedImage {
    fn placeholder() -> Self {
        Self {
            width: PLACEHOLDER_IMAGE_SIZE,
            height: PLACEHOLDER_IMAGE_SIZE,
            rgba: None,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

#[derive(Debug)]
pub struct AssetStore {
    sprite_dir: PathBuf,
    images: Vec<LoadedImage>,
    handles_by_key: HashMap<String, ImageHandle>,
    warned_keys: HashSet<String>,
}

impl AssetStore {
    pub fn new(sprite_dir: impl Into<PathBuf>) -> Self {
        Self {
            sprite_dir: sprite_dir.into(),
            images: vec![LoadedImage::placeholder()],
            handles_by_key: HashMap::new(),
            warned_keys: HashSet::new(),
        }
    }

    pub fn sprite_dir(&self) -> &Path {
        &self.sprite_dir
    }

    /// Loads `<sprite_dir>/<key>.png`, caching by key.
    pub fn load_sprite(&mut self, key: &str) -> ImageHandle {
        if let Some(handle) = self.handles_by_key.get(key) {
            return *handle;
        }

        let handle = match self.try_load_sprite(key) {
            Ok(image) => {
                debug!(
                    sprite_key = key,
                    width = image.width,
                    height = image.height,
                    "sprite_loaded"
                );
                self.push_image(image)
            }
            Err(error) => {
                self.warn_once(key, &error);
                ImageHandle::PLACEHOLDER
            }
        };
        self.handles_by_key.insert(key.to_string(), handle);
        handle
    }

    /// Registers already-decoded pixels under `key`, replacing any cached handle.
    pub fn insert_rgba(&mut self, key: &str, width: u32, height: u32, rgba: Vec<u8>) -> ImageHandle {
        let expected_len = width as usize * height as usize * 4;
        let image = LoadedImage {
            width,
            height,
            rgba: (rgba.len() >= expected_len && expected_len > 0).then_some(rgba),
        };
        let handle = self.push_image(image);
        self.handles_by_key.insert(key.to_string(), handle);
        handle
    }

    /// Unknown handles resolve to the placeholder.
    pub fn image(&self, handle: ImageHandle) -> &LoadedImage {
        self.images
            .get(handle.0 as usize)
            .unwrap_or(&self.images[ImageHandle::PLACEHOLDER.0 as usize])
    }

    pub fn image_size(&self, handle: ImageHandle) -> Vec2 {
        self.image(handle).size()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    fn push_image(&mut self, image: LoadedImage) -> ImageHandle {
        let handle = ImageHandle(self.images.len() as u32);
        self.images.push(image);
        handle
    }

    fn try_load_sprite(&self, key: &str) -> Result<LoadedImage, AssetError> {
        validate_sprite_key(key).map_err(|source| AssetError::InvalidKey {
            key: key.to_string(),
            source,
        })?;
        let path = self.sprite_dir.join(format!("{key}.png"));
        let reader = ImageReader::open(&path).map_err(|source| AssetError::Open {
            path: path.clone(),
            source,
        })?;
        let decoded = reader.decode().map_err(|source| AssetError::Decode {
            path: path.clone(),
            source,
        })?;
        let rgba = decoded.to_rgba8();
        Ok(LoadedImage {
            width: rgba.width(),
            height: rgba.height(),
            rgba: Some(rgba.into_raw()),
        })
    }

    fn warn_once(&mut self, key: &str, error: &AssetError) {
        if !self.warned_keys.insert(key.to_string()) {
            return;
        }
        warn!(
            sprite_key = key,
            error = %error,
            "sprite_load_failed_using_placeholder"
        );
    }
}

pub(crate) fn validate_sprite_key(key: &str) -> Result<(), SpriteKeyError> {
    if key.is_empty() {
        return Err(SpriteKeyError::Empty);
    }
    if key.contains(['/', '\\']) || key.contains("..") {
        return Err(SpriteKeyError::PathLike);
    }
    match key
        .chars()
        .find(|ch| !(ch.is_ascii_lowercase() || ch.is_ascii_digit() || matches!(ch, '_' | '-')))
    {
        Some(character) => Err(SpriteKeyError::InvalidCharacter { character }),
        None => Ok(()),
    }
}
