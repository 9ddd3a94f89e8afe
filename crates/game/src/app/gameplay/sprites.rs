use engine::{AssetStore, ImageHandle, Vec2, PLACEHOLDER_IMAGE_SIZE};

use super::archetype::SpriteId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SpriteImage {
    pub(crate) handle: ImageHandle,
    pub(crate) size: Vec2,
}

impl SpriteImage {
    const PLACEHOLDER: Self = Self {
        handle: ImageHandle::PLACEHOLDER,
        size: Vec2::new(PLACEHOLDER_IMAGE_SIZE as f32, PLACEHOLDER_IMAGE_SIZE as f32),
    };
}

/// Image handle and size per [`SpriteId`], resolved once at scene load.
#[derive(Debug, Clone)]
pub(crate) struct SpriteTable {
    images: [SpriteImage; SpriteId::COUNT],
}

impl Default for SpriteTable {
    fn default() -> Self {
        Self {
            images: [SpriteImage::PLACEHOLDER; SpriteId::COUNT],
        }
    }
}

impl SpriteTable {
    pub(crate) fn load(assets: &mut AssetStore) -> Self {
        let mut table = Self::default();
        for (index, image) in table.images.iter_mut().enumerate() {
            let Some(key) = SpriteId::from_index(index).sprite_key() else {
                continue;
            };
            let handle = assets.load_sprite(key);
            *image = SpriteImage {
                handle,
                size: assets.image_size(handle),
            };
        }
        table
    }

    pub(crate) fn get(&self, sprite_id: SpriteId) -> SpriteImage {
        self.images[sprite_id.index()]
    }
}
