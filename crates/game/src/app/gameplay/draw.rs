use engine::{breathing, Color, Mat4, RenderFrame, TileCoord, TileGrid, Vec2, Vec3};

use super::frame::WorldFrame;
use super::sprites::SpriteTable;
use super::world::World;

pub(crate) const GRID_TILE_COLOR: Color = Color::new(0.1, 0.1, 0.1, 0.1);
pub(crate) const SELECTED_TINT: Color = Color::RED;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DrawStyle {
    pub(crate) bob_rate: f32,
    pub(crate) bob_amplitude: f32,
    pub(crate) grid_radius_x: i32,
    pub(crate) grid_radius_y: i32,
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self {
            bob_rate: 10.0,
            bob_amplitude: 1.0,
            grid_radius_x: 40,
            grid_radius_y: 30,
        }
    }
}

/// Checkerboard of translucent tiles around `center`.
///
/// Covers `center.x - radius_x .. center.x + radius_x` (and likewise for y);
/// a tile is drawn when `x + (1 if y is even else 0)` is even.
pub(crate) fn emit_tile_grid(out: &mut RenderFrame, grid: TileGrid, center: TileCoord, style: &DrawStyle) {
    let width = grid.tile_width();
    let half = width * 0.5;
    for x in (center.x - style.grid_radius_x)..(center.x + style.grid_radius_x) {
        for y in (center.y - style.grid_radius_y)..(center.y + style.grid_radius_y) {
            let row_shift = i32::from(y.rem_euclid(2) == 0);
            if (x + row_shift).rem_euclid(2) != 0 {
                continue;
            }
            let tile_center = grid.tile_center(TileCoord { x, y });
            out.draw_rect(
                Vec2::new(tile_center.x - half, tile_center.y - half),
                Vec2::new(width, width),
                GRID_TILE_COLOR,
            );
        }
    }
}

/// Sprite anchor for an entity: bottom-left corner of its image in world space.
///
/// The image is centred horizontally on the entity and its bottom edge sits
/// half a tile below the entity position, lifted by `bob`.
pub(crate) fn entity_transform(position: Vec2, sprite_size: Vec2, tile_width: f32, bob: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(
        position.x - sprite_size.x * 0.5,
        position.y - tile_width * 0.5 + bob,
        0.0,
    ))
}

/// One image per live entity in slot order; the frame's selection is tinted.
pub(crate) fn emit_entities(
    out: &mut RenderFrame,
    world: &World,
    frame: &WorldFrame,
    sprites: &SpriteTable,
    style: &DrawStyle,
    elapsed_seconds: f32,
) {
    let tile_width = world.grid().tile_width();
    let item_bob = breathing(elapsed_seconds, style.bob_rate) * style.bob_amplitude;
    for (entity_ref, entity) in world.entities.iter() {
        let sprite = sprites.get(entity.sprite_id);
        let bob = if entity.is_item { item_bob } else { 0.0 };
        let tint = if frame.selected() == Some(entity_ref) {
            SELECTED_TINT
        } else {
            Color::WHITE
        };
        out.draw_image(
            sprite.handle,
            entity_transform(entity.position, sprite.size, tile_width, bob),
            sprite.size,
            tint,
        );
    }
}
