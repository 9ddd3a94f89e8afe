use crate::math::Vec2;

pub const DEFAULT_TILE_WIDTH: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
}

/// Square tile grid anchored at the world origin.
///
/// Tile `(0, 0)` is centred on world `(0, 0)`; a world coordinate maps to the
/// tile whose centre is nearest. Exact half-way values round away from zero
/// (`f32::round`), so `4.0` maps to tile `1` and `-4.0` to tile `-1` at the
/// default width. Values outside the `i32` range saturate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileGrid {
    tile_width: f32,
}

impl Default for TileGrid {
    fn default() -> Self {
        Self {
            tile_width: DEFAULT_TILE_WIDTH,
        }
    }
}

impl TileGrid {
    /// Non-positive or non-finite widths fall back to [`DEFAULT_TILE_WIDTH`].
    pub fn new(tile_width: f32) -> Self {
        let tile_width = if tile_width.is_finite() && tile_width > 0.0 {
            tile_width
        } else {
            DEFAULT_TILE_WIDTH
        };
        Self { tile_width }
    }

    pub fn tile_width(&self) -> f32 {
        self.tile_width
    }

    pub fn world_to_tile(&self, world: f32) -> i32 {
        (world / self.tile_width).round() as i32
    }

    pub fn tile_to_world(&self, tile: i32) -> f32 {
        tile as f32 * self.tile_width
    }

    pub fn tile_of(&self, world: Vec2) -> TileCoord {
        TileCoord {
            x: self.world_to_tile(world.x),
            y: self.world_to_tile(world.y),
        }
    }

    pub fn tile_center(&self, tile: TileCoord) -> Vec2 {
        Vec2::new(self.tile_to_world(tile.x), self.tile_to_world(tile.y))
    }

    pub fn snap(&self, world: f32) -> f32 {
        self.tile_to_world(self.world_to_tile(world))
    }

    pub fn snap_vec2(&self, world: Vec2) -> Vec2 {
        Vec2::new(self.snap(world.x), self.snap(world.y))
    }
}
