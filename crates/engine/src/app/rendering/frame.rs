use glam::Mat4;

use crate::assets::ImageHandle;
use crate::math::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// `0xRRGGBBAA`.
    pub fn from_hex(rgba: u32) -> Self {
        let channel = |shift: u32| ((rgba >> shift) & 0xff) as f32 / 255.0;
        Self::new(channel(24), channel(16), channel(8), channel(0))
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        let quantize = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        [
            quantize(self.r),
            quantize(self.g),
            quantize(self.b),
            quantize(self.a),
        ]
    }
}

/// One textured (or solid, when `image` is `None`) quad.
///
/// `transform` places the quad's bottom-left corner in world space; the quad
/// spans `size` world units along the transformed x and y axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRequest {
    pub image: Option<ImageHandle>,
    pub transform: Mat4,
    pub size: Vec2,
    pub tint: Color,
}

/// Per-frame hand-off from a scene to the compositor.
#[derive(Debug, Clone)]
pub struct RenderFrame {
    pub projection: Mat4,
    pub view: Mat4,
    pub clear_color: Color,
    pub draws: Vec<DrawRequest>,
}

impl Default for RenderFrame {
    fn default() -> Self {
        Self {
            projection: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            clear_color: Color::new(0.0, 0.0, 0.0, 1.0),
            draws: Vec::new(),
        }
    }
}

impl RenderFrame {
    pub fn with_clear_color(clear_color: Color) -> Self {
        Self {
            clear_color,
            ..Self::default()
        }
    }

    /// Drops last frame's draws, keeping the allocation.
    pub fn reset(&mut self) {
        self.draws.clear();
    }

    pub fn draw_image(&mut self, image: ImageHandle, transform: Mat4, size: Vec2, tint: Color) {
        self.draws.push(DrawRequest {
            image: Some(image),
            transform,
            size,
            tint,
        });
    }

    /// Axis-aligned solid rectangle with its bottom-left corner at `min`.
    pub fn draw_rect(&mut self, min: Vec2, size: Vec2, color: Color) {
        self.draws.push(DrawRequest {
            image: None,
            transform: Mat4::from_translation(glam::Vec3::new(min.x, min.y, 0.0)),
            size,
            tint: color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_decode_per_channel() {
        let color = Color::from_hex(0x2a2d3aff);
        assert_eq!(color.to_rgba8(), [0x2a, 0x2d, 0x3a, 0xff]);
    }

    #[test]
    fn quantize_clamps_out_of_range_channels() {
        assert_eq!(Color::new(2.0, -1.0, 0.5, 1.0).to_rgba8(), [255, 0, 128, 255]);
    }

    #[test]
    fn reset_keeps_projection_and_clears_draws() {
        let mut frame = RenderFrame::with_clear_color(Color::WHITE);
        frame.draw_rect(Vec2::ZERO, Vec2::new(8.0, 8.0), Color::RED);
        frame.reset();
        assert!(frame.draws.is_empty());
        assert_eq!(frame.clear_color, Color::WHITE);
    }
}
