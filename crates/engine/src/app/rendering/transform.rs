use glam::{Mat4, Vec3, Vec4};

use crate::math::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn from_size((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Pixel-scale orthographic projection centred on the viewport.
pub fn orthographic_projection(viewport: Viewport) -> Mat4 {
    let half_w = viewport.width as f32 * 0.5;
    let half_h = viewport.height as f32 * 0.5;
    Mat4::orthographic_rh_gl(-half_w, half_w, -half_h, half_h, -1.0, 10.0)
}

/// Camera-to-world matrix: world units per pixel shrink as `zoom` grows.
///
/// Non-positive or non-finite zoom is treated as `1.0`.
pub fn camera_view(position: Vec2, zoom: f32) -> Mat4 {
    let zoom = if zoom.is_finite() && zoom > 0.0 { zoom } else { 1.0 };
    Mat4::from_translation(Vec3::new(position.x, position.y, 1.0))
        * Mat4::from_scale(Vec3::new(zoom.recip(), zoom.recip(), 1.0))
}

/// Unprojects a bottom-left-origin window cursor into world space.
///
/// Normalises to device coordinates, applies the inverse projection, then the
/// camera-to-world `view`. An empty viewport yields the view origin.
pub fn screen_to_world(cursor_px: Vec2, viewport: Viewport, projection: Mat4, view: Mat4) -> Vec2 {
    if viewport.is_empty() {
        let origin = view * Vec4::new(0.0, 0.0, 0.0, 1.0);
        return Vec2::new(origin.x, origin.y);
    }
    let ndc_x = cursor_px.x / (viewport.width as f32 * 0.5) - 1.0;
    let ndc_y = cursor_px.y / (viewport.height as f32 * 0.5) - 1.0;
    let world = view * projection.inverse() * Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
    Vec2::new(world.x, world.y)
}

/// World-to-clip matrix used by the compositor.
pub fn world_to_clip(projection: Mat4, view: Mat4) -> Mat4 {
    projection * view.inverse()
}

/// Projects a world point to top-left-origin pixel coordinates (unrounded).
pub fn world_to_screen_px(world: Vec2, viewport: Viewport, world_to_clip: Mat4) -> Vec2 {
    let clip = world_to_clip * Vec4::new(world.x, world.y, 0.0, 1.0);
    let w = if clip.w.abs() > f32::EPSILON { clip.w } else { 1.0 };
    let ndc_x = clip.x / w;
    let ndc_y = clip.y / w;
    Vec2::new(
        (ndc_x + 1.0) * 0.5 * viewport.width as f32,
        (1.0 - (ndc_y + 1.0) * 0.5) * viewport.height as f32,
    )
}
