use std::sync::Arc;

use glam::{Mat4, Vec4};
use pixels::{Error, Pixels, SurfaceTexture};
use winit::window::Window;

use super::frame::{Color, DrawRequest, RenderFrame};
use super::transform::{world_to_clip, world_to_screen_px, Viewport};
use crate::assets::AssetStore;
use crate::math::Vec2;

const PLACEHOLDER_COLOR: [u8; 4] = [220, 220, 240, 255];

#[derive(Debug, Clone, Copy, PartialEq)]
struct ScreenRect {
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
}

/// Software compositor: executes a scene's [`RenderFrame`] into a pixel buffer.
pub struct Renderer {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    viewport: Viewport,
}

impl Renderer {
    pub fn new(window: Arc<Window>) -> Result<Self, Error> {
        let size = window.inner_size();
        let pixels = Self::build_pixels(Arc::clone(&window), size.width, size.height)?;
        Ok(Self {
            window,
            pixels,
            viewport: Viewport {
                width: size.width,
                height: size.height,
            },
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels = Self::build_pixels(Arc::clone(&self.window), width, height)?;
        self.viewport = Viewport { width, height };
        Ok(())
    }

    fn build_pixels(window: Arc<Window>, width: u32, height: u32) -> Result<Pixels<'static>, Error> {
        let surface = SurfaceTexture::new(width, height, window);
        Pixels::new(width, height, surface)
    }

    pub fn render(&mut self, frame: &RenderFrame, assets: &AssetStore) -> Result<(), Error> {
        if self.viewport.is_empty() {
            return Ok(());
        }
        composite_frame(self.pixels.frame_mut(), self.viewport, frame, assets);
        self.pixels.render()
    }
}

pub(crate) fn composite_frame(
    buffer: &mut [u8],
    viewport: Viewport,
    frame: &RenderFrame,
    assets: &AssetStore,
) {
    let clear = frame.clear_color.to_rgba8();
    for chunk in buffer.chunks_exact_mut(4) {
        chunk.copy_from_slice(&clear);
    }
    let world_to_clip = world_to_clip(frame.projection, frame.view);
    for draw in &frame.draws {
        composite_draw(buffer, viewport, world_to_clip, draw, assets);
    }
}

fn composite_draw(
    buffer: &mut [u8],
    viewport: Viewport,
    world_to_clip: Mat4,
    draw: &DrawRequest,
    assets: &AssetStore,
) {
    let Some(rect) = draw_screen_rect(viewport, world_to_clip, draw) else {
        return;
    };
    let x_start = rect.left.floor().max(0.0) as i32;
    let x_end = rect.right.ceil().min(viewport.width as f32) as i32;
    let y_start = rect.top.floor().max(0.0) as i32;
    let y_end = rect.bottom.ceil().min(viewport.height as f32) as i32;
    if x_start >= x_end || y_start >= y_end {
        return;
    }

    let image = draw.image.map(|handle| assets.image(handle));
    let rect_w = rect.right - rect.left;
    let rect_h = rect.bottom - rect.top;
    let frame_width = viewport.width as usize;

    for py in y_start..y_end {
        let center_y = py as f32 + 0.5;
        if center_y < rect.top || center_y >= rect.bottom {
            continue;
        }
        let v = (center_y - rect.top) / rect_h;
        for px in x_start..x_end {
            let center_x = px as f32 + 0.5;
            if center_x < rect.left || center_x >= rect.right {
                continue;
            }
            let u = (center_x - rect.left) / rect_w;
            let source = match image {
                None => [255, 255, 255, 255],
                Some(loaded) => match loaded.rgba.as_deref() {
                    Some(rgba) => sample_nearest(rgba, loaded.width, loaded.height, u, v),
                    None => PLACEHOLDER_COLOR,
                },
            };
            let color = apply_tint(source, draw.tint);
            let offset = (py as usize * frame_width + px as usize) * 4;
            if let Some(dst) = buffer.get_mut(offset..offset + 4) {
                blend_over(dst, color);
            }
        }
    }
}

fn draw_screen_rect(viewport: Viewport, world_to_clip: Mat4, draw: &DrawRequest) -> Option<ScreenRect> {
    if !(draw.size.x.is_finite() && draw.size.y.is_finite()) {
        return None;
    }
    let corner_a = draw.transform * Vec4::new(0.0, 0.0, 0.0, 1.0);
    let corner_b = draw.transform * Vec4::new(draw.size.x, draw.size.y, 0.0, 1.0);
    let a = world_to_screen_px(Vec2::new(corner_a.x, corner_a.y), viewport, world_to_clip);
    let b = world_to_screen_px(Vec2::new(corner_b.x, corner_b.y), viewport, world_to_clip);
    let rect = ScreenRect {
        left: a.x.min(b.x),
        top: a.y.min(b.y),
        right: a.x.max(b.x),
        bottom: a.y.max(b.y),
    };
    let finite = [rect.left, rect.top, rect.right, rect.bottom]
        .iter()
        .all(|value| value.is_finite());
    (finite && rect.right > rect.left && rect.bottom > rect.top).then_some(rect)
}

fn sample_nearest(rgba: &[u8], width: u32, height: u32, u: f32, v: f32) -> [u8; 4] {
    if width == 0 || height == 0 {
        return PLACEHOLDER_COLOR;
    }
    let sx = ((u * width as f32) as u32).min(width - 1) as usize;
    let sy = ((v * height as f32) as u32).min(height - 1) as usize;
    let offset = (sy * width as usize + sx) * 4;
    match rgba.get(offset..offset + 4) {
        Some(texel) => [texel[0], texel[1], texel[2], texel[3]],
        None => PLACEHOLDER_COLOR,
    }
}

fn apply_tint(source: [u8; 4], tint: Color) -> [u8; 4] {
    let tint = tint.to_rgba8();
    let mul = |a: u8, b: u8| ((a as u16 * b as u16 + 127) / 255) as u8;
    [
        mul(source[0], tint[0]),
        mul(source[1], tint[1]),
        mul(source[2], tint[2]),
        mul(source[3], tint[3]),
    ]
}

fn blend_over(dst: &mut [u8], src: [u8; 4]) {
    let alpha = src[3] as u16;
    if alpha == 0 {
        return;
    }
    let inv = 255 - alpha;
    for channel in 0..3 {
        dst[channel] = ((src[channel] as u16 * alpha + dst[channel] as u16 * inv + 127) / 255) as u8;
    }
    dst[3] = 255;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::rendering::{camera_view, orthographic_projection};

    const VIEWPORT: Viewport = Viewport {
        width: 16,
        height: 8,
    };

    fn frame_with(draws: Vec<DrawRequest>) -> RenderFrame {
        RenderFrame {
            projection: orthographic_projection(VIEWPORT),
            view: camera_view(Vec2::ZERO, 1.0),
            clear_color: Color::new(0.0, 0.0, 0.0, 1.0),
            draws,
        }
    }

    fn pixel(buffer: &[u8], x: usize, y: usize) -> [u8; 4] {
        let offset = (y * VIEWPORT.width as usize + x) * 4;
        [
            buffer[offset],
            buffer[offset + 1],
            buffer[offset + 2],
            buffer[offset + 3],
        ]
    }

    fn buffer() -> Vec<u8> {
        vec![0; VIEWPORT.width as usize * VIEWPORT.height as usize * 4]
    }

    #[test]
    fn solid_rect_covers_expected_pixels() {
        let assets = AssetStore::new("unused");
        let mut frame = frame_with(Vec::new());
        frame.draw_rect(Vec2::new(0.0, 0.0), Vec2::new(2.0, 2.0), Color::RED);
        let mut buf = buffer();

        composite_frame(&mut buf, VIEWPORT, &frame, &assets);

        // World origin sits at pixel (8, 4); +y world is up the screen.
        assert_eq!(pixel(&buf, 8, 3), [255, 0, 0, 255]);
        assert_eq!(pixel(&buf, 9, 2), [255, 0, 0, 255]);
        assert_eq!(pixel(&buf, 7, 3), [0, 0, 0, 255]);
        assert_eq!(pixel(&buf, 8, 4), [0, 0, 0, 255]);
    }

    #[test]
    fn image_rows_are_drawn_top_first_and_tinted() {
        let mut assets = AssetStore::new("unused");
        let mut rgba = vec![255u8; 4];
        rgba.extend_from_slice(&[0, 0, 255, 255]);
        let handle = assets.insert_rgba("two_rows", 1, 2, rgba);
        let mut frame = frame_with(Vec::new());
        frame.draw_image(handle, Mat4::IDENTITY, Vec2::new(1.0, 2.0), Color::WHITE);
        let mut buf = buffer();

        composite_frame(&mut buf, VIEWPORT, &frame, &assets);

        assert_eq!(pixel(&buf, 8, 2), [255, 255, 255, 255]);
        assert_eq!(pixel(&buf, 8, 3), [0, 0, 255, 255]);

        frame.draws[0].tint = Color::RED;
        composite_frame(&mut buf, VIEWPORT, &frame, &assets);
        assert_eq!(pixel(&buf, 8, 2), [255, 0, 0, 255]);
        assert_eq!(pixel(&buf, 8, 3), [0, 0, 0, 255]);
    }

    #[test]
    fn translucent_rect_blends_with_clear_color() {
        let assets = AssetStore::new("unused");
        let mut frame = frame_with(Vec::new());
        frame.clear_color = Color::WHITE;
        frame.draw_rect(Vec2::ZERO, Vec2::new(1.0, 1.0), Color::new(0.0, 0.0, 0.0, 0.5));
        let mut buf = buffer();

        composite_frame(&mut buf, VIEWPORT, &frame, &assets);

        let blended = pixel(&buf, 8, 3);
        assert!(blended[0] > 100 && blended[0] < 155, "{blended:?}");
    }

    #[test]
    fn offscreen_and_degenerate_draws_are_skipped() {
        let assets = AssetStore::new("unused");
        let mut frame = frame_with(Vec::new());
        frame.draw_rect(Vec2::new(1000.0, 1000.0), Vec2::new(4.0, 4.0), Color::RED);
        frame.draw_rect(Vec2::ZERO, Vec2::new(0.0, 4.0), Color::RED);
        frame.draw_rect(Vec2::ZERO, Vec2::new(f32::NAN, 4.0), Color::RED);
        let mut buf = buffer();

        composite_frame(&mut buf, VIEWPORT, &frame, &assets);

        assert!(buf.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
    }

    #[test]
    fn missing_image_draws_placeholder() {
        let assets = AssetStore::new("unused");
        let mut frame = frame_with(Vec::new());
        frame.draw_image(
            crate::assets::ImageHandle::PLACEHOLDER,
            Mat4::IDENTITY,
            Vec2::new(1.0, 1.0),
            Color::WHITE,
        );
        let mut buf = buffer();

        composite_frame(&mut buf, VIEWPORT, &frame, &assets);

        assert_eq!(pixel(&buf, 8, 3), PLACEHOLDER_COLOR);
    }
}
