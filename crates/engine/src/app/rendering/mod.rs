mod frame;
mod renderer;
mod transform;

pub use frame::{Color, DrawRequest, RenderFrame};
pub use renderer::Renderer;
pub use transform::{
    camera_view, orthographic_projection, screen_to_world, world_to_clip, world_to_screen_px,
    Viewport,
};
