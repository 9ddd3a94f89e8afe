mod input;
mod loop_runner;
mod metrics;
mod rendering;
mod scene;

pub use input::InputAction;
pub use loop_runner::{run_app, AppError, LoopConfig};
pub use metrics::LoopMetricsSnapshot;
pub use rendering::{
    camera_view, orthographic_projection, screen_to_world, world_to_clip, world_to_screen_px,
    Color, DrawRequest, RenderFrame, Renderer, Viewport,
};
pub use scene::{InputSnapshot, Scene, SceneCommand};
