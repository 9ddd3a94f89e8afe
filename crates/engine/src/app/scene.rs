use super::input::{ActionStates, InputAction};
use super::rendering::RenderFrame;
use crate::assets::AssetStore;
use crate::math::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    None,
    Quit,
}

/// Everything a scene may read from the platform during one tick.
///
/// The cursor is in window pixels with the origin at the bottom-left corner.
/// `primary_click_pressed` is an edge: it is true for exactly one tick per
/// physical press.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    quit_requested: bool,
    actions: ActionStates,
    cursor_position_px: Option<Vec2>,
    primary_click_pressed: bool,
    window_width: u32,
    window_height: u32,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(
        quit_requested: bool,
        actions: ActionStates,
        cursor_position_px: Option<Vec2>,
        primary_click_pressed: bool,
        window_width: u32,
        window_height: u32,
    ) -> Self {
        Self {
            quit_requested,
            actions,
            cursor_position_px,
            primary_click_pressed,
            window_width,
            window_height,
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.actions.is_down(action)
    }

    pub fn with_action_down(mut self, action: InputAction, is_down: bool) -> Self {
        self.actions.set(action, is_down);
        self
    }

    pub fn with_cursor_position_px(mut self, cursor_position_px: Option<Vec2>) -> Self {
        self.cursor_position_px = cursor_position_px;
        self
    }

    pub fn with_primary_click_pressed(mut self, pressed: bool) -> Self {
        self.primary_click_pressed = pressed;
        self
    }

    pub fn with_window_size(mut self, window_size: (u32, u32)) -> Self {
        self.window_width = window_size.0;
        self.window_height = window_size.1;
        self
    }

    pub fn cursor_position_px(&self) -> Option<Vec2> {
        self.cursor_position_px
    }

    pub fn primary_click_pressed(&self) -> bool {
        self.primary_click_pressed
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }

    /// Normalised movement direction from the held movement actions.
    pub fn movement_axis(&self) -> Vec2 {
        let mut axis = Vec2::ZERO;
        if self.is_down(InputAction::MoveLeft) {
            axis.x -= 1.0;
        }
        if self.is_down(InputAction::MoveRight) {
            axis.x += 1.0;
        }
        if self.is_down(InputAction::MoveDown) {
            axis.y -= 1.0;
        }
        if self.is_down(InputAction::MoveUp) {
            axis.y += 1.0;
        }
        axis.normalize_or_zero()
    }
}

pub trait Scene {
    fn load(&mut self, assets: &mut AssetStore);
    fn update(&mut self, dt_seconds: f32, input: &InputSnapshot) -> SceneCommand;
    /// Fills `frame` with the draw requests produced by the most recent update.
    fn render(&mut self, frame: &mut RenderFrame);
    fn unload(&mut self);
    fn debug_title(&self) -> Option<String> {
        None
    }
    fn entity_count(&self) -> usize {
        0
    }
}
