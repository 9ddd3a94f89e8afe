use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::InputSnapshot;
use crate::math::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Quit,
}

const ACTION_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ActionStates {
    down: [bool; ACTION_COUNT],
}

impl ActionStates {
    pub(crate) fn set(&mut self, action: InputAction, is_down: bool) {
        self.down[action.index()] = is_down;
    }

    pub(crate) fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }
}

impl InputAction {
    const fn index(self) -> usize {
        match self {
            InputAction::MoveUp => 0,
            InputAction::MoveDown => 1,
            InputAction::MoveLeft => 2,
            InputAction::MoveRight => 3,
            InputAction::Quit => 4,
        }
    }

    fn from_physical_key(key: PhysicalKey) -> Option<Self> {
        match key {
            PhysicalKey::Code(KeyCode::KeyW | KeyCode::ArrowUp) => Some(Self::MoveUp),
            PhysicalKey::Code(KeyCode::KeyS | KeyCode::ArrowDown) => Some(Self::MoveDown),
            PhysicalKey::Code(KeyCode::KeyA | KeyCode::ArrowLeft) => Some(Self::MoveLeft),
            PhysicalKey::Code(KeyCode::KeyD | KeyCode::ArrowRight) => Some(Self::MoveRight),
            PhysicalKey::Code(KeyCode::Escape) => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Level state plus a latched "just pressed" edge for one physical button.
///
/// OS key repeat delivers extra `Pressed` events while held; those never
/// re-arm the edge. Only a release followed by a press does.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ButtonEdge {
    is_down: bool,
    pressed_edge: bool,
}

impl ButtonEdge {
    pub(crate) fn handle(&mut self, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.is_down {
                    self.pressed_edge = true;
                }
                self.is_down = true;
            }
            ElementState::Released => self.is_down = false,
        }
    }

    /// Consumes the latched edge.
    pub(crate) fn take_pressed(&mut self) -> bool {
        std::mem::take(&mut self.pressed_edge)
    }
}

/// Accumulates window events between ticks and hands out one snapshot per tick.
#[derive(Debug, Default)]
pub(crate) struct InputCollector {
    pub(crate) quit_requested: bool,
    action_states: ActionStates,
    /// Raw winit cursor position, origin top-left.
    cursor_window_px: Option<Vec2>,
    primary: ButtonEdge,
    window_width: u32,
    window_height: u32,
}

impl InputCollector {
    pub(crate) fn new(window_width: u32, window_height: u32) -> Self {
        Self {
            window_width,
            window_height,
            ..Self::default()
        }
    }

    pub(crate) fn mark_quit_requested(&mut self) {
        self.quit_requested = true;
    }

    pub(crate) fn handle_keyboard_input(&mut self, key_event: &KeyEvent) {
        let is_pressed = key_event.state == ElementState::Pressed;
        self.update_action_state_from_physical_key(key_event.physical_key, is_pressed);
    }

    pub(crate) fn update_action_state_from_physical_key(&mut self, key: PhysicalKey, is_pressed: bool) {
        let Some(action) = InputAction::from_physical_key(key) else {
            return;
        };
        self.action_states.set(action, is_pressed);
        if action == InputAction::Quit && is_pressed {
            self.mark_quit_requested();
        }
    }

    pub(crate) fn handle_mouse_input(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.primary.handle(state);
        }
    }

    pub(crate) fn set_window_size(&mut self, width: u32, height: u32) {
        self.window_width = width;
        self.window_height = height;
    }

    pub(crate) fn set_cursor_position_px(&mut self, x: f32, y: f32) {
        self.cursor_window_px = Some(Vec2::new(x, y));
    }

    pub(crate) fn clear_cursor_position(&mut self) {
        self.cursor_window_px = None;
    }

    /// Builds the snapshot for the next tick and consumes all pressed edges.
    pub(crate) fn snapshot_for_tick(&mut self) -> InputSnapshot {
        let cursor_position_px = self
            .cursor_window_px
            .map(|raw| Vec2::new(raw.x, self.window_height as f32 - raw.y));
        InputSnapshot::new(
            self.quit_requested,
            self.action_states,
            cursor_position_px,
            self.primary.take_pressed(),
            self.window_width,
            self.window_height,
        )
    }
}
