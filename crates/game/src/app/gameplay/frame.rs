use engine::{TileCoord, Vec2};

use super::pool::EntityRef;
use super::world::World;

/// Per-tick scratch state, rebuilt empty at the start of every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct WorldFrame {
    pub(crate) cursor_world: Option<Vec2>,
    pub(crate) cursor_tile: Option<TileCoord>,
    selected: Option<EntityRef>,
}

impl WorldFrame {
    pub(crate) fn selected(&self) -> Option<EntityRef> {
        self.selected
    }

    pub(crate) fn set_selected(&mut self, selected: Option<EntityRef>) {
        self.selected = selected;
    }

    /// Drops the selection if its entity no longer resolves. Call after any destroy.
    pub(crate) fn revalidate(&mut self, world: &World) {
        if let Some(selected) = self.selected {
            if world.get(selected).is_none() {
                self.selected = None;
            }
        }
    }
}
