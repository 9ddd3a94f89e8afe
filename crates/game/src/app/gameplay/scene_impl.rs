use engine::{
    orthographic_projection, screen_to_world, AssetStore, InputAction, InputSnapshot, RenderFrame,
    Scene, SceneCommand, TileGrid, Vec2, Viewport,
};
use tracing::{info, warn};

use super::archetype::{Archetype, ArchetypeHealths};
use super::camera::CameraRig;
use super::draw::{emit_entities, emit_tile_grid, DrawStyle};
use super::frame::WorldFrame;
use super::interaction::{pickup_sweep, resolve_click};
use super::movement::integrate_player;
use super::pool::{EntityPool, EntityRef};
use super::selection::pick_nearest_destroyable;
use super::sprites::SpriteTable;
use super::world::{Inventory, World};
use crate::config::GameConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickStage {
    CameraFollow,
    CursorUnproject,
    Selection,
    Pickup,
    Click,
    EmitDraws,
    Movement,
}

pub(crate) const TICK_STAGE_ORDER: [TickStage; 7] = [
    TickStage::CameraFollow,
    TickStage::CursorUnproject,
    TickStage::Selection,
    TickStage::Pickup,
    TickStage::Click,
    TickStage::EmitDraws,
    TickStage::Movement,
];

pub(crate) struct SeaScene {
    config: GameConfig,
    world: World,
    frame: WorldFrame,
    camera: CameraRig,
    sprites: SpriteTable,
    style: DrawStyle,
    player: Option<EntityRef>,
    elapsed_seconds: f32,
    rng: fastrand::Rng,
    /// Draw list built by the last tick; copied out by `render`.
    tick_output: RenderFrame,
    last_tick_order: Vec<TickStage>,
}

impl SeaScene {
    pub(crate) fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        let camera = CameraRig {
            follow_rate: config.camera_follow_rate,
            zoom: config.camera_zoom,
            ..CameraRig::default()
        };
        let style = DrawStyle {
            bob_rate: config.item_bob_rate,
            bob_amplitude: config.item_bob_amplitude,
            grid_radius_x: config.grid_radius_x,
            grid_radius_y: config.grid_radius_y,
        };
        Self {
            world: Self::empty_world(&config),
            config,
            frame: WorldFrame::default(),
            camera,
            sprites: SpriteTable::default(),
            style,
            player: None,
            elapsed_seconds: 0.0,
            rng,
            tick_output: RenderFrame::default(),
            last_tick_order: Vec::with_capacity(TICK_STAGE_ORDER.len()),
        }
    }

    fn empty_world(config: &GameConfig) -> World {
        let healths = ArchetypeHealths {
            reef: config.reef_health,
            loot: config.loot_health,
        };
        let grid = TileGrid::new(config.tile_width);
        let mut world = World::new(EntityPool::default(), healths, grid);
        world.inventory = Inventory::from_amounts(&config.starting_inventory);
        world
    }

    /// Player at the origin, then reefs, then loot on random tiles.
    fn populate_world(&mut self) {
        self.world = Self::empty_world(&self.config);
        self.frame = WorldFrame::default();
        self.player = match self.world.spawn(Archetype::Player, Vec2::ZERO) {
            Ok(player) => Some(player),
            Err(error) => {
                warn!(error = %error, "player_spawn_failed");
                None
            }
        };

        let batches = [
            (Archetype::Reef, self.config.reef_count),
            (Archetype::Loot, self.config.loot_count),
        ];
        'batches: for (archetype, count) in batches {
            for _ in 0..count {
                let position = self.random_spawn_position();
                if let Err(error) = self.world.spawn_on_tile(archetype, position) {
                    warn!(
                        archetype = archetype.as_token(),
                        error = %error,
                        "world_seed_truncated"
                    );
                    break 'batches;
                }
            }
        }
        self.camera.position = self.player_position().unwrap_or(Vec2::ZERO);
    }

    fn random_spawn_position(&mut self) -> Vec2 {
        let extent = self.config.spawn_extent;
        let mut coordinate = || -extent + self.rng.f32() * 2.0 * extent;
        let x = coordinate();
        let y = coordinate();
        Vec2::new(x, y)
    }

    fn player_position(&self) -> Option<Vec2> {
        self.player
            .and_then(|player| self.world.get(player))
            .map(|player| player.position)
    }

    fn run_stage(
        &mut self,
        stage: TickStage,
        dt_seconds: f32,
        input: &InputSnapshot,
        viewport: Viewport,
    ) {
        match stage {
            TickStage::CameraFollow => {
                if let Some(target) = self.player_position() {
                    self.camera.follow(target, dt_seconds);
                }
                self.tick_output.view = self.camera.view();
            }
            TickStage::CursorUnproject => {
                let projection = self.tick_output.projection;
                let view = self.tick_output.view;
                self.frame.cursor_world = input
                    .cursor_position_px()
                    .map(|cursor| screen_to_world(cursor, viewport, projection, view));
                self.frame.cursor_tile = self
                    .frame
                    .cursor_world
                    .map(|cursor| self.world.grid().tile_of(cursor));
            }
            TickStage::Selection => {
                let radius = self.config.entity_selection_radius;
                let selected = self
                    .frame
                    .cursor_world
                    .and_then(|cursor| pick_nearest_destroyable(&self.world, cursor, radius));
                self.frame.set_selected(selected);
            }
            TickStage::Pickup => {
                if let Some(player_position) = self.player_position() {
                    pickup_sweep(
                        &mut self.world,
                        player_position,
                        self.config.player_pickup_radius,
                    );
                    self.frame.revalidate(&self.world);
                }
            }
            TickStage::Click => {
                resolve_click(&mut self.world, &mut self.frame, input.primary_click_pressed());
            }
            TickStage::EmitDraws => {
                let grid = self.world.grid();
                let center = grid.tile_of(self.player_position().unwrap_or(self.camera.position));
                emit_tile_grid(&mut self.tick_output, grid, center, &self.style);
                emit_entities(
                    &mut self.tick_output,
                    &self.world,
                    &self.frame,
                    &self.sprites,
                    &self.style,
                    self.elapsed_seconds,
                );
            }
            TickStage::Movement => {
                let speed = self.config.player_speed;
                let axis = input.movement_axis();
                if let Some(player) = self.player.and_then(|player| self.world.get_mut(player)) {
                    player.position = integrate_player(player.position, axis, speed, dt_seconds);
                }
            }
        }
    }
}

impl Scene for SeaScene {
    fn load(&mut self, assets: &mut AssetStore) {
        self.sprites = SpriteTable::load(assets);
        self.populate_world();
        info!(
            entity_count = self.world.entity_count(),
            reef_count = self.world.count_of(Archetype::Reef),
            loot_count = self.world.count_of(Archetype::Loot),
            seed = ?self.config.seed,
            "world_seeded"
        );
    }

    fn update(&mut self, dt_seconds: f32, input: &InputSnapshot) -> SceneCommand {
        if input.quit_requested() || input.is_down(InputAction::Quit) {
            return SceneCommand::Quit;
        }
        let dt_seconds = if dt_seconds.is_finite() {
            dt_seconds.max(0.0)
        } else {
            0.0
        };
        self.elapsed_seconds += dt_seconds;
        self.frame = WorldFrame::default();
        self.tick_output.reset();
        let viewport = Viewport::from_size(input.window_size());
        self.tick_output.projection = orthographic_projection(viewport);

        self.last_tick_order.clear();
        for stage in TICK_STAGE_ORDER {
            self.last_tick_order.push(stage);
            self.run_stage(stage, dt_seconds, input, viewport);
        }
        SceneCommand::None
    }

    fn render(&mut self, frame: &mut RenderFrame) {
        frame.projection = self.tick_output.projection;
        frame.view = self.tick_output.view;
        frame.draws.extend_from_slice(&self.tick_output.draws);
    }

    fn unload(&mut self) {
        info!(
            entity_count = self.world.entity_count(),
            elapsed_seconds = self.elapsed_seconds,
            "scene_unloaded"
        );
    }

    fn debug_title(&self) -> Option<String> {
        let tile = match self.frame.cursor_tile {
            Some(tile) => format!("{}, {}", tile.x, tile.y),
            None => "-".to_string(),
        };
        let mut title = format!("LOST SEAS | tile {tile}");
        for (archetype, amount) in self.world.inventory.non_empty() {
            title.push_str(&format!(" | {} x{amount}", archetype.as_token()));
        }
        Some(title)
    }

    fn entity_count(&self) -> usize {
        self.world.entity_count()
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
