mod archetype;
mod camera;
mod draw;
mod frame;
mod interaction;
mod movement;
mod pool;
mod scene_impl;
mod selection;
mod sprites;
mod world;

use engine::Scene;

use crate::config::GameConfig;

pub(crate) use archetype::Archetype;

pub(crate) fn build_scene(config: GameConfig) -> Box<dyn Scene> {
    Box::new(scene_impl::SeaScene::new(config))
}
