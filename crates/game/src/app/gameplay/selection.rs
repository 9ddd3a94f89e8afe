use engine::Vec2;

use super::pool::EntityRef;
use super::world::World;

/// Nearest destroyable entity strictly within `radius` of `cursor_world`.
///
/// Candidates are visited in slot order and only a strictly smaller distance
/// replaces the current best, so equidistant candidates resolve to the lowest
/// slot.
pub(crate) fn pick_nearest_destroyable(
    world: &World,
    cursor_world: Vec2,
    radius: f32,
) -> Option<EntityRef> {
    let mut best: Option<(EntityRef, f32)> = None;
    for (entity_ref, entity) in world.entities.iter() {
        if !entity.destroyable {
            continue;
        }
        let distance = entity.position.distance(cursor_world);
        let in_radius = distance < radius;
        let closer = best.map_or(true, |(_, best_distance)| distance < best_distance);
        if in_radius && closer {
            best = Some((entity_ref, distance));
        }
    }
    best.map(|(entity_ref, _)| entity_ref)
}
