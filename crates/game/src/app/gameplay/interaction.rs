use engine::Vec2;
use tracing::{info, warn};

use super::archetype::Archetype;
use super::frame::WorldFrame;
use super::pool::EntityRef;
use super::world::World;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ClickOutcome {
    /// No click edge this tick.
    Idle,
    /// Clicked with nothing selected.
    Missed,
    Damaged {
        target: EntityRef,
        remaining_health: i32,
    },
    Destroyed {
        archetype: Archetype,
        dropped: Option<EntityRef>,
    },
}

/// What a destroyed archetype leaves behind.
fn drop_for(archetype: Archetype) -> Option<Archetype> {
    match archetype {
        Archetype::Loot => Some(Archetype::ItemFloatwood),
        _ => None,
    }
}

/// Collects every item strictly within `radius` of `player_position`.
///
/// Returns the archetypes picked up, in slot order.
pub(crate) fn pickup_sweep(world: &mut World, player_position: Vec2, radius: f32) -> Vec<Archetype> {
    let in_reach: Vec<(EntityRef, Archetype)> = world
        .entities
        .iter()
        .filter(|(_, entity)| entity.is_item && entity.position.distance(player_position) < radius)
        .map(|(entity_ref, entity)| (entity_ref, entity.archetype))
        .collect();

    let mut picked = Vec::with_capacity(in_reach.len());
    for (entity_ref, archetype) in in_reach {
        if world.destroy(entity_ref).is_none() {
            continue;
        }
        world.inventory.add(archetype, 1);
        info!(
            item = archetype.as_token(),
            amount = world.inventory.amount(archetype),
            "item_picked_up"
        );
        picked.push(archetype);
    }
    picked
}

/// Applies one click to the frame's selection.
///
/// A target reaching zero health spawns its drop at its position first and is
/// then destroyed; the frame's selection is revalidated afterwards.
pub(crate) fn resolve_click(world: &mut World, frame: &mut WorldFrame, clicked: bool) -> ClickOutcome {
    if !clicked {
        return ClickOutcome::Idle;
    }
    let Some(target) = frame.selected() else {
        return ClickOutcome::Missed;
    };
    let Some(entity) = world.get_mut(target) else {
        frame.set_selected(None);
        return ClickOutcome::Missed;
    };

    entity.health = entity.health.saturating_sub(1);
    let remaining_health = entity.health;
    let archetype = entity.archetype;
    let position = entity.position;
    if remaining_health > 0 {
        return ClickOutcome::Damaged {
            target,
            remaining_health,
        };
    }

    let dropped = drop_for(archetype).and_then(|drop| match world.spawn(drop, position) {
        Ok(entity_ref) => Some(entity_ref),
        Err(error) => {
            warn!(
                source_archetype = archetype.as_token(),
                drop = drop.as_token(),
                error = %error,
                "loot_drop_skipped"
            );
            None
        }
    });
    world.destroy(target);
    frame.revalidate(world);
    info!(
        archetype = archetype.as_token(),
        dropped = dropped.is_some(),
        "entity_broken"
    );

    ClickOutcome::Destroyed { archetype, dropped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::gameplay::archetype::ArchetypeHealths;
    use crate::app::gameplay::pool::EntityPool;
    use engine::TileGrid;

    fn selected(world_ref: EntityRef) -> WorldFrame {
        let mut frame = WorldFrame::default();
        frame.set_selected(Some(world_ref));
        frame
    }

    #[test]
    fn no_click_leaves_target_untouched() {
        let mut world = World::default();
        let reef = world.spawn(Archetype::Reef, Vec2::ZERO).expect("reef");
        let mut frame = selected(reef);

        assert_eq!(resolve_click(&mut world, &mut frame, false), ClickOutcome::Idle);
        assert_eq!(world.get(reef).expect("live").health, 3);
    }

    #[test]
    fn click_without_selection_misses() {
        let mut world = World::default();
        let mut frame = WorldFrame::default();
        assert_eq!(resolve_click(&mut world, &mut frame, true), ClickOutcome::Missed);
    }

    #[test]
    fn reef_breaks_on_third_click_without_drop() {
        let mut world = World::default();
        let reef = world.spawn(Archetype::Reef, Vec2::new(8.0, 8.0)).expect("reef");

        for expected in [2, 1] {
            let mut frame = selected(reef);
            assert_eq!(
                resolve_click(&mut world, &mut frame, true),
                ClickOutcome::Damaged {
                    target: reef,
                    remaining_health: expected
                }
            );
        }
        let mut frame = selected(reef);
        assert_eq!(
            resolve_click(&mut world, &mut frame, true),
            ClickOutcome::Destroyed {
                archetype: Archetype::Reef,
                dropped: None
            }
        );
        assert!(world.get(reef).is_none());
        assert!(frame.selected().is_none());
        assert_eq!(world.entity_count(), 0);
    }

    #[test]
    fn click_at_minimum_health_breaks_without_overflow() {
        let mut world = World::new(
            EntityPool::default(),
            ArchetypeHealths {
                reef: i32::MIN,
                loot: 1,
            },
            TileGrid::default(),
        );
        let reef = world.spawn(Archetype::Reef, Vec2::ZERO).expect("reef");
        let mut frame = selected(reef);

        assert_eq!(
            resolve_click(&mut world, &mut frame, true),
            ClickOutcome::Destroyed {
                archetype: Archetype::Reef,
                dropped: None
            }
        );
        assert!(world.get(reef).is_none());
    }

    #[test]
    fn loot_drops_floatwood_at_its_position() {
        let mut world = World::default();
        let loot = world.spawn(Archetype::Loot, Vec2::new(24.0, -16.0)).expect("loot");
        let mut frame = selected(loot);

        let outcome = resolve_click(&mut world, &mut frame, true);

        let ClickOutcome::Destroyed {
            archetype: Archetype::Loot,
            dropped: Some(drop),
        } = outcome
        else {
            panic!("unexpected outcome {outcome:?}");
        };
        let item = world.get(drop).expect("drop live");
        assert_eq!(item.archetype, Archetype::ItemFloatwood);
        assert_eq!(item.position, Vec2::new(24.0, -16.0));
        assert!(world.get(loot).is_none());
        assert_eq!(world.count_of(Archetype::ItemFloatwood), 1);
        assert_eq!(world.inventory.amount(Archetype::ItemFloatwood), 0);
    }

    #[test]
    fn full_pool_skips_drop_but_still_breaks_loot() {
        let mut world = World::new(
            EntityPool::with_capacity(1),
            ArchetypeHealths::default(),
            TileGrid::default(),
        );
        let loot = world.spawn(Archetype::Loot, Vec2::ZERO).expect("loot");
        let mut frame = selected(loot);

        assert_eq!(
            resolve_click(&mut world, &mut frame, true),
            ClickOutcome::Destroyed {
                archetype: Archetype::Loot,
                dropped: None
            }
        );
        assert_eq!(world.entity_count(), 0);
    }

    #[test]
    fn pickup_collects_items_inside_radius_only() {
        let mut world = World::default();
        world
            .spawn(Archetype::ItemFloatwood, Vec2::new(5.9, 0.0))
            .expect("near");
        let far = world
            .spawn(Archetype::ItemFloatwood, Vec2::new(6.0, 0.0))
            .expect("far");
        world.spawn(Archetype::Reef, Vec2::ZERO).expect("reef");

        let picked = pickup_sweep(&mut world, Vec2::ZERO, 6.0);

        assert_eq!(picked, vec![Archetype::ItemFloatwood]);
        assert_eq!(world.inventory.amount(Archetype::ItemFloatwood), 1);
        assert!(world.get(far).is_some());
        assert_eq!(world.count_of(Archetype::Reef), 1);
    }

    #[test]
    fn pickup_counts_each_item_archetype_separately() {
        let mut world = World::default();
        world.spawn(Archetype::ItemFloatwood, Vec2::ZERO).expect("wood");
        world.spawn(Archetype::ItemSeaweed, Vec2::ZERO).expect("weed");

        pickup_sweep(&mut world, Vec2::ZERO, 6.0);

        assert_eq!(world.inventory.amount(Archetype::ItemFloatwood), 1);
        assert_eq!(world.inventory.amount(Archetype::ItemSeaweed), 1);
        assert_eq!(world.entity_count(), 0);
    }
}
