use engine::Vec2;
use thiserror::Error;

use super::archetype::{Archetype, ArchetypeHealths, SpriteId};

pub(crate) const MAX_ENTITY_COUNT: usize = 1024;

/// Slot index paired with the slot's generation at creation time.
///
/// Destroying an entity bumps its slot generation, so every reference taken
/// before the destroy stops resolving even after the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct EntityRef {
    index: u32,
    generation: u32,
}

impl EntityRef {
    pub(crate) fn index(self) -> usize {
        self.index as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Entity {
    pub(crate) archetype: Archetype,
    pub(crate) position: Vec2,
    pub(crate) sprite_id: SpriteId,
    pub(crate) health: i32,
    pub(crate) destroyable: bool,
    pub(crate) is_item: bool,
}

impl Entity {
    pub(crate) fn from_archetype(
        archetype: Archetype,
        position: Vec2,
        healths: &ArchetypeHealths,
    ) -> Self {
        let traits = archetype.traits(healths);
        Self {
            archetype,
            position,
            sprite_id: traits.sprite_id,
            health: traits.health,
            destroyable: traits.destroyable,
            is_item: traits.is_item,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum PoolError {
    #[error("entity pool exhausted: all {capacity} slots are live")]
    Exhausted { capacity: usize },
}

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    entity: Option<Entity>,
}

/// Fixed-capacity entity storage with first-fit slot reuse.
#[derive(Debug, Clone)]
pub(crate) struct EntityPool {
    slots: Vec<Slot>,
    live_count: usize,
}

impl Default for EntityPool {
    fn default() -> Self {
        Self::with_capacity(MAX_ENTITY_COUNT)
    }
}

impl EntityPool {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![Slot::default(); capacity],
            live_count: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.live_count
    }

    /// Occupies the lowest free slot.
    pub(crate) fn create(&mut self, entity: Entity) -> Result<EntityRef, PoolError> {
        let capacity = self.capacity();
        let Some((index, slot)) = self
            .slots
            .iter_mut()
            .enumerate()
            .find(|(_, slot)| slot.entity.is_none())
        else {
            return Err(PoolError::Exhausted { capacity });
        };
        slot.entity = Some(entity);
        self.live_count += 1;
        Ok(EntityRef {
            index: index as u32,
            generation: slot.generation,
        })
    }

    /// Frees the slot and returns what was in it. Stale refs are a no-op.
    pub(crate) fn destroy(&mut self, entity_ref: EntityRef) -> Option<Entity> {
        let slot = self.slot_mut(entity_ref)?;
        let removed = slot.entity.take();
        slot.generation = slot.generation.wrapping_add(1);
        if removed.is_some() {
            self.live_count -= 1;
        }
        removed
    }

    pub(crate) fn get(&self, entity_ref: EntityRef) -> Option<&Entity> {
        self.slots
            .get(entity_ref.index())
            .filter(|slot| slot.generation == entity_ref.generation)
            .and_then(|slot| slot.entity.as_ref())
    }

    pub(crate) fn get_mut(&mut self, entity_ref: EntityRef) -> Option<&mut Entity> {
        self.slot_mut(entity_ref)
            .and_then(|slot| slot.entity.as_mut())
    }

    /// Live entities in slot order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (EntityRef, &Entity)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.entity.as_ref().map(|entity| {
                (
                    EntityRef {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    entity,
                )
            })
        })
    }

    fn slot_mut(&mut self, entity_ref: EntityRef) -> Option<&mut Slot> {
        self.slots
            .get_mut(entity_ref.index())
            .filter(|slot| slot.generation == entity_ref.generation && slot.entity.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reef_at(x: f32, y: f32) -> Entity {
        Entity::from_archetype(Archetype::Reef, Vec2::new(x, y), &ArchetypeHealths::default())
    }

    #[test]
    fn create_uses_first_free_slot() {
        let mut pool = EntityPool::with_capacity(4);
        let a = pool.create(reef_at(0.0, 0.0)).expect("a");
        let b = pool.create(reef_at(1.0, 0.0)).expect("b");
        let c = pool.create(reef_at(2.0, 0.0)).expect("c");
        assert_eq!((a.index(), b.index(), c.index()), (0, 1, 2));

        pool.destroy(a);
        let d = pool.create(reef_at(3.0, 0.0)).expect("d");
        assert_eq!(d.index(), 0);
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn full_pool_reuses_the_single_freed_slot() {
        let mut pool = EntityPool::default();
        let mut refs = Vec::new();
        for i in 0..MAX_ENTITY_COUNT {
            refs.push(pool.create(reef_at(i as f32, 0.0)).expect("slot available"));
        }
        assert_eq!(pool.len(), MAX_ENTITY_COUNT);
        assert_eq!(
            pool.create(reef_at(0.0, 0.0)),
            Err(PoolError::Exhausted {
                capacity: MAX_ENTITY_COUNT
            })
        );

        let freed = refs[517];
        pool.destroy(freed);
        let reused = pool.create(reef_at(-1.0, -1.0)).expect("freed slot");

        assert_eq!(reused.index(), freed.index());
        assert_eq!(pool.len(), MAX_ENTITY_COUNT);
    }

    #[test]
    fn stale_ref_does_not_resolve_to_slot_reuser() {
        let mut pool = EntityPool::with_capacity(2);
        let old = pool.create(reef_at(0.0, 0.0)).expect("old");
        pool.destroy(old);
        let new = pool.create(reef_at(5.0, 5.0)).expect("new");

        assert_eq!(old.index(), new.index());
        assert!(pool.get(old).is_none());
        assert!(pool.get_mut(old).is_none());
        assert!(pool.destroy(old).is_none());
        assert!(pool.get(new).is_some());
    }

    #[test]
    fn destroy_zeroes_slot_and_returns_entity() {
        let mut pool = EntityPool::with_capacity(2);
        let reef = pool.create(reef_at(8.0, 16.0)).expect("reef");

        let removed = pool.destroy(reef).expect("removed");
        assert_eq!(removed.position, Vec2::new(8.0, 16.0));
        assert_eq!(pool.len(), 0);
        assert_eq!(pool.iter().count(), 0);
    }

    #[test]
    fn iter_walks_live_slots_in_order() {
        let mut pool = EntityPool::with_capacity(4);
        let a = pool.create(reef_at(0.0, 0.0)).expect("a");
        let b = pool.create(reef_at(1.0, 0.0)).expect("b");
        let c = pool.create(reef_at(2.0, 0.0)).expect("c");
        pool.destroy(b);

        let order: Vec<EntityRef> = pool.iter().map(|(entity_ref, _)| entity_ref).collect();
        assert_eq!(order, vec![a, c]);
    }

    #[test]
    fn entity_setup_is_pure_function_of_archetype() {
        let healths = ArchetypeHealths::default();
        let first = Entity::from_archetype(Archetype::Loot, Vec2::ZERO, &healths);
        let second = Entity::from_archetype(Archetype::Loot, Vec2::ZERO, &healths);
        assert_eq!(first, second);
        assert_eq!(first.health, 1);
        assert!(first.destroyable);
    }
}
