use std::collections::BTreeMap;

use engine::{TileGrid, Vec2};
use tracing::debug;

use super::archetype::{Archetype, ArchetypeHealths};
use super::pool::{Entity, EntityPool, EntityRef, PoolError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Inventory {
    amounts: [u32; Archetype::COUNT],
}

impl Inventory {
    pub(crate) fn from_amounts(amounts: &BTreeMap<Archetype, u32>) -> Self {
        let mut inventory = Self::default();
        for (archetype, amount) in amounts {
            inventory.add(*archetype, *amount);
        }
        inventory
    }

    pub(crate) fn add(&mut self, archetype: Archetype, amount: u32) {
        let slot = &mut self.amounts[archetype.index()];
        *slot = slot.saturating_add(amount);
    }

    pub(crate) fn amount(&self, archetype: Archetype) -> u32 {
        self.amounts[archetype.index()]
    }

    /// Archetypes with a non-zero count, in archetype order.
    pub(crate) fn non_empty(&self) -> impl Iterator<Item = (Archetype, u32)> + '_ {
        self.amounts
            .iter()
            .enumerate()
            .filter(|(_, amount)| **amount > 0)
            .map(|(index, amount)| (Archetype::from_index(index), *amount))
    }
}

/// All entity storage plus the inventory, owned by the gameplay scene.
#[derive(Debug, Clone)]
pub(crate) struct World {
    pub(crate) entities: EntityPool,
    pub(crate) inventory: Inventory,
    healths: ArchetypeHealths,
    grid: TileGrid,
}

impl Default for World {
    fn default() -> Self {
        Self::new(
            EntityPool::default(),
            ArchetypeHealths::default(),
            TileGrid::default(),
        )
    }
}

impl World {
    pub(crate) fn new(entities: EntityPool, healths: ArchetypeHealths, grid: TileGrid) -> Self {
        Self {
            entities,
            inventory: Inventory::default(),
            healths,
            grid,
        }
    }

    pub(crate) fn grid(&self) -> TileGrid {
        self.grid
    }

    pub(crate) fn spawn(
        &mut self,
        archetype: Archetype,
        position: Vec2,
    ) -> Result<EntityRef, PoolError> {
        let entity_ref = self
            .entities
            .create(Entity::from_archetype(archetype, position, &self.healths))?;
        debug!(
            archetype = archetype.as_token(),
            slot = entity_ref.index(),
            x = position.x,
            y = position.y,
            "entity_spawned"
        );
        Ok(entity_ref)
    }

    /// Spawns with the position snapped to the nearest tile centre.
    pub(crate) fn spawn_on_tile(
        &mut self,
        archetype: Archetype,
        position: Vec2,
    ) -> Result<EntityRef, PoolError> {
        self.spawn(archetype, self.grid.snap_vec2(position))
    }

    pub(crate) fn destroy(&mut self, entity_ref: EntityRef) -> Option<Entity> {
        let removed = self.entities.destroy(entity_ref)?;
        debug!(
            archetype = removed.archetype.as_token(),
            slot = entity_ref.index(),
            "entity_destroyed"
        );
        Some(removed)
    }

    pub(crate) fn get(&self, entity_ref: EntityRef) -> Option<&Entity> {
        self.entities.get(entity_ref)
    }

    pub(crate) fn get_mut(&mut self, entity_ref: EntityRef) -> Option<&mut Entity> {
        self.entities.get_mut(entity_ref)
    }

    pub(crate) fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub(crate) fn count_of(&self, archetype: Archetype) -> usize {
        self.entities
            .iter()
            .filter(|(_, entity)| entity.archetype == archetype)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_on_tile_snaps_position() {
        let mut world = World::default();
        let reef = world
            .spawn_on_tile(Archetype::Reef, Vec2::new(13.0, -21.0))
            .expect("reef");
        let position = world.get(reef).expect("live").position;
        assert_eq!(position, Vec2::new(16.0, -24.0));
    }

    #[test]
    fn spawned_entities_take_archetype_traits() {
        let mut world = World::new(
            EntityPool::with_capacity(4),
            ArchetypeHealths { reef: 5, loot: 2 },
            TileGrid::default(),
        );
        let reef = world.spawn(Archetype::Reef, Vec2::ZERO).expect("reef");
        assert_eq!(world.get(reef).expect("live").health, 5);
        assert_eq!(world.count_of(Archetype::Reef), 1);
        assert_eq!(world.entity_count(), 1);
    }

    #[test]
    fn inventory_counts_per_archetype() {
        let mut starting = BTreeMap::new();
        starting.insert(Archetype::ItemFloatwood, 5);
        let mut inventory = Inventory::from_amounts(&starting);
        inventory.add(Archetype::ItemSeaweed, 1);
        inventory.add(Archetype::ItemFloatwood, 1);

        assert_eq!(inventory.amount(Archetype::ItemFloatwood), 6);
        assert_eq!(inventory.amount(Archetype::ItemSeaweed), 1);
        assert_eq!(inventory.amount(Archetype::Reef), 0);
        let listed: Vec<_> = inventory.non_empty().collect();
        assert_eq!(
            listed,
            vec![(Archetype::ItemFloatwood, 6), (Archetype::ItemSeaweed, 1)]
        );
    }

    #[test]
    fn destroy_reports_stale_refs() {
        let mut world = World::default();
        let loot = world.spawn(Archetype::Loot, Vec2::ZERO).expect("loot");
        assert!(world.destroy(loot).is_some());
        assert!(world.destroy(loot).is_none());
        assert_eq!(world.entity_count(), 0);
    }
}
