use serde::{Deserialize, Serialize};

/// Fixed entity categories. Setup is a pure function of the archetype.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub(crate) enum Archetype {
    #[default]
    Nil,
    Reef,
    Loot,
    Player,
    ItemFloatwood,
    ItemSeaweed,
}

impl Archetype {
    pub(crate) const COUNT: usize = 6;
    pub(crate) const ALL: [Archetype; Self::COUNT] = [
        Self::Nil,
        Self::Reef,
        Self::Loot,
        Self::Player,
        Self::ItemFloatwood,
        Self::ItemSeaweed,
    ];

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Nil => 0,
            Self::Reef => 1,
            Self::Loot => 2,
            Self::Player => 3,
            Self::ItemFloatwood => 4,
            Self::ItemSeaweed => 5,
        }
    }

    /// Out-of-range indices resolve to [`Archetype::Nil`].
    pub(crate) fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_default()
    }

    pub(crate) fn as_token(self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Reef => "reef",
            Self::Loot => "loot",
            Self::Player => "player",
            Self::ItemFloatwood => "item_floatwood",
            Self::ItemSeaweed => "item_seaweed",
        }
    }

    /// Creation-time traits; health for damageable archetypes comes from `healths`.
    pub(crate) fn traits(self, healths: &ArchetypeHealths) -> ArchetypeTraits {
        match self {
            Self::Nil => ArchetypeTraits::inert(SpriteId::Nil),
            Self::Player => ArchetypeTraits::inert(SpriteId::Player),
            Self::Reef => ArchetypeTraits::destroyable(SpriteId::Reef0, healths.reef),
            Self::Loot => ArchetypeTraits::destroyable(SpriteId::Loot0, healths.loot),
            Self::ItemFloatwood => ArchetypeTraits::item(SpriteId::ItemFloatwood),
            Self::ItemSeaweed => ArchetypeTraits::item(SpriteId::ItemSeaweed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ArchetypeHealths {
    pub(crate) reef: i32,
    pub(crate) loot: i32,
}

impl Default for ArchetypeHealths {
    fn default() -> Self {
        Self { reef: 3, loot: 1 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ArchetypeTraits {
    pub(crate) sprite_id: SpriteId,
    pub(crate) health: i32,
    pub(crate) destroyable: bool,
    pub(crate) is_item: bool,
}

impl ArchetypeTraits {
    const fn inert(sprite_id: SpriteId) -> Self {
        Self {
            sprite_id,
            health: 0,
            destroyable: false,
            is_item: false,
        }
    }

    const fn destroyable(sprite_id: SpriteId, health: i32) -> Self {
        Self {
            sprite_id,
            health,
            destroyable: true,
            is_item: false,
        }
    }

    const fn item(sprite_id: SpriteId) -> Self {
        Self {
            sprite_id,
            health: 0,
            destroyable: false,
            is_item: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub(crate) enum SpriteId {
    #[default]
    Nil,
    Player,
    Reef0,
    Reef1,
    Loot0,
    ItemFloatwood,
    ItemSeaweed,
}

impl SpriteId {
    pub(crate) const COUNT: usize = 7;
    pub(crate) const ALL: [SpriteId; Self::COUNT] = [
        Self::Nil,
        Self::Player,
        Self::Reef0,
        Self::Reef1,
        Self::Loot0,
        Self::ItemFloatwood,
        Self::ItemSeaweed,
    ];

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Nil => 0,
            Self::Player => 1,
            Self::Reef0 => 2,
            Self::Reef1 => 3,
            Self::Loot0 => 4,
            Self::ItemFloatwood => 5,
            Self::ItemSeaweed => 6,
        }
    }

    /// Out-of-range indices resolve to [`SpriteId::Nil`].
    pub(crate) fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_default()
    }

    /// File stem under the sprite directory. `Nil` has no image.
    pub(crate) fn sprite_key(self) -> Option<&'static str> {
        match self {
            Self::Nil => None,
            Self::Player => Some("player"),
            Self::Reef0 => Some("reef0"),
            Self::Reef1 => Some("reef1"),
            Self::Loot0 => Some("loot0"),
            Self::ItemFloatwood => Some("item_floatwood"),
            Self::ItemSeaweed => Some("item_seaweed"),
        }
    }
}
