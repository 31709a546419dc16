//! Live player state as the host hands it to us.
//!
//! These types are the boundary with the host's game-object model. They carry
//! resolved registry types ([`ItemType`], [`EnchantmentType`], [`EffectType`])
//! rather than raw names and ids; the codec turns them into flat records and
//! back. The provider never mutates a live value outside those conversions.

use std::collections::BTreeMap;
use std::time::Duration;

use playervault_types::{GameMode, PlayerId, PropertyValue, Vec3};

// ---------------------------------------------------------------------------
// Registry types
// ---------------------------------------------------------------------------

/// An item type resolved from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemType {
    /// Registry name, e.g. `minecraft:diamond_sword`.
    pub name: String,
    /// Variant within the name.
    pub meta: i16,
}

impl ItemType {
    /// Create an item type.
    pub fn new(name: impl Into<String>, meta: i16) -> Self {
        Self {
            name: name.into(),
            meta,
        }
    }
}

/// An enchantment type resolved from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EnchantmentType {
    /// Registry name, e.g. `sharpness`.
    pub name: String,
}

impl EnchantmentType {
    /// Create an enchantment type.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// An effect type resolved from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EffectType {
    /// Numeric effect id.
    pub id: i32,
    /// Human-readable name.
    pub name: String,
    /// Whether the effect can last over time. Non-lasting types only ever
    /// apply instantly.
    pub lasting: bool,
}

impl EffectType {
    /// Create an effect type.
    pub fn new(id: i32, name: impl Into<String>, lasting: bool) -> Self {
        Self {
            id,
            name: name.into(),
            lasting,
        }
    }
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// An enchantment applied to a stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enchantment {
    /// The enchantment type.
    pub kind: EnchantmentType,
    /// Enchantment level.
    pub level: i32,
}

impl Enchantment {
    /// Create an enchantment.
    pub const fn new(kind: EnchantmentType, level: i32) -> Self {
        Self { kind, level }
    }
}

/// A stack of items in an inventory slot.
///
/// `ItemStack::default()` is the canonical empty stack. A stack without an
/// item type or with a zero count is empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemStack {
    /// The item type, `None` for an empty slot.
    pub item: Option<ItemType>,
    /// Number of items.
    pub count: u32,
    /// Custom display name, empty when unset.
    pub custom_name: String,
    /// Lore lines.
    pub lore: Vec<String>,
    /// Durability damage taken.
    pub damage: i32,
    /// Anvil repair cost.
    pub anvil_cost: i32,
    /// Arbitrary properties attached by plugins.
    pub values: BTreeMap<String, PropertyValue>,
    /// Enchantments in application order. At most one per type.
    pub enchantments: Vec<Enchantment>,
}

impl ItemStack {
    /// Create a stack of `count` items of the given type.
    pub fn new(item: ItemType, count: u32) -> Self {
        Self {
            item: Some(item),
            count,
            ..Self::default()
        }
    }

    /// Whether the stack holds nothing.
    pub const fn is_empty(&self) -> bool {
        self.item.is_none() || self.count == 0
    }

    /// Set the custom display name.
    #[must_use]
    pub fn with_custom_name(mut self, name: impl Into<String>) -> Self {
        self.custom_name = name.into();
        self
    }

    /// Replace the lore lines.
    #[must_use]
    pub fn with_lore<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lore = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Set the durability damage.
    #[must_use]
    pub const fn with_damage(mut self, damage: i32) -> Self {
        self.damage = damage;
        self
    }

    /// Set the anvil repair cost.
    #[must_use]
    pub const fn with_anvil_cost(mut self, cost: i32) -> Self {
        self.anvil_cost = cost;
        self
    }

    /// Attach a property value under `key`, replacing any previous value.
    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Apply an enchantment. An existing enchantment of the same type is
    /// replaced in place; otherwise it is appended.
    #[must_use]
    pub fn with_enchantment(mut self, enchantment: Enchantment) -> Self {
        match self
            .enchantments
            .iter_mut()
            .find(|e| e.kind == enchantment.kind)
        {
            Some(existing) => *existing = enchantment,
            None => self.enchantments.push(enchantment),
        }
        self
    }
}

/// A player's inventory: general slots, armour, off-hand and selected slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiveInventory {
    /// General slots in slot order.
    pub items: Vec<ItemStack>,
    /// Helmet slot.
    pub helmet: ItemStack,
    /// Chestplate slot.
    pub chestplate: ItemStack,
    /// Leggings slot.
    pub leggings: ItemStack,
    /// Boots slot.
    pub boots: ItemStack,
    /// Off-hand slot.
    pub off_hand: ItemStack,
    /// Index of the selected hotbar slot.
    pub main_hand_slot: u32,
}

// ---------------------------------------------------------------------------
// Effects
// ---------------------------------------------------------------------------

/// A status effect active on a player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Effect {
    /// The effect type.
    pub kind: EffectType,
    /// Amplifier (level minus one).
    pub amplifier: i32,
    /// Remaining duration. Zero means the effect is instant.
    pub duration: Duration,
    /// Whether the effect comes from an ambient source.
    pub ambient: bool,
    /// Whether particles are shown.
    pub show_particles: bool,
}

impl Effect {
    /// An instant effect with particles shown.
    pub const fn instant(kind: EffectType, amplifier: i32) -> Self {
        Self {
            kind,
            amplifier,
            duration: Duration::ZERO,
            ambient: false,
            show_particles: true,
        }
    }

    /// A lasting effect with particles shown.
    pub const fn lasting(kind: EffectType, amplifier: i32, duration: Duration) -> Self {
        Self {
            kind,
            amplifier,
            duration,
            ambient: false,
            show_particles: true,
        }
    }

    /// Mark the effect as coming from an ambient source.
    #[must_use]
    pub const fn ambient(mut self) -> Self {
        self.ambient = true;
        self
    }

    /// Hide the effect's particles.
    #[must_use]
    pub const fn without_particles(mut self) -> Self {
        self.show_particles = false;
        self
    }

    /// Whether the effect is instant.
    pub const fn is_instant(&self) -> bool {
        self.duration.is_zero()
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// The live, persisted-relevant state of a player.
///
/// The world the player is in travels beside this struct, see
/// [`crate::PlayerState`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LivePlayer {
    /// Account identity.
    pub id: PlayerId,
    /// Current username.
    pub name: String,
    /// Position.
    pub position: Vec3,
    /// Velocity.
    pub velocity: Vec3,
    /// Horizontal rotation.
    pub yaw: f64,
    /// Vertical rotation.
    pub pitch: f64,
    /// Current health.
    pub health: f64,
    /// Maximum health.
    pub max_health: f64,
    /// Hunger points.
    pub hunger: i32,
    /// Food tick counter.
    pub food_tick: i32,
    /// Exhaustion level.
    pub exhaustion: f64,
    /// Saturation level.
    pub saturation: f64,
    /// Absorption health.
    pub absorption: f64,
    /// Enchanting table seed.
    pub enchantment_seed: i64,
    /// Total experience.
    pub experience: i32,
    /// Remaining air ticks.
    pub air_supply: i64,
    /// Maximum air ticks.
    pub max_air_supply: i64,
    /// Current game mode.
    pub game_mode: GameMode,
    /// Main inventory.
    pub inventory: LiveInventory,
    /// Ender chest contents.
    pub ender_chest: Vec<ItemStack>,
    /// Active effects.
    pub effects: Vec<Effect>,
    /// Ticks left on fire.
    pub fire_ticks: i64,
    /// Distance fallen.
    pub fall_distance: f64,
}

impl LivePlayer {
    /// A fresh player with full vitals, as a host would create on first join.
    pub fn fresh(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            health: 20.0,
            max_health: 20.0,
            hunger: 20,
            saturation: 5.0,
            air_supply: 300,
            max_air_supply: 300,
            ..Self::default()
        }
    }
}
