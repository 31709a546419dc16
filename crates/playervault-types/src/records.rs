//! Flat, serialization-ready player records.
//!
//! These structs are the on-disk shape of a player document. Every field is
//! optional on the wire: absent keys decode to the zero value and zero values
//! are omitted on encode, so a record only carries what its save policy
//! enabled. Keys are `PascalCase` to stay compatible with existing player
//! files.
//!
//! Integer fields decode through [`crate::lenient`] so that numbers written as
//! float literals are accepted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::PlayerId;

/// Whether a value equals its type's default. Drives field omission.
fn is_default<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

// ---------------------------------------------------------------------------
// Vectors
// ---------------------------------------------------------------------------

/// A 3D vector, persisted as a `[x, y, z]` array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Vec3(#[serde(serialize_with = "crate::finite::serialize_array")] pub [f64; 3]);

impl Vec3 {
    /// Create a vector from its components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self([x, y, z])
    }

    /// The x component.
    pub const fn x(&self) -> f64 {
        self.0[0]
    }

    /// The y component.
    pub const fn y(&self) -> f64 {
        self.0[1]
    }

    /// The z component.
    pub const fn z(&self) -> f64 {
        self.0[2]
    }
}

// ---------------------------------------------------------------------------
// Item properties
// ---------------------------------------------------------------------------

/// A value in an item's open-ended property bag.
///
/// The set of kinds is closed so the JSON contract stays well-defined: a
/// number, a string, a boolean, or a nested string-keyed map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "bindings/")]
pub enum PropertyValue {
    /// A boolean flag.
    Bool(bool),
    /// Any number. Integers are widened to `f64`.
    Number(#[serde(serialize_with = "crate::finite::serialize")] f64),
    /// A string.
    String(String),
    /// A nested map of further properties.
    Map(BTreeMap<String, PropertyValue>),
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<BTreeMap<String, Self>> for PropertyValue {
    fn from(v: BTreeMap<String, Self>) -> Self {
        Self::Map(v)
    }
}

// ---------------------------------------------------------------------------
// Item stacks
// ---------------------------------------------------------------------------

/// A persisted enchantment: registry name and level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "bindings/")]
pub struct EnchantmentRecord {
    /// Registry name, matched exactly on decode.
    #[serde(default, skip_serializing_if = "is_default")]
    pub name: String,
    /// Enchantment level.
    #[serde(
        default,
        skip_serializing_if = "is_default",
        deserialize_with = "crate::lenient::deserialize"
    )]
    pub level: i32,
}

/// A persisted item stack.
///
/// The zero value is the empty stack: an empty live stack encodes to
/// `ItemStackRecord::default()` and the default record decodes back to an
/// empty stack.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "bindings/")]
pub struct ItemStackRecord {
    /// Item registry name.
    #[serde(default, skip_serializing_if = "is_default")]
    pub name: String,
    /// Item variant within the name.
    #[serde(
        default,
        skip_serializing_if = "is_default",
        deserialize_with = "crate::lenient::deserialize"
    )]
    pub meta: i16,
    /// Number of items in the stack.
    #[serde(
        default,
        skip_serializing_if = "is_default",
        deserialize_with = "crate::lenient::deserialize"
    )]
    pub count: u32,
    /// Custom display name, empty when unset.
    #[serde(default, skip_serializing_if = "is_default")]
    pub custom_name: String,
    /// Lore lines shown under the name.
    #[serde(default, skip_serializing_if = "is_default")]
    pub lore: Vec<String>,
    /// Durability damage taken.
    #[serde(
        default,
        skip_serializing_if = "is_default",
        deserialize_with = "crate::lenient::deserialize"
    )]
    pub damage: i32,
    /// Anvil repair cost.
    #[serde(
        default,
        skip_serializing_if = "is_default",
        deserialize_with = "crate::lenient::deserialize"
    )]
    pub anvil_cost: i32,
    /// Arbitrary key/value properties attached by plugins.
    #[serde(default, skip_serializing_if = "is_default")]
    pub data: BTreeMap<String, PropertyValue>,
    /// Enchantments, in application order.
    #[serde(default, skip_serializing_if = "is_default")]
    pub enchantments: Vec<EnchantmentRecord>,
}

impl ItemStackRecord {
    /// Whether this record is the zero value (an empty slot).
    pub fn is_empty(&self) -> bool {
        is_default(self)
    }
}

/// A persisted player inventory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "bindings/")]
pub struct InventoryRecord {
    /// General slots, in slot order. Empty slots are zero-value records.
    #[serde(default, skip_serializing_if = "is_default")]
    pub items: Vec<ItemStackRecord>,
    /// Boots armour slot.
    #[serde(default, skip_serializing_if = "is_default")]
    pub boots: ItemStackRecord,
    /// Leggings armour slot.
    #[serde(default, skip_serializing_if = "is_default")]
    pub leggings: ItemStackRecord,
    /// Chestplate armour slot.
    #[serde(default, skip_serializing_if = "is_default")]
    pub chestplate: ItemStackRecord,
    /// Helmet armour slot.
    #[serde(default, skip_serializing_if = "is_default")]
    pub helmet: ItemStackRecord,
    /// Off-hand slot.
    #[serde(default, skip_serializing_if = "is_default")]
    pub off_hand: ItemStackRecord,
    /// Index of the selected hotbar slot.
    #[serde(
        default,
        skip_serializing_if = "is_default",
        deserialize_with = "crate::lenient::deserialize"
    )]
    pub main_hand_slot: u32,
}

impl InventoryRecord {
    /// Whether this record is the zero value.
    pub fn is_empty(&self) -> bool {
        is_default(self)
    }
}

// ---------------------------------------------------------------------------
// Effects
// ---------------------------------------------------------------------------

/// A persisted status effect.
///
/// A zero `duration` marks an instant effect; it is never decoded as lasting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "bindings/")]
pub struct EffectRecord {
    /// Numeric effect type id.
    #[serde(
        rename = "ID",
        default,
        skip_serializing_if = "is_default",
        deserialize_with = "crate::lenient::deserialize"
    )]
    pub id: i32,
    /// Effect amplifier (level minus one).
    #[serde(
        default,
        skip_serializing_if = "is_default",
        deserialize_with = "crate::lenient::deserialize"
    )]
    pub amplifier: i32,
    /// Remaining duration in nanoseconds.
    #[serde(
        default,
        skip_serializing_if = "is_default",
        deserialize_with = "crate::lenient::deserialize"
    )]
    pub duration: i64,
    /// Whether the effect came from an ambient source such as a beacon.
    #[serde(default, skip_serializing_if = "is_default")]
    pub ambient: bool,
    /// Whether particles are shown.
    #[serde(default, skip_serializing_if = "is_default")]
    pub show_particles: bool,
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// The persisted unit: everything saved for one player.
///
/// Identity and username are always present. Every other field is populated
/// only when its field group is enabled by the save policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "bindings/")]
pub struct PlayerRecord {
    /// Player identity. Never changes after the record is created.
    #[serde(rename = "UUID", default)]
    pub id: PlayerId,
    /// Last username the player joined with.
    #[serde(default)]
    pub username: String,
    /// Last known position.
    #[serde(default, skip_serializing_if = "is_default")]
    pub position: Vec3,
    /// Movement velocity.
    #[serde(default, skip_serializing_if = "is_default")]
    pub velocity: Vec3,
    /// Horizontal rotation in degrees.
    #[serde(
        default,
        skip_serializing_if = "is_default",
        serialize_with = "crate::finite::serialize"
    )]
    pub yaw: f64,
    /// Vertical rotation in degrees.
    #[serde(
        default,
        skip_serializing_if = "is_default",
        serialize_with = "crate::finite::serialize"
    )]
    pub pitch: f64,
    /// Current health.
    #[serde(
        default,
        skip_serializing_if = "is_default",
        serialize_with = "crate::finite::serialize"
    )]
    pub health: f64,
    /// Maximum health.
    #[serde(
        default,
        skip_serializing_if = "is_default",
        serialize_with = "crate::finite::serialize"
    )]
    pub max_health: f64,
    /// Hunger points, 0 to 20.
    #[serde(
        default,
        skip_serializing_if = "is_default",
        deserialize_with = "crate::lenient::deserialize"
    )]
    pub hunger: i32,
    /// Food tick counter driving regeneration and starvation, 0 to 80.
    #[serde(
        default,
        skip_serializing_if = "is_default",
        deserialize_with = "crate::lenient::deserialize"
    )]
    pub food_tick: i32,
    /// Exhaustion level.
    #[serde(
        rename = "ExhaustionLevel",
        default,
        skip_serializing_if = "is_default",
        serialize_with = "crate::finite::serialize"
    )]
    pub exhaustion: f64,
    /// Saturation level.
    #[serde(
        rename = "SaturationLevel",
        default,
        skip_serializing_if = "is_default",
        serialize_with = "crate::finite::serialize"
    )]
    pub saturation: f64,
    /// Extra, non-regenerating health.
    #[serde(
        rename = "AbsorptionLevel",
        default,
        skip_serializing_if = "is_default",
        serialize_with = "crate::finite::serialize"
    )]
    pub absorption: f64,
    /// Seed for enchanting table offers.
    #[serde(
        default,
        skip_serializing_if = "is_default",
        deserialize_with = "crate::lenient::deserialize"
    )]
    pub enchantment_seed: i64,
    /// Total experience.
    #[serde(
        default,
        skip_serializing_if = "is_default",
        deserialize_with = "crate::lenient::deserialize"
    )]
    pub experience: i32,
    /// Remaining air supply ticks.
    #[serde(
        default,
        skip_serializing_if = "is_default",
        deserialize_with = "crate::lenient::deserialize"
    )]
    pub air_supply: i64,
    /// Maximum air supply ticks.
    #[serde(
        default,
        skip_serializing_if = "is_default",
        deserialize_with = "crate::lenient::deserialize"
    )]
    pub max_air_supply: i64,
    /// Game mode id, see [`crate::GameMode::id`].
    #[serde(
        default,
        skip_serializing_if = "is_default",
        deserialize_with = "crate::lenient::deserialize"
    )]
    pub game_mode: i32,
    /// Main inventory, armour and off-hand.
    #[serde(default, skip_serializing_if = "is_default")]
    pub inventory: InventoryRecord,
    /// Ender chest contents, in slot order.
    #[serde(rename = "EnderChestInventory", default, skip_serializing_if = "is_default")]
    pub ender_chest: Vec<ItemStackRecord>,
    /// Active status effects.
    #[serde(default, skip_serializing_if = "is_default")]
    pub effects: Vec<EffectRecord>,
    /// Ticks left on fire.
    #[serde(
        default,
        skip_serializing_if = "is_default",
        deserialize_with = "crate::lenient::deserialize"
    )]
    pub fire_ticks: i64,
    /// Distance fallen so far, used for fall damage.
    #[serde(
        default,
        skip_serializing_if = "is_default",
        serialize_with = "crate::finite::serialize"
    )]
    pub fall_distance: f64,
    /// Dimension id, see [`crate::Dimension::id`].
    #[serde(
        default,
        skip_serializing_if = "is_default",
        deserialize_with = "crate::lenient::deserialize"
    )]
    pub dimension: i32,
}

impl PlayerRecord {
    /// Create a record carrying only identity and username.
    pub fn new(id: PlayerId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            ..Self::default()
        }
    }
}
