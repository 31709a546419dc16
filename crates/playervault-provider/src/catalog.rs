//! Registry lookups used when decoding records.
//!
//! Items are looked up by name and variant, enchantments by exact name and
//! effects by numeric id. A miss is never an error at this layer: the codec
//! drops the unresolvable element and records a
//! [`DecodeIssue`](crate::codec::DecodeIssue).

use std::collections::BTreeMap;

use crate::live::{EffectType, EnchantmentType, ItemType};

/// Name-keyed lookup tables for the host's item, enchantment and effect
/// registries.
pub trait Catalog: Send + Sync {
    /// Look up an item by registry name and variant.
    fn item(&self, name: &str, meta: i16) -> Option<ItemType>;

    /// Look up an enchantment by exact registry name.
    fn enchantment(&self, name: &str) -> Option<EnchantmentType>;

    /// Look up an effect by numeric id.
    fn effect(&self, id: i32) -> Option<EffectType>;
}

/// An in-memory [`Catalog`] built from fixed tables.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    items: BTreeMap<(String, i16), ItemType>,
    enchantments: BTreeMap<String, EnchantmentType>,
    effects: BTreeMap<i32, EffectType>,
}

impl StaticCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// A small vanilla-like catalog covering common items, enchantments and
    /// effects.
    pub fn vanilla() -> Self {
        let items = [
            ("minecraft:apple", 0),
            ("minecraft:bread", 0),
            ("minecraft:cobblestone", 0),
            ("minecraft:diamond_sword", 0),
            ("minecraft:diamond_pickaxe", 0),
            ("minecraft:diamond_helmet", 0),
            ("minecraft:diamond_chestplate", 0),
            ("minecraft:diamond_leggings", 0),
            ("minecraft:diamond_boots", 0),
            ("minecraft:shield", 0),
            ("minecraft:torch", 0),
            ("minecraft:wool", 0),
            ("minecraft:wool", 14),
        ];
        let enchantments = [
            "sharpness",
            "unbreaking",
            "efficiency",
            "protection",
            "mending",
            "fortune",
        ];
        let effects = [
            (1, "speed", true),
            (3, "haste", true),
            (5, "strength", true),
            (6, "instant_health", false),
            (7, "instant_damage", false),
            (10, "regeneration", true),
            (16, "night_vision", true),
        ];

        let mut catalog = Self::new();
        for (name, meta) in items {
            catalog = catalog.with_item(name, meta);
        }
        for name in enchantments {
            catalog = catalog.with_enchantment(name);
        }
        for (id, name, lasting) in effects {
            catalog = catalog.with_effect(id, name, lasting);
        }
        catalog
    }

    /// Register an item variant.
    #[must_use]
    pub fn with_item(mut self, name: &str, meta: i16) -> Self {
        self.items
            .insert((name.to_owned(), meta), ItemType::new(name, meta));
        self
    }

    /// Register an enchantment.
    #[must_use]
    pub fn with_enchantment(mut self, name: &str) -> Self {
        self.enchantments
            .insert(name.to_owned(), EnchantmentType::new(name));
        self
    }

    /// Register an effect.
    #[must_use]
    pub fn with_effect(mut self, id: i32, name: &str, lasting: bool) -> Self {
        self.effects.insert(id, EffectType::new(id, name, lasting));
        self
    }
}

impl Catalog for StaticCatalog {
    fn item(&self, name: &str, meta: i16) -> Option<ItemType> {
        self.items.get(&(name.to_owned(), meta)).cloned()
    }

    fn enchantment(&self, name: &str) -> Option<EnchantmentType> {
        self.enchantments.get(name).cloned()
    }

    fn effect(&self, id: i32) -> Option<EffectType> {
        self.effects.get(&id).cloned()
    }
}
