//! Conversion between live player state and flat records.
//!
//! [`to_record`] applies the save policy: it walks [`FIELD_TABLE`] and copies
//! only the groups the policy enables, leaving the rest at their zero value so
//! they are omitted from the JSON document. [`from_record`] ignores the policy
//! and restores everything the record carries.
//!
//! Decoding never fails as a whole. Anything that cannot be restored is
//! substituted or dropped and reported as a [`DecodeIssue`].

pub mod effects;
pub mod items;

use playervault_types::{Dimension, GameMode, PlayerRecord};

use crate::catalog::Catalog;
use crate::config::{FieldGroup, SavePolicy};
use crate::live::LivePlayer;
use crate::world::{WorldFactory, WorldRef, resolve_world};

/// A recoverable problem found while decoding a record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeIssue {
    /// The game mode id is not in the table; survival was substituted.
    #[error("unknown game mode id {id}, using survival")]
    UnknownGameMode {
        /// The unrecognized id.
        id: i32,
    },

    /// The dimension id is not in the table; no world was restored.
    #[error("unknown dimension id {id}, world not restored")]
    UnknownDimension {
        /// The unrecognized id.
        id: i32,
    },

    /// Neither the resolver nor the default-world factory had a world.
    #[error("no world available for dimension {dimension}")]
    NoWorld {
        /// The dimension that could not be resolved.
        dimension: Dimension,
    },

    /// The item is not in the catalog; the slot was left empty.
    #[error("unknown item {name}:{meta}, slot left empty")]
    UnknownItem {
        /// Item name.
        name: String,
        /// Item variant.
        meta: i16,
    },

    /// The enchantment is not in the catalog; it was dropped from its stack.
    #[error("unknown enchantment {name}, dropped")]
    UnknownEnchantment {
        /// Enchantment name.
        name: String,
    },

    /// The effect id is not in the catalog; the effect was dropped.
    #[error("unknown effect id {id}, dropped")]
    UnknownEffect {
        /// Effect id.
        id: i32,
    },

    /// The effect has a duration but its type cannot last; it was dropped.
    #[error("effect {id} has a duration but is instant-only, dropped")]
    NonLastingEffect {
        /// Effect id.
        id: i32,
    },
}

/// The result of decoding a record.
#[derive(Debug, Clone)]
pub struct Decoded {
    /// The restored player.
    pub player: LivePlayer,
    /// The restored world, if one could be resolved.
    pub world: Option<WorldRef>,
    /// Everything that had to be substituted or dropped.
    pub issues: Vec<DecodeIssue>,
}

/// Copies one field group from live state into a record.
type CopyFn = fn(&LivePlayer, Option<&WorldRef>, &mut PlayerRecord);

/// The field-group table driving [`to_record`]. One row per [`FieldGroup`].
pub const FIELD_TABLE: [(FieldGroup, CopyFn); 16] = [
    (FieldGroup::Position, |p, _, r| r.position = p.position),
    (FieldGroup::Velocity, |p, _, r| r.velocity = p.velocity),
    (FieldGroup::Rotation, |p, _, r| {
        r.yaw = p.yaw;
        r.pitch = p.pitch;
    }),
    (FieldGroup::Health, |p, _, r| {
        r.health = p.health;
        r.max_health = p.max_health;
    }),
    (FieldGroup::Hunger, |p, _, r| {
        r.hunger = p.hunger;
        r.food_tick = p.food_tick;
        r.exhaustion = p.exhaustion;
        r.saturation = p.saturation;
    }),
    (FieldGroup::Absorption, |p, _, r| r.absorption = p.absorption),
    (FieldGroup::EnchantmentSeed, |p, _, r| {
        r.enchantment_seed = p.enchantment_seed;
    }),
    (FieldGroup::Experience, |p, _, r| r.experience = p.experience),
    (FieldGroup::GameMode, |p, _, r| r.game_mode = p.game_mode.id()),
    (FieldGroup::Inventory, |p, _, r| {
        r.inventory = items::inventory_to_record(&p.inventory);
    }),
    (FieldGroup::Effects, |p, _, r| {
        r.effects = effects::effects_to_records(&p.effects);
    }),
    (FieldGroup::EnderChest, |p, _, r| {
        r.ender_chest = items::stacks_to_records(&p.ender_chest);
    }),
    (FieldGroup::AirSupply, |p, _, r| {
        r.air_supply = p.air_supply;
        r.max_air_supply = p.max_air_supply;
    }),
    (FieldGroup::FallDistance, |p, _, r| {
        r.fall_distance = p.fall_distance;
    }),
    (FieldGroup::FireTicks, |p, _, r| r.fire_ticks = p.fire_ticks),
    (FieldGroup::Dimension, |_, w, r| {
        if let Some(world) = w {
            r.dimension = world.dimension().id();
        }
    }),
];

/// Convert live state into a record, copying only the groups `policy`
/// enables. Identity and username are always copied.
pub fn to_record(
    player: &LivePlayer,
    world: Option<&WorldRef>,
    policy: &SavePolicy,
) -> PlayerRecord {
    let mut record = PlayerRecord::new(player.id, player.name.clone());
    for (group, copy) in &FIELD_TABLE {
        if policy.is_enabled(*group) {
            copy(player, world, &mut record);
        }
    }
    record
}

/// Convert a record back into live state.
///
/// The world is resolved from the record's dimension through `resolver`,
/// falling back to `fallback` when the resolver has nothing.
pub fn from_record<R>(
    record: &PlayerRecord,
    catalog: &dyn Catalog,
    resolver: &R,
    fallback: Option<&WorldFactory>,
) -> Decoded
where
    R: Fn(Dimension) -> Option<WorldRef> + ?Sized,
{
    let mut issues = Vec::new();

    let game_mode = GameMode::from_id(record.game_mode).unwrap_or_else(|| {
        issues.push(DecodeIssue::UnknownGameMode {
            id: record.game_mode,
        });
        GameMode::Survival
    });

    let dimension = Dimension::from_id(record.dimension);
    let world = dimension.and_then(|d| resolve_world(d, resolver, fallback));
    match (dimension, world.is_some()) {
        (None, _) => issues.push(DecodeIssue::UnknownDimension {
            id: record.dimension,
        }),
        (Some(dimension), false) => issues.push(DecodeIssue::NoWorld { dimension }),
        (Some(_), true) => {}
    }

    let player = LivePlayer {
        id: record.id,
        name: record.username.clone(),
        position: record.position,
        velocity: record.velocity,
        yaw: record.yaw,
        pitch: record.pitch,
        health: record.health,
        max_health: record.max_health,
        hunger: record.hunger,
        food_tick: record.food_tick,
        exhaustion: record.exhaustion,
        saturation: record.saturation,
        absorption: record.absorption,
        enchantment_seed: record.enchantment_seed,
        experience: record.experience,
        air_supply: record.air_supply,
        max_air_supply: record.max_air_supply,
        game_mode,
        inventory: items::inventory_from_record(&record.inventory, catalog, &mut issues),
        ender_chest: items::stacks_from_records(&record.ender_chest, catalog, &mut issues),
        effects: effects::effects_from_records(&record.effects, catalog, &mut issues),
        fire_ticks: record.fire_ticks,
        fall_distance: record.fall_distance,
    };

    Decoded {
        player,
        world,
        issues,
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Arc;
    use std::time::Duration;

    use playervault_types::{PlayerId, Vec3};

    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::live::{Effect, EffectType, ItemStack, ItemType};
    use crate::world::StaticWorld;

    fn player() -> LivePlayer {
        let mut p = LivePlayer::fresh(PlayerId::new(), "Alex");
        p.position = Vec3::new(10.5, 64.0, -3.25);
        p.velocity = Vec3::new(0.0, -0.5, 0.0);
        p.yaw = 90.0;
        p.pitch = -12.5;
        p.health = 13.0;
        p.absorption = 4.0;
        p.enchantment_seed = 1_234_567;
        p.experience = 310;
        p.game_mode = GameMode::Creative;
        p.fire_ticks = 40;
        p.fall_distance = 2.5;
        p.inventory.items = vec![
            ItemStack::new(ItemType::new("minecraft:bread", 0), 16),
            ItemStack::default(),
        ];
        p.ender_chest = vec![ItemStack::new(ItemType::new("minecraft:wool", 14), 3)];
        p.effects = vec![Effect::lasting(
            EffectType::new(10, "regeneration", true),
            1,
            Duration::from_secs(45),
        )];
        p
    }

    fn nether() -> WorldRef {
        StaticWorld::shared("nether", Dimension::Nether)
    }

    #[test]
    fn table_covers_every_group_once() {
        let groups: BTreeSet<FieldGroup> = FIELD_TABLE.iter().map(|(g, _)| *g).collect();
        assert_eq!(groups.len(), FIELD_TABLE.len());
        assert_eq!(groups, FieldGroup::ALL.into_iter().collect::<BTreeSet<_>>());
    }

    #[test]
    fn all_enabled_round_trips() {
        let live = player();
        let world = nether();
        let record = to_record(&live, Some(&world), &SavePolicy::all_enabled());
        assert_eq!(record.dimension, Dimension::Nether.id());

        let decoded = from_record(
            &record,
            &StaticCatalog::vanilla(),
            &|d| Some(StaticWorld::shared("resolved", d)),
            None,
        );
        assert_eq!(decoded.player, live);
        assert!(decoded.issues.is_empty());
        assert_eq!(
            decoded.world.map(|w| w.dimension()),
            Some(Dimension::Nether)
        );
    }

    #[test]
    fn disabled_health_is_left_at_zero() {
        let live = player();
        let policy = SavePolicy::all_enabled().with(FieldGroup::Health, false);
        let record = to_record(&live, None, &policy);
        assert_eq!(record.health, 0.0);
        assert_eq!(record.max_health, 0.0);
        assert_eq!(record.hunger, live.hunger);
        assert_eq!(record.position, live.position);
    }

    #[test]
    fn all_disabled_keeps_identity_only() {
        let live = player();
        let record = to_record(&live, Some(&nether()), &SavePolicy::all_disabled());
        assert_eq!(record, PlayerRecord::new(live.id, "Alex"));
    }

    #[test]
    fn unknown_game_mode_falls_back_to_survival() {
        let record = PlayerRecord {
            game_mode: 42,
            ..PlayerRecord::default()
        };
        let decoded = from_record(&record, &StaticCatalog::vanilla(), &|_| None, None);
        assert_eq!(decoded.player.game_mode, GameMode::Survival);
        assert!(
            decoded
                .issues
                .contains(&DecodeIssue::UnknownGameMode { id: 42 })
        );
    }

    #[test]
    fn unknown_dimension_restores_no_world() {
        let record = PlayerRecord {
            dimension: 7,
            ..PlayerRecord::default()
        };
        let decoded = from_record(
            &record,
            &StaticCatalog::vanilla(),
            &|d| Some(StaticWorld::shared("any", d)),
            None,
        );
        assert!(decoded.world.is_none());
        assert_eq!(decoded.issues, vec![DecodeIssue::UnknownDimension { id: 7 }]);
    }

    #[test]
    fn default_world_factory_is_the_fallback() {
        let record = PlayerRecord {
            dimension: Dimension::End.id(),
            ..PlayerRecord::default()
        };
        let factory: WorldFactory =
            Arc::new(|d: Dimension| Some(StaticWorld::shared("default-end", d)));
        let decoded = from_record(&record, &StaticCatalog::vanilla(), &|_| None, Some(&factory));
        assert_eq!(
            decoded.world.as_ref().map(|w| w.name().to_owned()),
            Some(String::from("default-end"))
        );
    }

    #[test]
    fn missing_world_is_reported() {
        let decoded = from_record(
            &PlayerRecord::default(),
            &StaticCatalog::vanilla(),
            &|_| None,
            None,
        );
        assert_eq!(
            decoded.issues,
            vec![DecodeIssue::NoWorld {
                dimension: Dimension::Overworld
            }]
        );
    }
}
