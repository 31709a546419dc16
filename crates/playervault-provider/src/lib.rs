//! Write-behind persistence for per-player game state.
//!
//! The [`Provider`] mirrors live player state between an in-memory cache and
//! one JSON document per player on disk. Saves land in the cache and are
//! written either immediately (autosave) or by a periodic flush task. A
//! configurable [`SavePolicy`] decides which field groups are persisted.
//!
//! # Modules
//!
//! - [`live`] -- Live player, inventory, item and effect types at the host boundary
//! - [`world`] -- The [`World`] trait, world handles and resolution
//! - [`catalog`] -- Item, enchantment and effect registries used on decode
//! - [`codec`] -- Conversion between live state and [`PlayerRecord`](playervault_types::PlayerRecord)
//! - [`store`] -- The JSON file store
//! - [`cache`] -- The locked in-memory map
//! - [`scheduler`] -- The background flush task
//! - [`provider`] -- The facade hosts call
//! - [`config`] -- YAML configuration and the save policy
//! - [`error`] -- Error types

pub mod cache;
pub mod catalog;
pub mod codec;
pub mod config;
pub mod error;
pub mod live;
pub mod provider;
pub mod scheduler;
pub mod store;
pub mod world;

pub use cache::{Cache, PlayerState};
pub use catalog::{Catalog, StaticCatalog};
pub use codec::{DecodeIssue, Decoded};
pub use config::{ConfigError, FieldGroup, ProviderConfig, SavePolicy};
pub use error::{ProviderError, StoreError};
pub use live::{
    Effect, EffectType, Enchantment, EnchantmentType, ItemStack, ItemType, LiveInventory,
    LivePlayer,
};
pub use provider::{Provider, ProviderBuilder};
pub use scheduler::FlushReport;
pub use store::FileStore;
pub use world::{StaticWorld, World, WorldFactory, WorldRef, WorldResolver};
