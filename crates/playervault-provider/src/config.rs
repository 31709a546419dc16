//! Provider configuration and the field-inclusion policy.
//!
//! Configuration is read from YAML (`playervault.yaml` for the host binary).
//! Every key is optional; defaults persist everything to `assets/players`
//! with synchronous autosave and a one-minute flush interval.
//!
//! ```yaml
//! path: assets/players
//! flush_interval_ms: 60000
//! autosave: false
//! first_join_message: "{id} joined for the first time"
//! reuse_live_world: true
//! save:
//!   health: false
//!   effects: true
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Environment variable overriding [`ProviderConfig::path`].
pub const PATH_ENV: &str = "PLAYERVAULT_PATH";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The flush interval was zero.
    #[error("flush interval must be greater than zero")]
    InvalidFlushInterval,
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

// ---------------------------------------------------------------------------
// Field groups
// ---------------------------------------------------------------------------

/// A logical group of player fields that is saved or skipped as a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldGroup {
    /// Position.
    Position,
    /// Velocity.
    Velocity,
    /// Yaw and pitch.
    Rotation,
    /// Health and maximum health.
    Health,
    /// Hunger, food tick, exhaustion and saturation.
    Hunger,
    /// Absorption health.
    Absorption,
    /// Enchanting table seed.
    EnchantmentSeed,
    /// Experience.
    Experience,
    /// Game mode.
    GameMode,
    /// Main inventory, armour and off-hand.
    Inventory,
    /// Active effects.
    Effects,
    /// Ender chest contents.
    EnderChest,
    /// Air supply and maximum air supply.
    AirSupply,
    /// Fall distance.
    FallDistance,
    /// Fire ticks.
    FireTicks,
    /// Dimension of the player's world.
    Dimension,
}

impl FieldGroup {
    /// Every field group.
    pub const ALL: [Self; 16] = [
        Self::Position,
        Self::Velocity,
        Self::Rotation,
        Self::Health,
        Self::Hunger,
        Self::Absorption,
        Self::EnchantmentSeed,
        Self::Experience,
        Self::GameMode,
        Self::Inventory,
        Self::Effects,
        Self::EnderChest,
        Self::AirSupply,
        Self::FallDistance,
        Self::FireTicks,
        Self::Dimension,
    ];
}

/// Which field groups are written on save.
///
/// A table of group to switch. Groups missing from the table are enabled, so
/// the default policy saves everything and a config file only needs to list
/// the groups it turns off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct SavePolicy {
    switches: BTreeMap<FieldGroup, bool>,
}

impl SavePolicy {
    /// A policy saving every group.
    pub fn all_enabled() -> Self {
        Self::default()
    }

    /// A policy saving no group. Identity and username are still written.
    pub fn all_disabled() -> Self {
        Self {
            switches: FieldGroup::ALL.iter().map(|g| (*g, false)).collect(),
        }
    }

    /// Set the switch for one group.
    #[must_use]
    pub fn with(mut self, group: FieldGroup, enabled: bool) -> Self {
        self.switches.insert(group, enabled);
        self
    }

    /// Whether `group` is saved.
    pub fn is_enabled(&self, group: FieldGroup) -> bool {
        self.switches.get(&group).copied().unwrap_or(true)
    }

    /// Iterate the enabled groups.
    pub fn enabled(&self) -> impl Iterator<Item = FieldGroup> + '_ {
        FieldGroup::ALL
            .into_iter()
            .filter(|g| self.is_enabled(*g))
    }
}

// ---------------------------------------------------------------------------
// Provider configuration
// ---------------------------------------------------------------------------

/// Serializable provider settings.
///
/// The default-world factory is not serializable and is supplied through
/// [`crate::ProviderBuilder::default_worlds`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProviderConfig {
    /// Directory holding one `<uuid>.json` document per player.
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Milliseconds between flush scheduler ticks.
    #[serde(default = "default_flush_interval_ms")]
    pub flush_interval_ms: u64,

    /// `true` writes every save to disk immediately; `false` buffers saves
    /// in memory until the next flush tick.
    #[serde(default = "default_true")]
    pub autosave: bool,

    /// Message logged when a player has no saved data. `{id}` is replaced
    /// with the player's identity. Empty disables the message.
    #[serde(default)]
    pub first_join_message: String,

    /// On a cache hit, return the cached world handle (`true`) or re-resolve
    /// the world for the cached world's dimension (`false`).
    #[serde(default = "default_true")]
    pub reuse_live_world: bool,

    /// Field-inclusion policy applied on save.
    #[serde(default)]
    pub save: SavePolicy,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            flush_interval_ms: default_flush_interval_ms(),
            autosave: true,
            first_join_message: String::new(),
            reuse_live_world: true,
            save: SavePolicy::default(),
        }
    }
}

impl ProviderConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `PLAYERVAULT_PATH` overrides `path` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string. The environment is not
    /// consulted.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Override fields from environment variables.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Override fields from `lookup`. Unset and empty values are ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(PATH_ENV).filter(|p| !p.is_empty()) {
            self.path = PathBuf::from(path);
        }
    }

    /// Check invariants the provider relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidFlushInterval`] for a zero interval.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.flush_interval_ms == 0 {
            return Err(ConfigError::InvalidFlushInterval);
        }
        Ok(())
    }

    /// The flush interval as a [`Duration`].
    pub const fn flush_interval(&self) -> Duration {
        Duration::from_millis(self.flush_interval_ms)
    }

    /// Render the first-join message for `id`, or `None` when disabled.
    pub fn first_join_message_for(&self, id: &impl core::fmt::Display) -> Option<String> {
        if self.first_join_message.is_empty() {
            return None;
        }
        Some(self.first_join_message.replace("{id}", &id.to_string()))
    }
}

fn default_path() -> PathBuf {
    PathBuf::from("assets/players")
}

const fn default_flush_interval_ms() -> u64 {
    60_000
}

const fn default_true() -> bool {
    true
}
