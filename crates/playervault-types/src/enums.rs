//! Game mode and dimension enumerations with their persisted ids.
//!
//! Records store both as plain integers. The id tables here are injective:
//! every variant has exactly one id and every id maps back to one variant.
//! Decoding an id outside the table yields `None` and is left to the caller
//! to recover from.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Game modes
// ---------------------------------------------------------------------------

/// The game mode a player is in.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub enum GameMode {
    /// Standard play with health, hunger and resource gathering.
    #[default]
    Survival,
    /// Unlimited resources and flight.
    Creative,
    /// Survival without block breaking or placing.
    Adventure,
    /// Invisible, non-interacting observer.
    Spectator,
}

impl GameMode {
    /// Every game mode, in id order.
    pub const ALL: [Self; 4] = [
        Self::Survival,
        Self::Creative,
        Self::Adventure,
        Self::Spectator,
    ];

    /// The persisted id of this game mode.
    pub const fn id(self) -> i32 {
        match self {
            Self::Survival => 0,
            Self::Creative => 1,
            Self::Adventure => 2,
            Self::Spectator => 3,
        }
    }

    /// Look up a game mode by persisted id.
    pub const fn from_id(id: i32) -> Option<Self> {
        match id {
            0 => Some(Self::Survival),
            1 => Some(Self::Creative),
            2 => Some(Self::Adventure),
            3 => Some(Self::Spectator),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Dimensions
// ---------------------------------------------------------------------------

/// The dimension a world belongs to.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub enum Dimension {
    /// The default surface dimension.
    #[default]
    Overworld,
    /// The underground fire dimension.
    Nether,
    /// The void dimension.
    End,
}

impl Dimension {
    /// Every dimension, in id order.
    pub const ALL: [Self; 3] = [Self::Overworld, Self::Nether, Self::End];

    /// The persisted id of this dimension.
    pub const fn id(self) -> i32 {
        match self {
            Self::Overworld => 0,
            Self::Nether => 1,
            Self::End => 2,
        }
    }

    /// Look up a dimension by persisted id.
    pub const fn from_id(id: i32) -> Option<Self> {
        match id {
            0 => Some(Self::Overworld),
            1 => Some(Self::Nether),
            2 => Some(Self::End),
            _ => None,
        }
    }
}

impl core::fmt::Display for Dimension {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Overworld => "overworld",
            Self::Nether => "nether",
            Self::End => "end",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn game_mode_ids_are_injective() {
        let ids: BTreeSet<i32> = GameMode::ALL.iter().map(|m| m.id()).collect();
        assert_eq!(ids.len(), GameMode::ALL.len());
        for mode in GameMode::ALL {
            assert_eq!(GameMode::from_id(mode.id()), Some(mode));
        }
    }

    #[test]
    fn dimension_ids_are_injective() {
        let ids: BTreeSet<i32> = Dimension::ALL.iter().map(|d| d.id()).collect();
        assert_eq!(ids.len(), Dimension::ALL.len());
        for dim in Dimension::ALL {
            assert_eq!(Dimension::from_id(dim.id()), Some(dim));
        }
    }

    #[test]
    fn unknown_ids_are_rejected() {
        assert_eq!(GameMode::from_id(4), None);
        assert_eq!(GameMode::from_id(-1), None);
        assert_eq!(Dimension::from_id(3), None);
        assert_eq!(Dimension::from_id(i32::MAX), None);
    }

    #[test]
    fn defaults_match_id_zero() {
        assert_eq!(GameMode::default().id(), 0);
        assert_eq!(Dimension::default().id(), 0);
    }
}
