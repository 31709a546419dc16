//! Type-safe player identity wrapper around [`Uuid`].
//!
//! A player's identity is the account UUID handed to us by the host. It is
//! stable across sessions and names the on-disk document for that player.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Stable 128-bit identity of a player account.
///
/// Serializes as the lowercase, hyphenated UUID string. The default value is
/// the nil UUID, which is what an absent `UUID` key in a record decodes to.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    /// Create a random identity (UUID v4). Hosts normally receive identities
    /// from account authentication; this exists for tests and tooling.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The nil identity.
    pub const fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Whether this is the nil identity.
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl core::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl From<Uuid> for PlayerId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<PlayerId> for Uuid {
    fn from(id: PlayerId) -> Self {
        id.0
    }
}
