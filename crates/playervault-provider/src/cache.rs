//! In-memory player state, keyed by identity.
//!
//! One lock guards both maps. Every operation holds it only for the map
//! operation itself and returns owned data, so no caller can hold the lock
//! across I/O.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use playervault_types::PlayerId;

use crate::live::LivePlayer;
use crate::world::WorldRef;

/// A player's live state together with the world they are in.
#[derive(Debug, Clone, Default)]
pub struct PlayerState {
    /// The player.
    pub player: LivePlayer,
    /// The world, if known.
    pub world: Option<WorldRef>,
}

impl PlayerState {
    /// Pair a player with a world.
    pub const fn new(player: LivePlayer, world: Option<WorldRef>) -> Self {
        Self { player, world }
    }
}

/// The write-behind cache.
///
/// Entries taken by a flush move to a second map and stay readable until
/// their write finishes, so a load during a flush never falls through to a
/// file that is about to be replaced.
#[derive(Debug, Default)]
pub struct Cache {
    entries: Mutex<Entries>,
}

#[derive(Debug, Default)]
struct Entries {
    live: HashMap<PlayerId, PlayerState>,
    /// Drained by a flush whose write has not finished.
    flushing: HashMap<PlayerId, PlayerState>,
}

impl Entries {
    fn find(&self, id: PlayerId) -> Option<&PlayerState> {
        self.live.get(&id).or_else(|| self.flushing.get(&id))
    }
}

impl Cache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    // The maps hold plain data, so a panic elsewhere cannot leave them
    // half-updated.
    fn lock(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// A copy of the cached state for `id`, including state still being
    /// flushed.
    pub fn get(&self, id: PlayerId) -> Option<PlayerState> {
        self.lock().find(id).cloned()
    }

    /// Insert or overwrite the state for `id`.
    pub fn put(&self, id: PlayerId, state: PlayerState) {
        self.lock().live.insert(id, state);
    }

    /// Insert `state` unless `id` is already cached or being flushed, and
    /// return whichever state is current afterwards.
    pub fn get_or_insert(&self, id: PlayerId, state: PlayerState) -> PlayerState {
        let mut entries = self.lock();
        if let Some(current) = entries.find(id) {
            return current.clone();
        }
        entries.live.insert(id, state.clone());
        state
    }

    /// Take every live entry for flushing.
    ///
    /// The taken entries stay visible to [`get`](Self::get) until
    /// [`finish_flush`](Self::finish_flush) is called for them. A later
    /// [`put`](Self::put) for the same player lands in the live map and
    /// wins over the flushing copy.
    pub fn drain_all(&self) -> Vec<(PlayerId, PlayerState)> {
        let mut entries = self.lock();
        let taken = std::mem::take(&mut entries.live);
        let drained = taken
            .iter()
            .map(|(id, state)| (*id, state.clone()))
            .collect();
        entries.flushing.extend(taken);
        drained
    }

    /// Forget the flushing copy of `id` once its write has finished.
    pub fn finish_flush(&self, id: PlayerId) {
        self.lock().flushing.remove(&id);
    }

    /// Drop every entry without returning them. Returns how many players
    /// were dropped.
    pub fn clear(&self) -> usize {
        let mut entries = self.lock();
        let dropped = count(&entries);
        entries.live.clear();
        entries.flushing.clear();
        dropped
    }

    /// Number of cached players.
    pub fn len(&self) -> usize {
        count(&self.lock())
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        let entries = self.lock();
        entries.live.is_empty() && entries.flushing.is_empty()
    }

    /// Whether `id` is cached.
    pub fn contains(&self, id: PlayerId) -> bool {
        self.lock().find(id).is_some()
    }
}

fn count(entries: &Entries) -> usize {
    let only_flushing = entries
        .flushing
        .keys()
        .filter(|id| !entries.live.contains_key(id))
        .count();
    entries.live.len().saturating_add(only_flushing)
}
