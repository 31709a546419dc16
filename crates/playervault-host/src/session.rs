//! Scripted player sessions.
//!
//! Each session plays one join: load (or create a fresh player on first
//! join), play a little, save, and reload to check the provider returns what
//! was saved.

use playervault_provider::{
    Catalog, Effect, ItemStack, LivePlayer, PlayerState, Provider, StaticCatalog,
};
use playervault_types::{Dimension, PlayerId, Vec3};
use tracing::info;
use uuid::Uuid;

use crate::error::HostError;
use crate::worlds::WorldRegistry;

/// Main inventory size.
const INVENTORY_SLOTS: usize = 36;

/// The scripted players. Identities are fixed so repeated runs find the
/// files earlier runs wrote.
pub const PLAYERS: [(u128, &str); 3] = [
    (0x6a1f_0c2e_4b7d_4e8a_9c31_5d2f_7e80_a101, "Alex"),
    (0x6a1f_0c2e_4b7d_4e8a_9c31_5d2f_7e80_a102, "Steve"),
    (0x6a1f_0c2e_4b7d_4e8a_9c31_5d2f_7e80_a103, "Noor"),
];

/// How a session went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The player had no saved data.
    FirstJoin,
    /// The player was restored from the cache or disk.
    Returning,
}

/// Run one session for `name`.
pub async fn run(
    provider: &Provider,
    worlds: &WorldRegistry,
    catalog: &StaticCatalog,
    id: PlayerId,
    name: &str,
) -> Result<Outcome, HostError> {
    let resolver = |dimension: Dimension| worlds.resolve(dimension);

    let (mut state, outcome) = match provider.load(id, &resolver).await {
        Ok(state) => (state, Outcome::Returning),
        Err(e) if e.is_not_found() => {
            let fresh = PlayerState::new(
                LivePlayer::fresh(id, name),
                worlds.resolve(Dimension::Overworld),
            );
            (fresh, Outcome::FirstJoin)
        }
        Err(e) => return Err(e.into()),
    };

    play(&mut state.player, catalog);
    provider.save(id, state.clone()).await?;

    let reloaded = provider.load(id, &resolver).await?;
    if reloaded.player != state.player {
        return Err(HostError::Mismatch {
            name: name.to_owned(),
        });
    }

    info!(
        %id,
        name,
        ?outcome,
        experience = reloaded.player.experience,
        items = reloaded.player.inventory.items.len(),
        world = reloaded.world.as_ref().map(|w| w.name()),
        "Session finished"
    );
    Ok(outcome)
}

/// A little gameplay: walk, gain experience, pick up bread, drink a potion.
fn play(player: &mut LivePlayer, catalog: &StaticCatalog) {
    let [x, y, z] = player.position.0;
    player.position = Vec3::new(x + 4.0, y.max(64.0), z - 2.5);
    player.yaw = (player.yaw + 45.0) % 360.0;
    player.experience = player.experience.saturating_add(17);
    player.hunger = player.hunger.saturating_sub(1).max(0);

    if player.inventory.items.len() < INVENTORY_SLOTS
        && let Some(bread) = catalog.item("minecraft:bread", 0)
    {
        player.inventory.items.push(ItemStack::new(bread, 4));
    }
    if let Some(speed) = catalog.effect(1) {
        player.effects.retain(|e| e.kind.id != speed.id);
        player
            .effects
            .push(Effect::lasting(speed, 0, std::time::Duration::from_secs(90)));
    }
}

/// The scripted identities as player ids.
pub fn scripted_players() -> impl Iterator<Item = (PlayerId, &'static str)> {
    PLAYERS
        .into_iter()
        .map(|(raw, name)| (PlayerId::from(Uuid::from_u128(raw)), name))
}
