//! The provider facade: load, save and close for the host runtime.
//!
//! A [`Provider`] owns one cache, one file store and one flush scheduler.
//! Load checks the cache before the store. Save always lands in the cache and
//! also writes through to the store when autosave is on. With autosave off,
//! writes happen on the next flush tick.
//!
//! # Shutdown
//!
//! [`Provider::close`] does **not** flush. Anything saved since the last
//! flush tick with autosave off is discarded. Hosts that need every save on
//! disk should run with autosave on.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use playervault_types::PlayerId;
use tokio::sync::{Mutex as AsyncMutex, Notify, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::cache::{Cache, PlayerState};
use crate::catalog::Catalog;
use crate::codec::{self, Decoded};
use crate::config::ProviderConfig;
use crate::error::{ProviderError, StoreError};
use crate::scheduler;
use crate::store::FileStore;
use crate::world::{WorldFactory, WorldResolver, resolve_world};

/// State shared between the provider and its flush task.
pub(crate) struct Shared {
    pub(crate) config: ProviderConfig,
    pub(crate) store: FileStore,
    pub(crate) cache: Cache,
    pub(crate) catalog: Arc<dyn Catalog>,
    pub(crate) default_worlds: Option<WorldFactory>,
    closed: AtomicBool,
    /// Wakes the flush task when the provider closes.
    pub(crate) shutdown: Notify,
    /// Held by a flush for its whole run.
    pub(crate) flush_lock: AsyncMutex<()>,
    /// Cache-miss loads hold this shared across their file read; a flush
    /// holds it exclusively while draining. A load can then never cache a
    /// file read that a save and flush overtook.
    pub(crate) drain_gate: RwLock<()>,
}

impl Shared {
    pub(crate) fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Set the closed flag and wake the flush task. Returns `false` if the
    /// flag was already set.
    fn mark_closed(&self) -> bool {
        let first = !self.closed.swap(true, Ordering::AcqRel);
        if first {
            self.shutdown.notify_one();
        }
        first
    }
}

/// Write-behind player persistence.
///
/// Build with [`Provider::builder`] from inside a Tokio runtime.
pub struct Provider {
    shared: Arc<Shared>,
    scheduler: Mutex<Option<JoinHandle<()>>>,
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("path", &self.shared.config.path)
            .field("autosave", &self.shared.config.autosave)
            .field("cached", &self.shared.cache.len())
            .field("closed", &self.shared.is_closed())
            .finish_non_exhaustive()
    }
}

/// Builder for [`Provider`].
pub struct ProviderBuilder {
    config: ProviderConfig,
    catalog: Arc<dyn Catalog>,
    default_worlds: Option<WorldFactory>,
}

impl fmt::Debug for ProviderBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderBuilder")
            .field("config", &self.config)
            .field("default_worlds", &self.default_worlds.is_some())
            .finish_non_exhaustive()
    }
}

impl ProviderBuilder {
    /// Set the per-dimension default-world factory consulted when the
    /// caller's resolver has no world.
    #[must_use]
    pub fn default_worlds(mut self, factory: WorldFactory) -> Self {
        self.default_worlds = Some(factory);
        self
    }

    /// Validate the configuration and start the provider.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Config`] for an invalid configuration and
    /// [`ProviderError::NoRuntime`] when called outside a Tokio runtime.
    pub fn build(self) -> Result<Provider, ProviderError> {
        self.config.validate()?;
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return Err(ProviderError::NoRuntime);
        };

        let shared = Arc::new(Shared {
            store: FileStore::new(self.config.path.clone()),
            config: self.config,
            cache: Cache::new(),
            catalog: self.catalog,
            default_worlds: self.default_worlds,
            closed: AtomicBool::new(false),
            shutdown: Notify::new(),
            flush_lock: AsyncMutex::new(()),
            drain_gate: RwLock::new(()),
        });
        let handle = scheduler::spawn(&runtime, Arc::clone(&shared));

        info!(
            path = %shared.config.path.display(),
            autosave = shared.config.autosave,
            flush_interval_ms = shared.config.flush_interval_ms,
            "Player provider started"
        );

        Ok(Provider {
            shared,
            scheduler: Mutex::new(Some(handle)),
        })
    }
}

impl Provider {
    /// Start building a provider.
    pub const fn builder(config: ProviderConfig, catalog: Arc<dyn Catalog>) -> ProviderBuilder {
        ProviderBuilder {
            config,
            catalog,
            default_worlds: None,
        }
    }

    /// The configuration the provider was built with.
    pub fn config(&self) -> &ProviderConfig {
        &self.shared.config
    }

    /// Number of players currently cached.
    pub fn cached_players(&self) -> usize {
        self.shared.cache.len()
    }

    /// Whether [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.shared.is_closed()
    }

    /// Load a player's state.
    ///
    /// A cached player is returned without touching the store. Otherwise the
    /// player's file is read and decoded, worlds are resolved through
    /// `resolver` and the default-world factory, and the result is cached.
    /// Anything in the file that cannot be restored is dropped with a
    /// warning.
    ///
    /// # Errors
    ///
    /// Returns a not-found error (see [`ProviderError::is_not_found`]) when
    /// the player has never been saved, other store errors for unreadable
    /// files, and [`ProviderError::Closed`] after close. Nothing is cached
    /// on error.
    pub async fn load(
        &self,
        id: PlayerId,
        resolver: &WorldResolver<'_>,
    ) -> Result<PlayerState, ProviderError> {
        if self.is_closed() {
            return Err(ProviderError::Closed);
        }

        if let Some(state) = self.from_cache(id, resolver) {
            return Ok(state);
        }

        let _gate = self.shared.drain_gate.read().await;
        // A flush may have finished writing this player while we waited.
        if let Some(state) = self.from_cache(id, resolver) {
            return Ok(state);
        }

        let record = match self.shared.store.read(id).await {
            Ok(record) => record,
            Err(e @ StoreError::NotFound { .. }) => {
                debug!(%id, "No saved data for player");
                if let Some(message) = self.shared.config.first_join_message_for(&id) {
                    info!(%id, "{message}");
                }
                return Err(e.into());
            }
            Err(e) => {
                error!(%id, error = %e, "Failed to load player data");
                return Err(e.into());
            }
        };

        if record.id != id {
            warn!(
                %id,
                record_id = %record.id,
                "Player file identity does not match its file name, using the requested identity"
            );
        }

        let Decoded {
            mut player,
            world,
            issues,
        } = codec::from_record(
            &record,
            self.shared.catalog.as_ref(),
            resolver,
            self.shared.default_worlds.as_ref(),
        );
        player.id = id;
        for issue in &issues {
            warn!(%id, %issue, "Player data partially restored");
        }

        if self.is_closed() {
            return Err(ProviderError::Closed);
        }
        // A save that landed while the file was being read is newer.
        let state = self
            .shared
            .cache
            .get_or_insert(id, PlayerState::new(player, world));
        debug!(%id, issues = issues.len(), "Loaded player from store");
        Ok(state)
    }

    fn from_cache(&self, id: PlayerId, resolver: &WorldResolver<'_>) -> Option<PlayerState> {
        let mut state = self.shared.cache.get(id)?;
        if !self.shared.config.reuse_live_world
            && let Some(dimension) = state.world.as_ref().map(|w| w.dimension())
        {
            state.world = resolve_world(dimension, resolver, self.shared.default_worlds.as_ref());
        }
        debug!(%id, "Loaded player from cache");
        Some(state)
    }

    /// Save a player's state.
    ///
    /// The cache is always updated. With autosave on, the state is also
    /// written to the store before returning.
    ///
    /// # Errors
    ///
    /// Returns the store error if an autosave write fails (the cache is
    /// still updated), and [`ProviderError::Closed`] after close.
    pub async fn save(&self, id: PlayerId, mut state: PlayerState) -> Result<(), ProviderError> {
        if self.is_closed() {
            return Err(ProviderError::Closed);
        }
        if state.player.id != id {
            warn!(%id, player_id = %state.player.id, "Saved player identity differs, using the save key");
            state.player.id = id;
        }

        let record = self.shared.config.autosave.then(|| {
            codec::to_record(
                &state.player,
                state.world.as_ref(),
                &self.shared.config.save,
            )
        });
        self.shared.cache.put(id, state);

        if let Some(record) = record {
            self.shared.store.write(id, &record).await?;
        }
        Ok(())
    }

    /// Close the provider.
    ///
    /// Sets the closed flag, wakes the flush task so it exits, and drops the
    /// cache **without flushing**. Later loads and saves fail with
    /// [`ProviderError::Closed`]. Calling close again does nothing.
    ///
    /// Close cannot fail: it touches no I/O, and discarded entries are
    /// reported through the log rather than as an error.
    pub fn close(&self) {
        if !self.shared.mark_closed() {
            return;
        }
        let dropped = self.shared.cache.clear();
        if dropped > 0 && !self.shared.config.autosave {
            warn!(dropped, "Provider closed with unflushed player data, discarding it");
        } else {
            info!("Provider closed");
        }
    }

    /// Close the provider and wait for the flush task to exit.
    pub async fn shutdown(&self) {
        self.close();
        let handle = self
            .scheduler
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle
            && let Err(e) = handle.await
        {
            error!(error = %e, "Flush scheduler task failed");
        }
    }

    /// Run one flush tick now, outside the schedule.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Closed`] after close.
    pub async fn flush_now(&self) -> Result<scheduler::FlushReport, ProviderError> {
        if self.is_closed() {
            return Err(ProviderError::Closed);
        }
        Ok(scheduler::flush(&self.shared).await)
    }
}

impl Drop for Provider {
    fn drop(&mut self) {
        self.shared.mark_closed();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::Path;

    use playervault_types::Dimension;

    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::live::LivePlayer;
    use crate::world::{StaticWorld, WorldRef};

    fn config(dir: &Path, autosave: bool) -> ProviderConfig {
        ProviderConfig {
            path: dir.to_path_buf(),
            autosave,
            ..ProviderConfig::default()
        }
    }

    fn build(config: ProviderConfig) -> Provider {
        Provider::builder(config, Arc::new(StaticCatalog::vanilla()))
            .build()
            .unwrap()
    }

    fn overworld(d: Dimension) -> Option<WorldRef> {
        Some(StaticWorld::shared("live", d))
    }

    #[test]
    fn build_outside_runtime_fails() {
        let err = Provider::builder(ProviderConfig::default(), Arc::new(StaticCatalog::new()))
            .build()
            .unwrap_err();
        assert!(matches!(err, ProviderError::NoRuntime));
    }

    #[tokio::test]
    async fn zero_flush_interval_is_rejected() {
        let config = ProviderConfig {
            flush_interval_ms: 0,
            ..ProviderConfig::default()
        };
        let err = Provider::builder(config, Arc::new(StaticCatalog::new()))
            .build()
            .unwrap_err();
        assert!(matches!(err, ProviderError::Config { .. }));
    }

    #[tokio::test]
    async fn operations_after_close_fail() {
        let dir = tempfile::tempdir().unwrap();
        let provider = build(config(dir.path(), true));
        let id = PlayerId::new();
        provider
            .save(id, PlayerState::new(LivePlayer::fresh(id, "Alex"), None))
            .await
            .unwrap();

        provider.close();
        provider.close();
        assert!(provider.is_closed());
        assert_eq!(provider.cached_players(), 0);
        assert!(matches!(
            provider.load(id, &overworld).await.unwrap_err(),
            ProviderError::Closed
        ));
        assert!(matches!(
            provider.save(id, PlayerState::default()).await.unwrap_err(),
            ProviderError::Closed
        ));
        provider.shutdown().await;
    }

    #[tokio::test]
    async fn save_key_wins_over_player_identity() {
        let dir = tempfile::tempdir().unwrap();
        let provider = build(config(dir.path(), false));
        let id = PlayerId::new();
        let other = LivePlayer::fresh(PlayerId::new(), "Impostor");
        provider.save(id, PlayerState::new(other, None)).await.unwrap();

        let state = provider.load(id, &overworld).await.unwrap();
        assert_eq!(state.player.id, id);
        provider.shutdown().await;
    }

    #[tokio::test]
    async fn cache_hit_re_resolves_world_when_not_reusing() {
        let dir = tempfile::tempdir().unwrap();
        let provider = build(ProviderConfig {
            reuse_live_world: false,
            ..config(dir.path(), false)
        });
        let id = PlayerId::new();
        let saved = PlayerState::new(
            LivePlayer::fresh(id, "Alex"),
            Some(StaticWorld::shared("old-nether", Dimension::Nether)),
        );
        provider.save(id, saved).await.unwrap();

        let state = provider.load(id, &overworld).await.unwrap();
        let world = state.world.unwrap();
        assert_eq!(world.name(), "live");
        assert_eq!(world.dimension(), Dimension::Nether);
        provider.shutdown().await;
    }

    #[tokio::test]
    async fn cache_hit_reuses_world_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let provider = build(config(dir.path(), false));
        let id = PlayerId::new();
        let saved = PlayerState::new(
            LivePlayer::fresh(id, "Alex"),
            Some(StaticWorld::shared("old-nether", Dimension::Nether)),
        );
        provider.save(id, saved).await.unwrap();

        let state = provider.load(id, &overworld).await.unwrap();
        assert_eq!(state.world.unwrap().name(), "old-nether");
        provider.shutdown().await;
    }

    #[tokio::test]
    async fn flush_now_writes_and_empties_the_cache() {
        let dir = tempfile::tempdir().unwrap();
        let provider = build(config(dir.path(), false));
        let id = PlayerId::new();
        provider
            .save(id, PlayerState::new(LivePlayer::fresh(id, "Alex"), None))
            .await
            .unwrap();

        let report = provider.flush_now().await.unwrap();
        assert_eq!(
            report,
            scheduler::FlushReport {
                drained: 1,
                written: 1,
                failed: 0
            }
        );
        assert_eq!(provider.cached_players(), 0);
        assert!(dir.path().join(format!("{id}.json")).exists());
        provider.shutdown().await;
    }

    #[tokio::test]
    async fn flush_with_autosave_only_clears() {
        let dir = tempfile::tempdir().unwrap();
        let provider = build(config(dir.path(), true));
        let id = PlayerId::new();
        provider
            .save(id, PlayerState::new(LivePlayer::fresh(id, "Alex"), None))
            .await
            .unwrap();

        let report = provider.flush_now().await.unwrap();
        assert_eq!(report.drained, 1);
        assert_eq!(report.written, 0);
        assert_eq!(provider.cached_players(), 0);
        provider.shutdown().await;
    }
}
