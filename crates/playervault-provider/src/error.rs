//! Error types for the persistence provider.
//!
//! [`StoreError`] covers the file store. [`ProviderError`] is what the
//! provider's public operations return; it keeps the store error intact so
//! the host can tell a first join ([`StoreError::NotFound`]) apart from a
//! real failure via [`ProviderError::is_not_found`].

use std::path::PathBuf;

use playervault_types::PlayerId;

use crate::config::ConfigError;

/// Errors raised by the file store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No document exists for this player. Expected on first join.
    #[error("no saved data for player {id}")]
    NotFound {
        /// The player looked up.
        id: PlayerId,
    },

    /// The document exists but is not a valid player record.
    #[error("player data for {id} is not a valid record: {source}")]
    Decode {
        /// The player whose document failed to decode.
        id: PlayerId,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// The record could not be serialized.
    #[error("failed to encode player data for {id}: {source}")]
    Encode {
        /// The player whose record failed to encode.
        id: PlayerId,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// A filesystem operation failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The file or directory involved.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors returned by [`crate::Provider`] operations.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The file store failed, or found nothing.
    #[error("store error: {source}")]
    Store {
        /// The underlying store error.
        #[from]
        source: StoreError,
    },

    /// The configuration is invalid.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// The provider has been closed.
    #[error("provider is closed")]
    Closed,

    /// The provider was built outside a Tokio runtime, so the flush
    /// scheduler could not be started.
    #[error("provider must be built inside a Tokio runtime")]
    NoRuntime,
}

impl ProviderError {
    /// Whether this is the first-join condition: no saved data and nothing
    /// cached for the player.
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Store {
                source: StoreError::NotFound { .. }
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_distinguishable() {
        let err = ProviderError::from(StoreError::NotFound { id: PlayerId::nil() });
        assert!(err.is_not_found());

        let io = ProviderError::from(StoreError::Io {
            path: PathBuf::from("x.json"),
            source: std::io::Error::other("disk on fire"),
        });
        assert!(!io.is_not_found());
        assert!(!ProviderError::Closed.is_not_found());
    }

    #[test]
    fn messages_name_the_player() {
        let id = PlayerId::new();
        let err = StoreError::NotFound { id };
        assert!(err.to_string().contains(&id.to_string()));
    }
}
