//! Error types for the host binary.

use playervault_provider::{ConfigError, ProviderError};

/// Top-level error for the host binary.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// A provider operation failed.
    #[error("provider error: {source}")]
    Provider {
        /// The underlying provider error.
        #[from]
        source: ProviderError,
    },

    /// A reloaded player did not match what was just saved.
    #[error("player {name} changed between save and reload")]
    Mismatch {
        /// The player's name.
        name: String,
    },
}
