//! Application state shared across handlers.

use std::sync::Arc;

use nestwatch_core::{NestwatchConfig, Storage};
use tokio::sync::RwLock;

/// Shared application state handed to every handler.
///
/// Reads take the read lock; any read-modify-write of a stored document
/// takes the write lock so concurrent mutations serialize.
pub type SharedState = Arc<RwLock<AppState>>;

/// The state behind the lock: configuration plus the document store.
pub struct AppState {
    /// Service configuration.
    pub config: NestwatchConfig,
    /// Per-child document store.
    pub storage: Storage,
}

impl AppState {
    /// Build state from the default config path and data directory.
    pub fn new() -> anyhow::Result<Self> {
        let config = NestwatchConfig::load_or_default(&NestwatchConfig::default_path()?)?;
        let storage = match &config.data_dir {
            Some(dir) => Storage::new(dir.clone()),
            None => Storage::default_location()?,
        };
        Ok(Self { config, storage })
    }

    /// Build state from explicit parts (used by tests).
    #[must_use]
    pub fn with_parts(config: NestwatchConfig, storage: Storage) -> Self {
        Self { config, storage }
    }

    /// Wrap into the shared handle handlers expect.
    #[must_use]
    pub fn into_shared(self) -> SharedState {
        Arc::new(RwLock::new(self))
    }
}
