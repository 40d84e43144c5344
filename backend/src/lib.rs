//! # Gym Desk Backend
//!
//! Non-UI logic for the gym desk app: an in-memory mock backend with
//! simulated latency, the staff session cache, and navigation metadata.
//!
//! ```text
//! Screens (dashboard, members, collections, expenses, reports)
//!     ↓
//! Domain (StatsStore, AuthSession, navigation)
//!     ↓
//! Storage (StoreData, key-value session storage)
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod storage;

pub use config::{LatencyProfile, StoreConfig};
pub use domain::{AuthSession, StatsStore};
pub use error::{ErrorKind, StoreError, StoreResult};
pub use storage::{InMemoryKeyValueStore, KeyValueStorage, StoreData};

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber. `RUST_LOG` wins over `default_filter` when set.
pub fn init_tracing(default_filter: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))
}
