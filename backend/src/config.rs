//! Store configuration.
//!
//! The desk emulates network round trips so the UI can exercise its loading
//! states. Tests build a store with [`StoreConfig::for_tests`] to skip both
//! the delay and the demo roster.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_LATENCY_MS: u64 = 350;
pub const DEFAULT_MENU_LATENCY_MS: u64 = 100;

pub const LATENCY_ENV: &str = "GYM_DESK_LATENCY_MS";
pub const MENU_LATENCY_ENV: &str = "GYM_DESK_MENU_LATENCY_MS";
pub const SEED_DEMO_ENV: &str = "GYM_DESK_SEED_DEMO";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Delay applied before every record operation
    pub latency_ms: u64,
    /// Delay applied before menu lookups
    pub menu_latency_ms: u64,
    /// Start with the demo users, members, collections and expenses
    pub seed_demo_data: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            latency_ms: DEFAULT_LATENCY_MS,
            menu_latency_ms: DEFAULT_MENU_LATENCY_MS,
            seed_demo_data: true,
        }
    }
}

impl StoreConfig {
    /// No latency and an empty store apart from the menu and fixture users
    pub fn for_tests() -> Self {
        Self {
            latency_ms: 0,
            menu_latency_ms: 0,
            seed_demo_data: false,
        }
    }

    /// Defaults overridden by the `GYM_DESK_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(ms) = parse_var(&lookup, LATENCY_ENV) {
            config.latency_ms = ms;
        }
        if let Some(ms) = parse_var(&lookup, MENU_LATENCY_ENV) {
            config.menu_latency_ms = ms;
        }
        if let Some(seed) = parse_var(&lookup, SEED_DEMO_ENV) {
            config.seed_demo_data = seed;
        }

        debug!("Loaded store config: {:?}", config);
        config
    }

    pub fn latency(&self) -> LatencyProfile {
        LatencyProfile {
            standard: Duration::from_millis(self.latency_ms),
            menu: Duration::from_millis(self.menu_latency_ms),
        }
    }
}

fn parse_var<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a valid value", key, raw);
            None
        }
    }
}

/// Which delay an operation waits for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatencyKind {
    Standard,
    Menu,
}

/// Artificial delay inserted before each store operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyProfile {
    pub standard: Duration,
    pub menu: Duration,
}

impl LatencyProfile {
    pub fn none() -> Self {
        Self {
            standard: Duration::ZERO,
            menu: Duration::ZERO,
        }
    }

    pub fn duration(&self, kind: LatencyKind) -> Duration {
        match kind {
            LatencyKind::Standard => self.standard,
            LatencyKind::Menu => self.menu,
        }
    }

    pub async fn pause(&self, kind: LatencyKind) {
        let delay = self.duration(kind);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for LatencyProfile {
    fn default() -> Self {
        StoreConfig::default().latency()
    }
}
