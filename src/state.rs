//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the SQLite pool, the latest raw scale reading written by the
//! scale task, and the broadcast channel that feeds `/ws/updates`.

use sqlx::SqlitePool;
use tokio::sync::broadcast;
use tracing::debug;

use crate::config::Config;
use crate::services::scale::LatestReading;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    /// Last reading received from the scale, if any.
    pub scale: LatestReading,
    /// Weight recorded when the scale has produced no usable reading.
    pub fallback_weight: f64,
    /// Text updates pushed to every websocket subscriber.
    pub updates: broadcast::Sender<String>,
}

impl AppState {
    #[must_use]
    pub fn new(pool: SqlitePool, config: &Config) -> Self {
        let (updates, _) = broadcast::channel(config.updates_capacity.max(1));
        Self { pool, scale: LatestReading::new(), fallback_weight: config.scale_fallback_weight, updates }
    }

    /// Push a text update to all connected websocket clients.
    pub fn publish(&self, message: String) {
        if let Err(e) = self.updates.send(message) {
            debug!(message = %e.0, "no update subscribers");
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
