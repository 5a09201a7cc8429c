//! Shared current-position state.
//!
//! The last known device position is a single shared value with two writers:
//! the success pump (continuous watch) and the one-shot fetch path. Policy is
//! last-write-wins; readers get clones via the pull API, and interested
//! consumers can subscribe to updates via the push API.

use std::sync::RwLock;

use tokio::sync::broadcast;
use tracing::trace;

use super::types::GeoPosition;

/// Default capacity of the position update broadcast channel.
pub const DEFAULT_UPDATE_CAPACITY: usize = 16;

/// Trait for the shared current-position state (pull API).
///
/// `set_current` is fire-and-forget: it never fails and never blocks a task.
pub trait CurrentPositionStore: Send + Sync {
    /// Replace the current position.
    fn set_current(&self, position: GeoPosition);

    /// Get the current position, if one has been published.
    fn current(&self) -> Option<GeoPosition>;
}

/// Default [`CurrentPositionStore`] implementation.
///
/// Combines the locked shared value with a broadcast push API so consumers
/// can react to updates without polling.
pub struct SharedCurrentPosition {
    state: RwLock<Option<GeoPosition>>,
    update_tx: broadcast::Sender<GeoPosition>,
}

impl SharedCurrentPosition {
    /// Create an empty store with the given broadcast capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let (update_tx, _) = broadcast::channel(capacity);
        Self {
            state: RwLock::new(None),
            update_tx,
        }
    }

    /// Subscribe to position updates.
    pub fn subscribe(&self) -> broadcast::Receiver<GeoPosition> {
        self.update_tx.subscribe()
    }
}

impl Default for SharedCurrentPosition {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_UPDATE_CAPACITY)
    }
}

impl CurrentPositionStore for SharedCurrentPosition {
    fn set_current(&self, position: GeoPosition) {
        trace!(
            latitude = position.coords.latitude,
            longitude = position.coords.longitude,
            "Current position updated"
        );
        if let Ok(mut state) = self.state.write() {
            *state = Some(position.clone());
        }
        // No subscribers is fine
        let _ = self.update_tx.send(position);
    }

    fn current(&self) -> Option<GeoPosition> {
        self.state.read().map(|s| s.clone()).unwrap_or_default()
    }
}
