//! Singleton watch registry.
//!
//! At most one continuous watch may run per process. The registry is the
//! hard enforcement point for that invariant: it owns the zero-or-one
//! [`WatchHandle`] and gates every state transition behind a mutex, so two
//! concurrent `start` calls on a multi-threaded runtime cannot both observe
//! the idle state.

use std::sync::Mutex;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::PumpError;
use crate::source::NativeWatchId;

/// The single active subscription and everything needed to tear it down.
///
/// Created on a successful activation; destroyed by [`WatchRegistry::deactivate`].
/// Both channels and both pumps live exactly as long as the handle.
#[derive(Debug)]
pub struct WatchHandle {
    /// Native subscription id, owned by the external source.
    pub native_id: NativeWatchId,
    /// Cancellation signal for both pumps. Cancelling discards any
    /// buffered, undrained envelopes.
    pub cancel: CancellationToken,
    /// Task draining the success channel.
    pub success_pump: JoinHandle<Result<(), PumpError>>,
    /// Task draining the error channel.
    pub error_pump: JoinHandle<Result<(), PumpError>>,
}

/// Process-wide tracker of the at-most-one active watch.
#[derive(Debug, Default)]
pub struct WatchRegistry {
    active: Mutex<Option<WatchHandle>>,
}

impl WatchRegistry {
    /// Create an idle registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically transition Idle -> Active.
    ///
    /// Runs `make` under the registry lock only if no watch is active, and
    /// stores the handle it builds. Returns false (without invoking `make`)
    /// when a watch already exists, leaving it untouched. `make` must not
    /// suspend; the callers here only create channels, spawn tasks, and
    /// register native callbacks.
    pub fn activate<F>(&self, make: F) -> bool
    where
        F: FnOnce() -> WatchHandle,
    {
        let mut active = self.active.lock().unwrap_or_else(|e| e.into_inner());
        if active.is_some() {
            return false;
        }
        *active = Some(make());
        true
    }

    /// Atomically transition Active -> Idle, yielding the stored handle.
    ///
    /// Returns `None` when no watch is active.
    pub fn deactivate(&self) -> Option<WatchHandle> {
        self.active
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
    }

    /// Whether a watch is currently active.
    pub fn is_active(&self) -> bool {
        self.active
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_handle(id: u64) -> WatchHandle {
        WatchHandle {
            native_id: NativeWatchId(id),
            cancel: CancellationToken::new(),
            success_pump: tokio::spawn(async { Ok::<(), PumpError>(()) }),
            error_pump: tokio::spawn(async { Ok::<(), PumpError>(()) }),
        }
    }

    #[tokio::test]
    async fn test_registry_starts_idle() {
        let registry = WatchRegistry::new();
        assert!(!registry.is_active());
        assert!(registry.deactivate().is_none());
    }

    #[tokio::test]
    async fn test_activate_stores_single_handle() {
        let registry = WatchRegistry::new();
        assert!(registry.activate(|| dummy_handle(1)));
        assert!(registry.is_active());
    }

    #[tokio::test]
    async fn test_second_activation_rejected_without_building() {
        let registry = WatchRegistry::new();
        assert!(registry.activate(|| dummy_handle(1)));

        let mut built = false;
        let accepted = registry.activate(|| {
            built = true;
            dummy_handle(2)
        });
        assert!(!accepted);
        assert!(!built, "Constructor must not run when a watch is active");

        // Original handle untouched
        let handle = registry.deactivate().expect("Should hold first handle");
        assert_eq!(handle.native_id, NativeWatchId(1));
    }

    #[tokio::test]
    async fn test_deactivate_returns_to_idle() {
        let registry = WatchRegistry::new();
        registry.activate(|| dummy_handle(1));

        let handle = registry.deactivate();
        assert!(handle.is_some());
        assert!(!registry.is_active());
        assert!(registry.deactivate().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_activation_admits_exactly_one() {
        use std::sync::Arc;

        let registry = Arc::new(WatchRegistry::new());
        let mut joins = Vec::new();
        for id in 0..8u64 {
            let registry = Arc::clone(&registry);
            joins.push(tokio::spawn(async move {
                registry.activate(move || dummy_handle(id))
            }));
        }

        let mut accepted = 0;
        for join in joins {
            if join.await.unwrap() {
                accepted += 1;
            }
        }
        assert_eq!(accepted, 1);
        assert!(registry.is_active());
    }
}
