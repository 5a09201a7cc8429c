//! Location watch coordination.
//!
//! [`LocationWatchCoordinator`] is the orchestration point between the
//! external position source and everything downstream: it performs one-shot
//! fetches, starts and stops the single continuous watch, and wires the
//! source's native callbacks to the watch channels the pumps drain.
//!
//! # Soft conditions
//!
//! A redundant `start` (watch already active) and a redundant `stop` (no
//! watch active) are logged through the error sink and otherwise have no
//! effect. `fetch_once` swallows source failures the same way: it logs once
//! and returns `None`. None of these surface as `Err` or panics.
//!
//! # Failure propagation
//!
//! Only trigger failures escalated by the error pump and collaborator
//! failures from callback execution leave this core; the former are
//! observable via [`subscribe_failures`], the latter through the pump join
//! handles reaped in [`stop`].
//!
//! [`subscribe_failures`]: LocationWatchCoordinator::subscribe_failures
//! [`stop`]: LocationWatchCoordinator::stop

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::callback::{CallbackExecutor, ExecutionErrorSink};
use crate::config::{CoordinatorConfig, PositionOptions};
use crate::error::{SourceError, TriggerFailure};
use crate::position::{normalize, CurrentPositionStore, GeoPosition, RawPosition};
use crate::source::ExternalPositionSource;
use crate::trigger::{CallbackDescriptor, EventType, TriggerMeta};
use crate::watch::{
    ErrorEnvelope, ErrorPump, SuccessEnvelope, SuccessPump, WatchHandle, WatchRegistry,
};

const DUPLICATE_WATCH_MESSAGE: &str =
    "A location watch is already active. Clear it before starting a new one";
const NO_ACTIVE_WATCH_MESSAGE: &str = "No location watch active";

/// Everything a continuous watch is started with.
#[derive(Debug, Clone)]
pub struct WatchRequest {
    /// Options passed through to the source.
    pub options: PositionOptions,
    /// Callback to run for each delivered position, if any.
    pub on_success: Option<CallbackDescriptor>,
    /// Callback to run for each delivered error, if any. When absent,
    /// errors escalate as trigger failures.
    pub on_error: Option<CallbackDescriptor>,
    /// Event type threaded into every callback invocation.
    pub event_type: EventType,
    /// Attribution of the trigger starting the watch.
    pub trigger_meta: TriggerMeta,
}

impl WatchRequest {
    /// Create a request with no callbacks wired.
    pub fn new(event_type: EventType, trigger_meta: TriggerMeta) -> Self {
        Self {
            options: PositionOptions::default(),
            on_success: None,
            on_error: None,
            event_type,
            trigger_meta,
        }
    }

    /// Set the pass-through source options.
    pub fn with_options(mut self, options: PositionOptions) -> Self {
        self.options = options;
        self
    }

    /// Wire the success callback.
    pub fn on_success(mut self, descriptor: CallbackDescriptor) -> Self {
        self.on_success = Some(descriptor);
        self
    }

    /// Wire the error callback.
    pub fn on_error(mut self, descriptor: CallbackDescriptor) -> Self {
        self.on_error = Some(descriptor);
        self
    }
}

/// Orchestrates one-shot fetches and the single continuous position watch.
pub struct LocationWatchCoordinator {
    source: Arc<dyn ExternalPositionSource>,
    executor: Arc<dyn CallbackExecutor>,
    store: Arc<dyn CurrentPositionStore>,
    error_sink: Arc<dyn ExecutionErrorSink>,
    registry: WatchRegistry,
    failure_tx: broadcast::Sender<TriggerFailure>,
}

impl LocationWatchCoordinator {
    /// Create a coordinator with default configuration.
    pub fn new(
        source: Arc<dyn ExternalPositionSource>,
        executor: Arc<dyn CallbackExecutor>,
        store: Arc<dyn CurrentPositionStore>,
        error_sink: Arc<dyn ExecutionErrorSink>,
    ) -> Self {
        Self::with_config(source, executor, store, error_sink, CoordinatorConfig::default())
    }

    /// Create a coordinator with custom configuration.
    pub fn with_config(
        source: Arc<dyn ExternalPositionSource>,
        executor: Arc<dyn CallbackExecutor>,
        store: Arc<dyn CurrentPositionStore>,
        error_sink: Arc<dyn ExecutionErrorSink>,
        config: CoordinatorConfig,
    ) -> Self {
        let (failure_tx, _) = broadcast::channel(config.failure_channel_capacity);
        Self {
            source,
            executor,
            store,
            error_sink,
            registry: WatchRegistry::new(),
            failure_tx,
        }
    }

    /// Acquire a single position fix.
    ///
    /// On success the normalized position is published to the shared store
    /// and returned. On source failure the error is logged once through the
    /// sink and `None` is returned - absence of a value is the only failure
    /// signal at this boundary.
    pub async fn fetch_once(
        &self,
        options: &PositionOptions,
        trigger_meta: &TriggerMeta,
    ) -> Option<GeoPosition> {
        match self.source.fetch_once(options).await {
            Ok(raw) => {
                let position = normalize(&raw);
                self.store.set_current(position.clone());
                Some(position)
            }
            Err(err) => {
                self.error_sink.log_execution_error(&err.message, trigger_meta);
                None
            }
        }
    }

    /// Start the continuous watch.
    ///
    /// If a watch is already active, logs the duplicate condition and leaves
    /// the existing subscription, channels, and pumps untouched. Otherwise
    /// creates both channels, spawns both pumps, and subscribes to the
    /// source. Must be called within a tokio runtime.
    pub fn start(&self, request: WatchRequest) {
        let trigger_meta = request.trigger_meta.clone();

        let activated = self.registry.activate(|| self.build_watch(request));
        if activated {
            info!("Location watch started");
        } else {
            self.error_sink
                .log_execution_error(DUPLICATE_WATCH_MESSAGE, &trigger_meta);
        }
    }

    /// Stop the continuous watch.
    ///
    /// If no watch is active, logs the condition and does nothing else.
    /// Otherwise unsubscribes from the source, cancels both pumps (buffered,
    /// undrained envelopes are discarded), and waits for the pump tasks to
    /// finish.
    pub async fn stop(&self, trigger_meta: &TriggerMeta) {
        let Some(handle) = self.registry.deactivate() else {
            self.error_sink
                .log_execution_error(NO_ACTIVE_WATCH_MESSAGE, trigger_meta);
            return;
        };

        self.source.unsubscribe(handle.native_id);
        handle.cancel.cancel();

        match handle.success_pump.await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => debug!(error = %err, "Success pump had terminated with error"),
            Err(err) => debug!(error = %err, "Success pump task did not finish cleanly"),
        }
        match handle.error_pump.await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => debug!(error = %err, "Error pump had terminated with error"),
            Err(err) => debug!(error = %err, "Error pump task did not finish cleanly"),
        }

        info!(native_id = %handle.native_id, "Location watch stopped");
    }

    /// Whether a continuous watch is currently active.
    pub fn is_watching(&self) -> bool {
        self.registry.is_active()
    }

    /// Subscribe to trigger failures escalated by the error pump.
    pub fn subscribe_failures(&self) -> broadcast::Receiver<TriggerFailure> {
        self.failure_tx.subscribe()
    }

    /// Wire channels, pumps, and native callbacks for a new watch.
    ///
    /// Runs under the registry lock; nothing here suspends.
    fn build_watch(&self, request: WatchRequest) -> WatchHandle {
        let (success_tx, success_rx) = mpsc::unbounded_channel::<SuccessEnvelope>();
        let (error_tx, error_rx) = mpsc::unbounded_channel::<ErrorEnvelope>();
        let cancel = CancellationToken::new();

        let success_pump = SuccessPump::new(
            success_rx,
            cancel.clone(),
            Arc::clone(&self.store),
            Arc::clone(&self.executor),
        )
        .start();
        let error_pump = ErrorPump::new(
            error_rx,
            cancel.clone(),
            Arc::clone(&self.executor),
            self.failure_tx.clone(),
        )
        .start();

        let WatchRequest {
            options,
            on_success,
            on_error,
            event_type,
            trigger_meta,
        } = request;

        let success_event = event_type.clone();
        let success_meta = trigger_meta.clone();
        let native_on_success = Box::new(move |raw: RawPosition| {
            // Send fails only once the watch is stopped; late native
            // deliveries are dropped unprocessed.
            let _ = success_tx.send(SuccessEnvelope {
                payload: raw,
                callback: on_success.clone(),
                event_type: success_event.clone(),
                trigger_meta: success_meta.clone(),
            });
        });
        let native_on_error = Box::new(move |err: SourceError| {
            let _ = error_tx.send(ErrorEnvelope {
                payload: err,
                callback: on_error.clone(),
                event_type: event_type.clone(),
                trigger_meta: trigger_meta.clone(),
            });
        });

        let native_id = self
            .source
            .subscribe(&options, native_on_success, native_on_error);
        debug!(%native_id, "Subscribed to position source");

        WatchHandle {
            native_id,
            cancel,
            success_pump,
            error_pump,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;

    use crate::callback::CallbackInvocation;
    use crate::error::CallbackError;
    use crate::error::SourceErrorCode;
    use crate::position::{GeoCoordinates, SharedCurrentPosition};
    use crate::source::{NativeWatchId, PositionCallback, PositionErrorCallback};

    /// Source stub: one-shot result is scripted, subscriptions are counted.
    struct StubSource {
        fetch_result: Mutex<Option<Result<RawPosition, SourceError>>>,
        subscriptions: AtomicU64,
        unsubscriptions: AtomicU64,
    }

    impl StubSource {
        fn with_fetch(result: Result<RawPosition, SourceError>) -> Self {
            Self {
                fetch_result: Mutex::new(Some(result)),
                subscriptions: AtomicU64::new(0),
                unsubscriptions: AtomicU64::new(0),
            }
        }

        fn idle() -> Self {
            Self::with_fetch(Err(SourceError::position_unavailable("not scripted")))
        }
    }

    #[async_trait]
    impl ExternalPositionSource for StubSource {
        async fn fetch_once(
            &self,
            _options: &PositionOptions,
        ) -> Result<RawPosition, SourceError> {
            self.fetch_result
                .lock()
                .unwrap()
                .take()
                .expect("fetch_once called more than once")
        }

        fn subscribe(
            &self,
            _options: &PositionOptions,
            _on_success: PositionCallback,
            _on_error: PositionErrorCallback,
        ) -> NativeWatchId {
            NativeWatchId(self.subscriptions.fetch_add(1, Ordering::SeqCst) + 1)
        }

        fn unsubscribe(&self, _id: NativeWatchId) {
            self.unsubscriptions.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[derive(Default)]
    struct NoopExecutor;

    #[async_trait]
    impl CallbackExecutor for NoopExecutor {
        async fn execute(&self, _invocation: CallbackInvocation) -> Result<(), CallbackError> {
            Ok(())
        }
    }

    /// Sink that records every soft condition.
    #[derive(Default)]
    struct RecordingSink {
        entries: Mutex<Vec<(String, TriggerMeta)>>,
    }

    impl RecordingSink {
        fn messages(&self) -> Vec<String> {
            self.entries
                .lock()
                .unwrap()
                .iter()
                .map(|(m, _)| m.clone())
                .collect()
        }
    }

    impl ExecutionErrorSink for RecordingSink {
        fn log_execution_error(&self, message: &str, trigger_meta: &TriggerMeta) {
            self.entries
                .lock()
                .unwrap()
                .push((message.to_string(), trigger_meta.clone()));
        }
    }

    struct Harness {
        coordinator: LocationWatchCoordinator,
        source: Arc<StubSource>,
        store: Arc<SharedCurrentPosition>,
        sink: Arc<RecordingSink>,
    }

    fn harness(source: StubSource) -> Harness {
        let source = Arc::new(source);
        let store = Arc::new(SharedCurrentPosition::default());
        let sink = Arc::new(RecordingSink::default());
        let coordinator = LocationWatchCoordinator::new(
            Arc::clone(&source) as Arc<dyn ExternalPositionSource>,
            Arc::new(NoopExecutor),
            Arc::clone(&store) as Arc<dyn CurrentPositionStore>,
            Arc::clone(&sink) as Arc<dyn ExecutionErrorSink>,
        );
        Harness {
            coordinator,
            source,
            store,
            sink,
        }
    }

    fn watch_request() -> WatchRequest {
        WatchRequest::new(
            EventType::new("GEOLOCATION_WATCH"),
            TriggerMeta::for_property("onWatch"),
        )
    }

    #[tokio::test]
    async fn test_fetch_once_success_publishes_and_returns() {
        let raw = RawPosition::new(GeoCoordinates::new(1.0, 2.0), 1000);
        let h = harness(StubSource::with_fetch(Ok(raw)));

        let position = h
            .coordinator
            .fetch_once(&PositionOptions::default(), &TriggerMeta::default())
            .await
            .expect("Fetch should succeed");

        assert_eq!(position.coords.latitude, 1.0);
        assert_eq!(h.store.current(), Some(position));
        assert!(h.sink.messages().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_once_failure_logs_and_returns_none() {
        let h = harness(StubSource::with_fetch(Err(SourceError::new(
            SourceErrorCode::Timeout,
            "timed out",
        ))));

        let position = h
            .coordinator
            .fetch_once(
                &PositionOptions::default(),
                &TriggerMeta::for_property("onFetch"),
            )
            .await;

        assert!(position.is_none());
        assert!(h.store.current().is_none());
        assert_eq!(h.sink.messages(), vec!["timed out".to_string()]);
    }

    #[tokio::test]
    async fn test_duplicate_start_logs_and_keeps_original() {
        let h = harness(StubSource::idle());

        h.coordinator.start(watch_request());
        h.coordinator.start(watch_request());

        assert!(h.coordinator.is_watching());
        assert_eq!(h.source.subscriptions.load(Ordering::SeqCst), 1);
        assert_eq!(h.sink.messages(), vec![DUPLICATE_WATCH_MESSAGE.to_string()]);

        h.coordinator.stop(&TriggerMeta::default()).await;
    }

    #[tokio::test]
    async fn test_stop_without_watch_logs_only() {
        let h = harness(StubSource::idle());

        h.coordinator.stop(&TriggerMeta::for_property("onStop")).await;

        assert!(!h.coordinator.is_watching());
        assert_eq!(h.source.unsubscriptions.load(Ordering::SeqCst), 0);
        assert_eq!(h.sink.messages(), vec![NO_ACTIVE_WATCH_MESSAGE.to_string()]);
    }

    #[tokio::test]
    async fn test_start_stop_cycle_unsubscribes() {
        let h = harness(StubSource::idle());

        h.coordinator.start(watch_request());
        assert!(h.coordinator.is_watching());

        h.coordinator.stop(&TriggerMeta::default()).await;
        assert!(!h.coordinator.is_watching());
        assert_eq!(h.source.unsubscriptions.load(Ordering::SeqCst), 1);

        // A fresh start is accepted again after stop.
        h.coordinator.start(watch_request());
        assert!(h.coordinator.is_watching());
        assert_eq!(h.source.subscriptions.load(Ordering::SeqCst), 2);
        h.coordinator.stop(&TriggerMeta::default()).await;
    }
}
