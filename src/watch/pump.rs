//! Event pumps.
//!
//! One long-lived task per watch channel, spawned once per watch lifetime.
//! Each pump loops on a cancellation-first `select!`: it drains its channel
//! in FIFO order and terminates when the channel is closed and empty or when
//! the watch is stopped. Stopping discards buffered, undrained envelopes -
//! nothing a pump has not yet received is processed after `stop`.
//!
//! The success pump publishes every position to shared state whether or not
//! a callback is wired; the error pump escalates any error nobody listens
//! to. That asymmetry is deliberate: an unobserved success is harmless, an
//! unobserved error is not.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::callback::{CallbackData, CallbackExecutor, CallbackInvocation};
use crate::error::{PumpError, TriggerFailure};
use crate::position::{normalize, CurrentPositionStore};

use super::envelope::{ErrorEnvelope, SuccessEnvelope};

/// Drains the success channel of the active watch.
pub struct SuccessPump {
    rx: mpsc::UnboundedReceiver<SuccessEnvelope>,
    cancel: CancellationToken,
    store: Arc<dyn CurrentPositionStore>,
    executor: Arc<dyn CallbackExecutor>,
}

impl SuccessPump {
    /// Create a pump bound to the given channel and collaborators.
    pub fn new(
        rx: mpsc::UnboundedReceiver<SuccessEnvelope>,
        cancel: CancellationToken,
        store: Arc<dyn CurrentPositionStore>,
        executor: Arc<dyn CallbackExecutor>,
    ) -> Self {
        Self {
            rx,
            cancel,
            store,
            executor,
        }
    }

    /// Spawn the pump task.
    pub fn start(self) -> JoinHandle<Result<(), PumpError>> {
        tokio::spawn(self.run())
    }

    async fn run(mut self) -> Result<(), PumpError> {
        debug!("Success pump started");
        loop {
            tokio::select! {
                biased;

                _ = self.cancel.cancelled() => {
                    debug!("Success pump cancelled, discarding buffered envelopes");
                    break;
                }

                envelope = self.rx.recv() => match envelope {
                    Some(envelope) => self.process(envelope).await?,
                    None => {
                        debug!("Success channel closed, success pump stopping");
                        break;
                    }
                }
            }
        }
        Ok(())
    }

    async fn process(&self, envelope: SuccessEnvelope) -> Result<(), PumpError> {
        let position = normalize(&envelope.payload);
        trace!(
            latitude = position.coords.latitude,
            longitude = position.coords.longitude,
            "Watch delivered position"
        );

        // Last-known-position tracking is independent of callback wiring.
        self.store.set_current(position.clone());

        if let Some(descriptor) = envelope.callback {
            // Executor failures are the collaborator's contract; not caught here.
            self.executor
                .execute(CallbackInvocation {
                    descriptor,
                    data: CallbackData::Position(position),
                    event_type: envelope.event_type,
                    trigger_meta: envelope.trigger_meta,
                })
                .await?;
        }
        Ok(())
    }
}

/// Drains the error channel of the active watch.
pub struct ErrorPump {
    rx: mpsc::UnboundedReceiver<ErrorEnvelope>,
    cancel: CancellationToken,
    executor: Arc<dyn CallbackExecutor>,
    failure_tx: broadcast::Sender<TriggerFailure>,
}

impl ErrorPump {
    /// Create a pump bound to the given channel and collaborators.
    pub fn new(
        rx: mpsc::UnboundedReceiver<ErrorEnvelope>,
        cancel: CancellationToken,
        executor: Arc<dyn CallbackExecutor>,
        failure_tx: broadcast::Sender<TriggerFailure>,
    ) -> Self {
        Self {
            rx,
            cancel,
            executor,
            failure_tx,
        }
    }

    /// Spawn the pump task.
    pub fn start(self) -> JoinHandle<Result<(), PumpError>> {
        tokio::spawn(self.run())
    }

    async fn run(mut self) -> Result<(), PumpError> {
        debug!("Error pump started");
        loop {
            tokio::select! {
                biased;

                _ = self.cancel.cancelled() => {
                    debug!("Error pump cancelled, discarding buffered envelopes");
                    break;
                }

                envelope = self.rx.recv() => match envelope {
                    Some(envelope) => self.process(envelope).await?,
                    None => {
                        debug!("Error channel closed, error pump stopping");
                        break;
                    }
                }
            }
        }
        Ok(())
    }

    async fn process(&self, envelope: ErrorEnvelope) -> Result<(), PumpError> {
        match envelope.callback {
            Some(descriptor) => {
                trace!(
                    code = ?envelope.payload.code,
                    "Dispatching watch error to registered callback"
                );
                self.executor
                    .execute(CallbackInvocation {
                        descriptor,
                        data: CallbackData::SourceError(envelope.payload),
                        event_type: envelope.event_type,
                        trigger_meta: envelope.trigger_meta,
                    })
                    .await?;
                Ok(())
            }
            None => {
                // No callback registered: an unhandled watch error must not
                // be silently dropped.
                let failure =
                    TriggerFailure::new(envelope.payload.message, envelope.trigger_meta);
                let _ = self.failure_tx.send(failure.clone());
                Err(failure.into())
            }
        }
    }
}
