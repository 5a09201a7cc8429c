//! Callback-execution and error-logging collaborator seams.
//!
//! User-authored callback logic lives outside this crate; the pumps and the
//! coordinator only decide *when* to invoke it and with what data. Likewise,
//! soft conditions are reported through a diagnostic sink rather than raised.

use async_trait::async_trait;
use tracing::error;

use crate::error::{CallbackError, SourceError};
use crate::position::GeoPosition;
use crate::trigger::{CallbackDescriptor, EventType, TriggerMeta};

/// The single data argument a callback invocation carries.
#[derive(Debug, Clone, PartialEq)]
pub enum CallbackData {
    /// A normalized position (success path).
    Position(GeoPosition),
    /// The raw source error (error path).
    SourceError(SourceError),
}

/// A request to run user-authored callback logic.
#[derive(Debug, Clone, PartialEq)]
pub struct CallbackInvocation {
    /// Which user logic to run.
    pub descriptor: CallbackDescriptor,
    /// The sole data argument.
    pub data: CallbackData,
    /// Event type the callback runs under.
    pub event_type: EventType,
    /// Attribution for error reporting.
    pub trigger_meta: TriggerMeta,
}

/// Executes user-authored callback logic (push seam to the host).
///
/// Failure semantics belong to the implementation; this core never catches
/// the errors it returns.
#[async_trait]
pub trait CallbackExecutor: Send + Sync {
    /// Run the described callback with its data argument.
    async fn execute(&self, invocation: CallbackInvocation) -> Result<(), CallbackError>;
}

/// Diagnostic sink for soft conditions.
///
/// Fire-and-forget: implementations never fail and never block. Soft
/// conditions reach developers only through this sink, never as errors.
pub trait ExecutionErrorSink: Send + Sync {
    /// Record an execution error with its trigger attribution.
    fn log_execution_error(&self, message: &str, trigger_meta: &TriggerMeta);
}

/// Default [`ExecutionErrorSink`] that writes structured tracing events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingErrorSink;

impl ExecutionErrorSink for TracingErrorSink {
    fn log_execution_error(&self, message: &str, trigger_meta: &TriggerMeta) {
        error!(
            source = trigger_meta.source.as_ref().map(|s| s.name.as_str()),
            trigger_property = trigger_meta.trigger_property_name.as_deref(),
            "{message}"
        );
    }
}
