//! Event envelopes carried on the watch channels.

use crate::error::SourceError;
use crate::position::RawPosition;
use crate::trigger::{CallbackDescriptor, EventType, TriggerMeta};

/// A transient message on one of the watch channels.
///
/// Constructed inside the native callbacks and consumed by exactly one pump.
/// The trigger meta and event type are opaque context threaded through
/// unchanged for attribution.
#[derive(Debug, Clone, PartialEq)]
pub struct EventEnvelope<P> {
    /// Raw position (success channel) or source error (error channel).
    pub payload: P,
    /// Callback registered for this event class, if any.
    pub callback: Option<CallbackDescriptor>,
    /// Event type the watch was started under.
    pub event_type: EventType,
    /// Attribution of the trigger that started the watch.
    pub trigger_meta: TriggerMeta,
}

/// Envelope carried on the success channel.
pub type SuccessEnvelope = EventEnvelope<RawPosition>;

/// Envelope carried on the error channel.
pub type ErrorEnvelope = EventEnvelope<SourceError>;
