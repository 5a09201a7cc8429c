//! Error taxonomy.
//!
//! Two families of conditions exist in this crate and they never mix:
//!
//! - **Propagating errors** ([`TriggerFailure`], [`CallbackError`], carried
//!   by [`PumpError`]) leave the core through pump join handles and the
//!   coordinator's failure broadcast.
//! - **Soft conditions** (duplicate watch, redundant stop, one-shot fetch
//!   failure) surface only through the error-logging collaborator and are
//!   never returned as `Err`.
//!
//! [`SourceError`] is produced by the external position source and becomes
//! one or the other depending on the path it takes (logged on the one-shot
//! path, dispatched or escalated on the watch path).

use serde::{Deserialize, Serialize};

use crate::trigger::TriggerMeta;

/// Category of a native source failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceErrorCode {
    /// The user or platform denied access to the position service.
    PermissionDenied,
    /// The device could not produce a position fix.
    PositionUnavailable,
    /// The source did not produce a position within the configured timeout.
    Timeout,
    /// Any other native-source failure.
    #[default]
    Unknown,
}

/// A failure reported by the external position source.
///
/// Mirrors the platform position error's code/message pair. The message is
/// what reaches user error callbacks and log entries.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct SourceError {
    /// Failure category.
    pub code: SourceErrorCode,
    /// Human-readable message from the source.
    pub message: String,
}

impl SourceError {
    /// Create a source error.
    pub fn new(code: SourceErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Permission to access the position service was denied.
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(SourceErrorCode::PermissionDenied, message)
    }

    /// The device could not produce a position fix.
    pub fn position_unavailable(message: impl Into<String>) -> Self {
        Self::new(SourceErrorCode::PositionUnavailable, message)
    }

    /// The source timed out.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(SourceErrorCode::Timeout, message)
    }
}

/// Fatal escalation raised when a watch error has no registered callback.
///
/// Unlike soft conditions, a trigger failure always propagates: it terminates
/// the error pump and is published on the coordinator's failure broadcast.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct TriggerFailure {
    /// Message of the original source error.
    pub message: String,
    /// Attribution context of the trigger that started the watch.
    pub trigger_meta: TriggerMeta,
}

impl TriggerFailure {
    /// Create a trigger failure from an error message and its attribution.
    pub fn new(message: impl Into<String>, trigger_meta: TriggerMeta) -> Self {
        Self {
            message: message.into(),
            trigger_meta,
        }
    }
}

/// Failure reported by the callback-execution collaborator.
///
/// Semantics belong to the collaborator; this core only carries it outward.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("callback execution failed: {message}")]
pub struct CallbackError {
    /// Collaborator-provided description.
    pub message: String,
}

impl CallbackError {
    /// Create a callback error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Terminal result of a pump task.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PumpError {
    /// An error envelope had no registered callback.
    #[error(transparent)]
    Trigger(#[from] TriggerFailure),
    /// The callback-execution collaborator failed; not caught by this core.
    #[error(transparent)]
    Callback(#[from] CallbackError),
}
