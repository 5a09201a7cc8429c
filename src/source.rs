//! External position source seam.
//!
//! The platform position service runs outside the tokio scheduler and speaks
//! in caller-supplied callbacks. This module defines the trait this crate
//! consumes; implementations wrap whatever native service the host embeds.

use async_trait::async_trait;

use crate::config::PositionOptions;
use crate::error::SourceError;
use crate::position::RawPosition;

/// Opaque identifier of a native subscription, owned by the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeWatchId(pub u64);

impl std::fmt::Display for NativeWatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Native success callback handed to [`ExternalPositionSource::subscribe`].
///
/// Invoked from the native layer, so it must not block or suspend; this crate
/// only ever enqueues from it.
pub type PositionCallback = Box<dyn Fn(RawPosition) + Send + Sync>;

/// Native error callback handed to [`ExternalPositionSource::subscribe`].
pub type PositionErrorCallback = Box<dyn Fn(SourceError) + Send + Sync>;

/// A device position service with one-shot and continuous acquisition.
#[async_trait]
pub trait ExternalPositionSource: Send + Sync {
    /// Acquire a single position fix.
    ///
    /// Resolves exactly once, with either a raw position or a source error.
    /// `options` passes through uninterpreted.
    async fn fetch_once(&self, options: &PositionOptions) -> Result<RawPosition, SourceError>;

    /// Start continuous position delivery.
    ///
    /// The callbacks may each be invoked zero or more times, from the native
    /// layer, until [`unsubscribe`] is called with the returned id. This call
    /// itself cannot fail; setup failures surface later through `on_error`.
    ///
    /// [`unsubscribe`]: ExternalPositionSource::unsubscribe
    fn subscribe(
        &self,
        options: &PositionOptions,
        on_success: PositionCallback,
        on_error: PositionErrorCallback,
    ) -> NativeWatchId;

    /// Stop continuous delivery for the given subscription.
    ///
    /// After this returns, the source drops both callbacks and delivers
    /// nothing further for the id.
    fn unsubscribe(&self, id: NativeWatchId);
}
