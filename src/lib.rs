//! geowatch - bridges a callback-driven device position service into tokio
//! tasks, fanning delivered events out to user-defined callback actions while
//! maintaining shared last-known-position state.
//!
//! The host supplies the collaborators - a position source, a callback
//! executor, an error sink - and the [`LocationWatchCoordinator`] does the
//! rest: one-shot fetches, the single continuous watch, and the
//! channel-and-pump plumbing between the native callbacks and the async
//! world.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use geowatch::{
//!     CallbackDescriptor, EventType, LocationWatchCoordinator, PositionOptions,
//!     SharedCurrentPosition, TracingErrorSink, TriggerMeta, WatchRequest,
//! };
//!
//! let store = Arc::new(SharedCurrentPosition::default());
//! let coordinator = LocationWatchCoordinator::new(source, executor, store.clone(), Arc::new(TracingErrorSink));
//!
//! // One-shot fetch: None is the only failure signal.
//! let position = coordinator.fetch_once(&PositionOptions::high_accuracy(), &TriggerMeta::default()).await;
//!
//! // Continuous watch with a success callback.
//! coordinator.start(
//!     WatchRequest::new(EventType::new("GEOLOCATION_WATCH"), TriggerMeta::default())
//!         .on_success(CallbackDescriptor::new("{{ setPosition(location) }}")),
//! );
//! // ... later
//! coordinator.stop(&TriggerMeta::default()).await;
//! ```

pub mod callback;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod logging;
pub mod position;
pub mod source;
pub mod trigger;
pub mod watch;

pub use callback::{
    CallbackData, CallbackExecutor, CallbackInvocation, ExecutionErrorSink, TracingErrorSink,
};
pub use config::{CoordinatorConfig, PositionOptions};
pub use coordinator::{LocationWatchCoordinator, WatchRequest};
pub use error::{CallbackError, PumpError, SourceError, SourceErrorCode, TriggerFailure};
pub use position::{
    normalize, CurrentPositionStore, GeoCoordinates, GeoPosition, RawPosition,
    SharedCurrentPosition,
};
pub use source::{ExternalPositionSource, NativeWatchId, PositionCallback, PositionErrorCallback};
pub use trigger::{CallbackDescriptor, EventType, TriggerMeta, TriggerSource};

/// Version of the geowatch library.
///
/// Defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
