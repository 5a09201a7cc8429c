//! Continuous watch machinery.
//!
//! A watch bridges the native subscription callbacks into tokio tasks:
//! the native layer enqueues [`EventEnvelope`]s onto two unbounded channels
//! (success and error), and one pump per channel drains them in FIFO order.
//! The [`WatchRegistry`] enforces the at-most-one-active-watch invariant.
//!
//! # Components
//!
//! - [`envelope`] - channel message types
//! - [`registry`] - [`WatchRegistry`] and [`WatchHandle`]
//! - [`pump`] - [`SuccessPump`] and [`ErrorPump`]

mod envelope;
mod pump;
mod registry;

pub use envelope::{ErrorEnvelope, EventEnvelope, SuccessEnvelope};
pub use pump::{ErrorPump, SuccessPump};
pub use registry::{WatchHandle, WatchRegistry};
