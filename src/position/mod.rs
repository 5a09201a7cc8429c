//! Device position types, normalization, and shared state.
//!
//! # Components
//!
//! - [`types`] - [`GeoPosition`], [`GeoCoordinates`], [`RawPosition`]
//! - [`normalize`] - projection of a raw platform record to its minimal shape
//! - [`store`] - [`CurrentPositionStore`] trait and the shared default impl

mod normalize;
mod store;
mod types;

pub use normalize::normalize;
pub use store::{CurrentPositionStore, SharedCurrentPosition, DEFAULT_UPDATE_CAPACITY};
pub use types::{GeoCoordinates, GeoPosition, RawPosition};
