//! Core data types, normalization, and risk classification for Weather Meister
//!
//! This crate turns a loosely-shaped upstream payload into a canonical
//! [`WeatherMetrics`] record and grades it against amber/red thresholds.
//! Nothing in here performs I/O.

pub mod clock;
pub mod format;
pub mod normalize;
pub mod pipeline;
pub mod risk;
pub mod types;

pub use clock::*;
pub use format::*;
pub use normalize::*;
pub use pipeline::*;
pub use risk::*;
pub use types::*;
