//! timeaxis-rs: calendar time-axis layout engine.
//!
//! Given a time domain and a pixel budget, the engine picks which calendar
//! granularities (seconds … years) to show in up to three rows, abbreviates
//! labels so they fit, deduplicates hash marks across rows and subsamples the
//! outermost row. Drawing goes through a swappable [`render::RenderSurface`].

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;
pub mod text;

pub use api::{TimeAxis, TimeAxisConfig, TimeAxisProps};
pub use error::{AxisError, AxisResult};
