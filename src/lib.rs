//! timeline-axis: a zoomable time-axis model.
//!
//! The crate maps between pixels and timestamps with eased, pointer-anchored
//! zoom, and picks calendar-aware gridlines ("delimiters") for spans from
//! seconds to centuries. Drawing, windowing and input dispatch stay with the
//! host; it drives the model with an explicit `now` on every call.

pub mod api;
pub mod core;
pub mod delimiter;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{TimelineEngine, TimelineEngineConfig};
pub use error::{TimelineError, TimelineResult};
