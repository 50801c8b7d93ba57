mod engine;
mod engine_config;

pub use engine::{TickOutcome, TimelineEngine, tick_interval};
pub use engine_config::TimelineEngineConfig;
