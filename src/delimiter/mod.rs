//! Delimiter levels: which gridlines to draw for a given zoom, where they
//! fall on the calendar, and how they are labeled.

pub mod generator;
pub mod label;
pub mod level;
pub mod tracker;

pub use generator::{MAX_DELIMITERS_PER_PASS, fixed_interval_timestamps};
pub use label::{format_label, format_pointer_label, ordinal_suffix};
pub use level::{
    GenerationStrategy, LEVELS, LabelPattern, LevelSpec, level, secondary_level,
    select_primary_level, select_primary_level_in, validate_levels,
};
pub use tracker::{
    DelimiterLevelTracker, LEVEL_TRANSITION_DURATION_MS, LevelCrossfade, LevelIndices,
    LevelTrackerState, LevelTransition,
};
