use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};

/// Milliseconds since the Unix epoch.
pub type EpochMillis = i64;

pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// Shortest window the navigator will zoom into.
pub const MIN_LENGTH_MS: f64 = 100.0;

/// Longest window the navigator will zoom out to (100 years of 365 days).
pub const MAX_LENGTH_MS: f64 = 100.0 * 365.0 * 86_400_000.0;

/// Visible `[start, end)` range in epoch milliseconds.
///
/// Bounds are fractional so the anchored zoom stays exact even when the
/// window is only a few hundred milliseconds wide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: f64,
    pub end: f64,
}

impl TimeWindow {
    pub fn new(start: f64, end: f64) -> TimelineResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(TimelineError::InvalidData(
                "window bounds must be finite".to_owned(),
            ));
        }
        if start >= end {
            return Err(TimelineError::InvalidData(
                "window start must be before window end".to_owned(),
            ));
        }
        Ok(Self { start, end })
    }

    /// Window of `half_width_ms` on each side of `center`.
    pub fn centered_on(center: EpochMillis, half_width_ms: i64) -> TimelineResult<Self> {
        Self::new(
            (center - half_width_ms) as f64,
            (center + half_width_ms) as f64,
        )
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.end - self.start
    }

    /// Component-wise blend of two windows, `phase = 0` is `self`.
    #[must_use]
    pub fn lerp(self, target: Self, phase: f64) -> Self {
        Self {
            start: self.start * (1.0 - phase) + target.start * phase,
            end: self.end * (1.0 - phase) + target.end * phase,
        }
    }

    /// Integer bounds covering the window, for delimiter enumeration.
    #[must_use]
    pub fn millis_bounds(self) -> (EpochMillis, EpochMillis) {
        (self.start.floor() as i64, self.end.ceil() as i64)
    }
}
