use tracing::{debug, trace};

use super::level::{secondary_level, select_primary_level};
use crate::core::{EpochMillis, transition_phase};
use crate::error::{TimelineError, TimelineResult};

pub const LEVEL_TRANSITION_DURATION_MS: i64 = 150;

/// Primary level and the denser secondary level drawn beneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelIndices {
    pub primary: usize,
    pub secondary: Option<usize>,
}

impl LevelIndices {
    #[must_use]
    pub fn for_primary(primary: usize) -> Self {
        Self {
            primary,
            secondary: secondary_level(primary),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelTransition {
    pub from_level: usize,
    pub to_level: usize,
    pub trigger_time: EpochMillis,
    pub duration_ms: i64,
}

/// Outgoing levels and how far the fade towards the current ones has run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelCrossfade {
    pub previous: LevelIndices,
    /// Eased blend factor in `[0, 1)`; the previous levels fade with `1 - phase`.
    pub phase: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelTrackerState {
    pub current: LevelIndices,
    pub crossfade: Option<LevelCrossfade>,
}

/// Follows the navigator's span and crossfades between delimiter levels.
#[derive(Debug, Clone, PartialEq)]
pub struct DelimiterLevelTracker {
    primary: usize,
    transition: Option<LevelTransition>,
    duration_ms: i64,
}

impl DelimiterLevelTracker {
    #[must_use]
    pub fn new(initial_span_ms: f64) -> Self {
        Self {
            primary: select_primary_level(initial_span_ms),
            transition: None,
            duration_ms: LEVEL_TRANSITION_DURATION_MS,
        }
    }

    pub fn with_duration(initial_span_ms: f64, duration_ms: i64) -> TimelineResult<Self> {
        if duration_ms <= 0 {
            return Err(TimelineError::InvalidData(
                "level transition duration must be > 0".to_owned(),
            ));
        }
        Ok(Self {
            duration_ms,
            ..Self::new(initial_span_ms)
        })
    }

    #[must_use]
    pub fn current(&self) -> LevelIndices {
        LevelIndices::for_primary(self.primary)
    }

    #[must_use]
    pub fn transition(&self) -> Option<&LevelTransition> {
        self.transition.as_ref()
    }

    /// Re-selects the primary level for `span_ms`.
    ///
    /// Returns `true` when the level changed and a crossfade was started.
    /// A change during a running crossfade restarts it from the level that
    /// was current until now.
    pub fn observe(&mut self, span_ms: f64, now: EpochMillis) -> bool {
        let next = select_primary_level(span_ms);
        if next == self.primary {
            return false;
        }

        debug!(from = self.primary, to = next, span_ms, "delimiter level changed");
        self.transition = Some(LevelTransition {
            from_level: self.primary,
            to_level: next,
            trigger_time: now,
            duration_ms: self.duration_ms,
        });
        self.primary = next;
        true
    }

    /// Levels to draw at `now` without retiring a finished crossfade.
    #[must_use]
    pub fn state_at(&self, now: EpochMillis) -> LevelTrackerState {
        let crossfade = self.transition.as_ref().and_then(|transition| {
            let phase = transition_phase(now, transition.trigger_time, transition.duration_ms);
            (!phase.complete).then(|| LevelCrossfade {
                previous: LevelIndices::for_primary(transition.from_level),
                phase: phase.value,
            })
        });
        LevelTrackerState {
            current: self.current(),
            crossfade,
        }
    }

    /// Levels to draw at `now`; drops the crossfade once it has completed.
    pub fn state(&mut self, now: EpochMillis) -> LevelTrackerState {
        let state = self.state_at(now);
        if state.crossfade.is_none() && self.transition.take().is_some() {
            trace!(now, "delimiter crossfade retired");
        }
        state
    }

    #[must_use]
    pub fn is_transitioning(&self, now: EpochMillis) -> bool {
        self.state_at(now).crossfade.is_some()
    }
}
