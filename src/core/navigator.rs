use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::easing::transition_phase;
use super::{EpochMillis, MAX_LENGTH_MS, MILLIS_PER_DAY, MIN_LENGTH_MS, TimeWindow};
use crate::error::{TimelineError, TimelineResult};

/// Tuning controls for anchored zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorTuning {
    pub transition_duration_ms: i64,
    pub min_length_ms: f64,
    pub max_length_ms: f64,
    /// Multiplier applied to zoom amounts that arrive mid-transition.
    pub in_flight_zoom_boost: f64,
}

impl Default for NavigatorTuning {
    fn default() -> Self {
        Self {
            transition_duration_ms: 300,
            min_length_ms: MIN_LENGTH_MS,
            max_length_ms: MAX_LENGTH_MS,
            in_flight_zoom_boost: 1.5,
        }
    }
}

impl NavigatorTuning {
    pub fn validate(self) -> TimelineResult<Self> {
        if self.transition_duration_ms <= 0 {
            return Err(TimelineError::InvalidData(
                "zoom transition duration must be > 0".to_owned(),
            ));
        }
        if !self.min_length_ms.is_finite()
            || !self.max_length_ms.is_finite()
            || self.min_length_ms <= 0.0
            || self.min_length_ms >= self.max_length_ms
        {
            return Err(TimelineError::InvalidData(
                "window length limits must be finite with 0 < min < max".to_owned(),
            ));
        }
        if !self.in_flight_zoom_boost.is_finite() || self.in_flight_zoom_boost < 1.0 {
            return Err(TimelineError::InvalidData(
                "in-flight zoom boost must be finite and >= 1".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Rejects windows whose length lies outside `[min_length_ms, max_length_ms]`.
    pub fn check_window_length(&self, window: TimeWindow) -> TimelineResult<()> {
        let length = window.length();
        if length < self.min_length_ms || length > self.max_length_ms {
            return Err(TimelineError::InvalidData(format!(
                "window length {length} ms must be within [{}, {}] ms",
                self.min_length_ms, self.max_length_ms
            )));
        }
        Ok(())
    }
}

/// Eased move from one window to another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTransition {
    pub from: TimeWindow,
    pub to: TimeWindow,
    pub trigger_time: EpochMillis,
    pub duration_ms: i64,
}

impl ZoomTransition {
    /// Window shown at `now`, or `None` once the transition has run out.
    #[must_use]
    pub fn window_at(&self, now: EpochMillis) -> Option<TimeWindow> {
        let phase = transition_phase(now, self.trigger_time, self.duration_ms);
        if phase.complete {
            return None;
        }
        Some(self.from.lerp(self.to, phase.value))
    }
}

/// Result of a zoom request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomOutcome {
    Started,
    /// The window would shrink below the minimum length; nothing changed.
    RejectedBelowMinimum,
    /// The window would grow past the maximum length; nothing changed.
    RejectedAboveMaximum,
}

impl ZoomOutcome {
    #[must_use]
    pub fn is_started(self) -> bool {
        self == Self::Started
    }
}

/// Owns the visible time window and converts between pixels and timestamps.
///
/// Every read is a function of an explicit `now`, so the result does not
/// depend on how often the host ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineNavigator {
    window: TimeWindow,
    pixel_width: u32,
    transition: Option<ZoomTransition>,
    tuning: NavigatorTuning,
}

impl TimelineNavigator {
    pub fn new(window: TimeWindow, pixel_width: u32) -> TimelineResult<Self> {
        Self::with_tuning(window, pixel_width, NavigatorTuning::default())
    }

    pub fn with_tuning(
        window: TimeWindow,
        pixel_width: u32,
        tuning: NavigatorTuning,
    ) -> TimelineResult<Self> {
        let tuning = tuning.validate()?;
        let window = TimeWindow::new(window.start, window.end)?;
        tuning.check_window_length(window)?;
        if pixel_width == 0 {
            return Err(TimelineError::InvalidPixelWidth { width: pixel_width });
        }
        Ok(Self {
            window,
            pixel_width,
            transition: None,
            tuning,
        })
    }

    /// Six days of timeline centered on `now`.
    pub fn centered_on(now: EpochMillis, pixel_width: u32) -> TimelineResult<Self> {
        Self::new(TimeWindow::centered_on(now, 3 * MILLIS_PER_DAY)?, pixel_width)
    }

    #[must_use]
    pub fn tuning(&self) -> NavigatorTuning {
        self.tuning
    }

    #[must_use]
    pub fn pixel_width(&self) -> u32 {
        self.pixel_width
    }

    /// Window the current zoom is heading to (the visible window when idle).
    #[must_use]
    pub fn target_window(&self) -> TimeWindow {
        self.window
    }

    #[must_use]
    pub fn transition(&self) -> Option<&ZoomTransition> {
        self.transition.as_ref()
    }

    pub fn set_pixel_width(&mut self, width: u32) -> TimelineResult<()> {
        if width == 0 {
            return Err(TimelineError::InvalidPixelWidth { width });
        }
        self.pixel_width = width;
        Ok(())
    }

    /// Visible window at `now` without touching transition state.
    #[must_use]
    pub fn window_at(&self, now: EpochMillis) -> TimeWindow {
        self.transition
            .as_ref()
            .and_then(|transition| transition.window_at(now))
            .unwrap_or(self.window)
    }

    /// Visible window at `now`; drops the transition once it has completed.
    pub fn effective_window(&mut self, now: EpochMillis) -> TimeWindow {
        if let Some(transition) = self.transition {
            match transition.window_at(now) {
                Some(window) => return window,
                None => {
                    trace!(now, "zoom transition retired");
                    self.transition = None;
                }
            }
        }
        self.window
    }

    /// True while a zoom transition is still running at `now`.
    ///
    /// Evaluated from `now` alone; it does not wait for `effective_window`
    /// to retire the transition.
    #[must_use]
    pub fn is_transitioning(&self, now: EpochMillis) -> bool {
        self.transition
            .as_ref()
            .is_some_and(|transition| transition.window_at(now).is_some())
    }

    #[must_use]
    pub fn timestamp_at_pixel(&self, x: f64, now: EpochMillis) -> f64 {
        let window = self.window_at(now);
        window.start + (x / f64::from(self.pixel_width)) * window.length()
    }

    /// Pixel of `timestamp`; not bounded to `[0, pixel_width]`.
    #[must_use]
    pub fn pixel_at_timestamp(&self, timestamp: f64, now: EpochMillis) -> f64 {
        let window = self.window_at(now);
        (timestamp - window.start) / window.length() * f64::from(self.pixel_width)
    }

    /// Zooms by a factor of `exp(amount)` keeping the time under `anchor_x` fixed.
    ///
    /// Positive amounts zoom out, negative amounts zoom in. A request that
    /// would push the length past a limit in the direction it is already
    /// heading is ignored and leaves the navigator unchanged.
    pub fn zoom(
        &mut self,
        anchor_x: f64,
        amount: f64,
        now: EpochMillis,
    ) -> TimelineResult<ZoomOutcome> {
        if !anchor_x.is_finite() || !amount.is_finite() {
            return Err(TimelineError::InvalidData(
                "zoom anchor and amount must be finite".to_owned(),
            ));
        }

        let current = self.effective_window(now);
        let length = current.length();
        let f = anchor_x / f64::from(self.pixel_width);
        let anchor = current.start + f * length;

        let amount = if self.is_transitioning(now) {
            amount * self.tuning.in_flight_zoom_boost
        } else {
            amount
        };
        let new_length = amount.exp() * length;

        if new_length < self.tuning.min_length_ms && new_length < length {
            trace!(new_length, "zoom rejected below minimum length");
            return Ok(ZoomOutcome::RejectedBelowMinimum);
        }
        if new_length > self.tuning.max_length_ms && new_length > length {
            trace!(new_length, "zoom rejected above maximum length");
            return Ok(ZoomOutcome::RejectedAboveMaximum);
        }

        let target = TimeWindow {
            start: anchor - new_length * f,
            end: anchor + new_length * (1.0 - f),
        };
        debug!(
            anchor,
            from_length = length,
            to_length = new_length,
            "zoom transition started"
        );
        self.transition = Some(ZoomTransition {
            from: current,
            to: target,
            trigger_time: now,
            duration_ms: self.tuning.transition_duration_ms,
        });
        self.window = target;
        Ok(ZoomOutcome::Started)
    }
}
