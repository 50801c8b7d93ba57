use serde::{Deserialize, Serialize};

use crate::core::{
    CalendarConfig, EpochMillis, MILLIS_PER_DAY, NavigatorTuning, TimeWindow,
};
use crate::delimiter::LEVEL_TRANSITION_DURATION_MS;
use crate::error::{TimelineError, TimelineResult};

/// Public engine bootstrap configuration.
///
/// Serializable so host applications can keep timeline setup next to their
/// own settings without inventing an ad-hoc format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineEngineConfig {
    pub pixel_width: u32,
    pub window: TimeWindow,
    #[serde(default)]
    pub navigator: NavigatorTuning,
    #[serde(default = "default_level_transition_duration_ms")]
    pub level_transition_duration_ms: i64,
    #[serde(default)]
    pub calendar: CalendarConfig,
}

impl TimelineEngineConfig {
    #[must_use]
    pub fn new(pixel_width: u32, window: TimeWindow) -> Self {
        Self {
            pixel_width,
            window,
            navigator: NavigatorTuning::default(),
            level_transition_duration_ms: default_level_transition_duration_ms(),
            calendar: CalendarConfig::default(),
        }
    }

    /// Six days of timeline centered on `now`.
    pub fn centered_on(now: EpochMillis, pixel_width: u32) -> TimelineResult<Self> {
        Ok(Self::new(
            pixel_width,
            TimeWindow::centered_on(now, 3 * MILLIS_PER_DAY)?,
        ))
    }

    #[must_use]
    pub fn with_calendar(mut self, calendar: CalendarConfig) -> Self {
        self.calendar = calendar;
        self
    }

    #[must_use]
    pub fn with_navigator_tuning(mut self, navigator: NavigatorTuning) -> Self {
        self.navigator = navigator;
        self
    }

    pub fn validate(self) -> TimelineResult<Self> {
        if self.pixel_width == 0 {
            return Err(TimelineError::InvalidPixelWidth {
                width: self.pixel_width,
            });
        }
        let window = TimeWindow::new(self.window.start, self.window.end)?;
        self.navigator.validate()?.check_window_length(window)?;
        if self.level_transition_duration_ms <= 0 {
            return Err(TimelineError::InvalidData(
                "level transition duration must be > 0".to_owned(),
            ));
        }
        Ok(self)
    }

    pub fn from_json_str(input: &str) -> TimelineResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|err| {
            TimelineError::InvalidData(format!("failed to parse engine config: {err}"))
        })?;
        config.validate()
    }

    pub fn to_json_pretty(self) -> TimelineResult<String> {
        serde_json::to_string_pretty(&self).map_err(|err| {
            TimelineError::InvalidData(format!("failed to serialize engine config: {err}"))
        })
    }
}

fn default_level_transition_duration_ms() -> i64 {
    LEVEL_TRANSITION_DURATION_MS
}
