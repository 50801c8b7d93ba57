use std::time::Duration;

use tracing::{trace, warn};

use crate::core::{
    CivilCalendar, Clock, EpochMillis, TimeWindow, TimelineNavigator, ZoomOutcome,
};
use crate::delimiter::{
    DelimiterLevelTracker, LEVELS, LevelIndices, LevelTrackerState, format_pointer_label, level,
    validate_levels,
};
use crate::error::{TimelineError, TimelineResult};
use crate::interaction::InteractionState;
use crate::render::{
    CrossfadeFrame, CursorFrame, DelimiterLayer, DelimiterMark, Renderer, TimelineFrame,
};

use super::TimelineEngineConfig;

/// What a tick changed, for hosts deciding whether to repaint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    pub window: TimeWindow,
    pub levels: LevelTrackerState,
    /// True while a zoom or level crossfade is running, including the tick
    /// that retires it.
    pub needs_redraw: bool,
}

/// Main orchestration facade consumed by host applications.
///
/// `TimelineEngine` routes resize, pointer and wheel input into the
/// navigator, keeps the delimiter level tracker in step with the visible
/// span, and hands finished frames to the renderer.
pub struct TimelineEngine<R: Renderer> {
    renderer: R,
    navigator: TimelineNavigator,
    tracker: DelimiterLevelTracker,
    interaction: InteractionState,
    calendar: Box<dyn CivilCalendar>,
}

impl<R: Renderer> TimelineEngine<R> {
    /// Builds an engine using the calendar described by `config.calendar`.
    pub fn new(renderer: R, config: TimelineEngineConfig) -> TimelineResult<Self> {
        let calendar = config.calendar.build()?;
        Self::with_calendar(renderer, config, calendar)
    }

    /// Builds an engine with a host-supplied calendar.
    pub fn with_calendar(
        renderer: R,
        config: TimelineEngineConfig,
        calendar: Box<dyn CivilCalendar>,
    ) -> TimelineResult<Self> {
        let config = config.validate()?;
        validate_levels(&LEVELS)?;

        let navigator =
            TimelineNavigator::with_tuning(config.window, config.pixel_width, config.navigator)?;
        let tracker = DelimiterLevelTracker::with_duration(
            config.window.length(),
            config.level_transition_duration_ms,
        )?;

        Ok(Self {
            renderer,
            navigator,
            tracker,
            interaction: InteractionState::default(),
            calendar,
        })
    }

    #[must_use]
    pub fn navigator(&self) -> &TimelineNavigator {
        &self.navigator
    }

    #[must_use]
    pub fn level_tracker(&self) -> &DelimiterLevelTracker {
        &self.tracker
    }

    #[must_use]
    pub fn interaction(&self) -> InteractionState {
        self.interaction
    }

    #[must_use]
    pub fn calendar(&self) -> &dyn CivilCalendar {
        self.calendar.as_ref()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub fn on_resize(&mut self, pixel_width: u32) -> TimelineResult<()> {
        self.navigator.set_pixel_width(pixel_width)
    }

    pub fn on_pointer_move(&mut self, x: f64) {
        self.interaction.on_pointer_move(x);
    }

    pub fn on_pointer_leave(&mut self) {
        self.interaction.on_pointer_leave();
    }

    /// Zooms around the pointer. Positive `amount` zooms out.
    pub fn on_wheel(&mut self, x: f64, amount: f64, now: EpochMillis) -> TimelineResult<ZoomOutcome> {
        self.interaction.on_pointer_move(x);
        let outcome = self.navigator.zoom(x, amount, now)?;
        if outcome.is_started() {
            self.refresh(now);
        }
        Ok(outcome)
    }

    /// Advances both transitions to `now`.
    pub fn tick(&mut self, now: EpochMillis) -> TickOutcome {
        let was_animating =
            self.navigator.transition().is_some() || self.tracker.transition().is_some();
        let (window, levels) = self.refresh(now);
        let needs_redraw = was_animating
            || self.navigator.is_transitioning(now)
            || levels.crossfade.is_some();
        trace!(now, needs_redraw, primary = levels.current.primary, "tick");
        TickOutcome {
            window,
            levels,
            needs_redraw,
        }
    }

    pub fn tick_with(&mut self, clock: &impl Clock) -> TickOutcome {
        self.tick(clock.now_millis())
    }

    /// Visible window at `now`.
    #[must_use]
    pub fn window(&self, now: EpochMillis) -> TimeWindow {
        self.navigator.window_at(now)
    }

    #[must_use]
    pub fn timestamp_at_pixel(&self, x: f64, now: EpochMillis) -> f64 {
        self.navigator.timestamp_at_pixel(x, now)
    }

    #[must_use]
    pub fn pixel_at_timestamp(&self, timestamp: f64, now: EpochMillis) -> f64 {
        self.navigator.pixel_at_timestamp(timestamp, now)
    }

    /// Delimiters of level `index` inside `window`, positioned for `now`.
    ///
    /// Primary layers carry labels, secondary layers do not.
    pub fn delimiter_layer(
        &self,
        index: usize,
        window: TimeWindow,
        labeled: bool,
        now: EpochMillis,
    ) -> TimelineResult<DelimiterLayer> {
        let spec = level(index).ok_or_else(|| {
            TimelineError::InvalidData(format!("delimiter level {index} does not exist"))
        })?;
        let (from, to) = window.millis_bounds();
        let timestamps = spec.list_timestamps(from, to, self.calendar.as_ref())?;

        let mut marks = Vec::with_capacity(timestamps.len());
        for timestamp in timestamps {
            let label = if labeled {
                Some(spec.format_delimiter(timestamp, self.calendar.as_ref())?)
            } else {
                None
            };
            marks.push(DelimiterMark {
                timestamp,
                x: self.navigator.pixel_at_timestamp(timestamp as f64, now),
                label,
            });
        }

        Ok(DelimiterLayer {
            level: index,
            level_name: spec.name,
            marks,
        })
    }

    /// Status readout of the current primary level for `timestamp`.
    pub fn status_label(&self, timestamp: EpochMillis) -> TimelineResult<String> {
        let primary = self.tracker.current().primary;
        match level(primary) {
            Some(spec) => spec.format_status(timestamp, self.calendar.as_ref()),
            None => Ok(String::new()),
        }
    }

    /// Materializes everything needed to draw the timeline at `now`.
    pub fn build_frame(&mut self, now: EpochMillis) -> TimelineResult<TimelineFrame> {
        let (window, levels) = self.refresh(now);

        let (primary, secondary) = self.level_layers(levels.current, window, now)?;
        let crossfade = match levels.crossfade {
            Some(crossfade) => match self.level_layers(crossfade.previous, window, now) {
                Ok((primary, secondary)) => Some(CrossfadeFrame {
                    phase: crossfade.phase,
                    primary,
                    secondary,
                }),
                // A sparse tick can leave the outgoing level far too dense for
                // the new span; it would fade out as noise anyway.
                Err(TimelineError::TooManyDelimiters { level, limit }) => {
                    warn!(level, limit, "skipping crossfade of an outgoing level");
                    None
                }
                Err(err) => return Err(err),
            },
            None => None,
        };

        let cursor = match self.interaction.cursor_x() {
            Some(x) => {
                let timestamp = self.navigator.timestamp_at_pixel(x, now);
                let millis = timestamp.floor() as EpochMillis;
                Some(CursorFrame {
                    x,
                    timestamp,
                    status_label: self.status_label(millis)?,
                    pointer_label: format_pointer_label(millis, self.calendar.as_ref())?,
                })
            }
            None => None,
        };

        Ok(TimelineFrame {
            now,
            pixel_width: self.navigator.pixel_width(),
            window,
            primary,
            secondary,
            crossfade,
            cursor,
        })
    }

    pub fn render(&mut self, now: EpochMillis) -> TimelineResult<()> {
        let frame = self.build_frame(now)?;
        self.renderer.render(&frame).inspect_err(|err| {
            warn!(error = %err, now, "renderer rejected timeline frame");
        })
    }

    /// Frame at `now` as pretty JSON, for debugging and fixtures.
    pub fn frame_json_pretty(&mut self, now: EpochMillis) -> TimelineResult<String> {
        let frame = self.build_frame(now)?;
        serde_json::to_string_pretty(&frame).map_err(|err| {
            TimelineError::InvalidData(format!("failed to serialize timeline frame: {err}"))
        })
    }

    fn refresh(&mut self, now: EpochMillis) -> (TimeWindow, LevelTrackerState) {
        let window = self.navigator.effective_window(now);
        self.tracker.observe(window.length(), now);
        (window, self.tracker.state(now))
    }

    fn level_layers(
        &self,
        indices: LevelIndices,
        window: TimeWindow,
        now: EpochMillis,
    ) -> TimelineResult<(DelimiterLayer, Option<DelimiterLayer>)> {
        let primary = self.delimiter_layer(indices.primary, window, true, now)?;
        let secondary = match indices.secondary {
            Some(index) => Some(self.delimiter_layer(index, window, false, now)?),
            None => None,
        };
        Ok((primary, secondary))
    }
}

/// Host timer period for a display refreshing at `refresh_rate_hz`.
pub fn tick_interval(refresh_rate_hz: u32) -> TimelineResult<Duration> {
    if refresh_rate_hz == 0 {
        return Err(TimelineError::InvalidData(
            "refresh rate must be > 0".to_owned(),
        ));
    }
    let millis = (1_000 / u64::from(refresh_rate_hz)).max(1);
    Ok(Duration::from_millis(millis))
}
