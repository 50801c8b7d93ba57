use serde::Serialize;

use crate::core::{EpochMillis, TimeWindow};
use crate::error::{TimelineError, TimelineResult};

/// One gridline on the axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DelimiterMark {
    pub timestamp: EpochMillis,
    /// Pixel position; may fall outside `[0, pixel_width]` near the edges.
    pub x: f64,
    /// Text for labeled (primary) layers, `None` on secondary layers.
    pub label: Option<String>,
}

/// All delimiters of one level inside the visible window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DelimiterLayer {
    pub level: usize,
    pub level_name: &'static str,
    pub marks: Vec<DelimiterMark>,
}

impl DelimiterLayer {
    fn validate(&self) -> TimelineResult<()> {
        for mark in &self.marks {
            if !mark.x.is_finite() {
                return Err(TimelineError::InvalidData(format!(
                    "delimiter x of level `{}` must be finite",
                    self.level_name
                )));
            }
        }
        if self
            .marks
            .windows(2)
            .any(|pair| pair[0].timestamp >= pair[1].timestamp)
        {
            return Err(TimelineError::InvalidData(format!(
                "delimiters of level `{}` must be strictly increasing",
                self.level_name
            )));
        }
        Ok(())
    }
}

/// Outgoing levels drawn with alpha `1 - phase` while the current ones fade in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossfadeFrame {
    pub phase: f64,
    pub primary: DelimiterLayer,
    pub secondary: Option<DelimiterLayer>,
}

/// Pointer line and its readouts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CursorFrame {
    pub x: f64,
    pub timestamp: f64,
    /// Ambient period at the primary level, e.g. `March` while days are shown.
    pub status_label: String,
    pub pointer_label: String,
}

/// Everything a backend needs to draw the timeline at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineFrame {
    pub now: EpochMillis,
    pub pixel_width: u32,
    pub window: TimeWindow,
    pub primary: DelimiterLayer,
    pub secondary: Option<DelimiterLayer>,
    pub crossfade: Option<CrossfadeFrame>,
    pub cursor: Option<CursorFrame>,
}

impl TimelineFrame {
    pub fn validate(&self) -> TimelineResult<()> {
        if self.pixel_width == 0 {
            return Err(TimelineError::InvalidPixelWidth {
                width: self.pixel_width,
            });
        }
        TimeWindow::new(self.window.start, self.window.end)?;

        self.primary.validate()?;
        if let Some(secondary) = &self.secondary {
            secondary.validate()?;
        }
        if let Some(crossfade) = &self.crossfade {
            if !(0.0..1.0).contains(&crossfade.phase) {
                return Err(TimelineError::InvalidData(
                    "crossfade phase must be in [0, 1)".to_owned(),
                ));
            }
            crossfade.primary.validate()?;
            if let Some(secondary) = &crossfade.secondary {
                secondary.validate()?;
            }
        }
        if let Some(cursor) = &self.cursor {
            if !cursor.x.is_finite() || !cursor.timestamp.is_finite() {
                return Err(TimelineError::InvalidData(
                    "cursor position must be finite".to_owned(),
                ));
            }
        }
        Ok(())
    }

    /// Number of delimiter marks across every layer, outgoing ones included.
    #[must_use]
    pub fn mark_count(&self) -> usize {
        let secondary = self.secondary.as_ref().map_or(0, |layer| layer.marks.len());
        let crossfade = self.crossfade.as_ref().map_or(0, |crossfade| {
            crossfade.primary.marks.len()
                + crossfade
                    .secondary
                    .as_ref()
                    .map_or(0, |layer| layer.marks.len())
        });
        self.primary.marks.len() + secondary + crossfade
    }
}
