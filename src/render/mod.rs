mod frame;
mod null_renderer;

pub use frame::{CrossfadeFrame, CursorFrame, DelimiterLayer, DelimiterMark, TimelineFrame};
pub use null_renderer::NullRenderer;

use crate::error::TimelineResult;

/// Contract implemented by any drawing backend.
///
/// Backends receive a fully materialized `TimelineFrame`, so drawing code
/// stays free of zoom, calendar and transition logic.
pub trait Renderer {
    fn render(&mut self, frame: &TimelineFrame) -> TimelineResult<()>;
}
