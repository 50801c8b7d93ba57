use crate::error::TimelineResult;
use crate::render::{Renderer, TimelineFrame};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content so tests catch inconsistent frames
/// before a real backend is involved.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_mark_count: usize,
    pub last_crossfade_phase: Option<f64>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &TimelineFrame) -> TimelineResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_mark_count = frame.mark_count();
        self.last_crossfade_phase = frame.crossfade.as_ref().map(|crossfade| crossfade.phase);
        Ok(())
    }
}
