use serde::{Deserialize, Serialize};

/// Pointer state the timeline needs between input events.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InteractionState {
    cursor_x: Option<f64>,
}

impl InteractionState {
    /// Pointer x in pixels, `None` while the pointer is outside the timeline.
    #[must_use]
    pub fn cursor_x(self) -> Option<f64> {
        self.cursor_x
    }

    /// Records a move or drag; non-finite coordinates are ignored.
    pub fn on_pointer_move(&mut self, x: f64) {
        if x.is_finite() {
            self.cursor_x = Some(x);
        }
    }

    pub fn on_pointer_leave(&mut self) {
        self.cursor_x = None;
    }
}
