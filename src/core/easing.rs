use std::f64::consts::FRAC_PI_2;

use super::EpochMillis;

/// Shapes a linear phase into a decelerating blend factor.
///
/// Inputs outside `(0, 1)` pass through unchanged, so `ease(0) = 0`,
/// `ease(1) = 1` and phases past completion stay `>= 1`.
#[must_use]
pub fn ease(x: f64) -> f64 {
    if x <= 0.0 || x >= 1.0 {
        return x;
    }
    (x * FRAC_PI_2).sin()
}

/// Eased progress of a transition started at `trigger_time`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionPhase {
    pub value: f64,
    pub complete: bool,
}

/// Computes the eased phase from elapsed wall-clock time only.
///
/// A `now` earlier than the trigger clamps to phase 0.
#[must_use]
pub fn transition_phase(
    now: EpochMillis,
    trigger_time: EpochMillis,
    duration_ms: i64,
) -> TransitionPhase {
    let elapsed = now.saturating_sub(trigger_time);
    if duration_ms <= 0 || elapsed >= duration_ms {
        return TransitionPhase {
            value: 1.0,
            complete: true,
        };
    }
    let linear = (elapsed as f64 / duration_ms as f64).clamp(0.0, 1.0);
    TransitionPhase {
        value: ease(linear),
        complete: false,
    }
}
