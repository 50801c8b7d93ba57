pub mod calendar;
pub mod clock;
pub mod easing;
pub mod navigator;
pub mod types;

pub use calendar::{CalendarConfig, CalendarTimeZone, CivilCalendar, WeekStart, ZonedCalendar};
pub use clock::{Clock, FixedClock, SystemClock};
pub use easing::{TransitionPhase, ease, transition_phase};
pub use navigator::{NavigatorTuning, TimelineNavigator, ZoomOutcome, ZoomTransition};
pub use types::{EpochMillis, MAX_LENGTH_MS, MILLIS_PER_DAY, MIN_LENGTH_MS, TimeWindow};
