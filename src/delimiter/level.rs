use crate::core::MILLIS_PER_DAY;
use crate::error::{TimelineError, TimelineResult};

const D: i64 = MILLIS_PER_DAY;

/// How a level enumerates its delimiter timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationStrategy {
    /// Multiples of the level's interval since the epoch.
    FixedInterval,
    CalendarDay,
    CalendarWeek,
    CalendarMonth,
    CalendarYear,
    CalendarDecade,
}

/// Label rendering for a delimiter or status readout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelPattern {
    /// chrono `strftime` pattern applied to local time.
    Format(&'static str),
    /// Day of month with an English ordinal suffix, e.g. `21st`.
    OrdinalDay,
    /// Era designator, `AD` or `BC`.
    Era,
}

/// One delimiter granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSpec {
    pub name: &'static str,
    /// Typical distance between consecutive delimiters; the exact step for
    /// fixed-interval levels.
    pub interval_estimate_ms: i64,
    /// Largest window span this level is selected for (exclusive).
    pub max_length_ms: i64,
    pub delimiter_label: Option<LabelPattern>,
    /// Pattern naming the ambient period around a timestamp.
    pub status_label: Option<LabelPattern>,
    pub strategy: GenerationStrategy,
}

impl LevelSpec {
    const fn new(
        name: &'static str,
        interval_estimate_ms: i64,
        max_length_ms: i64,
        delimiter_label: Option<LabelPattern>,
        status_label: Option<LabelPattern>,
        strategy: GenerationStrategy,
    ) -> Self {
        Self {
            name,
            interval_estimate_ms,
            max_length_ms,
            delimiter_label,
            status_label,
            strategy,
        }
    }
}

/// Delimiter levels, densest first.
pub static LEVELS: [LevelSpec; 9] = [
    LevelSpec::new(
        "seconds",
        1_000,
        20_000,
        Some(LabelPattern::Format("%S")),
        Some(LabelPattern::Format("%b %-d %H:%M")),
        GenerationStrategy::FixedInterval,
    ),
    LevelSpec::new(
        "minutes",
        60_000,
        450_000,
        Some(LabelPattern::Format("%H:%M")),
        Some(LabelPattern::Format("%b %-d")),
        GenerationStrategy::FixedInterval,
    ),
    LevelSpec::new(
        "five_minutes",
        300_000,
        D / 16,
        Some(LabelPattern::Format("%H:%M")),
        Some(LabelPattern::Format("%b %-d")),
        GenerationStrategy::FixedInterval,
    ),
    LevelSpec::new(
        "hours",
        D / 24,
        D,
        Some(LabelPattern::Format("%H:%M")),
        Some(LabelPattern::Format("%b %-d")),
        GenerationStrategy::FixedInterval,
    ),
    LevelSpec::new(
        "days",
        D,
        12 * D,
        Some(LabelPattern::OrdinalDay),
        Some(LabelPattern::Format("%B")),
        GenerationStrategy::CalendarDay,
    ),
    LevelSpec::new(
        "weeks",
        7 * D,
        45 * D,
        Some(LabelPattern::Format("%a, %b %-d")),
        Some(LabelPattern::Format("%B")),
        GenerationStrategy::CalendarWeek,
    ),
    LevelSpec::new(
        "months",
        30 * D,
        450 * D,
        Some(LabelPattern::Format("%b")),
        Some(LabelPattern::Format("%Y")),
        GenerationStrategy::CalendarMonth,
    ),
    LevelSpec::new(
        "years",
        365 * D,
        6_000 * D,
        Some(LabelPattern::Format("%Y")),
        None,
        GenerationStrategy::CalendarYear,
    ),
    LevelSpec::new(
        "decades",
        3_650 * D,
        36_500 * D,
        Some(LabelPattern::Format("%Ys")),
        Some(LabelPattern::Era),
        GenerationStrategy::CalendarDecade,
    ),
];

/// Index of the labeled level for a window spanning `span_ms`.
///
/// Picks the first level whose threshold exceeds the span and falls back to
/// the last level. Nondecreasing in `span_ms`.
#[must_use]
pub fn select_primary_level(span_ms: f64) -> usize {
    select_primary_level_in(&LEVELS, span_ms)
}

#[must_use]
pub fn select_primary_level_in(levels: &[LevelSpec], span_ms: f64) -> usize {
    levels
        .iter()
        .position(|level| level.max_length_ms as f64 > span_ms)
        .unwrap_or(levels.len().saturating_sub(1))
}

/// Denser, unlabeled level drawn beneath `primary`.
#[must_use]
pub fn secondary_level(primary: usize) -> Option<usize> {
    primary.checked_sub(1)
}

/// Level at `index`, `None` outside the table.
#[must_use]
pub fn level(index: usize) -> Option<&'static LevelSpec> {
    LEVELS.get(index)
}

/// Checks that a level table is usable for selection and generation.
pub fn validate_levels(levels: &[LevelSpec]) -> TimelineResult<()> {
    if levels.is_empty() {
        return Err(TimelineError::InvalidLevelTable(
            "at least one level is required".to_owned(),
        ));
    }
    for level in levels {
        if level.interval_estimate_ms <= 0 || level.max_length_ms <= 0 {
            return Err(TimelineError::InvalidLevelTable(format!(
                "level `{}` must have a positive interval and threshold",
                level.name
            )));
        }
    }
    if let Some(pair) = levels
        .windows(2)
        .find(|pair| pair[0].max_length_ms >= pair[1].max_length_ms)
    {
        return Err(TimelineError::InvalidLevelTable(format!(
            "threshold of `{}` must be below threshold of `{}`",
            pair[0].name, pair[1].name
        )));
    }
    Ok(())
}
