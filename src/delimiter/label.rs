use chrono::{Datelike, NaiveDateTime};

use super::level::{LabelPattern, LevelSpec};
use crate::core::{CivilCalendar, EpochMillis};
use crate::error::TimelineResult;

impl LevelSpec {
    /// Text drawn next to a delimiter of this level; empty when unlabeled.
    pub fn format_delimiter(
        &self,
        t: EpochMillis,
        calendar: &dyn CivilCalendar,
    ) -> TimelineResult<String> {
        format_optional(self.delimiter_label, t, calendar)
    }

    /// Ambient period around `t` at this level, e.g. the month name for days.
    pub fn format_status(
        &self,
        t: EpochMillis,
        calendar: &dyn CivilCalendar,
    ) -> TimelineResult<String> {
        format_optional(self.status_label, t, calendar)
    }
}

fn format_optional(
    pattern: Option<LabelPattern>,
    t: EpochMillis,
    calendar: &dyn CivilCalendar,
) -> TimelineResult<String> {
    match pattern {
        Some(pattern) => format_label(pattern, t, calendar),
        None => Ok(String::new()),
    }
}

pub fn format_label(
    pattern: LabelPattern,
    t: EpochMillis,
    calendar: &dyn CivilCalendar,
) -> TimelineResult<String> {
    let local = calendar.to_local(t)?;
    Ok(format_local(pattern, local))
}

fn format_local(pattern: LabelPattern, local: NaiveDateTime) -> String {
    match pattern {
        LabelPattern::Format(format) => local.format(format).to_string(),
        LabelPattern::OrdinalDay => {
            let day = local.day();
            format!("{day}{}", ordinal_suffix(day))
        }
        LabelPattern::Era => era(local).to_owned(),
    }
}

/// English ordinal suffix for a day of month.
#[must_use]
pub fn ordinal_suffix(day: u32) -> &'static str {
    match day {
        1 | 21 | 31 => "st",
        2 | 22 => "nd",
        3 | 23 => "rd",
        _ => "th",
    }
}

fn era(local: NaiveDateTime) -> &'static str {
    let (common_era, _) = local.year_ce();
    if common_era { "AD" } else { "BC" }
}

/// Full readout for the timestamp under the pointer: `AD 2024-03-15 12:30:05`.
pub fn format_pointer_label(t: EpochMillis, calendar: &dyn CivilCalendar) -> TimelineResult<String> {
    let local = calendar.to_local(t)?;
    let (_, year_of_era) = local.year_ce();
    Ok(format!(
        "{} {year_of_era:04}-{}",
        era(local),
        local.format("%m-%d %H:%M:%S")
    ))
}
