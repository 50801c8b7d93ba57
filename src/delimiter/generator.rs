use chrono::{Datelike, Days, Months, NaiveDate};

use super::level::{GenerationStrategy, LevelSpec};
use crate::core::calendar::days_since_week_start;
use crate::core::{CivilCalendar, EpochMillis};
use crate::error::{TimelineError, TimelineResult};

/// Upper bound on delimiters produced by one enumeration.
pub const MAX_DELIMITERS_PER_PASS: usize = 10_000;

impl LevelSpec {
    /// Delimiter timestamps of this level in `[from, to)`, strictly increasing.
    pub fn list_timestamps(
        &self,
        from: EpochMillis,
        to: EpochMillis,
        calendar: &dyn CivilCalendar,
    ) -> TimelineResult<Vec<EpochMillis>> {
        if from >= to {
            return Ok(Vec::new());
        }

        match self.strategy {
            GenerationStrategy::FixedInterval => {
                fixed_interval_timestamps(self.name, from, to, self.interval_estimate_ms)
            }
            GenerationStrategy::CalendarDay => {
                let start = calendar
                    .local_date(from)?
                    .checked_add_days(Days::new(1))
                    .ok_or(TimelineError::CalendarOutOfRange(from))?;
                walk_calendar(self.name, from, to, calendar, start, |date| {
                    date.checked_add_days(Days::new(1))
                })
            }
            GenerationStrategy::CalendarWeek => {
                let date = calendar.local_date(from)?;
                let back = days_since_week_start(date, calendar.first_weekday());
                let start = date
                    .checked_sub_days(Days::new(u64::from(back)))
                    .ok_or(TimelineError::CalendarOutOfRange(from))?;
                walk_calendar(self.name, from, to, calendar, start, |date| {
                    date.checked_add_days(Days::new(7))
                })
            }
            GenerationStrategy::CalendarMonth => {
                let date = calendar.local_date(from)?;
                let start = NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
                    .ok_or(TimelineError::CalendarOutOfRange(from))?;
                walk_calendar(self.name, from, to, calendar, start, |date| {
                    date.checked_add_months(Months::new(1))
                })
            }
            GenerationStrategy::CalendarYear => {
                let year = calendar.local_date(from)?.year();
                let start = NaiveDate::from_ymd_opt(year, 1, 1)
                    .ok_or(TimelineError::CalendarOutOfRange(from))?;
                walk_calendar(self.name, from, to, calendar, start, |date| {
                    date.checked_add_months(Months::new(12))
                })
            }
            GenerationStrategy::CalendarDecade => {
                let year = calendar.local_date(from)?.year();
                let start = NaiveDate::from_ymd_opt(year.div_euclid(10) * 10, 1, 1)
                    .ok_or(TimelineError::CalendarOutOfRange(from))?;
                walk_calendar(self.name, from, to, calendar, start, |date| {
                    date.checked_add_months(Months::new(120))
                })
            }
        }
    }
}

/// Multiples of `interval` in `[from, to)`, starting strictly after `from`.
///
/// Uses floor division so negative `from` values align the same way as
/// positive ones.
pub fn fixed_interval_timestamps(
    level: &'static str,
    from: EpochMillis,
    to: EpochMillis,
    interval: i64,
) -> TimelineResult<Vec<EpochMillis>> {
    if interval <= 0 {
        return Err(TimelineError::InvalidData(format!(
            "level `{level}` needs a positive interval"
        )));
    }

    let Some(first) = from
        .div_euclid(interval)
        .checked_add(1)
        .and_then(|n| n.checked_mul(interval))
    else {
        return Ok(Vec::new());
    };
    if first >= to {
        return Ok(Vec::new());
    }

    let too_many = TimelineError::TooManyDelimiters {
        level,
        limit: MAX_DELIMITERS_PER_PASS,
    };
    let Some(span) = to.checked_sub(first) else {
        return Err(too_many);
    };
    let count = ((span - 1) / interval + 1) as u64;
    if count > MAX_DELIMITERS_PER_PASS as u64 {
        return Err(too_many);
    }

    Ok((0..count as i64).map(|i| first + i * interval).collect())
}

fn walk_calendar(
    level: &'static str,
    from: EpochMillis,
    to: EpochMillis,
    calendar: &dyn CivilCalendar,
    start: NaiveDate,
    step: impl Fn(NaiveDate) -> Option<NaiveDate>,
) -> TimelineResult<Vec<EpochMillis>> {
    let mut timestamps = Vec::new();
    let mut date = start;
    loop {
        let t = calendar.midnight(date)?;
        if t >= to {
            break;
        }
        if t >= from {
            if timestamps.len() == MAX_DELIMITERS_PER_PASS {
                return Err(TimelineError::TooManyDelimiters {
                    level,
                    limit: MAX_DELIMITERS_PER_PASS,
                });
            }
            timestamps.push(t);
        }
        date = step(date).ok_or(TimelineError::CalendarOutOfRange(t))?;
    }
    Ok(timestamps)
}
