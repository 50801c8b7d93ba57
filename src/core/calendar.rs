use chrono::{
    Datelike, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta,
    TimeZone, Utc, Weekday,
};
use serde::{Deserialize, Serialize};

use super::EpochMillis;
use crate::error::{TimelineError, TimelineResult};

/// Civil-calendar capability injected into delimiter generation and labels.
///
/// Implementations own the time zone rules. Day, month and year arithmetic is
/// done on the local wall-clock values returned by `to_local`, then mapped back
/// through `from_local`, so steps follow the calendar across DST changes.
pub trait CivilCalendar {
    /// Local wall-clock time of an instant.
    fn to_local(&self, t: EpochMillis) -> TimelineResult<NaiveDateTime>;

    /// Instant of a local wall-clock time.
    ///
    /// Times skipped by a DST gap resolve forward, repeated times resolve to
    /// the earliest instant.
    fn from_local(&self, local: NaiveDateTime) -> TimelineResult<EpochMillis>;

    fn first_weekday(&self) -> Weekday;

    /// Instant of local midnight starting `date`.
    fn midnight(&self, date: NaiveDate) -> TimelineResult<EpochMillis> {
        self.from_local(date.and_time(NaiveTime::MIN))
    }

    /// Local calendar date of an instant.
    fn local_date(&self, t: EpochMillis) -> TimelineResult<NaiveDate> {
        Ok(self.to_local(t)?.date())
    }
}

/// `CivilCalendar` over any chrono time zone.
#[derive(Debug, Clone)]
pub struct ZonedCalendar<Tz: TimeZone> {
    zone: Tz,
    first_weekday: Weekday,
}

impl<Tz: TimeZone> ZonedCalendar<Tz> {
    #[must_use]
    pub fn new(zone: Tz) -> Self {
        Self {
            zone,
            first_weekday: Weekday::Mon,
        }
    }

    #[must_use]
    pub fn with_first_weekday(mut self, first_weekday: Weekday) -> Self {
        self.first_weekday = first_weekday;
        self
    }
}

impl ZonedCalendar<Utc> {
    #[must_use]
    pub fn utc() -> Self {
        Self::new(Utc)
    }
}

impl ZonedCalendar<Local> {
    /// Calendar following the host's local time zone.
    #[must_use]
    pub fn local() -> Self {
        Self::new(Local)
    }
}

impl ZonedCalendar<FixedOffset> {
    pub fn fixed_offset_minutes(minutes: i32) -> TimelineResult<Self> {
        let offset = minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                TimelineError::InvalidData(format!("utc offset of {minutes} minutes is invalid"))
            })?;
        Ok(Self::new(offset))
    }
}

impl<Tz: TimeZone> CivilCalendar for ZonedCalendar<Tz> {
    fn to_local(&self, t: EpochMillis) -> TimelineResult<NaiveDateTime> {
        self.zone
            .timestamp_millis_opt(t)
            .single()
            .map(|dt| dt.naive_local())
            .ok_or(TimelineError::CalendarOutOfRange(t))
    }

    fn from_local(&self, local: NaiveDateTime) -> TimelineResult<EpochMillis> {
        if let Some(dt) = self.zone.from_local_datetime(&local).earliest() {
            return Ok(dt.timestamp_millis());
        }

        // Wall times inside a DST gap map to the same wall time one hour later.
        let shifted = local
            .checked_add_signed(TimeDelta::hours(1))
            .ok_or_else(|| out_of_range(local))?;
        self.zone
            .from_local_datetime(&shifted)
            .earliest()
            .map(|dt| dt.timestamp_millis())
            .ok_or_else(|| out_of_range(local))
    }

    fn first_weekday(&self) -> Weekday {
        self.first_weekday
    }
}

fn out_of_range(local: NaiveDateTime) -> TimelineError {
    TimelineError::CalendarOutOfRange(local.and_utc().timestamp_millis())
}

/// Time zone the host wants calendar boundaries aligned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CalendarTimeZone {
    #[default]
    Local,
    Utc,
    FixedOffsetMinutes {
        minutes: i32,
    },
}

/// Locale-dependent start of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
    Saturday,
}

impl WeekStart {
    #[must_use]
    pub fn weekday(self) -> Weekday {
        match self {
            Self::Monday => Weekday::Mon,
            Self::Sunday => Weekday::Sun,
            Self::Saturday => Weekday::Sat,
        }
    }
}

/// Serializable description of the calendar a host wants injected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CalendarConfig {
    pub timezone: CalendarTimeZone,
    pub week_start: WeekStart,
}

impl CalendarConfig {
    /// Builds the calendar described by this config.
    pub fn build(self) -> TimelineResult<Box<dyn CivilCalendar>> {
        let first_weekday = self.week_start.weekday();
        let calendar: Box<dyn CivilCalendar> = match self.timezone {
            CalendarTimeZone::Local => {
                Box::new(ZonedCalendar::local().with_first_weekday(first_weekday))
            }
            CalendarTimeZone::Utc => {
                Box::new(ZonedCalendar::utc().with_first_weekday(first_weekday))
            }
            CalendarTimeZone::FixedOffsetMinutes { minutes } => Box::new(
                ZonedCalendar::fixed_offset_minutes(minutes)?.with_first_weekday(first_weekday),
            ),
        };
        Ok(calendar)
    }
}

/// Days to step back from `date` to reach the start of its week.
#[must_use]
pub fn days_since_week_start(date: NaiveDate, first_weekday: Weekday) -> u32 {
    (date.weekday().num_days_from_monday() + 7 - first_weekday.num_days_from_monday()) % 7
}
