use thiserror::Error;

use crate::core::EpochMillis;

pub type TimelineResult<T> = Result<T, TimelineError>;

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("invalid pixel width: {width}")]
    InvalidPixelWidth { width: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid delimiter level table: {0}")]
    InvalidLevelTable(String),

    #[error("timestamp {0} ms is outside the supported calendar range")]
    CalendarOutOfRange(EpochMillis),

    #[error("level `{level}` would produce more than {limit} delimiters")]
    TooManyDelimiters { level: &'static str, limit: usize },
}
