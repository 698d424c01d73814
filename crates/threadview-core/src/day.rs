//! Calendar-day bucketing for day separators.
//!
//! A post's day is its local calendar date in a fixed UTC offset. Day
//! labels are rendered as ISO-8601 dates (`YYYY-MM-DD`) so the output never
//! depends on the host locale or time zone.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

use crate::error::ConfigError;

/// `strftime` pattern for day labels.
pub const DAY_LABEL_FORMAT: &str = "%Y-%m-%d";

/// Maps post timestamps onto calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayClock {
    offset: FixedOffset,
}

impl Default for DayClock {
    fn default() -> Self {
        Self::utc()
    }
}

impl DayClock {
    /// Days are counted in UTC.
    #[must_use]
    pub fn utc() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }

    #[must_use]
    pub const fn with_offset(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Build a clock from a signed offset in minutes east of UTC.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OffsetOutOfRange`] unless the offset is
    /// strictly within one day of UTC.
    pub fn from_offset_minutes(minutes: i32) -> Result<Self, ConfigError> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(Self::with_offset)
            .ok_or(ConfigError::OffsetOutOfRange(minutes))
    }

    #[must_use]
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Calendar day of an epoch-millisecond timestamp.
    ///
    /// Timestamps chrono cannot represent, in UTC or after shifting into
    /// the clock's offset, collapse onto the epoch day.
    #[must_use]
    pub fn day_of(&self, create_at: i64) -> NaiveDate {
        DateTime::<Utc>::from_timestamp_millis(create_at)
            .and_then(|instant| instant.naive_utc().checked_add_offset(self.offset))
            .map_or_else(
                || {
                    tracing::trace!(create_at, "timestamp out of range, using epoch day");
                    DateTime::UNIX_EPOCH.date_naive()
                },
                |local| local.date(),
            )
    }
}

/// Render a day as its label text.
#[must_use]
pub fn format_day(day: NaiveDate) -> String {
    day.format(DAY_LABEL_FORMAT).to_string()
}

/// Parse label text produced by [`format_day`].
#[must_use]
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, DAY_LABEL_FORMAT).ok()
}
