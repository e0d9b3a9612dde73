use chrono::{DateTime, Datelike, Duration, Timelike, Utc, Weekday};

pub struct TimeUtils;

impl TimeUtils {
    pub const MINUTES_IN_H: u32 = 60;
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d";
    // const STANDARD_TIME_FORMAT: &str = "%d/%m/%Y";
}

/// Saturday or Sunday.
pub fn is_weekend(date: &DateTime<Utc>) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// `date + days`, or `None` past the end of chrono's range.
pub fn add_days(date: DateTime<Utc>, days: usize) -> Option<DateTime<Utc>> {
    let span = Duration::try_days(i64::try_from(days).ok()?)?;
    date.checked_add_signed(span)
}

/// Roll `date` forward one day at a time until it lands on a weekday.
/// Weekdays are returned unchanged.
pub fn roll_to_weekday(date: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let mut rolled = date;
    while is_weekend(&rolled) {
        rolled = add_days(rolled, 1)?;
    }
    Some(rolled)
}

/// Minutes elapsed since midnight (UTC) for `date`.
pub fn minutes_of_day(date: &DateTime<Utc>) -> u32 {
    date.hour() * TimeUtils::MINUTES_IN_H + date.minute()
}

/// Used for display purposes
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format(TimeUtils::STANDARD_TIME_FORMAT).to_string()
}
