//! # Appointment Time Parsing

//! Locale-insensitive parser for the 12-hour-clock appointment time strings carried on
//! vehicles (e.g. "9:30AM", "12:05 pm"). Malformed strings resolve to a date ten years
//! out so they sort last in automation priority; the failure is logged rather than
//! silently accepted.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::warn;

/// Years added to the target date when an appointment time cannot be parsed,
/// pushing the vehicle to the back of the automation queue.
pub const UNPARSEABLE_OFFSET_YEARS: i32 = 10;

/// Parses an "h:mmAM"/"h:mm PM" string onto the given date.
///
/// Accepts upper/lower case and an optional space before the meridiem.
/// Malformed input returns midnight ten years after `date`, effectively last
/// in any same-day ordering.
pub fn parse_appointment_time(raw: &str, date: NaiveDate) -> NaiveDateTime {
    let normalized = raw.trim().to_uppercase();
    let parsed = NaiveTime::parse_from_str(&normalized, "%I:%M%p")
        .or_else(|_| NaiveTime::parse_from_str(&normalized, "%I:%M %p"));

    match parsed {
        Ok(time) => date.and_time(time),
        Err(_) => {
            warn!(
                "Unparseable appointment time {:?}; sorting vehicle to the back of the queue",
                raw
            );
            far_future(date)
        }
    }
}

/// Midnight ten years after the given date. Falls back to a day-based offset
/// for the leap-day edge where the shifted year has no such date.
fn far_future(date: NaiveDate) -> NaiveDateTime {
    let shifted = date
        .with_year(date.year() + UNPARSEABLE_OFFSET_YEARS)
        .unwrap_or_else(|| date.checked_add_days(Days::new(3653)).unwrap_or(date));
    shifted.and_time(NaiveTime::MIN)
}
