//! # Booking Time Windows

//! This module defines the clock-time windows that describe when a warehouse or dock
//! accepts appointments: a daily operating-hours span plus the per-weekday (and
//! per-date override) slot lists consumed by the booking surface.

use std::collections::HashMap;
use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// The daily span during which a warehouse or dock operates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingHours {
    /// Opening time of day.
    pub open: NaiveTime,
    /// Closing time of day.
    pub close: NaiveTime,
}

impl OperatingHours {
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.open <= time && time < self.close
    }
}

/// A single bookable clock-time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlotWindow {
    /// Start of the window (inclusive).
    pub from: NaiveTime,
    /// End of the window (exclusive).
    pub to: NaiveTime,
}

impl TimeSlotWindow {
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.from <= time && time < self.to
    }
}

/// Per-weekday booking windows with optional per-date overrides.
///
/// Configuration input to the booking surface only; the slot finder scans its
/// own configured day window.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeSlotsData {
    /// Windows per weekday, indexed by days from Monday (0 = Monday).
    pub weekday_windows: [Vec<TimeSlotWindow>; 7],
    /// Windows for specific calendar dates, taking precedence over the weekday list.
    pub date_overrides: HashMap<NaiveDate, Vec<TimeSlotWindow>>,
}

impl TimeSlotsData {
    /// Returns the booking windows applying to the given date.
    ///
    /// A date override replaces the weekday list entirely for that date.
    pub fn windows_for(&self, date: NaiveDate) -> &[TimeSlotWindow] {
        if let Some(windows) = self.date_overrides.get(&date) {
            return windows;
        }
        &self.weekday_windows[date.weekday().num_days_from_monday() as usize]
    }

    /// Whether any window on the given date covers the given clock time.
    pub fn accepts(&self, date: NaiveDate, time: NaiveTime) -> bool {
        self.windows_for(date).iter().any(|w| w.contains(time))
    }
}
