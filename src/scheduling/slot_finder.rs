//! # Free Time Slot Finder

//! Scans a configured day window in fixed increments across all docks and returns the
//! first non-overlapping appointment window. The scan order is deterministic:
//! earliest start time first, then dock stored order, which makes results reproducible
//! for testing.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use crate::models::{Appointment, Dock, COLD_STORAGE_TAG};

/// The scan window and step used by the slot finder.
///
/// A single facility-wide window rather than each dock's own operating hours;
/// see DESIGN.md for the rationale behind keeping this simplification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SlotSearchSettings {
    /// First hour of day considered for candidate starts.
    pub day_start_hour: u32,
    /// Hour of day at which the candidate scan stops (exclusive).
    pub day_end_hour: u32,
    /// Increment between candidate start times, in minutes.
    pub step_minutes: i64,
}

impl Default for SlotSearchSettings {
    fn default() -> Self {
        Self {
            day_start_hour: 9,
            day_end_hour: 18,
            step_minutes: 30,
        }
    }
}

/// A free window proposed by the slot finder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotProposal {
    pub dock_id: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Locates free appointment windows across a day's ledger.
#[derive(Debug, Clone)]
pub struct SlotFinder {
    settings: SlotSearchSettings,
}

impl SlotFinder {
    pub fn new(settings: SlotSearchSettings) -> Self {
        Self { settings }
    }

    /// Finds the first free `[start, start + duration)` window on the given date.
    ///
    /// Candidate start times run from the configured day start to day end in
    /// step increments. For each candidate, docks are tried in stored order;
    /// docks lacking the Cold Storage tag are skipped when refrigeration is
    /// required. A dock is a hit when no Draft/Approved appointment on it
    /// overlaps the candidate window (half-open test). Returns `None` when the
    /// full window is exhausted.
    pub fn find_slot(
        &self,
        duration_minutes: i64,
        requires_refrigerated: bool,
        docks: &[Dock],
        appointments: &[Appointment],
        date: NaiveDate,
    ) -> Option<SlotProposal> {
        let mut minute_of_day = self.settings.day_start_hour * 60;
        let end_minute = self.settings.day_end_hour * 60;

        while minute_of_day < end_minute {
            let time = NaiveTime::from_num_seconds_from_midnight_opt(minute_of_day * 60, 0)?;
            let start = date.and_time(time);
            let end = start + Duration::minutes(duration_minutes);

            for dock in docks {
                if requires_refrigerated && !dock.has_safety_tag(COLD_STORAGE_TAG) {
                    continue;
                }
                let blocked = appointments
                    .iter()
                    .filter(|a| a.dock_id == dock.dock_id)
                    .any(|a| a.blocks_window(start, end));
                if !blocked {
                    return Some(SlotProposal {
                        dock_id: dock.dock_id.clone(),
                        start,
                        end,
                    });
                }
            }

            minute_of_day += self.settings.step_minutes.max(1) as u32;
        }
        None
    }
}
