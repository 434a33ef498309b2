//! # Appointment Representation

//! This module defines the `Appointment` struct, the ledger entry reserving a dock for a vehicle
//! during a time window, together with the half-open overlap test upheld by the slot finder and
//! validated on manual booking.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use crate::models::statuses::{AppointmentStatus, AppointmentType};

/// Optional requirements attached to an appointment, derived by the assignment
/// engine when matching a vehicle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRequirements {
    /// Whether the visit needs a refrigeration-capable dock.
    #[serde(default)]
    pub is_refrigerated: bool,
}

/// A scheduled or walk-in reservation of a dock for a vehicle during a time window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    /// The unique identifier for the appointment.
    pub appointment_id: String,
    /// Human-readable appointment code shown to operators.
    pub code: String,
    /// The company or customer the visit belongs to.
    pub customer_name: String,
    /// The dock reserved by this appointment.
    pub dock_id: String,
    /// Start of the reserved window (inclusive).
    pub start_time: NaiveDateTime,
    /// End of the reserved window (exclusive); kept consistent with start + duration.
    pub end_time: NaiveDateTime,
    /// Expected duration in minutes.
    pub duration_minutes: i64,
    /// The current lifecycle status of the appointment.
    pub status: AppointmentStatus,
    /// The direction of goods movement.
    pub kind: AppointmentType,
    /// The plate/reference of the vehicle expected for this appointment.
    pub vehicle_number: String,
    /// Optional dock requirements for the visit.
    #[serde(default)]
    pub requirements: AppointmentRequirements,
}

impl Appointment {
    /// Creates an appointment with `end_time` derived from the duration.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        appointment_id: String,
        code: String,
        customer_name: String,
        dock_id: String,
        start_time: NaiveDateTime,
        duration_minutes: i64,
        kind: AppointmentType,
        vehicle_number: String,
        requirements: AppointmentRequirements,
    ) -> Self {
        Self {
            appointment_id,
            code,
            customer_name,
            dock_id,
            start_time,
            end_time: start_time + Duration::minutes(duration_minutes),
            duration_minutes,
            status: AppointmentStatus::Draft,
            kind,
            vehicle_number,
            requirements,
        }
    }

    /// Half-open interval overlap test against `[start, end)`.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.start_time < end && self.end_time > start
    }

    /// Whether this appointment reserves its dock against the given window.
    ///
    /// Only Draft and Approved appointments block; Cancelled and Completed
    /// appointments release their window.
    pub fn blocks_window(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        matches!(
            self.status,
            AppointmentStatus::Draft | AppointmentStatus::Approved
        ) && self.overlaps(start, end)
    }
}
