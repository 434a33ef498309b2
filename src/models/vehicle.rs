//! # Vehicle Representation

//! This module defines the `Vehicle` struct, which represents a carrier vehicle visiting the facility,
//! together with the guarded, monotonic status transitions observed by every gate and automation operation.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::errors::{DockSchedulerError, DockSchedulerResult};
use crate::models::statuses::VehicleStatus;

/// Represents a vehicle visiting the facility. Vehicles are never hard-deleted;
/// history is retained after exit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// The vehicle plate or reference number; unique within a warehouse.
    pub vehicle_id: String,
    /// The driver's name.
    pub driver_name: String,
    /// The carrier company name.
    pub carrier_name: String,
    /// The vendor the visit belongs to.
    pub vendor_id: String,
    /// The scheduled appointment time as a 12-hour clock string (e.g. "9:30AM").
    /// Parsed by `scheduling::appointment_time`; malformed values sort last in
    /// automation priority.
    pub appointment_time: String,
    /// The dock originally scheduled for the vehicle, preferred by the assignment engine.
    pub assigned_dock_id: Option<String>,
    /// The current lifecycle status of the vehicle.
    pub status: VehicleStatus,
    /// When the vehicle entered the facility.
    pub entry_time: Option<NaiveDateTime>,
    /// When the vehicle left the facility.
    pub exit_time: Option<NaiveDateTime>,
}

impl Vehicle {
    /// Attempts a status transition, enforcing the monotonic lifecycle
    /// Approved -> {Entered | Yard} -> Entered (from Yard) -> Exited.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the transition is legal and was applied
    /// * `Err(DockSchedulerError::InvalidTransition)` otherwise
    pub fn transition_to(&mut self, next: VehicleStatus) -> DockSchedulerResult<()> {
        let allowed = matches!(
            (self.status, next),
            (VehicleStatus::Approved, VehicleStatus::Entered)
                | (VehicleStatus::Approved, VehicleStatus::Yard)
                | (VehicleStatus::Yard, VehicleStatus::Entered)
                | (VehicleStatus::Entered, VehicleStatus::Exited)
        );
        if !allowed {
            return Err(DockSchedulerError::InvalidTransition(format!(
                "vehicle {}: {:?} -> {:?}",
                self.vehicle_id, self.status, next
            )));
        }
        self.status = next;
        Ok(())
    }

    /// Admits the vehicle to the given dock, stamping the entry time.
    pub fn check_in(&mut self, dock_id: &str, now: NaiveDateTime) -> DockSchedulerResult<()> {
        self.transition_to(VehicleStatus::Entered)?;
        self.assigned_dock_id = Some(dock_id.to_string());
        self.entry_time = Some(now);
        Ok(())
    }

    /// Moves the vehicle into the yard to wait for a compatible dock.
    pub fn send_to_yard(&mut self) -> DockSchedulerResult<()> {
        self.transition_to(VehicleStatus::Yard)
    }

    /// Records the vehicle leaving the facility, stamping the exit time.
    pub fn exit(&mut self, now: NaiveDateTime) -> DockSchedulerResult<()> {
        self.transition_to(VehicleStatus::Exited)?;
        self.exit_time = Some(now);
        Ok(())
    }

    pub fn is_in_yard(&self) -> bool {
        self.status == VehicleStatus::Yard
    }
}
