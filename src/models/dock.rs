//! # Dock Representation

//! This module defines the `Dock` struct, which represents the state and data associated with a single loading/unloading bay.
//! The `Dock` struct carries the occupancy status, the compatibility and safety tag sets consulted by the assignment engine,
//! and the operations-since-maintenance counter consumed by the predictive maintenance rule.

use serde::{Deserialize, Serialize};
use crate::models::local_now;
use crate::models::statuses::DockStatus;
use crate::models::timeslot::OperatingHours;
use crate::models::appointment::AppointmentRequirements;

/// The safety/compliance tag marking a dock as refrigeration-capable.
pub const COLD_STORAGE_TAG: &str = "Cold Storage";

/// Represents the state and data associated with a single dock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dock {
    /// The unique identifier for the dock.
    pub dock_id: String,
    /// The id of the warehouse this dock belongs to (back-reference, not ownership).
    pub warehouse_id: String,
    /// Human-readable dock name.
    pub name: String,
    /// The current occupancy status of the dock. Canonical for occupancy.
    pub status: DockStatus,
    /// Bay or location label within the warehouse.
    pub bay: String,
    /// Maximum vehicle capacity class the dock can take.
    pub capacity: u32,
    /// The daily operating window for this dock.
    pub operating_hours: OperatingHours,
    /// Vehicle types the dock can serve.
    pub compatible_vehicle_types: Vec<String>,
    /// Safety/compliance tags; contains `Cold Storage` when the dock is refrigeration-capable.
    pub safety_tags: Vec<String>,
    /// Operations completed since the last maintenance, consumed by the predictive maintenance rule.
    pub operations_since_maintenance: u32,
    /// Free-form operator or maintenance notes.
    pub notes: Option<String>,
}

impl Dock {
    pub fn is_available(&self) -> bool {
        self.status == DockStatus::Available
    }

    /// Whether the dock carries the given safety/compliance tag.
    pub fn has_safety_tag(&self, tag: &str) -> bool {
        self.safety_tags.iter().any(|t| t == tag)
    }

    /// Whether the dock satisfies the requirements derived from an appointment.
    ///
    /// An absent requirement is satisfied by any dock.
    pub fn satisfies(&self, requirements: &AppointmentRequirements) -> bool {
        !requirements.is_refrigerated || self.has_safety_tag(COLD_STORAGE_TAG)
    }

    /// Marks the dock as occupied by a checked-in vehicle.
    pub fn occupy(&mut self) {
        self.status = DockStatus::Occupied;
    }

    /// Frees the dock after a completed operation and counts the operation
    /// toward the maintenance threshold.
    pub fn release(&mut self) {
        self.status = DockStatus::Available;
        self.operations_since_maintenance += 1;
    }

    /// Takes the dock out of service with an auto-generated maintenance note.
    pub fn flag_maintenance(&mut self) {
        self.status = DockStatus::Maintenance;
        self.notes = Some(format!(
            "Flagged for maintenance after {} operations at {}",
            self.operations_since_maintenance,
            local_now().format("%Y-%m-%d %H:%M"),
        ));
    }

    /// Returns the dock to service and resets the maintenance counter.
    pub fn clear_maintenance(&mut self) {
        self.status = DockStatus::Available;
        self.operations_since_maintenance = 0;
        self.notes = None;
    }
}
