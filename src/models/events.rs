//! # Yard Event Definitions

//! This module defines the `YardEvent` enum and its associated structs, which represent the
//! state changes produced by gate, operation, booking, and automation actions. Events are
//! appended to the activity log and rendered there for operators.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::models::statuses::OperationType;

/// Represents the different state changes the scheduling engine can produce.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum YardEvent {
    /// A vehicle was admitted and sent to a dock.
    VehicleCheckedIn(VehicleCheckedInEvent),
    /// A vehicle was parked in the yard because no compatible dock was free.
    VehicleSentToYard(VehicleSentToYardEvent),
    /// A vehicle left the facility.
    VehicleExited(VehicleExitedEvent),
    /// An operation started at a dock.
    OperationStarted(OperationStartedEvent),
    /// An operation was flagged as delayed.
    OperationDelayed(OperationDelayedEvent),
    /// An operation finished and the dock was freed.
    OperationCompleted(OperationCompletedEvent),
    /// An appointment was booked against a dock window.
    AppointmentBooked(AppointmentBookedEvent),
    /// A dock was taken out of service by the predictive maintenance rule.
    DockMaintenanceFlagged(DockMaintenanceFlaggedEvent),
    /// The automation loop assigned a yard vehicle to a dock.
    AutoAssignment(AutoAssignmentEvent),
    /// A warehouse and its docks were removed.
    WarehouseRemoved(WarehouseRemovedEvent),
}

impl YardEvent {
    /// Retrieves the id of the warehouse the event belongs to.
    pub fn warehouse_id(&self) -> &str {
        match self {
            YardEvent::VehicleCheckedIn(e) => &e.warehouse_id,
            YardEvent::VehicleSentToYard(e) => &e.warehouse_id,
            YardEvent::VehicleExited(e) => &e.warehouse_id,
            YardEvent::OperationStarted(e) => &e.warehouse_id,
            YardEvent::OperationDelayed(e) => &e.warehouse_id,
            YardEvent::OperationCompleted(e) => &e.warehouse_id,
            YardEvent::AppointmentBooked(e) => &e.warehouse_id,
            YardEvent::DockMaintenanceFlagged(e) => &e.warehouse_id,
            YardEvent::AutoAssignment(e) => &e.warehouse_id,
            YardEvent::WarehouseRemoved(e) => &e.warehouse_id,
        }
    }

    /// Renders a one-line operator-facing description of the event.
    pub fn describe(&self) -> String {
        match self {
            YardEvent::VehicleCheckedIn(e) => {
                format!("Vehicle {} checked in at dock {}", e.vehicle_id, e.dock_id)
            }
            YardEvent::VehicleSentToYard(e) => {
                format!("Vehicle {} sent to yard: {}", e.vehicle_id, e.reason)
            }
            YardEvent::VehicleExited(e) => {
                format!("Vehicle {} exited from dock {}", e.vehicle_id, e.dock_id)
            }
            YardEvent::OperationStarted(e) => format!(
                "{:?} operation {} started for vehicle {} at dock {}",
                e.kind, e.operation_id, e.vehicle_id, e.dock_id
            ),
            YardEvent::OperationDelayed(e) => {
                format!("Operation {} delayed: {}", e.operation_id, e.reason)
            }
            YardEvent::OperationCompleted(e) => format!(
                "Operation {} completed, dock {} released",
                e.operation_id, e.dock_id
            ),
            YardEvent::AppointmentBooked(e) => format!(
                "Appointment {} booked at dock {} from {} to {}",
                e.appointment_id,
                e.dock_id,
                e.start_time.format("%H:%M"),
                e.end_time.format("%H:%M")
            ),
            YardEvent::DockMaintenanceFlagged(e) => format!(
                "Dock {} flagged for maintenance after {} operations",
                e.dock_id, e.operations_since_maintenance
            ),
            YardEvent::AutoAssignment(e) => format!(
                "Automation assigned vehicle {} to dock {}",
                e.vehicle_id, e.dock_id
            ),
            YardEvent::WarehouseRemoved(e) => format!(
                "Warehouse {} removed along with {} docks",
                e.warehouse_id, e.docks_removed
            ),
        }
    }
}

/// A vehicle was admitted and sent to a dock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleCheckedInEvent {
    pub warehouse_id: String,
    pub vehicle_id: String,
    pub dock_id: String,
    pub timestamp: NaiveDateTime,
}

/// A vehicle was parked in the yard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleSentToYardEvent {
    pub warehouse_id: String,
    pub vehicle_id: String,
    pub reason: String,
    pub timestamp: NaiveDateTime,
}

/// A vehicle left the facility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleExitedEvent {
    pub warehouse_id: String,
    pub vehicle_id: String,
    pub dock_id: String,
    pub timestamp: NaiveDateTime,
}

/// An operation started at a dock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationStartedEvent {
    pub warehouse_id: String,
    pub operation_id: String,
    pub vehicle_id: String,
    pub dock_id: String,
    pub kind: OperationType,
    pub timestamp: NaiveDateTime,
}

/// An operation was flagged as delayed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationDelayedEvent {
    pub warehouse_id: String,
    pub operation_id: String,
    pub reason: String,
    pub timestamp: NaiveDateTime,
}

/// An operation finished and the dock was freed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationCompletedEvent {
    pub warehouse_id: String,
    pub operation_id: String,
    pub vehicle_id: String,
    pub dock_id: String,
    pub timestamp: NaiveDateTime,
}

/// An appointment was booked against a dock window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentBookedEvent {
    pub warehouse_id: String,
    pub appointment_id: String,
    pub dock_id: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub timestamp: NaiveDateTime,
}

/// A dock was taken out of service by the predictive maintenance rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DockMaintenanceFlaggedEvent {
    pub warehouse_id: String,
    pub dock_id: String,
    pub operations_since_maintenance: u32,
    pub timestamp: NaiveDateTime,
}

/// The automation loop assigned a yard vehicle to a dock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoAssignmentEvent {
    pub warehouse_id: String,
    pub vehicle_id: String,
    pub dock_id: String,
    pub timestamp: NaiveDateTime,
}

/// A warehouse and its docks were removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarehouseRemovedEvent {
    pub warehouse_id: String,
    pub docks_removed: usize,
    pub timestamp: NaiveDateTime,
}
