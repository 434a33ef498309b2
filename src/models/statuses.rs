//! # Dock Scheduler State Enums

//! This module defines the enums representing the various states within the dock scheduling engine.
//! These enums enable structured and type-safe representation of dock, vehicle, appointment, and operation states, enhancing code clarity and maintainability.

use serde::{Deserialize, Serialize};
use derive_more::FromStr;

/// Represents the different states a dock can be in.
///
/// `status` is the canonical source of truth for occupancy; the appointment
/// ledger is the canonical source for time windows.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Serialize, Deserialize, FromStr)]
pub enum DockStatus {
    /// The dock is free and can receive a vehicle.
    Available,
    /// A vehicle is currently at the dock.
    Occupied,
    /// The dock is out of service for maintenance.
    Maintenance,
}

/// Represents the lifecycle states of a vehicle visiting the facility.
///
/// Transitions are monotonic: Approved -> {Entered | Yard} -> Entered (from Yard) -> Exited.
/// Exited is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Serialize, Deserialize, FromStr)]
pub enum VehicleStatus {
    /// The vehicle has an approved appointment but has not arrived at the gate.
    Approved,
    /// The vehicle has been admitted and is at a dock.
    Entered,
    /// The vehicle is waiting in the yard for a compatible dock.
    Yard,
    /// The vehicle has left the facility.
    Exited,
}

/// Represents the lifecycle states of an appointment.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Serialize, Deserialize, FromStr)]
pub enum AppointmentStatus {
    /// The appointment has been created but not confirmed.
    Draft,
    /// The appointment is confirmed.
    Approved,
    /// The appointment has been cancelled and no longer blocks its window.
    Cancelled,
    /// The visit took place and the appointment is closed.
    Completed,
}

/// Represents the direction of goods movement for an appointment.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Serialize, Deserialize, FromStr)]
pub enum AppointmentType {
    /// Goods arriving at the warehouse.
    Inbound,
    /// Goods leaving the warehouse.
    Outbound,
    /// Goods moving between warehouses.
    Transfer,
}

/// Represents the kind of physical work performed at a dock.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Serialize, Deserialize, FromStr)]
pub enum OperationType {
    /// Loading goods onto the vehicle.
    Loading,
    /// Unloading goods from the vehicle.
    Unloading,
    /// Inspecting the vehicle or its cargo.
    Inspection,
}

/// Represents the lifecycle states of an operation.
///
/// Delayed is a flagged sub-state of InProgress, not independently terminal;
/// Completed is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Serialize, Deserialize, FromStr)]
pub enum OperationStatus {
    /// Work at the dock is underway.
    InProgress,
    /// Work is underway but flagged as running behind, with a reason recorded.
    Delayed,
    /// Work has finished.
    Completed,
}

/// Represents whether yard vehicles are assigned to docks automatically or by an operator.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Serialize, Deserialize, FromStr)]
pub enum AutomationMode {
    /// An operator triggers every assignment.
    Manual,
    /// The automation loop assigns yard vehicles on a timer.
    Automatic,
}
