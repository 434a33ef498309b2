//! # Dock Assignment Engine

//! Pure decision logic selecting a compatible, available dock for a waiting vehicle.
//! The engine never mutates state; on success the caller is responsible for the
//! documented side effects (vehicle to Entered with an entry stamp, dock to Occupied,
//! and an activity-log entry).

use crate::models::{Appointment, AppointmentRequirements, Dock, Vehicle};

/// The outcome of a dock assignment attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum AssignmentOutcome {
    /// A dock was selected for the vehicle.
    Assigned {
        /// The selected dock id.
        dock_id: String,
        /// Whether the vehicle's originally scheduled dock could be kept.
        kept_scheduled_dock: bool,
    },
    /// No available dock satisfies the vehicle's requirements.
    NoneAvailable,
}

/// Derives the dock requirements for a vehicle from its matched appointment.
///
/// The match is the first appointment whose vehicle number equals the vehicle
/// id; zero or one match is expected. A vehicle with no appointment match is
/// treated as having no special requirements, never rejected for that reason.
pub fn requirements_for(vehicle: &Vehicle, appointments: &[Appointment]) -> AppointmentRequirements {
    appointments
        .iter()
        .find(|a| a.vehicle_number == vehicle.vehicle_id)
        .map(|a| a.requirements)
        .unwrap_or_default()
}

/// Selects a dock for the given vehicle.
///
/// The rules, in order:
/// 1. Only docks with status Available are candidates; none means `NoneAvailable`.
/// 2. Requirements come from the vehicle's matched appointment, if any.
/// 3. The vehicle's originally scheduled dock wins whenever it is among the
///    candidates and satisfies the requirements.
/// 4. Otherwise the first compatible dock in stored order wins. This is an
///    explicit, reproducible tie-break, not an optimization.
/// 5. If no candidate satisfies the requirements, `NoneAvailable`.
pub fn assign(vehicle: &Vehicle, docks: &[Dock], appointments: &[Appointment]) -> AssignmentOutcome {
    let available: Vec<&Dock> = docks.iter().filter(|d| d.is_available()).collect();
    if available.is_empty() {
        return AssignmentOutcome::NoneAvailable;
    }

    let requirements = requirements_for(vehicle, appointments);

    if let Some(scheduled_id) = &vehicle.assigned_dock_id {
        if let Some(dock) = available.iter().find(|d| &d.dock_id == scheduled_id) {
            if dock.satisfies(&requirements) {
                return AssignmentOutcome::Assigned {
                    dock_id: dock.dock_id.clone(),
                    kept_scheduled_dock: true,
                };
            }
        }
    }

    match available.iter().find(|d| d.satisfies(&requirements)) {
        Some(dock) => AssignmentOutcome::Assigned {
            dock_id: dock.dock_id.clone(),
            kept_scheduled_dock: false,
        },
        None => AssignmentOutcome::NoneAvailable,
    }
}
