//! # Assignment Processor

//! Applies the assignment engine's decision to the facility state: on success the
//! vehicle is admitted (Entered, entry stamp, dock Occupied) and an activity entry is
//! appended; when no compatible dock is free the vehicle is parked in the yard and the
//! failure is surfaced to the caller rather than silently partially matched.

use std::sync::Arc;
use tracing::info;
use crate::errors::{DockSchedulerError, DockSchedulerResult};
use crate::models::{
    local_now, AutoAssignmentEvent, VehicleCheckedInEvent, VehicleSentToYardEvent, VehicleStatus,
    YardEvent,
};
use crate::monitoring::{ActivityLog, ActivitySource};
use crate::scheduling::{assign, AssignmentOutcome};
use crate::state_management::yard_state_repository::YardStateRepository;

/// What happened to the vehicle inside the mutation transaction.
enum CheckInDisposition {
    Assigned { dock_id: String },
    Yarded { newly_yarded: bool },
}

pub struct AssignmentProcessor {
    repository: Arc<YardStateRepository>,
    activity_log: Arc<ActivityLog>,
}

impl AssignmentProcessor {
    pub fn new(repository: Arc<YardStateRepository>, activity_log: Arc<ActivityLog>) -> Self {
        Self {
            repository,
            activity_log,
        }
    }

    /// Attempts to admit a waiting vehicle (gate arrival or yard pull) to a dock.
    ///
    /// Runs the assignment engine and applies its side effects atomically. On
    /// `NoneAvailable` a gate vehicle is moved to the yard; a vehicle already in
    /// the yard stays put. Either way the failure is reported as
    /// `NoCompatibleDock`.
    ///
    /// # Returns
    ///
    /// The id of the dock the vehicle was sent to.
    pub async fn check_in_vehicle(
        &self,
        warehouse_id: &str,
        vehicle_id: &str,
        source: ActivitySource,
    ) -> DockSchedulerResult<String> {
        let now = local_now();
        let disposition = self
            .repository
            .with_state_mut(warehouse_id, |state| {
                let vehicle = state.vehicle(vehicle_id)?.clone();
                if !matches!(
                    vehicle.status,
                    VehicleStatus::Approved | VehicleStatus::Yard
                ) {
                    return Err(DockSchedulerError::InvalidTransition(format!(
                        "vehicle {} cannot check in from {:?}",
                        vehicle_id, vehicle.status
                    )));
                }

                match assign(&vehicle, &state.docks, &state.appointments) {
                    AssignmentOutcome::Assigned { dock_id, .. } => {
                        state.vehicle_mut(vehicle_id)?.check_in(&dock_id, now)?;
                        state.dock_mut(&dock_id)?.occupy();
                        Ok(CheckInDisposition::Assigned { dock_id })
                    }
                    AssignmentOutcome::NoneAvailable => {
                        let newly_yarded = vehicle.status == VehicleStatus::Approved;
                        if newly_yarded {
                            state.vehicle_mut(vehicle_id)?.send_to_yard()?;
                        }
                        Ok(CheckInDisposition::Yarded { newly_yarded })
                    }
                }
            })
            .await?;

        match disposition {
            CheckInDisposition::Assigned { dock_id } => {
                info!(
                    "Vehicle {} assigned to dock {} in warehouse {}",
                    vehicle_id, dock_id, warehouse_id
                );
                let event = match source {
                    ActivitySource::Automation => YardEvent::AutoAssignment(AutoAssignmentEvent {
                        warehouse_id: warehouse_id.to_string(),
                        vehicle_id: vehicle_id.to_string(),
                        dock_id: dock_id.clone(),
                        timestamp: now,
                    }),
                    _ => YardEvent::VehicleCheckedIn(VehicleCheckedInEvent {
                        warehouse_id: warehouse_id.to_string(),
                        vehicle_id: vehicle_id.to_string(),
                        dock_id: dock_id.clone(),
                        timestamp: now,
                    }),
                };
                self.activity_log.append(source, &event).await;
                Ok(dock_id)
            }
            CheckInDisposition::Yarded { newly_yarded } => {
                if newly_yarded {
                    let event = YardEvent::VehicleSentToYard(VehicleSentToYardEvent {
                        warehouse_id: warehouse_id.to_string(),
                        vehicle_id: vehicle_id.to_string(),
                        reason: "no compatible dock available".to_string(),
                        timestamp: now,
                    });
                    self.activity_log.append(source, &event).await;
                }
                Err(DockSchedulerError::NoCompatibleDock(vehicle_id.to_string()))
            }
        }
    }
}
