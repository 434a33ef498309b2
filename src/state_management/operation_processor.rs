//! # Operation Processor

//! Drives the operation lifecycle (start, delay, complete) against the facility state.
//! Completing an operation also frees the dock, counts the operation toward the
//! maintenance threshold, and marks the vehicle Exited.

use std::sync::Arc;
use tracing::info;
use crate::errors::{DockSchedulerError, DockSchedulerResult};
use crate::models::{
    local_now, Operation, OperationCompletedEvent, OperationDelayedEvent, OperationStartedEvent,
    OperationType, VehicleExitedEvent, YardEvent,
};
use crate::monitoring::{ActivityLog, ActivitySource};
use crate::state_management::yard_state_repository::YardStateRepository;

pub struct OperationProcessor {
    repository: Arc<YardStateRepository>,
    activity_log: Arc<ActivityLog>,
}

impl OperationProcessor {
    pub fn new(repository: Arc<YardStateRepository>, activity_log: Arc<ActivityLog>) -> Self {
        Self {
            repository,
            activity_log,
        }
    }

    /// Starts an operation for a vehicle+dock pair.
    ///
    /// Precondition: the vehicle has no other non-Completed operation.
    ///
    /// # Returns
    ///
    /// The id of the newly created operation.
    pub async fn start_operation(
        &self,
        warehouse_id: &str,
        vehicle_id: &str,
        dock_id: &str,
        kind: OperationType,
        duration_minutes: i64,
        operator: String,
    ) -> DockSchedulerResult<String> {
        let now = local_now();
        let operation_id = self
            .repository
            .with_state_mut(warehouse_id, |state| {
                state.vehicle(vehicle_id)?;
                state.dock(dock_id)?;
                if state
                    .operations
                    .iter()
                    .any(|o| o.vehicle_id == vehicle_id && o.is_active())
                {
                    return Err(DockSchedulerError::StateError(format!(
                        "vehicle {} already has an active operation",
                        vehicle_id
                    )));
                }
                let operation_id = format!("OP-{:04}", state.operations.len() + 1);
                state.operations.push(Operation::start(
                    operation_id.clone(),
                    vehicle_id.to_string(),
                    dock_id.to_string(),
                    kind,
                    operator,
                    now,
                    duration_minutes,
                ));
                Ok(operation_id)
            })
            .await?;

        info!(
            "Started {:?} operation {} for vehicle {} at dock {}",
            kind, operation_id, vehicle_id, dock_id
        );
        let event = YardEvent::OperationStarted(OperationStartedEvent {
            warehouse_id: warehouse_id.to_string(),
            operation_id: operation_id.clone(),
            vehicle_id: vehicle_id.to_string(),
            dock_id: dock_id.to_string(),
            kind,
            timestamp: now,
        });
        self.activity_log.append(ActivitySource::Operator, &event).await;
        Ok(operation_id)
    }

    /// Flags an in-progress operation as delayed with a reason.
    /// The estimated completion time is left unchanged.
    pub async fn report_delay(
        &self,
        warehouse_id: &str,
        operation_id: &str,
        reason: String,
    ) -> DockSchedulerResult<()> {
        let now = local_now();
        self.repository
            .with_state_mut(warehouse_id, |state| {
                let operation = state.operation_mut(operation_id)?;
                if !operation.is_active() {
                    return Err(DockSchedulerError::StateError(format!(
                        "operation {} is already completed",
                        operation_id
                    )));
                }
                operation.report_delay(reason.clone());
                Ok(())
            })
            .await?;

        let event = YardEvent::OperationDelayed(OperationDelayedEvent {
            warehouse_id: warehouse_id.to_string(),
            operation_id: operation_id.to_string(),
            reason,
            timestamp: now,
        });
        self.activity_log.append(ActivitySource::Operator, &event).await;
        Ok(())
    }

    /// Completes an operation: stamps the actual completion time, frees the
    /// dock, and marks the vehicle Exited with an exit stamp.
    pub async fn complete_operation(
        &self,
        warehouse_id: &str,
        operation_id: &str,
    ) -> DockSchedulerResult<()> {
        let now = local_now();
        let (vehicle_id, dock_id) = self
            .repository
            .with_state_mut(warehouse_id, |state| {
                let operation = state
                    .operations
                    .iter()
                    .find(|o| o.operation_id == operation_id)
                    .ok_or_else(|| {
                        DockSchedulerError::OperationNotFound(operation_id.to_string())
                    })?;
                if !operation.is_active() {
                    return Err(DockSchedulerError::StateError(format!(
                        "operation {} is already completed",
                        operation_id
                    )));
                }
                let vehicle_id = operation.vehicle_id.clone();
                let dock_id = operation.dock_id.clone();

                // Validate all references before mutating anything.
                state.vehicle(&vehicle_id)?;
                state.dock(&dock_id)?;

                state.operation_mut(operation_id)?.complete(now);
                state.dock_mut(&dock_id)?.release();
                state.vehicle_mut(&vehicle_id)?.exit(now)?;
                Ok((vehicle_id, dock_id))
            })
            .await?;

        info!(
            "Completed operation {}; dock {} released, vehicle {} exited",
            operation_id, dock_id, vehicle_id
        );
        let completed = YardEvent::OperationCompleted(OperationCompletedEvent {
            warehouse_id: warehouse_id.to_string(),
            operation_id: operation_id.to_string(),
            vehicle_id: vehicle_id.clone(),
            dock_id: dock_id.clone(),
            timestamp: now,
        });
        self.activity_log
            .append(ActivitySource::Operator, &completed)
            .await;
        let exited = YardEvent::VehicleExited(VehicleExitedEvent {
            warehouse_id: warehouse_id.to_string(),
            vehicle_id,
            dock_id,
            timestamp: now,
        });
        self.activity_log.append(ActivitySource::Operator, &exited).await;
        Ok(())
    }
}
