//! # Command Processor

//! Serializes every state mutation of the scheduling engine into a single command
//! stream. Each command carries a oneshot responder and is processed to completion
//! before the next one, which gives one logical mutation transaction per external
//! request.

use std::sync::Arc;
use chrono::NaiveDate;
use tokio::sync::{mpsc, oneshot};
use tracing::error;
use crate::errors::{DockSchedulerError, DockSchedulerResult};
use crate::automation::{AssignmentRecord, AutomationEngine};
use crate::models::{
    local_now, Appointment, AppointmentBookedEvent, AutomationMode, OperationType, Vehicle,
    VehicleStatus, WarehouseRemovedEvent, YardEvent,
};
use crate::monitoring::{ActivityLog, ActivitySource};
use crate::rules::PredictiveMaintenanceRule;
use crate::scheduling::{SlotFinder, SlotProposal};
use crate::state_management::assignment_processor::AssignmentProcessor;
use crate::state_management::operation_processor::OperationProcessor;
use crate::state_management::yard_state_repository::YardStateRepository;

/// Represents the different commands that can be processed by the CommandProcessor
#[derive(Debug)]
pub enum YardCommand {
    RegisterVehicle {
        warehouse_id: String,
        vehicle: Vehicle,
        resp: oneshot::Sender<DockSchedulerResult<()>>,
    },
    CheckInVehicle {
        warehouse_id: String,
        vehicle_id: String,
        resp: oneshot::Sender<DockSchedulerResult<String>>,
    },
    FindSlot {
        warehouse_id: String,
        duration_minutes: i64,
        requires_refrigerated: bool,
        date: NaiveDate,
        resp: oneshot::Sender<DockSchedulerResult<SlotProposal>>,
    },
    BookAppointment {
        warehouse_id: String,
        appointment: Appointment,
        resp: oneshot::Sender<DockSchedulerResult<()>>,
    },
    StartOperation {
        warehouse_id: String,
        vehicle_id: String,
        dock_id: String,
        kind: OperationType,
        duration_minutes: i64,
        operator: String,
        resp: oneshot::Sender<DockSchedulerResult<String>>,
    },
    ReportDelay {
        warehouse_id: String,
        operation_id: String,
        reason: String,
        resp: oneshot::Sender<DockSchedulerResult<()>>,
    },
    CompleteOperation {
        warehouse_id: String,
        operation_id: String,
        resp: oneshot::Sender<DockSchedulerResult<()>>,
    },
    AutomationTick {
        warehouse_id: String,
        resp: oneshot::Sender<DockSchedulerResult<Vec<AssignmentRecord>>>,
    },
    MaintenanceSweep {
        warehouse_id: String,
        resp: oneshot::Sender<DockSchedulerResult<Vec<String>>>,
    },
    SetAutomationMode {
        mode: AutomationMode,
        resp: oneshot::Sender<()>,
    },
    RemoveWarehouse {
        warehouse_id: String,
        resp: oneshot::Sender<DockSchedulerResult<usize>>,
    },
}

/// Processes commands for the dock scheduling engine
pub struct CommandProcessor {
    command_receiver: mpsc::Receiver<YardCommand>,
    repository: Arc<YardStateRepository>,
    assignment_processor: Arc<AssignmentProcessor>,
    operation_processor: Arc<OperationProcessor>,
    automation_engine: Arc<AutomationEngine>,
    slot_finder: SlotFinder,
    maintenance_rule: PredictiveMaintenanceRule,
    activity_log: Arc<ActivityLog>,
}

impl CommandProcessor {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        command_receiver: mpsc::Receiver<YardCommand>,
        repository: Arc<YardStateRepository>,
        assignment_processor: Arc<AssignmentProcessor>,
        operation_processor: Arc<OperationProcessor>,
        automation_engine: Arc<AutomationEngine>,
        slot_finder: SlotFinder,
        maintenance_rule: PredictiveMaintenanceRule,
        activity_log: Arc<ActivityLog>,
    ) -> Self {
        Self {
            command_receiver,
            repository,
            assignment_processor,
            operation_processor,
            automation_engine,
            slot_finder,
            maintenance_rule,
            activity_log,
        }
    }

    /// Runs the command processing loop until the channel is closed.
    pub async fn run(&mut self) -> DockSchedulerResult<()> {
        while let Some(command) = self.command_receiver.recv().await {
            if let Err(e) = self.process_command(command).await {
                error!("Error processing command: {:?}", e);
                return Err(e);
            }
        }
        Ok(())
    }

    /// Processes a single command, sending the outcome back through the
    /// command's oneshot responder.
    async fn process_command(&self, command: YardCommand) -> DockSchedulerResult<()> {
        match command {
            YardCommand::RegisterVehicle {
                warehouse_id,
                vehicle,
                resp,
            } => {
                let result = self.repository.insert_vehicle(&warehouse_id, vehicle).await;
                resp.send(result).map_err(|_| {
                    DockSchedulerError::ChannelSendError(
                        "Failed to send RegisterVehicle response".to_string(),
                    )
                })?;
            }
            YardCommand::CheckInVehicle {
                warehouse_id,
                vehicle_id,
                resp,
            } => {
                let result = self
                    .assignment_processor
                    .check_in_vehicle(&warehouse_id, &vehicle_id, ActivitySource::Operator)
                    .await;
                resp.send(result).map_err(|_| {
                    DockSchedulerError::ChannelSendError(
                        "Failed to send CheckInVehicle response".to_string(),
                    )
                })?;
            }
            YardCommand::FindSlot {
                warehouse_id,
                duration_minutes,
                requires_refrigerated,
                date,
                resp,
            } => {
                let result = self
                    .handle_find_slot(&warehouse_id, duration_minutes, requires_refrigerated, date)
                    .await;
                resp.send(result).map_err(|_| {
                    DockSchedulerError::ChannelSendError(
                        "Failed to send FindSlot response".to_string(),
                    )
                })?;
            }
            YardCommand::BookAppointment {
                warehouse_id,
                appointment,
                resp,
            } => {
                let result = self.handle_book_appointment(&warehouse_id, appointment).await;
                resp.send(result).map_err(|_| {
                    DockSchedulerError::ChannelSendError(
                        "Failed to send BookAppointment response".to_string(),
                    )
                })?;
            }
            YardCommand::StartOperation {
                warehouse_id,
                vehicle_id,
                dock_id,
                kind,
                duration_minutes,
                operator,
                resp,
            } => {
                let result = self
                    .operation_processor
                    .start_operation(
                        &warehouse_id,
                        &vehicle_id,
                        &dock_id,
                        kind,
                        duration_minutes,
                        operator,
                    )
                    .await;
                resp.send(result).map_err(|_| {
                    DockSchedulerError::ChannelSendError(
                        "Failed to send StartOperation response".to_string(),
                    )
                })?;
            }
            YardCommand::ReportDelay {
                warehouse_id,
                operation_id,
                reason,
                resp,
            } => {
                let result = self
                    .operation_processor
                    .report_delay(&warehouse_id, &operation_id, reason)
                    .await;
                resp.send(result).map_err(|_| {
                    DockSchedulerError::ChannelSendError(
                        "Failed to send ReportDelay response".to_string(),
                    )
                })?;
            }
            YardCommand::CompleteOperation {
                warehouse_id,
                operation_id,
                resp,
            } => {
                let result = self
                    .operation_processor
                    .complete_operation(&warehouse_id, &operation_id)
                    .await;
                resp.send(result).map_err(|_| {
                    DockSchedulerError::ChannelSendError(
                        "Failed to send CompleteOperation response".to_string(),
                    )
                })?;
            }
            YardCommand::AutomationTick { warehouse_id, resp } => {
                let result = self.automation_engine.tick(&warehouse_id).await;
                resp.send(result).map_err(|_| {
                    DockSchedulerError::ChannelSendError(
                        "Failed to send AutomationTick response".to_string(),
                    )
                })?;
            }
            YardCommand::MaintenanceSweep { warehouse_id, resp } => {
                let result = self.handle_maintenance_sweep(&warehouse_id).await;
                resp.send(result).map_err(|_| {
                    DockSchedulerError::ChannelSendError(
                        "Failed to send MaintenanceSweep response".to_string(),
                    )
                })?;
            }
            YardCommand::SetAutomationMode { mode, resp } => {
                self.automation_engine.set_mode(mode).await;
                resp.send(()).map_err(|_| {
                    DockSchedulerError::ChannelSendError(
                        "Failed to send SetAutomationMode response".to_string(),
                    )
                })?;
            }
            YardCommand::RemoveWarehouse { warehouse_id, resp } => {
                let result = self.handle_remove_warehouse(&warehouse_id).await;
                resp.send(result).map_err(|_| {
                    DockSchedulerError::ChannelSendError(
                        "Failed to send RemoveWarehouse response".to_string(),
                    )
                })?;
            }
        }
        Ok(())
    }

    /// Handles the FindSlot command by scanning the warehouse's docks and
    /// appointment ledger for the first free window.
    async fn handle_find_slot(
        &self,
        warehouse_id: &str,
        duration_minutes: i64,
        requires_refrigerated: bool,
        date: NaiveDate,
    ) -> DockSchedulerResult<SlotProposal> {
        self.repository
            .with_state(warehouse_id, |state| {
                self.slot_finder
                    .find_slot(
                        duration_minutes,
                        requires_refrigerated,
                        &state.docks,
                        &state.appointments,
                        date,
                    )
                    .ok_or_else(|| {
                        DockSchedulerError::NoSlotAvailable(format!(
                            "{} minutes on {} (refrigerated: {})",
                            duration_minutes, date, requires_refrigerated
                        ))
                    })
            })
            .await
    }

    /// Handles the BookAppointment command.
    ///
    /// Manual bookings are validated against the same half-open overlap rule
    /// the slot finder upholds; a conflicting window is rejected rather than
    /// silently saved. Booking also registers the expected vehicle when it is
    /// not yet known.
    async fn handle_book_appointment(
        &self,
        warehouse_id: &str,
        appointment: Appointment,
    ) -> DockSchedulerResult<()> {
        let now = local_now();
        let event = self
            .repository
            .with_state_mut(warehouse_id, |state| {
                state.dock(&appointment.dock_id)?;
                if let Some(existing) = state
                    .appointments
                    .iter()
                    .filter(|a| a.dock_id == appointment.dock_id)
                    .find(|a| a.blocks_window(appointment.start_time, appointment.end_time))
                {
                    return Err(DockSchedulerError::SlotConflict(format!(
                        "dock {} already booked by appointment {} from {} to {}",
                        appointment.dock_id,
                        existing.appointment_id,
                        existing.start_time.format("%H:%M"),
                        existing.end_time.format("%H:%M"),
                    )));
                }

                if !appointment.vehicle_number.is_empty()
                    && !state
                        .vehicles
                        .iter()
                        .any(|v| v.vehicle_id == appointment.vehicle_number)
                {
                    state.vehicles.push(Vehicle {
                        vehicle_id: appointment.vehicle_number.clone(),
                        driver_name: String::new(),
                        carrier_name: appointment.customer_name.clone(),
                        vendor_id: String::new(),
                        appointment_time: appointment
                            .start_time
                            .format("%-I:%M%p")
                            .to_string(),
                        assigned_dock_id: Some(appointment.dock_id.clone()),
                        status: VehicleStatus::Approved,
                        entry_time: None,
                        exit_time: None,
                    });
                }

                let event = YardEvent::AppointmentBooked(AppointmentBookedEvent {
                    warehouse_id: warehouse_id.to_string(),
                    appointment_id: appointment.appointment_id.clone(),
                    dock_id: appointment.dock_id.clone(),
                    start_time: appointment.start_time,
                    end_time: appointment.end_time,
                    timestamp: now,
                });
                state.appointments.push(appointment);
                Ok(event)
            })
            .await?;

        self.activity_log.append(ActivitySource::Operator, &event).await;
        Ok(())
    }

    /// Handles the MaintenanceSweep command, returning the ids of docks taken
    /// out of service.
    async fn handle_maintenance_sweep(
        &self,
        warehouse_id: &str,
    ) -> DockSchedulerResult<Vec<String>> {
        let now = local_now();
        let events = self
            .repository
            .with_state_mut(warehouse_id, |state| {
                Ok(self
                    .maintenance_rule
                    .sweep(warehouse_id, &mut state.docks, now))
            })
            .await?;

        let mut flagged = Vec::new();
        for event in &events {
            if let YardEvent::DockMaintenanceFlagged(e) = event {
                flagged.push(e.dock_id.clone());
            }
            self.activity_log.append(ActivitySource::System, event).await;
        }
        Ok(flagged)
    }

    /// Handles the RemoveWarehouse command as an explicit, logged cascade.
    async fn handle_remove_warehouse(&self, warehouse_id: &str) -> DockSchedulerResult<usize> {
        let docks_removed = self.repository.remove_warehouse(warehouse_id).await?;
        let event = YardEvent::WarehouseRemoved(WarehouseRemovedEvent {
            warehouse_id: warehouse_id.to_string(),
            docks_removed,
            timestamp: local_now(),
        });
        self.activity_log.append(ActivitySource::System, &event).await;
        Ok(docks_removed)
    }
}
