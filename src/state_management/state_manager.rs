//! # Yard State Manager

//! The facade over the scheduling engine: wires the repository, processors, automation
//! engine, and command channel together and exposes one async method per engine
//! operation. Mutations travel through the command channel; snapshot reads go straight
//! to the repository.

use std::sync::Arc;
use chrono::NaiveDate;
use tokio::sync::{mpsc, oneshot};
use crate::automation::{AssignmentRecord, AutomationEngine};
use crate::config::Settings;
use crate::errors::{DockSchedulerError, DockSchedulerResult};
use crate::models::{
    Appointment, AutomationMode, Dock, Operation, OperationType, TimeSlotWindow, Vehicle,
};
use crate::monitoring::{ActivityEntry, ActivityLog};
use crate::rules::PredictiveMaintenanceRule;
use crate::scheduling::{SlotFinder, SlotProposal};
use crate::state_management::assignment_processor::AssignmentProcessor;
use crate::state_management::command_processor::{CommandProcessor, YardCommand};
use crate::state_management::operation_processor::OperationProcessor;
use crate::state_management::yard_state_repository::YardStateRepository;

/// Manages the overall state of the dock scheduling engine.
#[derive(Clone)]
pub struct YardStateManager {
    command_sender: mpsc::Sender<YardCommand>,
    repository: Arc<YardStateRepository>,
    activity_log: Arc<ActivityLog>,
}

impl YardStateManager {
    /// Creates a new `YardStateManager` along with its `CommandProcessor`.
    ///
    /// The caller is responsible for spawning `CommandProcessor::run`.
    pub async fn new(settings: &Settings) -> DockSchedulerResult<(Self, CommandProcessor)> {
        let repository = Arc::new(YardStateRepository::new());
        repository.initialize_from_settings(settings).await?;
        let activity_log = Arc::new(ActivityLog::new(settings.activity_log.capacity));

        let (command_sender, command_receiver) = mpsc::channel(100);

        let assignment_processor = Arc::new(AssignmentProcessor::new(
            Arc::clone(&repository),
            Arc::clone(&activity_log),
        ));
        let operation_processor = Arc::new(OperationProcessor::new(
            Arc::clone(&repository),
            Arc::clone(&activity_log),
        ));
        let automation_engine = Arc::new(AutomationEngine::new(
            Arc::clone(&repository),
            Arc::clone(&assignment_processor),
            settings.automation.initial_mode,
        ));

        let command_processor = CommandProcessor::new(
            command_receiver,
            Arc::clone(&repository),
            assignment_processor,
            operation_processor,
            automation_engine,
            SlotFinder::new(settings.slot_search),
            PredictiveMaintenanceRule::new(settings.maintenance.operations_threshold),
            Arc::clone(&activity_log),
        );

        Ok((
            Self {
                command_sender,
                repository,
                activity_log,
            },
            command_processor,
        ))
    }

    async fn send(&self, command: YardCommand) -> DockSchedulerResult<()> {
        self.command_sender
            .send(command)
            .await
            .map_err(DockSchedulerError::from)
    }

    /// Registers a vehicle arriving for a spot visit.
    pub async fn register_vehicle(
        &self,
        warehouse_id: &str,
        vehicle: Vehicle,
    ) -> DockSchedulerResult<()> {
        let (resp, rx) = oneshot::channel();
        self.send(YardCommand::RegisterVehicle {
            warehouse_id: warehouse_id.to_string(),
            vehicle,
            resp,
        })
        .await?;
        rx.await?
    }

    /// Attempts to admit a waiting vehicle to a compatible, available dock.
    ///
    /// # Returns
    ///
    /// The assigned dock id, or `NoCompatibleDock` after the vehicle is parked
    /// in the yard.
    pub async fn check_in_vehicle(
        &self,
        warehouse_id: &str,
        vehicle_id: &str,
    ) -> DockSchedulerResult<String> {
        let (resp, rx) = oneshot::channel();
        self.send(YardCommand::CheckInVehicle {
            warehouse_id: warehouse_id.to_string(),
            vehicle_id: vehicle_id.to_string(),
            resp,
        })
        .await?;
        rx.await?
    }

    /// Finds the first free appointment window of the given duration.
    pub async fn find_slot(
        &self,
        warehouse_id: &str,
        duration_minutes: i64,
        requires_refrigerated: bool,
        date: NaiveDate,
    ) -> DockSchedulerResult<SlotProposal> {
        let (resp, rx) = oneshot::channel();
        self.send(YardCommand::FindSlot {
            warehouse_id: warehouse_id.to_string(),
            duration_minutes,
            requires_refrigerated,
            date,
            resp,
        })
        .await?;
        rx.await?
    }

    /// Books an appointment, validating the window against existing bookings
    /// on the same dock.
    pub async fn book_appointment(
        &self,
        warehouse_id: &str,
        appointment: Appointment,
    ) -> DockSchedulerResult<()> {
        let (resp, rx) = oneshot::channel();
        self.send(YardCommand::BookAppointment {
            warehouse_id: warehouse_id.to_string(),
            appointment,
            resp,
        })
        .await?;
        rx.await?
    }

    /// Starts an operation for a vehicle+dock pair.
    pub async fn start_operation(
        &self,
        warehouse_id: &str,
        vehicle_id: &str,
        dock_id: &str,
        kind: OperationType,
        duration_minutes: i64,
        operator: &str,
    ) -> DockSchedulerResult<String> {
        let (resp, rx) = oneshot::channel();
        self.send(YardCommand::StartOperation {
            warehouse_id: warehouse_id.to_string(),
            vehicle_id: vehicle_id.to_string(),
            dock_id: dock_id.to_string(),
            kind,
            duration_minutes,
            operator: operator.to_string(),
            resp,
        })
        .await?;
        rx.await?
    }

    /// Flags an operation as delayed.
    pub async fn report_delay(
        &self,
        warehouse_id: &str,
        operation_id: &str,
        reason: &str,
    ) -> DockSchedulerResult<()> {
        let (resp, rx) = oneshot::channel();
        self.send(YardCommand::ReportDelay {
            warehouse_id: warehouse_id.to_string(),
            operation_id: operation_id.to_string(),
            reason: reason.to_string(),
            resp,
        })
        .await?;
        rx.await?
    }

    /// Completes an operation, freeing its dock and exiting its vehicle.
    pub async fn complete_operation(
        &self,
        warehouse_id: &str,
        operation_id: &str,
    ) -> DockSchedulerResult<()> {
        let (resp, rx) = oneshot::channel();
        self.send(YardCommand::CompleteOperation {
            warehouse_id: warehouse_id.to_string(),
            operation_id: operation_id.to_string(),
            resp,
        })
        .await?;
        rx.await?
    }

    /// Runs one automation reconciliation tick for a warehouse.
    pub async fn run_automation_tick(
        &self,
        warehouse_id: &str,
    ) -> DockSchedulerResult<Vec<AssignmentRecord>> {
        let (resp, rx) = oneshot::channel();
        self.send(YardCommand::AutomationTick {
            warehouse_id: warehouse_id.to_string(),
            resp,
        })
        .await?;
        rx.await?
    }

    /// Runs the predictive maintenance sweep for a warehouse.
    pub async fn run_maintenance_sweep(
        &self,
        warehouse_id: &str,
    ) -> DockSchedulerResult<Vec<String>> {
        let (resp, rx) = oneshot::channel();
        self.send(YardCommand::MaintenanceSweep {
            warehouse_id: warehouse_id.to_string(),
            resp,
        })
        .await?;
        rx.await?
    }

    /// Switches the automation mode.
    pub async fn set_automation_mode(&self, mode: AutomationMode) -> DockSchedulerResult<()> {
        let (resp, rx) = oneshot::channel();
        self.send(YardCommand::SetAutomationMode { mode, resp }).await?;
        rx.await.map_err(DockSchedulerError::from)
    }

    /// Removes a warehouse and its docks as an explicit, logged cascade.
    pub async fn remove_warehouse(&self, warehouse_id: &str) -> DockSchedulerResult<usize> {
        let (resp, rx) = oneshot::channel();
        self.send(YardCommand::RemoveWarehouse {
            warehouse_id: warehouse_id.to_string(),
            resp,
        })
        .await?;
        rx.await?
    }

    pub async fn get_dock(&self, warehouse_id: &str, dock_id: &str) -> DockSchedulerResult<Dock> {
        self.repository.get_dock(warehouse_id, dock_id).await
    }

    pub async fn get_vehicle(
        &self,
        warehouse_id: &str,
        vehicle_id: &str,
    ) -> DockSchedulerResult<Vehicle> {
        self.repository.get_vehicle(warehouse_id, vehicle_id).await
    }

    pub async fn get_docks(&self, warehouse_id: &str) -> DockSchedulerResult<Vec<Dock>> {
        self.repository.get_docks(warehouse_id).await
    }

    pub async fn get_operations(&self, warehouse_id: &str) -> DockSchedulerResult<Vec<Operation>> {
        self.repository.get_operations(warehouse_id).await
    }

    /// The booking windows applying to the given date.
    pub async fn booking_windows(
        &self,
        warehouse_id: &str,
        date: NaiveDate,
    ) -> DockSchedulerResult<Vec<TimeSlotWindow>> {
        self.repository.booking_windows(warehouse_id, date).await
    }

    /// The most recent activity feed entries, oldest first.
    pub async fn recent_activity(&self) -> Vec<ActivityEntry> {
        self.activity_log.recent().await
    }

    pub fn get_repository(&self) -> Arc<YardStateRepository> {
        Arc::clone(&self.repository)
    }
}
