//! # Yard State Repository

//! Holds the whole facility state (warehouses, docks, vehicles, appointments, operations)
//! behind a single `RwLock`. Every mutation goes through `with_state_mut`, which is the
//! one mutation boundary in the system: each closure runs as one logical transaction,
//! preserving the "no two overlapping appointments on one dock" and "at most one active
//! operation per vehicle" invariants under concurrent callers.

use std::collections::HashMap;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use tracing::info;
use crate::config::Settings;
use crate::errors::{DockSchedulerError, DockSchedulerResult};
use crate::models::{
    Appointment, Dock, Operation, TimeSlotWindow, TimeSlotsData, Vehicle, Warehouse,
};

/// The full in-memory state of one warehouse.
#[derive(Debug, Clone)]
pub struct WarehouseState {
    pub warehouse: Warehouse,
    /// Docks in stored order; this order is the assignment tie-break order.
    pub docks: Vec<Dock>,
    pub vehicles: Vec<Vehicle>,
    pub appointments: Vec<Appointment>,
    pub operations: Vec<Operation>,
    pub time_slots: TimeSlotsData,
}

impl WarehouseState {
    pub fn dock(&self, dock_id: &str) -> DockSchedulerResult<&Dock> {
        self.docks
            .iter()
            .find(|d| d.dock_id == dock_id)
            .ok_or_else(|| DockSchedulerError::DockNotFound(dock_id.to_string()))
    }

    pub fn dock_mut(&mut self, dock_id: &str) -> DockSchedulerResult<&mut Dock> {
        self.docks
            .iter_mut()
            .find(|d| d.dock_id == dock_id)
            .ok_or_else(|| DockSchedulerError::DockNotFound(dock_id.to_string()))
    }

    pub fn vehicle(&self, vehicle_id: &str) -> DockSchedulerResult<&Vehicle> {
        self.vehicles
            .iter()
            .find(|v| v.vehicle_id == vehicle_id)
            .ok_or_else(|| DockSchedulerError::VehicleNotFound(vehicle_id.to_string()))
    }

    pub fn vehicle_mut(&mut self, vehicle_id: &str) -> DockSchedulerResult<&mut Vehicle> {
        self.vehicles
            .iter_mut()
            .find(|v| v.vehicle_id == vehicle_id)
            .ok_or_else(|| DockSchedulerError::VehicleNotFound(vehicle_id.to_string()))
    }

    pub fn operation_mut(&mut self, operation_id: &str) -> DockSchedulerResult<&mut Operation> {
        self.operations
            .iter_mut()
            .find(|o| o.operation_id == operation_id)
            .ok_or_else(|| DockSchedulerError::OperationNotFound(operation_id.to_string()))
    }

    /// Whether any vehicle or operation still references this warehouse in a
    /// non-terminal state, which blocks warehouse removal.
    pub fn has_active_references(&self) -> bool {
        self.docks
            .iter()
            .any(|d| d.status == crate::models::DockStatus::Occupied)
            || self.vehicles.iter().any(|v| {
                matches!(
                    v.status,
                    crate::models::VehicleStatus::Entered | crate::models::VehicleStatus::Yard
                )
            })
            || self.operations.iter().any(|o| o.is_active())
    }
}

/// Repository over the per-warehouse facility state.
pub struct YardStateRepository {
    warehouses: RwLock<HashMap<String, WarehouseState>>,
}

impl YardStateRepository {
    pub fn new() -> Self {
        Self {
            warehouses: RwLock::new(HashMap::new()),
        }
    }

    /// Builds the initial facility state from configuration.
    pub async fn initialize_from_settings(&self, settings: &Settings) -> DockSchedulerResult<()> {
        let mut warehouses = self.warehouses.write().await;
        for warehouse_settings in &settings.warehouses {
            let state = WarehouseState {
                warehouse: warehouse_settings.warehouse(),
                docks: warehouse_settings.docks(),
                vehicles: Vec::new(),
                appointments: Vec::new(),
                operations: Vec::new(),
                time_slots: warehouse_settings.time_slots(),
            };
            warehouses.insert(warehouse_settings.warehouse_id.clone(), state);
        }
        info!("Initialized {} warehouses from settings", warehouses.len());
        Ok(())
    }

    /// Runs a read-only closure against one warehouse's state.
    pub async fn with_state<R>(
        &self,
        warehouse_id: &str,
        f: impl FnOnce(&WarehouseState) -> DockSchedulerResult<R>,
    ) -> DockSchedulerResult<R> {
        let warehouses = self.warehouses.read().await;
        let state = warehouses
            .get(warehouse_id)
            .ok_or_else(|| DockSchedulerError::WarehouseNotFound(warehouse_id.to_string()))?;
        f(state)
    }

    /// Runs a mutating closure against one warehouse's state as a single
    /// logical transaction under the write lock.
    pub async fn with_state_mut<R>(
        &self,
        warehouse_id: &str,
        f: impl FnOnce(&mut WarehouseState) -> DockSchedulerResult<R>,
    ) -> DockSchedulerResult<R> {
        let mut warehouses = self.warehouses.write().await;
        let state = warehouses
            .get_mut(warehouse_id)
            .ok_or_else(|| DockSchedulerError::WarehouseNotFound(warehouse_id.to_string()))?;
        f(state)
    }

    pub async fn get_dock(&self, warehouse_id: &str, dock_id: &str) -> DockSchedulerResult<Dock> {
        self.with_state(warehouse_id, |state| state.dock(dock_id).cloned())
            .await
    }

    pub async fn get_vehicle(
        &self,
        warehouse_id: &str,
        vehicle_id: &str,
    ) -> DockSchedulerResult<Vehicle> {
        self.with_state(warehouse_id, |state| state.vehicle(vehicle_id).cloned())
            .await
    }

    pub async fn get_docks(&self, warehouse_id: &str) -> DockSchedulerResult<Vec<Dock>> {
        self.with_state(warehouse_id, |state| Ok(state.docks.clone()))
            .await
    }

    pub async fn get_operations(&self, warehouse_id: &str) -> DockSchedulerResult<Vec<Operation>> {
        self.with_state(warehouse_id, |state| Ok(state.operations.clone()))
            .await
    }

    /// The booking windows applying to the given date.
    pub async fn booking_windows(
        &self,
        warehouse_id: &str,
        date: NaiveDate,
    ) -> DockSchedulerResult<Vec<TimeSlotWindow>> {
        self.with_state(warehouse_id, |state| {
            Ok(state.time_slots.windows_for(date).to_vec())
        })
        .await
    }

    /// Registers a vehicle arriving at the gate. The vehicle id must be unique
    /// within the warehouse.
    pub async fn insert_vehicle(
        &self,
        warehouse_id: &str,
        vehicle: Vehicle,
    ) -> DockSchedulerResult<()> {
        self.with_state_mut(warehouse_id, |state| {
            if state
                .vehicles
                .iter()
                .any(|v| v.vehicle_id == vehicle.vehicle_id)
            {
                return Err(DockSchedulerError::StateError(format!(
                    "vehicle {} already registered",
                    vehicle.vehicle_id
                )));
            }
            state.vehicles.push(vehicle);
            Ok(())
        })
        .await
    }

    pub async fn insert_appointment(
        &self,
        warehouse_id: &str,
        appointment: Appointment,
    ) -> DockSchedulerResult<()> {
        self.with_state_mut(warehouse_id, |state| {
            state.appointments.push(appointment);
            Ok(())
        })
        .await
    }

    /// Removes a warehouse together with all of its docks as one explicit
    /// cascade. Blocked while anything still references the warehouse in a
    /// non-terminal state.
    ///
    /// # Returns
    ///
    /// The number of docks removed by the cascade.
    pub async fn remove_warehouse(&self, warehouse_id: &str) -> DockSchedulerResult<usize> {
        let mut warehouses = self.warehouses.write().await;
        let state = warehouses
            .get(warehouse_id)
            .ok_or_else(|| DockSchedulerError::WarehouseNotFound(warehouse_id.to_string()))?;
        if state.has_active_references() {
            return Err(DockSchedulerError::StateError(format!(
                "warehouse {} has active vehicles, operations, or occupied docks",
                warehouse_id
            )));
        }
        let docks_removed = state.docks.len();
        warehouses.remove(warehouse_id);
        info!(
            "Removed warehouse {} and its {} docks",
            warehouse_id, docks_removed
        );
        Ok(docks_removed)
    }

    /// The ids of all warehouses currently enabled for scheduling.
    pub async fn enabled_warehouse_ids(&self) -> Vec<String> {
        let warehouses = self.warehouses.read().await;
        warehouses
            .values()
            .filter(|s| s.warehouse.enabled)
            .map(|s| s.warehouse.warehouse_id.clone())
            .collect()
    }
}

impl Default for YardStateRepository {
    fn default() -> Self {
        Self::new()
    }
}
