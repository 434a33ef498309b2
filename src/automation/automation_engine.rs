//! # Automation Engine

//! The recurring reconciliation pass. While the mode is Automatic, each tick pulls the
//! yard vehicle with the earliest parsed appointment time and attempts assignment via
//! the assignment engine. A tick that finds no eligible vehicle/dock pair is a no-op,
//! which makes ticks idempotent; a failed assignment simply waits for the next tick
//! rather than relaxing the requirement.

use std::sync::Arc;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};
use crate::errors::{DockSchedulerError, DockSchedulerResult};
use crate::models::{local_now, AutomationMode, Vehicle};
use crate::monitoring::ActivitySource;
use crate::scheduling::parse_appointment_time;
use crate::state_management::assignment_processor::AssignmentProcessor;
use crate::state_management::yard_state_repository::YardStateRepository;

/// One assignment made by an automation tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    pub vehicle_id: String,
    pub dock_id: String,
}

/// Selects the yard vehicle with the earliest parsed appointment time.
///
/// Ties resolve to the earliest position in stored order. Unparseable
/// appointment times sort ten years out, effectively last.
pub fn select_next_yard_vehicle<'a>(vehicles: &'a [Vehicle], date: NaiveDate) -> Option<&'a Vehicle> {
    let mut best: Option<(&'a Vehicle, chrono::NaiveDateTime)> = None;
    for vehicle in vehicles.iter().filter(|v| v.is_in_yard()) {
        let key = parse_appointment_time(&vehicle.appointment_time, date);
        match best {
            Some((_, best_key)) if best_key <= key => {}
            _ => best = Some((vehicle, key)),
        }
    }
    best.map(|(vehicle, _)| vehicle)
}

pub struct AutomationEngine {
    repository: Arc<YardStateRepository>,
    assignment_processor: Arc<AssignmentProcessor>,
    mode: RwLock<AutomationMode>,
}

impl AutomationEngine {
    pub fn new(
        repository: Arc<YardStateRepository>,
        assignment_processor: Arc<AssignmentProcessor>,
        initial_mode: AutomationMode,
    ) -> Self {
        Self {
            repository,
            assignment_processor,
            mode: RwLock::new(initial_mode),
        }
    }

    pub async fn mode(&self) -> AutomationMode {
        *self.mode.read().await
    }

    /// Switches between Manual and Automatic. Switching to Manual stops tick
    /// actions without tearing down the tick loop itself.
    pub async fn set_mode(&self, mode: AutomationMode) {
        let mut current = self.mode.write().await;
        if *current != mode {
            info!("Automation mode changed: {:?} -> {:?}", *current, mode);
            *current = mode;
        }
    }

    /// Runs one reconciliation tick for a warehouse.
    ///
    /// # Returns
    ///
    /// The assignments made this tick (empty in Manual mode, when nothing is
    /// eligible, or when no compatible dock was free).
    pub async fn tick(&self, warehouse_id: &str) -> DockSchedulerResult<Vec<AssignmentRecord>> {
        if self.mode().await != AutomationMode::Automatic {
            return Ok(Vec::new());
        }

        let today = local_now().date();
        let candidate = self
            .repository
            .with_state(warehouse_id, |state| {
                if !state.docks.iter().any(|d| d.is_available()) {
                    return Ok(None);
                }
                Ok(select_next_yard_vehicle(&state.vehicles, today).map(|v| v.vehicle_id.clone()))
            })
            .await?;

        let Some(vehicle_id) = candidate else {
            debug!("Automation tick for {}: nothing eligible", warehouse_id);
            return Ok(Vec::new());
        };

        match self
            .assignment_processor
            .check_in_vehicle(warehouse_id, &vehicle_id, ActivitySource::Automation)
            .await
        {
            Ok(dock_id) => Ok(vec![AssignmentRecord {
                vehicle_id,
                dock_id,
            }]),
            Err(DockSchedulerError::NoCompatibleDock(_)) => {
                debug!(
                    "Automation tick for {}: no compatible dock for {}, waiting for next tick",
                    warehouse_id, vehicle_id
                );
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }
}
