//! # Predictive Maintenance Rule

//! A pure threshold rule over the dock fleet: any available dock whose
//! operations-since-maintenance counter exceeds the configured threshold is taken out
//! of service with an auto-generated note.

use chrono::NaiveDateTime;
use tracing::info;
use crate::models::{Dock, DockMaintenanceFlaggedEvent, YardEvent};

pub struct PredictiveMaintenanceRule {
    threshold: u32,
}

impl PredictiveMaintenanceRule {
    pub fn new(threshold: u32) -> Self {
        Self { threshold }
    }

    /// Applies the threshold rule to every dock in scope.
    ///
    /// # Returns
    ///
    /// One `DockMaintenanceFlagged` event per dock taken out of service.
    pub fn sweep(
        &self,
        warehouse_id: &str,
        docks: &mut [Dock],
        now: NaiveDateTime,
    ) -> Vec<YardEvent> {
        let mut events = Vec::new();
        for dock in docks.iter_mut() {
            if dock.is_available() && dock.operations_since_maintenance > self.threshold {
                let operations = dock.operations_since_maintenance;
                dock.flag_maintenance();
                info!(
                    "Dock {} flagged for maintenance after {} operations",
                    dock.dock_id, operations
                );
                events.push(YardEvent::DockMaintenanceFlagged(
                    DockMaintenanceFlaggedEvent {
                        warehouse_id: warehouse_id.to_string(),
                        dock_id: dock.dock_id.clone(),
                        operations_since_maintenance: operations,
                        timestamp: now,
                    },
                ));
            }
        }
        events
    }
}
