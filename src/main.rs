use std::time::Duration;
use anyhow::Result;
use tokio::time::interval;
use tracing::{error, info};

use dock_scheduler::config::Settings;
use dock_scheduler::errors::DockSchedulerError;
use dock_scheduler::state_management::YardStateManager;
use dock_scheduler::utils::logging::init_logger;

/// The main entry point for the dock scheduling engine.
///
/// Loads the configuration, initializes logging, builds the state manager and
/// spawns its command processor, then drives the automation reconciliation
/// tick and the predictive maintenance sweep on their configured intervals
/// until interrupted.
#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::new()?;
    let _guard = init_logger(settings.logging.path.clone())?;
    info!("Starting dock scheduling engine...");

    let (state_manager, mut command_processor) = YardStateManager::new(&settings).await?;

    tokio::spawn(async move {
        if let Err(e) = command_processor.run().await {
            error!("Command processor stopped: {}", e);
        }
    });

    let warehouse_ids = state_manager
        .get_repository()
        .enabled_warehouse_ids()
        .await;
    info!("Scheduling enabled for warehouses: {:?}", warehouse_ids);

    let mut automation_interval =
        interval(Duration::from_secs(settings.automation.tick_interval_secs));
    let mut maintenance_interval = interval(Duration::from_secs(
        settings.automation.maintenance_sweep_interval_secs,
    ));

    loop {
        tokio::select! {
            _ = automation_interval.tick() => {
                for warehouse_id in &warehouse_ids {
                    match state_manager.run_automation_tick(warehouse_id).await {
                        Ok(assignments) if !assignments.is_empty() => {
                            for a in &assignments {
                                info!(
                                    "Automation assigned vehicle {} to dock {} in {}",
                                    a.vehicle_id, a.dock_id, warehouse_id
                                );
                            }
                        }
                        Ok(_) => {}
                        Err(DockSchedulerError::WarehouseNotFound(_)) => {}
                        Err(e) => error!("Automation tick failed for {}: {}", warehouse_id, e),
                    }
                }
            }
            _ = maintenance_interval.tick() => {
                for warehouse_id in &warehouse_ids {
                    match state_manager.run_maintenance_sweep(warehouse_id).await {
                        Ok(flagged) if !flagged.is_empty() => {
                            info!(
                                "Maintenance sweep flagged docks {:?} in {}",
                                flagged, warehouse_id
                            );
                        }
                        Ok(_) => {}
                        Err(e) => error!("Maintenance sweep failed for {}: {}", warehouse_id, e),
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received. Stopping dock scheduling engine...");
                break;
            }
        }
    }

    Ok(())
}
