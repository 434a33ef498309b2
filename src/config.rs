//! # Configuration Management

//! This module handles the configuration loading and management for the dock scheduler.
//! It leverages the `config` crate to provide a flexible and structured way to define and access configuration settings from various sources, including:

//! * YAML configuration files (default.yaml plus an environment-specific file)
//! * Environment variables prefixed with `APP`

//! The core of this module is the `Settings` struct, which encapsulates all the configuration settings required by the application.

use serde::Deserialize;
use config::{Config, Environment, File};
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use chrono::NaiveDate;
use log::debug;
use crate::errors::DockSchedulerError;
use crate::models::{
    AutomationMode, Dock, DockStatus, OperatingHours, TimeSlotWindow, TimeSlotsData, Warehouse,
};
use crate::scheduling::SlotSearchSettings;

/// Represents the complete set of configuration settings for the dock scheduler.
/// It's populated by reading from various configuration sources and provides convenient access to the settings throughout the application.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Settings for application logging
    pub logging: LoggingSettings,
    /// Settings for the automation loop
    #[serde(default)]
    pub automation: AutomationSettings,
    /// Scan window and step used by the slot finder
    #[serde(default)]
    pub slot_search: SlotSearchSettings,
    /// Predictive maintenance thresholds
    #[serde(default)]
    pub maintenance: MaintenanceSettings,
    /// Activity log ring buffer sizing
    #[serde(default)]
    pub activity_log: ActivityLogSettings,
    /// Configuration for each warehouse and its docks
    pub warehouses: Vec<WarehouseSettings>,
}

/// Holds the configuration settings for application logging
#[derive(Debug, Deserialize, Clone, Default)]
pub struct LoggingSettings {
    /// The logging level (e.g., "info", "debug", "error")
    #[serde(default)]
    pub level: String,
    /// The name of the log file (optional)
    pub file: Option<String>,
    /// The directory path where log files will be stored (optional)
    pub path: Option<PathBuf>,
}

/// Holds the configuration settings for the automation loop
#[derive(Debug, Deserialize, Clone)]
pub struct AutomationSettings {
    /// The interval (in seconds) between automation reconciliation ticks
    pub tick_interval_secs: u64,
    /// The interval (in seconds) between predictive maintenance sweeps
    pub maintenance_sweep_interval_secs: u64,
    /// The mode the engine starts in
    pub initial_mode: AutomationMode,
}

impl Default for AutomationSettings {
    fn default() -> Self {
        Self {
            tick_interval_secs: 20,
            maintenance_sweep_interval_secs: 300,
            initial_mode: AutomationMode::Manual,
        }
    }
}

/// Holds the thresholds for the predictive maintenance rule
#[derive(Debug, Deserialize, Clone)]
pub struct MaintenanceSettings {
    /// Operations since last maintenance beyond which an available dock is taken out of service
    pub operations_threshold: u32,
}

impl Default for MaintenanceSettings {
    fn default() -> Self {
        Self {
            operations_threshold: 50,
        }
    }
}

/// Holds the sizing of the activity log ring buffer
#[derive(Debug, Deserialize, Clone)]
pub struct ActivityLogSettings {
    /// The number of most recent entries retained
    pub capacity: usize,
}

impl Default for ActivityLogSettings {
    fn default() -> Self {
        Self { capacity: 20 }
    }
}

/// Represents the configuration settings for a specific warehouse
#[derive(Debug, Deserialize, Clone)]
pub struct WarehouseSettings {
    /// The unique identifier for the warehouse
    pub warehouse_id: String,
    /// Human-readable warehouse name
    pub name: String,
    /// Whether the warehouse participates in scheduling
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Storage zones within the warehouse
    #[serde(default)]
    pub zones: Vec<String>,
    /// The daily operating window for the warehouse
    pub operating_hours: OperatingHours,
    /// Configuration for each dock in the warehouse
    pub docks: Vec<DockSettings>,
    /// Booking time windows for the warehouse
    #[serde(default)]
    pub time_slots: TimeSlotSettings,
}

fn default_enabled() -> bool {
    true
}

/// Represents the configuration for a single dock
#[derive(Debug, Deserialize, Clone)]
pub struct DockSettings {
    /// The unique identifier for the dock
    pub dock_id: String,
    /// Human-readable dock name
    pub name: String,
    /// Bay or location label within the warehouse
    #[serde(default)]
    pub bay: String,
    /// Maximum vehicle capacity class
    #[serde(default = "default_capacity")]
    pub capacity: u32,
    /// Operating hours for this dock; falls back to the warehouse hours when omitted
    pub operating_hours: Option<OperatingHours>,
    /// Vehicle types the dock can serve
    #[serde(default)]
    pub compatible_vehicle_types: Vec<String>,
    /// Safety/compliance tags (e.g. "Cold Storage")
    #[serde(default)]
    pub safety_tags: Vec<String>,
}

fn default_capacity() -> u32 {
    1
}

/// Booking time windows, flattened for configuration files
#[derive(Debug, Deserialize, Clone, Default)]
pub struct TimeSlotSettings {
    /// Windows per weekday, 0 = Monday
    #[serde(default)]
    pub weekday_windows: Vec<WeekdayWindows>,
    /// Windows for specific calendar dates, replacing the weekday list
    #[serde(default)]
    pub date_overrides: Vec<DateWindows>,
}

/// Booking windows for one weekday
#[derive(Debug, Deserialize, Clone)]
pub struct WeekdayWindows {
    /// Days from Monday, 0-6
    pub weekday: usize,
    pub windows: Vec<TimeSlotWindow>,
}

/// Booking windows for one calendar date
#[derive(Debug, Deserialize, Clone)]
pub struct DateWindows {
    pub date: NaiveDate,
    pub windows: Vec<TimeSlotWindow>,
}

impl WarehouseSettings {
    /// Builds the warehouse record from these settings.
    pub fn warehouse(&self) -> Warehouse {
        Warehouse {
            warehouse_id: self.warehouse_id.clone(),
            name: self.name.clone(),
            operating_hours: self.operating_hours,
            enabled: self.enabled,
            zones: self.zones.clone(),
        }
    }

    /// Builds the dock records from these settings, in stored order.
    /// Stored order matters: it is the assignment engine's tie-break order.
    pub fn docks(&self) -> Vec<Dock> {
        self.docks
            .iter()
            .map(|d| Dock {
                dock_id: d.dock_id.clone(),
                warehouse_id: self.warehouse_id.clone(),
                name: d.name.clone(),
                status: DockStatus::Available,
                bay: d.bay.clone(),
                capacity: d.capacity,
                operating_hours: d.operating_hours.unwrap_or(self.operating_hours),
                compatible_vehicle_types: d.compatible_vehicle_types.clone(),
                safety_tags: d.safety_tags.clone(),
                operations_since_maintenance: 0,
                notes: None,
            })
            .collect()
    }

    /// Builds the booking windows from these settings.
    pub fn time_slots(&self) -> TimeSlotsData {
        let mut weekday_windows: [Vec<TimeSlotWindow>; 7] = Default::default();
        for entry in &self.time_slots.weekday_windows {
            if entry.weekday < 7 {
                weekday_windows[entry.weekday] = entry.windows.clone();
            }
        }
        let date_overrides: HashMap<NaiveDate, Vec<TimeSlotWindow>> = self
            .time_slots
            .date_overrides
            .iter()
            .map(|d| (d.date, d.windows.clone()))
            .collect();
        TimeSlotsData {
            weekday_windows,
            date_overrides,
        }
    }
}

/// # Settings Initialization
///
/// The `Settings` implementation provides a `new` function to load and construct the configuration settings.
impl Settings {
    /// Loads and constructs the application settings from various configuration sources.
    ///
    /// This function reads configuration settings from the following sources, in order of precedence:
    ///
    /// 1. `default.yaml`: Contains default settings for the application
    /// 2. Environment-specific YAML file (e.g., `development.yaml` or `production.yaml`) based on the `RUN_MODE` environment variable
    /// 3. Environment variables prefixed with `APP` (e.g., `APP__AUTOMATION__TICK_INTERVAL_SECS`)
    ///
    /// The `CONFIG_DIR` environment variable can be used to specify the directory where the YAML configuration files are located (defaults to "config").
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)`: If the settings were loaded and constructed successfully
    /// * `Err(DockSchedulerError)`: If there was an error during the loading or construction process
    pub fn new() -> Result<Self, DockSchedulerError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let config_dir = env::var("CONFIG_DIR").unwrap_or_else(|_| "config".into());
        debug!("Run Mode: {:?}, Config Dir: {:?}", run_mode, config_dir);

        let s = Config::builder()
            .add_source(File::with_name(&format!("{}/default", config_dir)))
            .add_source(File::with_name(&format!("{}/{}", config_dir, run_mode)).required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        let mut s: Self = s
            .try_deserialize::<Settings>()
            .map_err(DockSchedulerError::from)?;

        if let Some(ref mut path) = s.logging.path {
            *path = env::current_dir()?.join(path.clone());
        }

        Ok(s)
    }

    pub fn get_warehouse(&self, warehouse_id: &str) -> Option<&WarehouseSettings> {
        self.warehouses
            .iter()
            .find(|w| w.warehouse_id == warehouse_id)
    }
}
