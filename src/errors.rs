//! # Dock Scheduler Errors

//! This module defines the `DockSchedulerError` enum, which encapsulates all potential errors that can occur within the dock scheduling engine.
//! The enum variants provide specific error types for the different components and operations, facilitating clear error handling and reporting throughout the application.

use thiserror::Error;
use std::io;
use tokio::sync::mpsc::error::SendError;
use tokio::sync::oneshot::error::RecvError;

#[derive(Error, Debug)]
pub enum DockSchedulerError {
    /// No dock satisfies the availability and compatibility constraints for a vehicle.
    /// Always recoverable; the caller decides whether to retry on a later tick.
    #[error("No compatible dock available: {0}")]
    NoCompatibleDock(String),

    /// The slot search exhausted the full scan window without a non-overlapping hit.
    #[error("No free time slot found: {0}")]
    NoSlotAvailable(String),

    /// A proposed appointment window overlaps an existing Draft/Approved appointment on the same dock.
    #[error("Appointment window conflict: {0}")]
    SlotConflict(String),

    /// Represents an error when a requested warehouse is not found in the snapshot.
    #[error("Warehouse not found: {0}")]
    WarehouseNotFound(String),

    /// Represents an error when a requested dock is not found in the snapshot.
    #[error("Dock not found: {0}")]
    DockNotFound(String),

    /// Represents an error when a requested vehicle is not found in the snapshot.
    #[error("Vehicle not found: {0}")]
    VehicleNotFound(String),

    /// Represents an error when a requested operation is not found in the snapshot.
    #[error("Operation not found: {0}")]
    OperationNotFound(String),

    /// Represents an error when a requested appointment is not found in the snapshot.
    #[error("Appointment not found: {0}")]
    AppointmentNotFound(String),

    /// A vehicle status transition that violates the monotonic lifecycle.
    #[error("Invalid vehicle transition: {0}")]
    InvalidTransition(String),

    /// Represents errors arising from misconfigurations or invalid settings.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Represents errors occurring within the state management component.
    #[error("State management error: {0}")]
    StateError(String),

    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// Represents errors during the initialization of the logging system.
    #[error("Logging initialization error: {0}")]
    LoggingError(String),

    /// Represents errors that occur during serialization or deserialization of data.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Represents errors when sending data over a channel.
    #[error("Channel send error: {0}")]
    ChannelSendError(String),

    /// Represents errors when receiving data from a channel.
    #[error("Channel receive error: {0}")]
    ChannelRecvError(String),
}

impl<T> From<SendError<T>> for DockSchedulerError {
    fn from(err: SendError<T>) -> Self {
        DockSchedulerError::ChannelSendError(err.to_string())
    }
}

impl From<RecvError> for DockSchedulerError {
    fn from(err: RecvError) -> Self {
        DockSchedulerError::ChannelRecvError(err.to_string())
    }
}

impl From<config::ConfigError> for DockSchedulerError {
    fn from(err: config::ConfigError) -> Self {
        DockSchedulerError::ConfigError(err.to_string())
    }
}

pub type DockSchedulerResult<T> = Result<T, DockSchedulerError>;
