//! # Operation Representation

//! This module defines the `Operation` struct, which tracks a single loading, unloading, or
//! inspection activity tied to a vehicle+dock pair, and the pure elapsed-time progress
//! computation used for display.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use crate::models::statuses::{OperationStatus, OperationType};

/// The physical activity performed once a vehicle occupies a dock.
/// At most one non-Completed operation may exist per vehicle at a time;
/// completed operations are retained for historical reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// The unique identifier for the operation.
    pub operation_id: String,
    /// The vehicle being worked.
    pub vehicle_id: String,
    /// The dock where the work happens.
    pub dock_id: String,
    /// The kind of work performed.
    pub kind: OperationType,
    /// The current lifecycle status of the operation.
    pub status: OperationStatus,
    /// Label of the operator responsible for the work.
    pub operator: String,
    /// When the operation started.
    pub start_time: NaiveDateTime,
    /// When the operation is expected to finish.
    pub est_completion_time: NaiveDateTime,
    /// When the operation actually finished, stamped on completion.
    pub actual_completion_time: Option<NaiveDateTime>,
    /// Why the operation was flagged as delayed, if it was.
    pub delay_reason: Option<String>,
}

impl Operation {
    /// Creates a new in-progress operation with the estimated completion time
    /// derived from the planned duration.
    pub fn start(
        operation_id: String,
        vehicle_id: String,
        dock_id: String,
        kind: OperationType,
        operator: String,
        start_time: NaiveDateTime,
        duration_minutes: i64,
    ) -> Self {
        Self {
            operation_id,
            vehicle_id,
            dock_id,
            kind,
            status: OperationStatus::InProgress,
            operator,
            start_time,
            est_completion_time: start_time + Duration::minutes(duration_minutes),
            actual_completion_time: None,
            delay_reason: None,
        }
    }

    /// Whether the operation still counts against the one-per-vehicle limit.
    pub fn is_active(&self) -> bool {
        self.status != OperationStatus::Completed
    }

    /// Flags the operation as delayed with a reason. The estimated completion
    /// time is deliberately left unchanged.
    pub fn report_delay(&mut self, reason: String) {
        self.status = OperationStatus::Delayed;
        self.delay_reason = Some(reason);
    }

    /// Marks the operation as completed, stamping the actual completion time.
    pub fn complete(&mut self, now: NaiveDateTime) {
        self.status = OperationStatus::Completed;
        self.actual_completion_time = Some(now);
    }

    /// Pure elapsed-time progress ratio in percent, clamped to [0, 100].
    ///
    /// Display-only; never a scheduling input. An operation with no planned
    /// duration reports 100.
    pub fn progress(&self, now: NaiveDateTime) -> u8 {
        let planned = self.est_completion_time - self.start_time;
        if planned <= Duration::zero() {
            return 100;
        }
        let elapsed = now - self.start_time;
        let ratio = elapsed.num_milliseconds() as f64 / planned.num_milliseconds() as f64;
        (ratio * 100.0).round().clamp(0.0, 100.0) as u8
    }
}
