//! # Activity Log

//! A fire-and-forget append sink holding the most recent activity entries in a capped
//! ring buffer. Appends never fail and never block the scheduling core beyond the
//! buffer lock.

use std::collections::VecDeque;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use crate::models::{local_now, YardEvent};

/// Who triggered the logged action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivitySource {
    /// A human operator action.
    Operator,
    /// The automation loop.
    Automation,
    /// The engine itself (maintenance sweeps, cascades).
    System,
}

/// A single rendered activity feed entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub timestamp: NaiveDateTime,
    pub source: ActivitySource,
    pub warehouse_id: String,
    pub message: String,
}

/// Capped ring buffer of the most recent activity entries.
pub struct ActivityLog {
    capacity: usize,
    entries: Mutex<VecDeque<ActivityEntry>>,
}

impl ActivityLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Mutex::new(VecDeque::new()),
        }
    }

    /// Appends an entry rendered from the event, evicting the oldest entry
    /// once the buffer is full.
    pub async fn append(&self, source: ActivitySource, event: &YardEvent) {
        let entry = ActivityEntry {
            timestamp: local_now(),
            source,
            warehouse_id: event.warehouse_id().to_string(),
            message: event.describe(),
        };
        let mut entries = self.entries.lock().await;
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Returns the buffered entries, oldest first.
    pub async fn recent(&self) -> Vec<ActivityEntry> {
        let entries = self.entries.lock().await;
        entries.iter().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        let entries = self.entries.lock().await;
        entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
