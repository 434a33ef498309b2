//! # Warehouse Representation

use serde::{Deserialize, Serialize};
use crate::models::timeslot::OperatingHours;

/// A warehouse owning zero or more docks.
///
/// Docks hold a back-reference to their warehouse by id; removal of a
/// warehouse cascades to its docks as an explicit, logged operation handled by
/// the state layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    /// The unique identifier for the warehouse.
    pub warehouse_id: String,
    /// Human-readable warehouse name.
    pub name: String,
    /// The daily operating window for the warehouse as a whole.
    pub operating_hours: OperatingHours,
    /// Whether the warehouse participates in scheduling.
    pub enabled: bool,
    /// Storage zones within the warehouse.
    pub zones: Vec<String>,
}
