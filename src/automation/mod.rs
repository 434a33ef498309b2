pub mod automation_engine;

pub use automation_engine::{select_next_yard_vehicle, AssignmentRecord, AutomationEngine};
