pub mod assignment;
pub mod slot_finder;
pub mod appointment_time;

pub use assignment::{assign, requirements_for, AssignmentOutcome};
pub use slot_finder::{SlotFinder, SlotProposal, SlotSearchSettings};
pub use appointment_time::parse_appointment_time;
