pub mod statuses;
pub mod warehouse;
pub mod dock;
pub mod vehicle;
pub mod appointment;
pub mod operation;
pub mod timeslot;
pub mod events;

pub use statuses::*;
pub use warehouse::*;
pub use dock::*;
pub use vehicle::*;
pub use appointment::*;
pub use operation::*;
pub use timeslot::*;
pub use events::*;

use chrono::{Local, NaiveDateTime};

pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}
