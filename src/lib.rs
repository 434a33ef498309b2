pub mod config;
pub mod errors;
pub mod models;
pub mod scheduling;
pub mod state_management;
pub mod automation;
pub mod rules;
pub mod monitoring;
pub mod utils;
