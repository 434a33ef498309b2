pub mod state_manager;
pub mod yard_state_repository;
pub mod command_processor;
pub mod assignment_processor;
pub mod operation_processor;

pub use state_manager::YardStateManager;
