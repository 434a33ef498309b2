pub mod predictive_maintenance_rule;

pub use predictive_maintenance_rule::PredictiveMaintenanceRule;
