pub mod aggregation_service;
pub mod dashboard_service;
pub mod loader;
