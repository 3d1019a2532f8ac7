pub mod dashboard;
pub mod ledger;
pub mod settings;
pub mod transaction;
