pub mod alert;
pub mod metrics;
