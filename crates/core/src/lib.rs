//! Domain logic for cloudpulse.
//!
//! Pure logic only: no network access. The `cloud` crate talks to the
//! metrics backend and notification channel and hands the results to the
//! functions in here.

pub mod alert;
pub mod catalog;
pub mod error;
pub mod metric;
pub mod series;
pub mod types;
