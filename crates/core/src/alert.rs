//! Alert message validation and the CPU threshold rule.

use crate::error::CoreError;
use crate::metric::Sample;

/// Subject line for operator-triggered notifications.
pub const MANUAL_ALERT_SUBJECT: &str = "Manual EC2 Alert";

/// Subject line for the scheduled CPU check.
pub const CPU_ALERT_SUBJECT: &str = "EC2 CPU Utilization Alert";

/// Mean CPU utilization (percent) above which the scheduled check alerts.
pub const CPU_ALERT_THRESHOLD: f64 = 80.0;

/// Window the scheduled check averages over.
pub const CPU_CHECK_LOOKBACK_MINUTES: i64 = 60;

/// Error text returned when an alert message is missing or blank.
pub const MESSAGE_REQUIRED: &str = "Message required";

/// Reject empty or whitespace-only alert text.
pub fn validate_message(message: &str) -> Result<(), CoreError> {
    if message.trim().is_empty() {
        return Err(CoreError::Validation(MESSAGE_REQUIRED.to_string()));
    }
    Ok(())
}

/// Arithmetic mean of the sample values, `None` for an empty series.
pub fn mean(samples: &[Sample]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let total: f64 = samples.iter().map(|s| s.value).sum();
    Some(total / samples.len() as f64)
}

/// Result of applying the CPU threshold rule to a window of samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CpuVerdict {
    /// The backend returned nothing for the window.
    NoData,
    /// Mean at or below the threshold.
    Normal { average: f64 },
    /// Mean strictly above the threshold.
    Breach { average: f64 },
}

/// Apply [`CPU_ALERT_THRESHOLD`] to the mean of `samples`.
pub fn evaluate_cpu(samples: &[Sample]) -> CpuVerdict {
    match mean(samples) {
        None => CpuVerdict::NoData,
        Some(average) if average > CPU_ALERT_THRESHOLD => CpuVerdict::Breach { average },
        Some(average) => CpuVerdict::Normal { average },
    }
}

/// Notification body for a CPU threshold breach.
pub fn cpu_alert_message(instance_id: &str, average: f64) -> String {
    format!("Alert! CPU Utilization is high on instance {instance_id}: {average:.2}%")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
