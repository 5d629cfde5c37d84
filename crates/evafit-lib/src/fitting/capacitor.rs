//! Capacitor stability analysis.
//!
//! Determines whether the fitting's continuous capacitor draw is sustainable
//! indefinitely or will exhaust the buffer, and if so, when.

use serde::Serialize;

use crate::error::{Error, Result};

/// Time-averaged recharge multiplier over a full recharge cycle. Peak
/// recharge occurs near 25% capacity; 2.5 is the standard approximation of
/// the average rate `capacity / recharge_time * 2.5`.
pub const PEAK_RECHARGE_FACTOR: f64 = 2.5;

/// Result of a capacitor stability analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CapacitorReport {
    /// Capacitor pool size.
    pub capacity: f64,
    /// Continuous draw across all modules and weapons, per second.
    pub drain_per_second: f64,
    /// Peak-averaged sustainable recharge, per second.
    pub recharge_per_second: f64,
    /// Whether the draw can be sustained indefinitely.
    pub stable: bool,
    /// Seconds until the buffer empties; absent when stable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seconds_to_empty: Option<f64>,
}

/// Analyze capacitor stability for a total drain against a recharge curve.
///
/// # Arguments
/// - `drain_per_second`: summed module and weapon draw (>= 0)
/// - `capacity`: capacitor pool size (> 0)
/// - `recharge_time`: base recharge time in seconds (> 0)
///
/// # Errors
/// [`Error::DegenerateInput`] for a non-positive capacity or recharge time;
/// failing fast beats propagating NaN through the report.
pub fn analyze_capacitor(
    drain_per_second: f64,
    capacity: f64,
    recharge_time: f64,
) -> Result<CapacitorReport> {
    if !capacity.is_finite() || capacity <= 0.0 {
        return Err(Error::DegenerateInput {
            message: format!("capacitor capacity must be finite and positive, got {capacity}"),
        });
    }
    if !recharge_time.is_finite() || recharge_time <= 0.0 {
        return Err(Error::DegenerateInput {
            message: format!("recharge time must be finite and positive, got {recharge_time}"),
        });
    }
    if !drain_per_second.is_finite() || drain_per_second < 0.0 {
        return Err(Error::DegenerateInput {
            message: format!(
                "drain must be finite and non-negative, got {drain_per_second}"
            ),
        });
    }

    let recharge_per_second = capacity / recharge_time * PEAK_RECHARGE_FACTOR;
    let stable = drain_per_second <= recharge_per_second;
    let seconds_to_empty = if stable {
        None
    } else {
        Some(capacity / (drain_per_second - recharge_per_second))
    };

    Ok(CapacitorReport {
        capacity,
        drain_per_second,
        recharge_per_second,
        stable,
        seconds_to_empty,
    })
}
