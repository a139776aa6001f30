//! Metric primitives shared by every team variant.

use crate::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};

/// One named metric: what was achieved against what was agreed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricPair {
    pub actual: f64,
    pub target: f64,
}

impl MetricPair {
    pub fn new(actual: f64, target: f64) -> Self {
        Self { actual, target }
    }

    /// Achievement as a percentage of target.
    ///
    /// A zero target means "no target set" and resolves to 0% by
    /// convention rather than a division error.
    pub fn achievement_percentage(&self) -> f64 {
        achievement_percentage(self.actual, self.target)
    }
}

pub fn achievement_percentage(actual: f64, target: f64) -> f64 {
    if target > 0.0 {
        actual / target * 100.0
    } else {
        0.0
    }
}

/// Reject malformed figures before they reach a formula.
///
/// Zero is a valid value everywhere (it means no activity or no target);
/// negative and non-finite figures are genuine data faults and the single
/// employee's calculation refuses to proceed.
pub fn validate_amount(employee: &str, field: &'static str, value: f64) -> EngineResult<()> {
    if !value.is_finite() {
        return Err(EngineError::validation(employee, field, "is not a number"));
    }
    if value < 0.0 {
        return Err(EngineError::validation(
            employee,
            field,
            format!("is negative ({value})"),
        ));
    }
    Ok(())
}

/// Round for display/storage. Intermediate accumulation stays unrounded so
/// rounding error never compounds before the final figure.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
