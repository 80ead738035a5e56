//! Spending classification.
//!
//! Buckets a total payment value into low / medium / high. The cut points are
//! empirical artifacts of the training data distribution and are fixed
//! constants, never re-derived.

use serde::{Deserialize, Serialize};

/// Upper bound of the low bucket (inclusive).
pub const LOW_SPEND_MAX: f64 = 61.0;
/// Upper bound of the medium bucket (inclusive).
pub const MEDIUM_SPEND_MAX: f64 = 189.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpendingCategory {
    Low,
    Medium,
    High,
}

impl SpendingCategory {
    /// Classify a non-negative payment value. Total function, no failure path.
    /// Boundary-inclusive on the low side: exactly 61 is low, exactly 189 is
    /// medium.
    pub fn classify(amount: f64) -> SpendingCategory {
        if amount <= LOW_SPEND_MAX {
            SpendingCategory::Low
        } else if amount <= MEDIUM_SPEND_MAX {
            SpendingCategory::Medium
        } else {
            SpendingCategory::High
        }
    }

    /// Ordinal encoding used by the 8-feature schema variant.
    pub fn encoded(self) -> f64 {
        match self {
            SpendingCategory::Low => 0.0,
            SpendingCategory::Medium => 1.0,
            SpendingCategory::High => 2.0,
        }
    }

    /// Lowercase display name.
    pub fn label(self) -> &'static str {
        match self {
            SpendingCategory::Low => "low",
            SpendingCategory::Medium => "medium",
            SpendingCategory::High => "high",
        }
    }
}
