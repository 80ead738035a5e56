//! Risk tiering and retention recommendations.
//!
//! Quantizes a continuous churn probability into Low / Medium / High and maps
//! each tier to a static, ordered list of retention actions. The tier cut
//! points are fixed constants, independent of the model artifact's decision
//! threshold.

use serde::{Deserialize, Serialize};

/// Probability at or above which a customer is High risk.
pub const HIGH_RISK_CUTOFF: f64 = 0.70;
/// Probability at or above which a customer is at least Medium risk.
pub const MEDIUM_RISK_CUTOFF: f64 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

const HIGH_RISK_ACTIONS: &[&str] = &[
    "Contact the customer personally.",
    "Offer discounts or exclusive deals.",
    "Perform weekly follow-ups.",
    "Analyze customer behavior.",
];

const MEDIUM_RISK_ACTIONS: &[&str] = &[
    "Send satisfaction survey.",
    "Offer loyalty points or benefits.",
    "Educate about additional features.",
    "Schedule monthly follow-ups.",
];

const LOW_RISK_ACTIONS: &[&str] = &[
    "Thank the customer for loyalty.",
    "Send occasional personal reminders.",
    "Highlight new or unused features.",
    "Provide passive loyalty rewards.",
];

impl RiskTier {
    /// Classify a probability. Boundary-inclusive on the ≥ side: exactly 0.70
    /// is High, exactly 0.35 is Medium.
    pub fn classify(probability: f64) -> RiskTier {
        if probability >= HIGH_RISK_CUTOFF {
            RiskTier::High
        } else if probability >= MEDIUM_RISK_CUTOFF {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }

    /// Display label matching the original report format.
    pub fn label(self) -> &'static str {
        match self {
            RiskTier::Low => "Low Risk",
            RiskTier::Medium => "Medium Risk",
            RiskTier::High => "High Risk",
        }
    }

    /// Ordered retention actions for this tier. Always non-empty.
    pub fn recommendations(self) -> &'static [&'static str] {
        match self {
            RiskTier::High => HIGH_RISK_ACTIONS,
            RiskTier::Medium => MEDIUM_RISK_ACTIONS,
            RiskTier::Low => LOW_RISK_ACTIONS,
        }
    }
}
