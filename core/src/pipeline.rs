//! Single-row prediction pipeline.
//!
//! PIPELINE ORDER (fixed):
//!   1. Validate review score range
//!   2. Resolve region (fail fast on unknown state)
//!   3. Classify spending
//!   4. Build the feature vector against the artifact schema
//!   5. Score and decide
//!   6. Tier and attach recommendations
//!
//! Every step is a pure local computation except the model call. A failure is
//! a structured per-request error; it never affects other predictions or the
//! process.

use crate::{
    error::{ChurnError, ChurnResult},
    features::{self, CustomerInput},
    model::ModelBundle,
    region::Region,
    risk::RiskTier,
    scorer,
    spending::SpendingCategory,
};
use serde::Serialize;

/// Structured result of one prediction.
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub churn_probability: f64,
    /// Churn decision against the artifact's tuned threshold.
    pub will_churn:        bool,
    pub risk_tier:         RiskTier,
    pub region:            Region,
    pub spending_category: SpendingCategory,
    pub recommendations:   Vec<String>,
}

/// Wraps the loaded model artifact. Read-only after construction; safe to
/// share across callers.
pub struct PredictionPipeline {
    bundle: ModelBundle,
}

impl PredictionPipeline {
    pub fn new(bundle: ModelBundle) -> Self {
        Self { bundle }
    }

    /// Load the artifact and build a pipeline. Startup-only; fatal on failure.
    pub fn load(model_path: &str) -> ChurnResult<Self> {
        Ok(Self::new(ModelBundle::load(model_path)?))
    }

    pub fn bundle(&self) -> &ModelBundle {
        &self.bundle
    }

    /// Raw input → scored, tiered, explained prediction.
    pub fn predict(&self, input: &CustomerInput) -> ChurnResult<Prediction> {
        if !(1.0..=5.0).contains(&input.review_score) {
            return Err(ChurnError::ReviewScoreOutOfRange {
                score: input.review_score,
            });
        }

        let region = Region::resolve(&input.customer_state).ok_or_else(|| {
            ChurnError::UnknownState {
                state: input.customer_state.clone(),
            }
        })?;

        let spending_category = SpendingCategory::classify(input.payment_value);
        let feature_vector = features::build(input, region, &self.bundle)?;
        let churn_probability = scorer::score(&feature_vector, &self.bundle)?;
        let will_churn = scorer::decide(churn_probability, self.bundle.threshold);
        let risk_tier = RiskTier::classify(churn_probability);

        log::info!(
            "prediction: state={} region={} spending={} p={:.4} churn={} tier={}",
            input.customer_state,
            region.label(),
            spending_category.label(),
            churn_probability,
            will_churn,
            risk_tier.label(),
        );

        Ok(Prediction {
            churn_probability,
            will_churn,
            risk_tier,
            region,
            spending_category,
            recommendations: risk_tier
                .recommendations()
                .iter()
                .map(|action| action.to_string())
                .collect(),
        })
    }
}
