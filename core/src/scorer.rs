//! Churn scoring: probability from the model artifact, binary decision from
//! its tuned threshold.
//!
//! The decision threshold travels with the artifact (it was tuned against
//! validation data) and is a different constant from the risk-tier cut
//! points in risk.rs. Both exist on purpose; never collapse them.

use crate::{
    error::{ChurnError, ChurnResult},
    model::{InferenceModel, ModelBundle},
};

/// Score one feature vector against the bundle's model.
///
/// Validates length against the schema before calling into the model.
/// Inference failures are logged with context and surfaced as a structured
/// error; they never take the process down.
pub fn score(features: &[f64], bundle: &ModelBundle) -> ChurnResult<f64> {
    if features.len() != bundle.columns.len() {
        return Err(ChurnError::FeatureLengthMismatch {
            expected: bundle.columns.len(),
            actual:   features.len(),
        });
    }

    match bundle.model.predict_probability(features) {
        Ok(probability) => Ok(probability),
        Err(e) => {
            log::error!(
                "inference failed: model={} features={} error={e}",
                bundle.model_version,
                features.len(),
            );
            Err(e)
        }
    }
}

/// Binary churn decision. Boundary-inclusive: probability == threshold churns.
pub fn decide(probability: f64, threshold: f64) -> bool {
    probability >= threshold
}
