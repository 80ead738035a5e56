//! Model artifact loading and inference.
//!
//! The trained classifier is an external collaborator, shipped as a JSON
//! bundle holding:
//!   1. The inference model itself (logistic or gradient-boosted trees)
//!   2. The tuned decision threshold (part of the artifact contract —
//!      distinct from the risk-tier cut points in risk.rs)
//!   3. The ordered feature column list the model was trained on
//!   4. An optional standardization scaler for selected columns
//!
//! The bundle is loaded once at process startup and is read-only afterwards.
//! A missing or malformed artifact is fatal; there is no partial service.

use crate::error::{ChurnError, ChurnResult};
use serde::{Deserialize, Serialize};

/// Probability-of-churn output for a single feature vector.
///
/// Implementations treat the vector as opaque ordered floats; column
/// semantics live entirely in `ModelBundle::columns`.
pub trait InferenceModel {
    fn predict_probability(&self, features: &[f64]) -> ChurnResult<f64>;
}

// ── Bundle ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelBundle {
    pub model_version: String,
    /// Tuned probability cutoff for the binary churn decision.
    pub threshold:     f64,
    /// Expected feature columns, in training order.
    pub columns:       Vec<String>,
    /// Standardization applied to selected columns, if the model was trained
    /// with one. Some trained variants were not; never assume it is present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaler:        Option<Scaler>,
    pub model:         ModelSpec,
}

/// Per-column standardization: (value - mean) / scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scaler {
    /// Schema columns this scaler covers, in slot order.
    pub columns: Vec<String>,
    pub mean:    Vec<f64>,
    pub scale:   Vec<f64>,
}

impl Scaler {
    /// Standardize `value` if `column` is covered; pass through otherwise.
    pub fn transform(&self, column: &str, value: f64) -> f64 {
        match self.columns.iter().position(|c| c == column) {
            Some(slot) => (value - self.mean[slot]) / self.scale[slot],
            None => value,
        }
    }
}

// ── Model variants ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelSpec {
    /// Logistic regression: sigmoid(intercept + coefficients · features).
    Logistic {
        intercept:    f64,
        coefficients: Vec<f64>,
    },
    /// Gradient-boosted binary trees: sigmoid(base_score + Σ tree margins).
    GradientBoosting {
        base_score: f64,
        trees:      Vec<Tree>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

/// One node of a binary decision tree, in flat array form.
/// Internal nodes carry a feature index and split; leaves carry a margin
/// value. Traversal goes left when feature < split.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    #[serde(default)]
    pub feature: Option<usize>,
    #[serde(default)]
    pub split:   f64,
    #[serde(default)]
    pub left:    usize,
    #[serde(default)]
    pub right:   usize,
    #[serde(default)]
    pub value:   f64,
}

impl Tree {
    /// Walk from the root to a leaf and return its margin value.
    fn evaluate(&self, features: &[f64]) -> ChurnResult<f64> {
        let mut index = 0usize;
        // A well-formed tree reaches a leaf in fewer steps than it has nodes.
        for _ in 0..=self.nodes.len() {
            let node = self.nodes.get(index).ok_or_else(|| {
                ChurnError::Inference(format!("tree node index {index} out of range"))
            })?;
            let feature = match node.feature {
                Some(f) => f,
                None => return Ok(node.value),
            };
            let value = *features.get(feature).ok_or_else(|| {
                ChurnError::Inference(format!("tree references feature index {feature} out of range"))
            })?;
            index = if value < node.split { node.left } else { node.right };
        }
        Err(ChurnError::Inference(
            "tree traversal did not terminate (cycle in node links)".to_string(),
        ))
    }
}

impl InferenceModel for ModelSpec {
    fn predict_probability(&self, features: &[f64]) -> ChurnResult<f64> {
        let margin = match self {
            ModelSpec::Logistic { intercept, coefficients } => {
                if coefficients.len() != features.len() {
                    return Err(ChurnError::Inference(format!(
                        "coefficient count {} does not match feature count {}",
                        coefficients.len(),
                        features.len()
                    )));
                }
                intercept
                    + coefficients
                        .iter()
                        .zip(features)
                        .map(|(c, f)| c * f)
                        .sum::<f64>()
            }
            ModelSpec::GradientBoosting { base_score, trees } => {
                let mut sum = *base_score;
                for tree in trees {
                    sum += tree.evaluate(features)?;
                }
                sum
            }
        };
        Ok(sigmoid(margin))
    }
}

fn sigmoid(z: f64) -> f64 {
    (1.0 / (1.0 + (-z).exp())).clamp(0.0, 1.0)
}

// ── Loading ──────────────────────────────────────────────────────────────────

impl ModelBundle {
    /// Load and validate the artifact from a JSON file.
    ///
    /// Startup-only; any failure here aborts service bring-up.
    /// In tests, use ModelBundle::default_test().
    pub fn load(path: &str) -> ChurnResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ChurnError::ModelLoad(format!("Cannot read {path}: {e}")))?;
        let bundle: ModelBundle = serde_json::from_str(&content)
            .map_err(|e| ChurnError::ModelLoad(format!("Cannot parse {path}: {e}")))?;
        bundle.validate()?;
        log::info!(
            "model artifact loaded: version={} columns={} threshold={:.2} scaler={}",
            bundle.model_version,
            bundle.columns.len(),
            bundle.threshold,
            bundle.scaler.is_some(),
        );
        Ok(bundle)
    }

    /// Structural checks the schema contract depends on. Rejecting here means
    /// inference can trust column/coefficient arity.
    pub fn validate(&self) -> ChurnResult<()> {
        if self.columns.is_empty() {
            return Err(ChurnError::ModelLoad("column list is empty".to_string()));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ChurnError::ModelLoad(format!(
                "decision threshold {} outside [0, 1]",
                self.threshold
            )));
        }
        match &self.model {
            ModelSpec::Logistic { coefficients, .. } => {
                if coefficients.len() != self.columns.len() {
                    return Err(ChurnError::ModelLoad(format!(
                        "{} coefficients for {} columns",
                        coefficients.len(),
                        self.columns.len()
                    )));
                }
            }
            ModelSpec::GradientBoosting { trees, .. } => {
                for (t, tree) in trees.iter().enumerate() {
                    if tree.nodes.is_empty() {
                        return Err(ChurnError::ModelLoad(format!("tree {t} has no nodes")));
                    }
                    for (n, node) in tree.nodes.iter().enumerate() {
                        if let Some(feature) = node.feature {
                            if feature >= self.columns.len() {
                                return Err(ChurnError::ModelLoad(format!(
                                    "tree {t} node {n} references feature {feature}, \
                                     but schema has {} columns",
                                    self.columns.len()
                                )));
                            }
                            if node.left >= tree.nodes.len() || node.right >= tree.nodes.len() {
                                return Err(ChurnError::ModelLoad(format!(
                                    "tree {t} node {n} child index out of range"
                                )));
                            }
                        }
                    }
                }
            }
        }
        if let Some(scaler) = &self.scaler {
            if scaler.mean.len() != scaler.columns.len() || scaler.scale.len() != scaler.columns.len()
            {
                return Err(ChurnError::ModelLoad(
                    "scaler mean/scale arity does not match scaler columns".to_string(),
                ));
            }
            if let Some(unknown) = scaler.columns.iter().find(|c| !self.columns.contains(c)) {
                return Err(ChurnError::ModelLoad(format!(
                    "scaler covers column '{unknown}' not present in the schema"
                )));
            }
            if scaler.scale.iter().any(|s| *s == 0.0) {
                return Err(ChurnError::ModelLoad("scaler has a zero scale entry".to_string()));
            }
        }
        Ok(())
    }

    /// A small logistic bundle over the 7-column schema, for tests.
    pub fn default_test() -> Self {
        ModelBundle {
            model_version: "test-logistic-7col".to_string(),
            threshold: 0.5,
            columns: vec![
                "total_payment_value".to_string(),
                "mean_price".to_string(),
                "avg_review_score".to_string(),
                "customer_region_East".to_string(),
                "customer_region_North".to_string(),
                "customer_region_South".to_string(),
                "customer_region_West".to_string(),
            ],
            scaler: None,
            model: ModelSpec::Logistic {
                intercept: -0.8,
                coefficients: vec![0.45, -0.20, -0.35, 0.10, 0.05, -0.10, -0.05],
            },
        }
    }
}
