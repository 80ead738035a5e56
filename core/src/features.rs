//! Feature vector construction for the single-row path.
//!
//! Walks the model artifact's declared column list in order and fills every
//! recognized column from raw customer input. The schema drives ordering and
//! presence: the 7-column variant has no spending_category column and the
//! 8-column variant does, with no code change between them. An unrecognized
//! schema column is a hard error — the builder never guesses a position or
//! pads the vector.
//!
//! Monetary fields are compressed with ln(1 + x), the exact transform the
//! model was trained with (tolerates zero values), then standardized if the
//! artifact carries a scaler.

use crate::{
    error::{ChurnError, ChurnResult},
    model::ModelBundle,
    region::Region,
    spending::SpendingCategory,
};
use serde::{Deserialize, Serialize};

pub const COL_PAYMENT_VALUE: &str = "total_payment_value";
pub const COL_MEAN_PRICE: &str = "mean_price";
pub const COL_REVIEW_SCORE: &str = "avg_review_score";
pub const COL_SPENDING: &str = "spending_category";
pub const COL_REGION_PREFIX: &str = "customer_region_";

/// Raw single-prediction request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerInput {
    /// Average product price. Non-negative.
    pub mean_price:     f64,
    /// Total payment value. Non-negative.
    pub payment_value:  f64,
    /// Average review score, 1.0 to 5.0 inclusive.
    pub review_score:   f64,
    /// Free-text state name; must resolve to a known region.
    pub customer_state: String,
}

/// Assemble the ordered feature vector for `input` against the bundle schema.
///
/// The region is resolved by the caller (the pipeline fails fast on unknown
/// states before feature construction starts).
pub fn build(input: &CustomerInput, region: Region, bundle: &ModelBundle) -> ChurnResult<Vec<f64>> {
    let mut features = Vec::with_capacity(bundle.columns.len());

    for column in &bundle.columns {
        let raw = match column.as_str() {
            COL_PAYMENT_VALUE => input.payment_value.ln_1p(),
            COL_MEAN_PRICE => input.mean_price.ln_1p(),
            COL_REVIEW_SCORE => input.review_score,
            COL_SPENDING => SpendingCategory::classify(input.payment_value).encoded(),
            other => match region_column(other) {
                Some(column_region) => {
                    if column_region == region {
                        1.0
                    } else {
                        0.0
                    }
                }
                None => {
                    return Err(ChurnError::UnknownSchemaColumn {
                        column: other.to_string(),
                    })
                }
            },
        };

        let value = match &bundle.scaler {
            Some(scaler) => scaler.transform(column, raw),
            None => raw,
        };
        features.push(value);
    }

    // Length equals schema length by construction; the check guards against
    // future drift between this builder and the schema walk above.
    if features.len() != bundle.columns.len() {
        return Err(ChurnError::FeatureLengthMismatch {
            expected: bundle.columns.len(),
            actual:   features.len(),
        });
    }

    log::debug!(
        "features built: state={} region={} len={}",
        input.customer_state,
        region.label(),
        features.len(),
    );
    Ok(features)
}

/// Parse a `customer_region_*` schema column into its region.
fn region_column(column: &str) -> Option<Region> {
    column
        .strip_prefix(COL_REGION_PREFIX)
        .and_then(Region::from_column_suffix)
}
