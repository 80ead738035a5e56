//! Batch CSV scoring.
//!
//! CONTRACT (intentionally asymmetric with the single-row path): batch rows
//! arrive already encoded in the artifact's column schema — log-transformed
//! monetary values, one-hot region columns, standardized if the model was
//! trained with a scaler. The batch path reuses the scorer directly on those
//! columns and performs no in-process encoding. Bulk integrations export
//! rows from the same feature store the model was trained from, so the
//! pre-encoded contract is deliberate; do not silently unify it with the
//! raw-input path.
//!
//! Column validation is all-or-nothing: any required schema column missing
//! from the header rejects the whole table before a single row is scored.
//! Output preserves row order and every original column (including an
//! optional pass-through identifier) and appends churn_proba, churn_risk and
//! recommendations.

use crate::{
    error::{ChurnError, ChurnResult},
    model::ModelBundle,
    risk::RiskTier,
    scorer,
};
use std::io::{Read, Write};

/// Optional identifier column, passed through untouched when present.
pub const ID_COLUMN: &str = "customer_unique_id";

const PROBA_COLUMN: &str = "churn_proba";
const RISK_COLUMN: &str = "churn_risk";
const RECOMMENDATIONS_COLUMN: &str = "recommendations";

/// Tier distribution of a completed batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub rows_scored: usize,
    pub high_risk:   usize,
    pub medium_risk: usize,
    pub low_risk:    usize,
}

/// Score every row of `input` and write the augmented table to `output`.
pub fn predict_batch<R: Read, W: Write>(
    bundle: &ModelBundle,
    input: R,
    output: W,
) -> ChurnResult<BatchSummary> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(input);
    let headers = reader.headers()?.clone();

    // All-or-nothing validation: resolve every required column up front and
    // reject the whole table if any is absent.
    let mut column_indices = Vec::with_capacity(bundle.columns.len());
    let mut missing = Vec::new();
    for column in &bundle.columns {
        match headers.iter().position(|h| h == column.as_str()) {
            Some(index) => column_indices.push(index),
            None => missing.push(column.clone()),
        }
    }
    if !missing.is_empty() {
        return Err(ChurnError::MissingColumns { missing });
    }

    let mut writer = csv::WriterBuilder::new().from_writer(output);
    let mut out_headers = headers.clone();
    out_headers.push_field(PROBA_COLUMN);
    out_headers.push_field(RISK_COLUMN);
    out_headers.push_field(RECOMMENDATIONS_COLUMN);
    writer.write_record(&out_headers)?;

    let mut summary = BatchSummary::default();

    for (row_index, record) in reader.records().enumerate() {
        let record = record?;
        // 1-based file line: header is line 1, first data row is line 2.
        let row = row_index + 2;

        let mut features = Vec::with_capacity(column_indices.len());
        for (&index, column) in column_indices.iter().zip(&bundle.columns) {
            let cell = record.get(index).unwrap_or("");
            let value: f64 = cell.parse().map_err(|_| ChurnError::MalformedCell {
                row,
                column: column.clone(),
                value:  cell.to_string(),
            })?;
            features.push(value);
        }

        let probability = scorer::score(&features, bundle)?;
        let tier = RiskTier::classify(probability);

        summary.rows_scored += 1;
        match tier {
            RiskTier::High => summary.high_risk += 1,
            RiskTier::Medium => summary.medium_risk += 1,
            RiskTier::Low => summary.low_risk += 1,
        }

        let mut out_record = record.clone();
        out_record.push_field(&format!("{probability:.2}"));
        out_record.push_field(tier.label());
        out_record.push_field(&tier.recommendations().join("\n"));
        writer.write_record(&out_record)?;
    }

    writer.flush()?;
    log::info!(
        "batch scoring complete: rows={} high={} medium={} low={}",
        summary.rows_scored,
        summary.high_risk,
        summary.medium_risk,
        summary.low_risk,
    );
    Ok(summary)
}

/// File-path convenience wrapper around `predict_batch`.
pub fn predict_batch_file(
    bundle: &ModelBundle,
    input_path: &str,
    output_path: &str,
) -> ChurnResult<BatchSummary> {
    let input = std::fs::File::open(input_path)?;
    let output = std::fs::File::create(output_path)?;
    predict_batch(bundle, input, output)
}
