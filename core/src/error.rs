use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChurnError {
    // ── Validation (recoverable, per-request) ────────────────────────────────
    #[error("Unrecognized customer state: '{state}'")]
    UnknownState { state: String },

    #[error("Review score out of range: {score} (expected 1.0 to 5.0)")]
    ReviewScoreOutOfRange { score: f64 },

    #[error("Missing required batch columns: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("Model schema declares unknown feature column '{column}'")]
    UnknownSchemaColumn { column: String },

    #[error("Feature vector length mismatch: expected {expected}, got {actual}")]
    FeatureLengthMismatch { expected: usize, actual: usize },

    #[error("Malformed value '{value}' in row {row}, column '{column}'")]
    MalformedCell {
        row:    usize,
        column: String,
        value:  String,
    },

    // ── Fatal at startup ─────────────────────────────────────────────────────
    #[error("Model artifact load failed: {0}")]
    ModelLoad(String),

    // ── Recoverable, per-request; logged with context before surfacing ───────
    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChurnError {
    /// True for per-request input problems the caller can fix and resubmit.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ChurnError::UnknownState { .. }
                | ChurnError::ReviewScoreOutOfRange { .. }
                | ChurnError::MissingColumns { .. }
                | ChurnError::UnknownSchemaColumn { .. }
                | ChurnError::FeatureLengthMismatch { .. }
                | ChurnError::MalformedCell { .. }
        )
    }
}

pub type ChurnResult<T> = Result<T, ChurnError>;
