//! churn-core — customer churn risk scoring pipeline.
//!
//! Deterministic mapping from raw customer attributes (average product
//! price, total payment value, average review score, customer state) to a
//! fixed-order feature vector, probability scoring through a pre-trained
//! model artifact, and quantization into risk tiers with recommended
//! retention actions.
//!
//! RULES:
//!   - The artifact's column list is the schema contract. Feature order and
//!     presence are data-driven, never hardcoded at call sites.
//!   - The decision threshold (artifact) and the tier cut points (risk.rs)
//!     are independent constants.
//!   - Unknown states and schema mismatches fail loudly; nothing is ever
//!     silently zeroed, truncated or padded.
//!   - Batch rows arrive pre-encoded; the single-row path encodes in-process.

pub mod batch;
pub mod error;
pub mod features;
pub mod model;
pub mod pipeline;
pub mod region;
pub mod risk;
pub mod scorer;
pub mod spending;

pub use error::{ChurnError, ChurnResult};
pub use features::CustomerInput;
pub use model::ModelBundle;
pub use pipeline::{Prediction, PredictionPipeline};
pub use region::Region;
pub use risk::RiskTier;
pub use spending::SpendingCategory;
