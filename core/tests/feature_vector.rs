//! Feature vector construction against 7- and 8-column schemas.

use churn_core::error::ChurnError;
use churn_core::features::{self, CustomerInput};
use churn_core::model::{ModelBundle, ModelSpec, Scaler};
use churn_core::region::Region;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn gujarat_input() -> CustomerInput {
    CustomerInput {
        mean_price:     20.0,
        payment_value:  200.0,
        review_score:   4.5,
        customer_state: "gujarat".to_string(),
    }
}

fn bundle_with_columns(columns: &[&str]) -> ModelBundle {
    let mut bundle = ModelBundle::default_test();
    bundle.columns = columns.iter().map(|c| c.to_string()).collect();
    bundle.model = ModelSpec::Logistic {
        intercept:    0.0,
        coefficients: vec![0.0; columns.len()],
    };
    bundle
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// The canonical 7-column scenario: price 20, payment 200, review 4.5,
/// gujarat → [log1p(200), log1p(20), 4.5, 0, 0, 0, 1].
#[test]
fn seven_column_vector_matches_trained_order() {
    let bundle = ModelBundle::default_test();
    let vector = features::build(&gujarat_input(), Region::West, &bundle).unwrap();

    assert_eq!(vector.len(), 7);
    assert!((vector[0] - 201.0_f64.ln()).abs() < 1e-12, "log1p(200) expected");
    assert!((vector[1] - 21.0_f64.ln()).abs() < 1e-12, "log1p(20) expected");
    assert!((vector[0] - 5.3033).abs() < 1e-4);
    assert!((vector[1] - 3.0445).abs() < 1e-4);
    assert_eq!(vector[2], 4.5);
    assert_eq!(&vector[3..], &[0.0, 0.0, 0.0, 1.0], "west one-hot");
}

/// The 8-column schema variant adds spending_category at the position the
/// schema dictates, with no code change. Payment 200 > 189 → high → 2.0.
#[test]
fn eight_column_schema_inserts_spending_category() {
    let bundle = bundle_with_columns(&[
        "total_payment_value",
        "mean_price",
        "avg_review_score",
        "spending_category",
        "customer_region_East",
        "customer_region_North",
        "customer_region_South",
        "customer_region_West",
    ]);
    let vector = features::build(&gujarat_input(), Region::West, &bundle).unwrap();

    assert_eq!(vector.len(), 8);
    assert_eq!(vector[3], 2.0, "payment 200 is high spending");
    assert_eq!(&vector[4..], &[0.0, 0.0, 0.0, 1.0]);
}

/// Schema ordering is data-driven: a reordered column list reorders the
/// vector accordingly.
#[test]
fn schema_order_drives_vector_order() {
    let bundle = bundle_with_columns(&[
        "avg_review_score",
        "mean_price",
        "total_payment_value",
        "customer_region_East",
        "customer_region_North",
        "customer_region_South",
        "customer_region_West",
    ]);
    let vector = features::build(&gujarat_input(), Region::West, &bundle).unwrap();

    assert_eq!(vector[0], 4.5);
    assert!((vector[1] - 21.0_f64.ln()).abs() < 1e-12);
    assert!((vector[2] - 201.0_f64.ln()).abs() < 1e-12);
}

/// An unrecognized schema column fails loudly; the builder never guesses.
#[test]
fn unknown_schema_column_is_rejected() {
    let bundle = bundle_with_columns(&["total_payment_value", "mystery_feature"]);
    let err = features::build(&gujarat_input(), Region::West, &bundle).unwrap_err();

    match err {
        ChurnError::UnknownSchemaColumn { column } => assert_eq!(column, "mystery_feature"),
        other => panic!("expected UnknownSchemaColumn, got {other:?}"),
    }
    assert!(ChurnError::UnknownSchemaColumn { column: "x".into() }.is_validation());
}

/// A scaler in the artifact standardizes exactly the columns it covers.
#[test]
fn scaler_is_applied_when_present_and_only_then() {
    let mut scaled_bundle = ModelBundle::default_test();
    scaled_bundle.scaler = Some(Scaler {
        columns: vec!["total_payment_value".to_string(), "mean_price".to_string()],
        mean:    vec![4.0, 3.0],
        scale:   vec![2.0, 1.5],
    });

    let plain = features::build(&gujarat_input(), Region::West, &ModelBundle::default_test()).unwrap();
    let scaled = features::build(&gujarat_input(), Region::West, &scaled_bundle).unwrap();

    assert!((scaled[0] - (201.0_f64.ln() - 4.0) / 2.0).abs() < 1e-12);
    assert!((scaled[1] - (21.0_f64.ln() - 3.0) / 1.5).abs() < 1e-12);
    // Non-covered columns pass through untouched.
    assert_eq!(scaled[2], plain[2]);
    assert_eq!(&scaled[3..], &plain[3..]);
}

/// log1p is monotonic and maps 0 to 0, so zero-value monetary fields are
/// representable.
#[test]
fn log1p_compression_is_monotonic_and_zero_safe() {
    let zero = CustomerInput {
        mean_price:     0.0,
        payment_value:  0.0,
        ..gujarat_input()
    };
    let bundle = ModelBundle::default_test();
    let vector = features::build(&zero, Region::West, &bundle).unwrap();
    assert_eq!(vector[0], 0.0, "log1p(0) = 0");
    assert_eq!(vector[1], 0.0);

    let mut previous = -1.0;
    for payment in [0.0, 1.0, 61.0, 189.0, 200.0, 10_000.0] {
        let input = CustomerInput {
            payment_value: payment,
            ..gujarat_input()
        };
        let v = features::build(&input, Region::West, &bundle).unwrap();
        assert!(v[0] > previous, "log1p must be strictly increasing");
        previous = v[0];
    }
}
