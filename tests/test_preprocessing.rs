//! Integration test: cleaning and encoding steps chained together

use polars::prelude::*;
use titanic_survival::preprocessing::{Encoder, ImputeStrategy, Imputer};

fn passengers_df() -> DataFrame {
    df!(
        "Pclass" => &[3i64, 1, 3, 1, 2, 3],
        "Sex" => &["male", "female", "female", "female", "male", "male"],
        "Age" => &[Some(22.0), Some(38.0), None, Some(35.0), None, Some(54.0)],
        "Fare" => &[7.25, 71.28, 7.92, 53.1, 13.0, 51.86],
        "Embarked" => &[Some("S"), Some("C"), Some("S"), None, Some("S"), Some("Q")]
    )
    .unwrap()
}

#[test]
fn test_clean_then_encode_pipeline() {
    let df = passengers_df();

    // Median-fill Age: observed values [22, 38, 35, 54] -> median 36.5
    let mut age_imputer = Imputer::new(ImputeStrategy::Median);
    let df = age_imputer.fit_transform(&df, &["Age"]).unwrap();
    assert_eq!(age_imputer.fill_value("Age"), Some(36.5));
    assert_eq!(df.column("Age").unwrap().null_count(), 0);

    // Drop the row with missing Embarked
    let mut dropper = Imputer::new(ImputeStrategy::DropRows);
    let df = dropper.fit_transform(&df, &["Embarked"]).unwrap();
    assert_eq!(df.height(), 5);
    assert_eq!(df.column("Embarked").unwrap().null_count(), 0);

    // Encode Sex with the fixed mapping
    let mut sex_encoder = Encoder::mapped([("male", 0), ("female", 1)]);
    let df = sex_encoder.fit_transform(&df, &["Sex"]).unwrap();
    let sex: Vec<i64> = df
        .column("Sex")
        .unwrap()
        .i64()
        .unwrap()
        .into_iter()
        .flatten()
        .collect();
    assert_eq!(sex, vec![0, 1, 1, 0, 0]);

    // Factorize Embarked on the remaining rows: S -> 0, C -> 1, Q -> 2
    let mut embarked_encoder = Encoder::factorize();
    let df = embarked_encoder.fit_transform(&df, &["Embarked"]).unwrap();
    let embarked: Vec<i64> = df
        .column("Embarked")
        .unwrap()
        .i64()
        .unwrap()
        .into_iter()
        .flatten()
        .collect();
    assert_eq!(embarked, vec![0, 1, 0, 0, 2]);
}

#[test]
fn test_drop_happens_before_factorize_sees_nulls() {
    let df = passengers_df();

    let mut dropper = Imputer::new(ImputeStrategy::DropRows);
    let df = dropper.fit_transform(&df, &["Embarked"]).unwrap();

    let mut encoder = Encoder::factorize();
    encoder.fit(&df, &["Embarked"]).unwrap();

    // Only the three observed harbours get codes
    let mapping = encoder.mapping("Embarked").unwrap();
    assert_eq!(mapping.len(), 3);
}

#[test]
fn test_imputer_fill_is_reusable_on_new_data() {
    let df = passengers_df();
    let mut imputer = Imputer::new(ImputeStrategy::Median);
    imputer.fit(&df, &["Age"]).unwrap();

    let new_df = df!(
        "Age" => &[None, Some(40.0f64)]
    )
    .unwrap();

    let filled = imputer.transform(&new_df).unwrap();
    let ages: Vec<f64> = filled
        .column("Age")
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .flatten()
        .collect();
    assert_eq!(ages, vec![36.5, 40.0]);
}
