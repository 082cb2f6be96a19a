//! Categorical encoding

use crate::error::{Result, TitanicError};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Type of encoder to use
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EncoderType {
    /// Explicit category -> code table, fixed up front
    Mapped(HashMap<String, i64>),
    /// Codes assigned in order of first appearance (pandas-style factorize)
    Factorize,
}

/// Categorical encoder
///
/// Replaces string columns with integer codes. Categories unseen at fit
/// time become null at transform time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Encoder {
    encoder_type: EncoderType,
    // Maps column name -> (category -> code)
    mappings: HashMap<String, HashMap<String, i64>>,
    is_fitted: bool,
}

impl Encoder {
    /// Create a new encoder
    pub fn new(encoder_type: EncoderType) -> Self {
        Self {
            encoder_type,
            mappings: HashMap::new(),
            is_fitted: false,
        }
    }

    /// Encoder with an explicit category table, e.g. male -> 0, female -> 1
    pub fn mapped<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let table: HashMap<String, i64> = pairs.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Self::new(EncoderType::Mapped(table))
    }

    /// Encoder that learns codes in order of first appearance
    pub fn factorize() -> Self {
        Self::new(EncoderType::Factorize)
    }

    /// Fitted category table for a column
    pub fn mapping(&self, column: &str) -> Option<&HashMap<String, i64>> {
        self.mappings.get(column)
    }

    /// Fit the encoder to the data
    pub fn fit(&mut self, df: &DataFrame, columns: &[&str]) -> Result<&mut Self> {
        for col_name in columns {
            let column = df
                .column(col_name)
                .map_err(|_| TitanicError::ColumnNotFound(col_name.to_string()))?;
            let series = column.as_materialized_series();

            let mapping = match &self.encoder_type {
                EncoderType::Mapped(table) => table.clone(),
                EncoderType::Factorize => Self::build_factorize_mapping(series)?,
            };
            self.mappings.insert(col_name.to_string(), mapping);
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Transform the data, replacing fitted columns with integer codes
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(TitanicError::ModelNotFitted);
        }

        let mut result = df.clone();
        for (col_name, mapping) in &self.mappings {
            let column = df
                .column(col_name)
                .map_err(|_| TitanicError::ColumnNotFound(col_name.clone()))?;
            let series = column.as_materialized_series();

            let ca = series
                .str()
                .map_err(|e| TitanicError::PreprocessingError(e.to_string()))?;
            let codes: Vec<Option<i64>> = ca
                .into_iter()
                .map(|v| v.and_then(|s| mapping.get(s).copied()))
                .collect();

            let encoded = Series::new(series.name().clone(), codes);
            result = result
                .with_column(encoded)
                .map_err(|e| TitanicError::PreprocessingError(e.to_string()))?
                .clone();
        }

        Ok(result)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, df: &DataFrame, columns: &[&str]) -> Result<DataFrame> {
        self.fit(df, columns)?;
        self.transform(df)
    }

    // Codes follow row order of first appearance; nulls get no code.
    fn build_factorize_mapping(series: &Series) -> Result<HashMap<String, i64>> {
        let ca = series
            .str()
            .map_err(|e| TitanicError::PreprocessingError(e.to_string()))?;

        let mut mapping: HashMap<String, i64> = HashMap::new();
        let mut next_code: i64 = 0;
        for val in ca.into_iter().flatten() {
            if !mapping.contains_key(val) {
                mapping.insert(val.to_string(), next_code);
                next_code += 1;
            }
        }

        Ok(mapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passengers_df() -> DataFrame {
        df!(
            "Sex" => &["male", "female", "female", "male", "male"],
            "Embarked" => &["S", "C", "S", "Q", "C"]
        )
        .unwrap()
    }

    #[test]
    fn test_mapped_encoding() {
        let df = passengers_df();
        let mut encoder = Encoder::mapped([("male", 0), ("female", 1)]);
        let result = encoder.fit_transform(&df, &["Sex"]).unwrap();

        let sex = result.column("Sex").unwrap().i64().unwrap();
        let codes: Vec<i64> = sex.into_iter().flatten().collect();
        assert_eq!(codes, vec![0, 1, 1, 0, 0]);
    }

    #[test]
    fn test_factorize_first_appearance_order() {
        let df = passengers_df();
        let mut encoder = Encoder::factorize();
        let result = encoder.fit_transform(&df, &["Embarked"]).unwrap();

        // S seen first -> 0, C second -> 1, Q third -> 2
        let embarked = result.column("Embarked").unwrap().i64().unwrap();
        let codes: Vec<i64> = embarked.into_iter().flatten().collect();
        assert_eq!(codes, vec![0, 1, 0, 2, 1]);
    }

    #[test]
    fn test_unseen_category_becomes_null() {
        let df = passengers_df();
        let mut encoder = Encoder::mapped([("male", 0)]);
        let result = encoder.fit_transform(&df, &["Sex"]).unwrap();

        assert_eq!(result.column("Sex").unwrap().null_count(), 2);
    }

    #[test]
    fn test_transform_before_fit_fails() {
        let df = passengers_df();
        let encoder = Encoder::factorize();
        assert!(matches!(
            encoder.transform(&df),
            Err(TitanicError::ModelNotFitted)
        ));
    }

    #[test]
    fn test_mapping_accessor() {
        let df = passengers_df();
        let mut encoder = Encoder::factorize();
        encoder.fit(&df, &["Embarked"]).unwrap();

        let mapping = encoder.mapping("Embarked").unwrap();
        assert_eq!(mapping.get("S"), Some(&0));
        assert_eq!(mapping.get("Q"), Some(&2));
    }
}
