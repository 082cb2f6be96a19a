//! Missing value imputation strategies

use crate::error::{Result, TitanicError};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Strategy for handling missing values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ImputeStrategy {
    /// Replace with mean (numeric only)
    Mean,
    /// Replace with median (numeric only)
    Median,
    /// Replace with the most frequent value
    MostFrequent,
    /// Replace with a constant value
    Constant(f64),
    /// Drop rows that have a missing value in any fitted column
    DropRows,
}

/// Imputer for handling missing values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Imputer {
    strategy: ImputeStrategy,
    columns: Vec<String>,
    fill_values: HashMap<String, f64>,
    is_fitted: bool,
}

impl Imputer {
    /// Create a new imputer with the specified strategy
    pub fn new(strategy: ImputeStrategy) -> Self {
        Self {
            strategy,
            columns: Vec::new(),
            fill_values: HashMap::new(),
            is_fitted: false,
        }
    }

    /// Fitted fill value for a column, if any
    pub fn fill_value(&self, column: &str) -> Option<f64> {
        self.fill_values.get(column).copied()
    }

    /// Fit the imputer to the data
    ///
    /// Fill values are computed from the observed (non-null) values only.
    pub fn fit(&mut self, df: &DataFrame, columns: &[&str]) -> Result<&mut Self> {
        self.columns = columns.iter().map(|c| c.to_string()).collect();

        if self.strategy != ImputeStrategy::DropRows {
            for col_name in columns {
                let series = df
                    .column(col_name)
                    .map_err(|_| TitanicError::ColumnNotFound(col_name.to_string()))?;
                let fill = self.compute_fill_value(series.as_materialized_series())?;
                self.fill_values.insert(col_name.to_string(), fill);
            }
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Transform the data by imputing (or dropping) missing values
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(TitanicError::ModelNotFitted);
        }

        if self.strategy == ImputeStrategy::DropRows {
            return self.drop_rows(df);
        }

        let mut result = df.clone();
        for col_name in &self.columns {
            let fill = self.fill_values[col_name];
            let col = df
                .column(col_name)
                .map_err(|_| TitanicError::ColumnNotFound(col_name.clone()))?;
            let filled = Self::fill_series(col.as_materialized_series(), fill)?;
            result = result
                .with_column(filled)
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

    fn drop_rows(&self, df: &DataFrame) -> Result<DataFrame> {
        let mut mask: Option<BooleanChunked> = None;

        for col_name in &self.columns {
            let col = df
                .column(col_name)
                .map_err(|_| TitanicError::ColumnNotFound(col_name.clone()))?;
            let not_null = col.as_materialized_series().is_not_null();
            mask = Some(match mask {
                Some(m) => &m & &not_null,
                None => not_null,
            });
        }

        match mask {
            Some(m) => df
                .filter(&m)
                .map_err(|e| TitanicError::PreprocessingError(e.to_string())),
            None => Ok(df.clone()),
        }
    }

    fn compute_fill_value(&self, series: &Series) -> Result<f64> {
        let ca = series
            .cast(&DataType::Float64)
            .map_err(|e| TitanicError::PreprocessingError(e.to_string()))?;
        let ca = ca
            .f64()
            .map_err(|e| TitanicError::PreprocessingError(e.to_string()))?
            .clone();

        match &self.strategy {
            ImputeStrategy::Mean => Ok(ca.mean().unwrap_or(0.0)),
            ImputeStrategy::Median => Ok(ca.median().unwrap_or(0.0)),
            ImputeStrategy::MostFrequent => Ok(Self::compute_mode(&ca)),
            ImputeStrategy::Constant(val) => Ok(*val),
            ImputeStrategy::DropRows => Ok(0.0),
        }
    }

    fn compute_mode(ca: &Float64Chunked) -> f64 {
        let mut counts: HashMap<u64, (f64, usize)> = HashMap::new();
        for val in ca.into_iter().flatten() {
            let entry = counts.entry(val.to_bits()).or_insert((val, 0));
            entry.1 += 1;
        }

        counts
            .into_values()
            .max_by_key(|(_, count)| *count)
            .map(|(val, _)| val)
            .unwrap_or(0.0)
    }

    fn fill_series(series: &Series, fill: f64) -> Result<Series> {
        let ca = series
            .cast(&DataType::Float64)
            .map_err(|e| TitanicError::PreprocessingError(e.to_string()))?;
        let values: Vec<f64> = ca
            .f64()
            .map_err(|e| TitanicError::PreprocessingError(e.to_string()))?
            .into_iter()
            .map(|v| v.unwrap_or(fill))
            .collect();

        Ok(Series::new(series.name().clone(), values))
    }
}
