//! Dataset loading and summaries

use crate::error::{Result, TitanicError};
use ndarray::{Array1, Array2};
use polars::prelude::*;
use std::path::Path;

/// Load a CSV file with header and schema inference.
pub fn load_csv(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(1000))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| TitanicError::DataError(format!("{}: {}", path.display(), e)))?
        .finish()
        .map_err(|e| TitanicError::DataError(format!("{}: {}", path.display(), e)))?;

    Ok(df)
}

/// Per-column summary, analogous to a `DataFrame.info()` row.
#[derive(Debug, Clone)]
pub struct ColumnInfo {
    pub name: String,
    pub dtype: String,
    pub null_count: usize,
    pub unique_count: usize,
}

/// Collect dtype, null count and unique count for every column.
pub fn dataset_info(df: &DataFrame) -> Vec<ColumnInfo> {
    df.get_columns()
        .iter()
        .map(|col| ColumnInfo {
            name: col.name().to_string(),
            dtype: format!("{:?}", col.dtype()),
            null_count: col.null_count(),
            unique_count: col.n_unique().unwrap_or(0),
        })
        .collect()
}

/// Extract named columns into a row-major `Array2<f64>`.
///
/// Columns are cast to Float64 first; remaining nulls become 0.0, so
/// imputation must happen before this point.
pub fn columns_to_array2(df: &DataFrame, col_names: &[&str]) -> Result<Array2<f64>> {
    let n_rows = df.height();
    let n_cols = col_names.len();

    let col_data: Vec<Vec<f64>> = col_names
        .iter()
        .map(|col_name| {
            let series = df
                .column(col_name)
                .map_err(|_| TitanicError::ColumnNotFound(col_name.to_string()))?;
            let series_f64 = series
                .cast(&DataType::Float64)
                .map_err(|e| TitanicError::DataError(e.to_string()))?;
            let values: Vec<f64> = series_f64
                .f64()
                .map_err(|e| TitanicError::DataError(e.to_string()))?
                .into_iter()
                .map(|v| v.unwrap_or(0.0))
                .collect();
            Ok(values)
        })
        .collect::<Result<Vec<Vec<f64>>>>()?;

    let col_refs: Vec<&[f64]> = col_data.iter().map(|c| c.as_slice()).collect();
    Ok(Array2::from_shape_fn((n_rows, n_cols), |(r, c)| {
        col_refs[c][r]
    }))
}

/// Extract a single column as `Array1<f64>`.
pub fn column_to_array1(df: &DataFrame, col_name: &str) -> Result<Array1<f64>> {
    let series = df
        .column(col_name)
        .map_err(|_| TitanicError::ColumnNotFound(col_name.to_string()))?;
    let series_f64 = series
        .cast(&DataType::Float64)
        .map_err(|e| TitanicError::DataError(e.to_string()))?;
    let values: Array1<f64> = series_f64
        .f64()
        .map_err(|e| TitanicError::DataError(e.to_string()))?
        .into_iter()
        .map(|v| v.unwrap_or(0.0))
        .collect();

    Ok(values)
}
