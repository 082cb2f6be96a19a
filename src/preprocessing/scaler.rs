//! Feature scaling

use crate::error::{Result, TitanicError};
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

/// Z-score standardization over the columns of a feature matrix.
///
/// Gradient descent needs comparably scaled features; Fare spans two
/// orders of magnitude more than the encoded categoricals. Fit on the
/// training split only, then apply to both splits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    means: Option<Array1<f64>>,
    stds: Option<Array1<f64>>,
    is_fitted: bool,
}

impl Default for StandardScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardScaler {
    /// Create a new scaler
    pub fn new() -> Self {
        Self {
            means: None,
            stds: None,
            is_fitted: false,
        }
    }

    /// Fit per-column mean and standard deviation
    pub fn fit(&mut self, x: &Array2<f64>) -> Result<&mut Self> {
        if x.nrows() == 0 {
            return Err(TitanicError::PreprocessingError(
                "cannot fit scaler on an empty matrix".to_string(),
            ));
        }

        let means = x.mean_axis(Axis(0)).ok_or_else(|| {
            TitanicError::PreprocessingError("failed to compute column means".to_string())
        })?;
        // Constant columns get scale 1.0 so they pass through centered
        let stds = x
            .std_axis(Axis(0), 1.0)
            .mapv(|s| if s == 0.0 || !s.is_finite() { 1.0 } else { s });

        self.means = Some(means);
        self.stds = Some(stds);
        self.is_fitted = true;
        Ok(self)
    }

    /// Transform a matrix with the fitted parameters
    pub fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        let means = self.means.as_ref().ok_or(TitanicError::ModelNotFitted)?;
        let stds = self.stds.as_ref().ok_or(TitanicError::ModelNotFitted)?;

        if x.ncols() != means.len() {
            return Err(TitanicError::ShapeError {
                expected: format!("{} columns", means.len()),
                actual: format!("{} columns", x.ncols()),
            });
        }

        let mut result = x.clone();
        for (j, mut col) in result.axis_iter_mut(Axis(1)).enumerate() {
            col.mapv_inplace(|v| (v - means[j]) / stds[j]);
        }
        Ok(result)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, x: &Array2<f64>) -> Result<Array2<f64>> {
        self.fit(x)?;
        self.transform(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_standardizes_columns() {
        let x = array![[1.0, 10.0], [2.0, 20.0], [3.0, 30.0]];
        let mut scaler = StandardScaler::new();
        let scaled = scaler.fit_transform(&x).unwrap();

        for j in 0..2 {
            let col = scaled.column(j);
            let mean: f64 = col.iter().sum::<f64>() / col.len() as f64;
            assert_relative_eq!(mean, 0.0, epsilon = 1e-12);
        }
        // Column-wise ordering is preserved
        assert!(scaled[[0, 0]] < scaled[[1, 0]]);
    }

    #[test]
    fn test_constant_column_passes_through() {
        let x = array![[5.0, 1.0], [5.0, 2.0], [5.0, 3.0]];
        let mut scaler = StandardScaler::new();
        let scaled = scaler.fit_transform(&x).unwrap();

        for i in 0..3 {
            assert_relative_eq!(scaled[[i, 0]], 0.0);
        }
    }

    #[test]
    fn test_transform_uses_train_statistics() {
        let train = array![[0.0], [2.0], [4.0]];
        let test = array![[2.0]];

        let mut scaler = StandardScaler::new();
        scaler.fit(&train).unwrap();
        let scaled = scaler.transform(&test).unwrap();

        // Test point at the training mean maps to zero
        assert_relative_eq!(scaled[[0, 0]], 0.0);
    }

    #[test]
    fn test_transform_before_fit_fails() {
        let scaler = StandardScaler::new();
        let x = array![[1.0]];
        assert!(matches!(
            scaler.transform(&x),
            Err(TitanicError::ModelNotFitted)
        ));
    }

    #[test]
    fn test_column_count_mismatch() {
        let mut scaler = StandardScaler::new();
        scaler.fit(&array![[1.0, 2.0], [3.0, 4.0]]).unwrap();
        assert!(matches!(
            scaler.transform(&array![[1.0]]),
            Err(TitanicError::ShapeError { .. })
        ));
    }
}
