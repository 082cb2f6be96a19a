//! Train/test splitting

use crate::error::{Result, TitanicError};
use ndarray::{Array1, Array2, Axis};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Split features and labels into shuffled train and test sets.
///
/// `test_size` is the fraction of samples held out, e.g. 0.2. The shuffle
/// is seeded, so the same seed always produces the same split.
pub fn train_test_split(
    x: &Array2<f64>,
    y: &Array1<f64>,
    test_size: f64,
    seed: u64,
) -> Result<(Array2<f64>, Array2<f64>, Array1<f64>, Array1<f64>)> {
    let n = x.nrows();

    if n != y.len() {
        return Err(TitanicError::ShapeError {
            expected: format!("y length = {}", n),
            actual: format!("y length = {}", y.len()),
        });
    }
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(TitanicError::InvalidParameter {
            name: "test_size".to_string(),
            value: test_size.to_string(),
            reason: "must be in (0, 1)".to_string(),
        });
    }

    let n_test = ((n as f64) * test_size).round() as usize;
    if n_test == 0 || n_test >= n {
        return Err(TitanicError::InvalidParameter {
            name: "test_size".to_string(),
            value: test_size.to_string(),
            reason: format!("leaves an empty split for {} samples", n),
        });
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let (test_idx, train_idx) = indices.split_at(n_test);

    let x_train = x.select(Axis(0), train_idx);
    let x_test = x.select(Axis(0), test_idx);
    let y_train = y.select(Axis(0), train_idx);
    let y_test = y.select(Axis(0), test_idx);

    Ok((x_train, x_test, y_train, y_test))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array;

    fn sample_data(n: usize) -> (Array2<f64>, Array1<f64>) {
        let x = Array::from_shape_fn((n, 3), |(r, c)| (r * 3 + c) as f64);
        let y = Array::from_shape_fn(n, |i| (i % 2) as f64);
        (x, y)
    }

    #[test]
    fn test_split_sizes() {
        let (x, y) = sample_data(50);
        let (x_train, x_test, y_train, y_test) = train_test_split(&x, &y, 0.2, 42).unwrap();

        assert_eq!(x_test.nrows(), 10);
        assert_eq!(x_train.nrows(), 40);
        assert_eq!(y_test.len(), 10);
        assert_eq!(y_train.len(), 40);
    }

    #[test]
    fn test_split_is_deterministic() {
        let (x, y) = sample_data(30);
        let (a_train, _, _, _) = train_test_split(&x, &y, 0.2, 42).unwrap();
        let (b_train, _, _, _) = train_test_split(&x, &y, 0.2, 42).unwrap();
        assert_eq!(a_train, b_train);
    }

    #[test]
    fn test_different_seeds_differ() {
        let (x, y) = sample_data(30);
        let (a_train, _, _, _) = train_test_split(&x, &y, 0.2, 42).unwrap();
        let (b_train, _, _, _) = train_test_split(&x, &y, 0.2, 7).unwrap();
        assert_ne!(a_train, b_train);
    }

    #[test]
    fn test_rows_stay_aligned() {
        let (x, y) = sample_data(20);
        let (x_train, x_test, y_train, y_test) = train_test_split(&x, &y, 0.25, 1).unwrap();

        // Row i of x encodes its original index in column 0 as (idx * 3)
        for (row, &label) in x_train.outer_iter().zip(y_train.iter()) {
            let orig = (row[0] / 3.0) as usize;
            assert_eq!(label, (orig % 2) as f64);
        }
        for (row, &label) in x_test.outer_iter().zip(y_test.iter()) {
            let orig = (row[0] / 3.0) as usize;
            assert_eq!(label, (orig % 2) as f64);
        }
    }

    #[test]
    fn test_invalid_test_size() {
        let (x, y) = sample_data(10);
        assert!(train_test_split(&x, &y, 0.0, 42).is_err());
        assert!(train_test_split(&x, &y, 1.0, 42).is_err());
        assert!(train_test_split(&x, &y, 1.5, 42).is_err());
    }

    #[test]
    fn test_mismatched_lengths() {
        let (x, _) = sample_data(10);
        let y = Array1::zeros(5);
        assert!(matches!(
            train_test_split(&x, &y, 0.2, 42),
            Err(TitanicError::ShapeError { .. })
        ));
    }
}
