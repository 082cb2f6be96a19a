//! Classification metrics: accuracy, confusion matrix, ROC curve, AUC

use crate::error::{Result, TitanicError};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fraction of predictions matching the true labels.
pub fn accuracy_score(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<f64> {
    check_lengths(y_true, y_pred)?;
    if y_true.is_empty() {
        return Err(TitanicError::MetricError(
            "accuracy is undefined for empty inputs".to_string(),
        ));
    }

    let correct = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(t, p)| (*t - *p).abs() < 0.5)
        .count();

    Ok(correct as f64 / y_true.len() as f64)
}

/// 2x2 confusion matrix for binary labels, rows = actual, columns = predicted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub tn: usize,
    pub fp: usize,
    pub fn_: usize,
    pub tp: usize,
}

impl ConfusionMatrix {
    /// Build from true labels and hard predictions (values > 0.5 count as positive).
    pub fn from_predictions(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<Self> {
        check_lengths(y_true, y_pred)?;

        let mut cm = ConfusionMatrix {
            tn: 0,
            fp: 0,
            fn_: 0,
            tp: 0,
        };

        for (t, p) in y_true.iter().zip(y_pred.iter()) {
            match (*t > 0.5, *p > 0.5) {
                (false, false) => cm.tn += 1,
                (false, true) => cm.fp += 1,
                (true, false) => cm.fn_ += 1,
                (true, true) => cm.tp += 1,
            }
        }

        Ok(cm)
    }

    /// Matrix layout `[[tn, fp], [fn, tp]]`.
    pub fn as_array(&self) -> [[usize; 2]; 2] {
        [[self.tn, self.fp], [self.fn_, self.tp]]
    }

    /// Total number of samples counted.
    pub fn total(&self) -> usize {
        self.tn + self.fp + self.fn_ + self.tp
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>22} {:>12}", "Pred 0", "Pred 1")?;
        writeln!(f, "{:<10}{:>12} {:>12}", "Actual 0", self.tn, self.fp)?;
        write!(f, "{:<10}{:>12} {:>12}", "Actual 1", self.fn_, self.tp)
    }
}

/// ROC curve points, ordered from threshold +inf down.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RocCurve {
    pub fpr: Vec<f64>,
    pub tpr: Vec<f64>,
    pub thresholds: Vec<f64>,
}

/// Trace the ROC curve by sweeping a threshold over the unique scores in
/// descending order. The first point is (0, 0) at a threshold above every
/// score; the last is (1, 1).
pub fn roc_curve(y_true: &Array1<f64>, scores: &Array1<f64>) -> Result<RocCurve> {
    check_lengths(y_true, scores)?;

    let n_pos = y_true.iter().filter(|&&t| t > 0.5).count();
    let n_neg = y_true.len() - n_pos;
    if n_pos == 0 || n_neg == 0 {
        return Err(TitanicError::MetricError(
            "ROC is undefined when only one class is present".to_string(),
        ));
    }

    // Sort samples by score, descending
    let mut order: Vec<usize> = (0..y_true.len()).collect();
    order.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut fpr = vec![0.0];
    let mut tpr = vec![0.0];
    let mut thresholds = vec![scores[order[0]] + 1.0];

    let mut tp = 0usize;
    let mut fp = 0usize;
    let mut i = 0;
    while i < order.len() {
        let threshold = scores[order[i]];
        // Consume every sample tied at this score before emitting a point
        while i < order.len() && scores[order[i]] == threshold {
            if y_true[order[i]] > 0.5 {
                tp += 1;
            } else {
                fp += 1;
            }
            i += 1;
        }
        fpr.push(fp as f64 / n_neg as f64);
        tpr.push(tp as f64 / n_pos as f64);
        thresholds.push(threshold);
    }

    Ok(RocCurve {
        fpr,
        tpr,
        thresholds,
    })
}

/// Area under the ROC curve via trapezoidal integration.
pub fn roc_auc_score(y_true: &Array1<f64>, scores: &Array1<f64>) -> Result<f64> {
    let roc = roc_curve(y_true, scores)?;

    let mut auc = 0.0;
    for w in roc.fpr.windows(2).zip(roc.tpr.windows(2)) {
        let (fx, ty) = w;
        auc += (fx[1] - fx[0]) * (ty[0] + ty[1]) / 2.0;
    }

    Ok(auc)
}

fn check_lengths(a: &Array1<f64>, b: &Array1<f64>) -> Result<()> {
    if a.len() != b.len() {
        return Err(TitanicError::ShapeError {
            expected: format!("length = {}", a.len()),
            actual: format!("length = {}", b.len()),
        });
    }
    Ok(())
}
