//! End-to-end analysis pipeline
//!
//! load -> explore -> clean -> encode -> split -> fit -> evaluate -> plot.
//! The CLI and the integration tests both go through [`run`].

use crate::data;
use crate::error::{Result, TitanicError};
use crate::metrics::{self, ConfusionMatrix, RocCurve};
use crate::plots;
use crate::preprocessing::{Encoder, ImputeStrategy, Imputer, StandardScaler};
use crate::training::{train_test_split, LogisticRegression};
use polars::prelude::DataFrame;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

/// Feature columns used for the model, in matrix order.
pub const FEATURE_COLUMNS: [&str; 7] = ["Pclass", "Sex", "Age", "SibSp", "Parch", "Fare", "Embarked"];

/// Label column.
pub const TARGET_COLUMN: &str = "Survived";

/// Analysis options.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub data_path: PathBuf,
    pub out_dir: PathBuf,
    pub test_size: f64,
    pub seed: u64,
    pub render_plots: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("titanic.csv"),
            out_dir: PathBuf::from("plots"),
            test_size: 0.2,
            seed: 42,
            render_plots: true,
        }
    }
}

/// Evaluation results of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub n_rows: usize,
    pub n_rows_after_drop: usize,
    pub n_train: usize,
    pub n_test: usize,
    pub accuracy: f64,
    pub confusion_matrix: [[usize; 2]; 2],
    /// AUC of the hard 0/1 predictions (what the headline number reports)
    pub auc: f64,
    /// AUC of the predicted probabilities (what the ROC chart shows)
    pub auc_proba: f64,
    pub training_time_secs: f64,
}

/// Everything a caller needs after a run: the report, the confusion matrix
/// and ROC curve for rendering, and the cleaned columns the charts plot.
pub struct AnalysisOutcome {
    pub report: AnalysisReport,
    pub confusion: ConfusionMatrix,
    pub roc: RocCurve,
    pub ages: Vec<f64>,
    pub pclass: Vec<i64>,
    pub survived: Vec<f64>,
}

/// Run the full pipeline from a CSV path.
pub fn run(config: &AnalysisConfig) -> Result<AnalysisOutcome> {
    let df = data::load_csv(&config.data_path)?;
    info!(rows = df.height(), cols = df.width(), "loaded dataset");
    analyze_frame(&df, config)
}

/// Run the pipeline on an already-loaded DataFrame.
pub fn analyze_frame(df: &DataFrame, config: &AnalysisConfig) -> Result<AnalysisOutcome> {
    let n_rows = df.height();

    // Clean: median-fill Age, drop rows with missing Embarked
    let mut age_imputer = Imputer::new(ImputeStrategy::Median);
    let df = age_imputer.fit_transform(df, &["Age"])?;
    debug!(median = age_imputer.fill_value("Age"), "imputed Age");

    let mut embarked_dropper = Imputer::new(ImputeStrategy::DropRows);
    let df = embarked_dropper.fit_transform(&df, &["Embarked"])?;
    let n_rows_after_drop = df.height();
    info!(
        dropped = n_rows - n_rows_after_drop,
        "dropped rows with missing Embarked"
    );

    // Encode: Sex by fixed mapping, Embarked by factorization
    let mut sex_encoder = Encoder::mapped([("male", 0), ("female", 1)]);
    let df = sex_encoder.fit_transform(&df, &["Sex"])?;

    let mut embarked_encoder = Encoder::factorize();
    let df = embarked_encoder.fit_transform(&df, &["Embarked"])?;

    // Keep the cleaned columns the charts need before moving to ndarray
    let ages = data::column_to_array1(&df, "Age")?.to_vec();
    let survived = data::column_to_array1(&df, TARGET_COLUMN)?.to_vec();
    let pclass: Vec<i64> = data::column_to_array1(&df, "Pclass")?
        .iter()
        .map(|&v| v as i64)
        .collect();

    // Assemble the matrix and split
    let x = data::columns_to_array2(&df, &FEATURE_COLUMNS)?;
    let y = data::column_to_array1(&df, TARGET_COLUMN)?;
    let (x_train, x_test, y_train, y_test) =
        train_test_split(&x, &y, config.test_size, config.seed)?;
    info!(
        train = y_train.len(),
        test = y_test.len(),
        "split into train and test sets"
    );

    // Standardize (fit on train only) so gradient descent converges on
    // features with very different scales
    let mut scaler = StandardScaler::new();
    let x_train = scaler.fit_transform(&x_train)?;
    let x_test = scaler.transform(&x_test)?;

    // Fit
    let start = Instant::now();
    let mut model = LogisticRegression::new();
    model.fit(&x_train, &y_train)?;
    let training_time_secs = start.elapsed().as_secs_f64();
    info!(secs = training_time_secs, "trained logistic regression");

    // Evaluate
    let y_pred = model.predict(&x_test)?;
    let y_proba = model.predict_proba(&x_test)?;

    let accuracy = metrics::accuracy_score(&y_test, &y_pred)?;
    let confusion = ConfusionMatrix::from_predictions(&y_test, &y_pred)?;
    let roc = metrics::roc_curve(&y_test, &y_proba)?;
    // The headline AUC scores the hard predictions; the chart's AUC scores
    // the probabilities.
    let auc = metrics::roc_auc_score(&y_test, &y_pred)?;
    let auc_proba = metrics::roc_auc_score(&y_test, &y_proba)?;

    let report = AnalysisReport {
        n_rows,
        n_rows_after_drop,
        n_train: y_train.len(),
        n_test: y_test.len(),
        accuracy,
        confusion_matrix: confusion.as_array(),
        auc,
        auc_proba,
        training_time_secs,
    };

    let outcome = AnalysisOutcome {
        report,
        confusion,
        roc,
        ages,
        pclass,
        survived,
    };

    if config.render_plots {
        render_all(&outcome, config)?;
    }

    Ok(outcome)
}

/// Render the three charts into the configured output directory.
pub fn render_all(outcome: &AnalysisOutcome, config: &AnalysisConfig) -> Result<()> {
    std::fs::create_dir_all(&config.out_dir)
        .map_err(|e| TitanicError::PlotError(format!("{}: {}", config.out_dir.display(), e)))?;

    plots::render_distributions(
        &outcome.ages,
        &outcome.pclass,
        &outcome.survived,
        &config.out_dir.join("distributions.png"),
    )?;
    plots::render_confusion_matrix(&outcome.confusion, &config.out_dir.join("confusion_matrix.png"))?;
    plots::render_roc_curve(
        &outcome.roc,
        outcome.report.auc,
        &config.out_dir.join("roc_curve.png"),
    )?;

    info!(dir = %config.out_dir.display(), "rendered charts");
    Ok(())
}
