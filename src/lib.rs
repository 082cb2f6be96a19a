//! Titanic survival analysis
//!
//! Loads the Titanic passenger CSV, cleans and encodes it, trains a
//! logistic regression classifier and reports accuracy, confusion matrix
//! and AUC, then renders three charts as PNG files.
//!
//! # Modules
//!
//! - [`data`] - CSV loading and dataset summaries
//! - [`preprocessing`] - Missing value imputation and categorical encoding
//! - [`training`] - Train/test split and logistic regression
//! - [`metrics`] - Accuracy, confusion matrix, ROC curve and AUC
//! - [`plots`] - Chart rendering via plotters
//! - [`analysis`] - End-to-end pipeline shared by the CLI and tests
//! - [`cli`] - Command-line interface

pub mod error;

pub mod analysis;
pub mod cli;
pub mod data;
pub mod metrics;
pub mod plots;
pub mod preprocessing;
pub mod training;

pub use error::{Result, TitanicError};
