//! Model training
//!
//! Train/test splitting and the logistic regression classifier.

mod logistic;
mod split;

pub use logistic::LogisticRegression;
pub use split::train_test_split;
