//! Data cleaning and encoding
//!
//! Provides the preprocessing steps the analysis needs:
//! - Missing value imputation (median fill on `Age`, row drop on `Embarked`)
//! - Categorical encoding (explicit mapping on `Sex`, factorization on
//!   `Embarked`)
//! - Feature standardization ahead of gradient descent
//!
//! All follow a fit/transform contract so fitted state (fill values,
//! category tables, column statistics) is explicit and reusable.

mod encoder;
mod imputer;
mod scaler;

pub use encoder::{Encoder, EncoderType};
pub use imputer::{ImputeStrategy, Imputer};
pub use scaler::StandardScaler;
