//! Forecasting models

use crate::error::Result;
use crate::features::FeatureRow;
use std::fmt::Debug;

/// A fitted model that scores one feature row at a time.
///
/// Prediction is deterministic and has no side effects on the model; the
/// iterative forecast loop depends on both properties.
pub trait Predictor: Debug {
    /// Predict the balance for a single feature row
    fn predict_row(&self, row: &FeatureRow) -> f64;

    /// Name of the model
    fn name(&self) -> &str;
}

/// A fitted model that forecasts a whole horizon in one shot, without
/// feeding predictions back into its inputs.
pub trait HorizonModel: Debug {
    /// Forecast the next `horizon` values
    fn forecast_horizon(&self, horizon: usize) -> Result<Vec<f64>>;

    /// Name of the model
    fn name(&self) -> &str;
}

pub mod decomposition;
pub mod gradient_boosting;
