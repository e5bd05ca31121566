//! Gradient-boosted regression trees for balance forecasting
//!
//! A deterministic boosting implementation over regression stumps: every
//! round scans all feature columns and candidate thresholds in a fixed order,
//! so fitting the same rows twice yields byte-identical models.

use crate::error::{ForecastError, Result};
use crate::features::{FeatureRow, FEATURE_NAMES};
use crate::metrics::{evaluate_forecast, EvaluationMetrics};
use crate::models::Predictor;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Gradient boosting hyperparameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientBoostingParams {
    /// Number of boosting rounds (trees)
    pub n_trees: usize,
    /// Shrinkage applied to each tree's contribution
    pub learning_rate: f64,
}

impl Default for GradientBoostingParams {
    fn default() -> Self {
        Self {
            n_trees: 200,
            learning_rate: 0.1,
        }
    }
}

/// A single-split regression tree
#[derive(Debug, Clone)]
struct RegressionStump {
    feature_index: usize,
    threshold: f64,
    left_value: f64,
    right_value: f64,
}

impl RegressionStump {
    fn predict(&self, input: &[f64]) -> f64 {
        if input[self.feature_index] <= self.threshold {
            self.left_value
        } else {
            self.right_value
        }
    }
}

/// Untrained gradient boosting regressor
#[derive(Debug, Clone)]
pub struct GradientBoostingRegressor {
    name: String,
    params: GradientBoostingParams,
}

/// Trained gradient boosting regressor
#[derive(Debug, Clone)]
pub struct TrainedGradientBoosting {
    name: String,
    learning_rate: f64,
    base_score: f64,
    trees: Vec<RegressionStump>,
}

impl GradientBoostingRegressor {
    /// Create a regressor with default parameters
    pub fn new() -> Self {
        Self::from_valid(GradientBoostingParams::default())
    }

    /// Create a regressor with custom parameters
    pub fn with_params(params: GradientBoostingParams) -> Result<Self> {
        if params.n_trees == 0 {
            return Err(ForecastError::InvalidParameter(
                "n_trees must be at least 1".to_string(),
            ));
        }
        if params.learning_rate <= 0.0 || params.learning_rate > 1.0 {
            return Err(ForecastError::InvalidParameter(
                "learning_rate must be in (0, 1]".to_string(),
            ));
        }

        Ok(Self::from_valid(params))
    }

    fn from_valid(params: GradientBoostingParams) -> Self {
        Self {
            name: format!(
                "GradientBoosting(n_trees={}, learning_rate={})",
                params.n_trees, params.learning_rate
            ),
            params,
        }
    }

    /// Get the hyperparameters
    pub fn params(&self) -> &GradientBoostingParams {
        &self.params
    }

    /// Fit the regressor on training rows, minimizing squared error.
    ///
    /// The base score is the label mean; each round fits the best stump to
    /// the current residuals. Zero training rows abort the run.
    pub fn fit(&self, rows: &[FeatureRow]) -> Result<TrainedGradientBoosting> {
        if rows.is_empty() {
            return Err(ForecastError::ModelFit(
                "Received zero training rows".to_string(),
            ));
        }

        let inputs: Vec<Vec<f64>> = rows.iter().map(|r| r.to_input_vector()).collect();
        let labels: Vec<f64> = rows.iter().map(|r| r.label).collect();

        info!(
            "Fitting gradient boosting regressor on {} rows x {} features",
            rows.len(),
            FEATURE_NAMES.len()
        );

        let base_score = labels.iter().sum::<f64>() / labels.len() as f64;
        let mut residuals: Vec<f64> = labels.iter().map(|l| l - base_score).collect();

        let mut trees = Vec::with_capacity(self.params.n_trees);
        for round in 0..self.params.n_trees {
            let stump = match fit_stump(&inputs, &residuals) {
                Some(stump) => stump,
                // No feature column offers a valid split; further rounds
                // cannot reduce the residuals.
                None => {
                    debug!("Boosting stopped at round {}: no valid split left", round);
                    break;
                }
            };

            for (residual, input) in residuals.iter_mut().zip(inputs.iter()) {
                *residual -= self.params.learning_rate * stump.predict(input);
            }
            trees.push(stump);
        }

        Ok(TrainedGradientBoosting {
            name: self.name.clone(),
            learning_rate: self.params.learning_rate,
            base_score,
            trees,
        })
    }

    /// Get the name of the model
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Default for GradientBoostingRegressor {
    fn default() -> Self {
        Self::new()
    }
}

/// Fit the best stump to the residuals, scanning features in declared order
/// and thresholds ascending. Ties keep the first candidate found, so the
/// result is deterministic.
fn fit_stump(inputs: &[Vec<f64>], residuals: &[f64]) -> Option<RegressionStump> {
    let n_features = inputs.first()?.len();
    let mut best: Option<(f64, RegressionStump)> = None;

    for feature_index in 0..n_features {
        let mut pairs: Vec<(f64, f64)> = inputs
            .iter()
            .zip(residuals.iter())
            .map(|(input, &residual)| (input[feature_index], residual))
            .collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        let total_sum: f64 = pairs.iter().map(|(_, r)| r).sum();
        let n = pairs.len();

        let mut left_sum = 0.0;
        for split in 0..n - 1 {
            left_sum += pairs[split].1;

            // Only split between distinct feature values
            if pairs[split].0 == pairs[split + 1].0 {
                continue;
            }

            let left_count = (split + 1) as f64;
            let right_count = (n - split - 1) as f64;
            let right_sum = total_sum - left_sum;

            // Minimizing SSE is maximizing the explained sum of squares
            let score = left_sum.powi(2) / left_count + right_sum.powi(2) / right_count;

            if best.as_ref().map_or(true, |(s, _)| score > *s) {
                best = Some((
                    score,
                    RegressionStump {
                        feature_index,
                        threshold: (pairs[split].0 + pairs[split + 1].0) / 2.0,
                        left_value: left_sum / left_count,
                        right_value: right_sum / right_count,
                    },
                ));
            }
        }
    }

    best.map(|(_, stump)| stump)
}

impl TrainedGradientBoosting {
    /// Number of trees actually fitted (boosting may stop early)
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Evaluate the model against held-out rows
    pub fn evaluate(&self, rows: &[FeatureRow]) -> Result<EvaluationMetrics> {
        let predicted: Vec<f64> = rows.iter().map(|r| self.predict_row(r)).collect();
        let actual: Vec<f64> = rows.iter().map(|r| r.label).collect();

        evaluate_forecast(&predicted, &actual)
    }
}

impl Predictor for TrainedGradientBoosting {
    fn predict_row(&self, row: &FeatureRow) -> f64 {
        let input = row.to_input_vector();
        self.base_score
            + self
                .trees
                .iter()
                .map(|tree| self.learning_rate * tree.predict(&input))
                .sum::<f64>()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
