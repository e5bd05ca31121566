//! Multi-step forecasting: the iterative feedback loop and strategy dispatch

use crate::data::{Observation, ObservationSeries};
use crate::error::{ForecastError, Result};
use crate::features::{build_feature_rows, next_day_features};
use crate::metrics::{evaluate_forecast, EvaluationMetrics};
use crate::models::decomposition::DecompositionModel;
use crate::models::gradient_boosting::{GradientBoostingParams, GradientBoostingRegressor};
use crate::models::{HorizonModel, Predictor};
use crate::utils::{future_dates, train_test_split};
use chrono::{Duration, NaiveDate};
use log::info;
use serde::{Deserialize, Serialize};

/// One forecasted future day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub forecast: f64,
}

/// Forecast the next `days` days by iterating one day at a time.
///
/// Each iteration builds lag/rolling features from the tail of a working
/// copy of the series, predicts the next day, and appends the prediction
/// back as if it were observed. Later days therefore see earlier
/// *predictions* in their lag features, and error compounds forward; that
/// feedback is the point of the algorithm, not an accident.
///
/// `days = 0` returns an empty forecast and touches nothing.
pub fn iterative_forecast<P: Predictor>(
    model: &P,
    history: &ObservationSeries,
    days: usize,
) -> Result<Vec<ForecastPoint>> {
    if days == 0 {
        return Ok(Vec::new());
    }

    let mut next_date = history
        .last()
        .map(|o| o.date)
        .ok_or(ForecastError::InsufficientData { needed: 1, actual: 0 })?;

    let mut working = history.clone();
    let mut points = Vec::with_capacity(days);

    for _ in 0..days {
        next_date = next_date + Duration::days(1);

        let row = next_day_features(&working, next_date)?;
        let predicted = model.predict_row(&row);

        points.push(ForecastPoint {
            date: next_date,
            forecast: predicted,
        });
        working.push(Observation {
            date: next_date,
            value: predicted,
        })?;
    }

    Ok(points)
}

/// How the forecast is produced
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastStrategy {
    /// Gradient-boosted regression with day-by-day feedback
    IterativeRegression(GradientBoostingParams),
    /// Trend + weekly-seasonal decomposition, whole horizon in one shot
    DecompositionHorizon,
}

/// Result of a forecast run: dated points plus holdout metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastOutcome {
    pub points: Vec<ForecastPoint>,
    pub metrics: EvaluationMetrics,
}

impl ForecastOutcome {
    /// Serialize the outcome as JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| ForecastError::DataError(format!("JSON serialization failed: {}", e)))
    }
}

/// Run one forecast end to end: evaluate on a deterministic 80/20 time
/// split, then produce `horizon` dated forecast points.
///
/// Both strategies share this contract; the split keeps input order and
/// holds out the final fraction, so repeated runs are reproducible.
pub fn run_forecast(
    history: &ObservationSeries,
    strategy: &ForecastStrategy,
    horizon: usize,
    test_fraction: f64,
) -> Result<ForecastOutcome> {
    if !(0.0..1.0).contains(&test_fraction) || test_fraction == 0.0 {
        return Err(ForecastError::InvalidParameter(
            "test_fraction must be in (0, 1)".to_string(),
        ));
    }

    match strategy {
        ForecastStrategy::IterativeRegression(params) => {
            let rows = build_feature_rows(history)?;
            let (train_rows, test_rows) = train_test_split(&rows, test_fraction);

            if train_rows.is_empty() || test_rows.is_empty() {
                return Err(ForecastError::ModelFit(format!(
                    "Too few feature rows ({}) for a {:.0}% holdout",
                    rows.len(),
                    test_fraction * 100.0
                )));
            }

            let regressor = GradientBoostingRegressor::with_params(*params)?;
            let trained = regressor.fit(&train_rows)?;
            let metrics = trained.evaluate(&test_rows)?;

            info!(
                "{}: holdout RMSE {:.4} over {} rows",
                trained.name(),
                metrics.rmse,
                test_rows.len()
            );

            let points = iterative_forecast(&trained, history, horizon)?;
            Ok(ForecastOutcome { points, metrics })
        }
        ForecastStrategy::DecompositionHorizon => {
            let test_size = ((history.len() as f64) * test_fraction).round() as usize;
            let train_size = history.len().saturating_sub(test_size);
            if test_size == 0 || train_size == 0 {
                return Err(ForecastError::ModelFit(format!(
                    "Too few observations ({}) for a {:.0}% holdout",
                    history.len(),
                    test_fraction * 100.0
                )));
            }

            let train = history.head(train_size);
            let eval_model = DecompositionModel::new().fit(&train)?;
            let predicted = eval_model.forecast_horizon(test_size)?;
            let actual: Vec<f64> = history.values()[train_size..].to_vec();
            let metrics = evaluate_forecast(&predicted, &actual)?;

            info!(
                "{}: holdout RMSE {:.4} over {} days",
                eval_model.name(),
                metrics.rmse,
                test_size
            );

            // Final forecast comes from a model fitted on the full history
            let model = DecompositionModel::new().fit(history)?;
            let values = model.forecast_horizon(horizon)?;
            let last_date = history
                .last()
                .map(|o| o.date)
                .ok_or(ForecastError::InsufficientData { needed: 1, actual: 0 })?;

            let points = future_dates(last_date, horizon)
                .into_iter()
                .zip(values)
                .map(|(date, forecast)| ForecastPoint { date, forecast })
                .collect();

            Ok(ForecastOutcome { points, metrics })
        }
    }
}
