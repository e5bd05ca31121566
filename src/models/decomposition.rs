//! Classical trend + weekly-seasonal decomposition forecasting
//!
//! Fits a linear trend over the ordinal index and an additive seasonal
//! component per weekday, then forecasts a whole horizon in one shot. Unlike
//! the iterative regression path there is no feedback: forecast `h` never
//! depends on forecast `h - 1`.

use crate::data::ObservationSeries;
use crate::error::{ForecastError, Result};
use crate::models::HorizonModel;
use chrono::{Datelike, Duration, NaiveDate};
use log::info;
use statrs::statistics::Statistics;

/// Weekly seasonality period
pub const SEASONAL_PERIOD: usize = 7;

/// Untrained decomposition model
#[derive(Debug, Clone, Default)]
pub struct DecompositionModel;

/// Trained decomposition model
#[derive(Debug, Clone)]
pub struct TrainedDecomposition {
    name: String,
    /// OLS slope of the trend over the ordinal index
    slope: f64,
    /// OLS intercept of the trend
    intercept: f64,
    /// Additive seasonal offset per weekday, Sunday = 0
    seasonal: [f64; SEASONAL_PERIOD],
    /// Number of observations the model was fitted on
    n: usize,
    /// Date of the last fitted observation
    last_date: NaiveDate,
}

impl DecompositionModel {
    pub fn new() -> Self {
        Self
    }

    /// Fit trend and seasonal components on a date-sorted series.
    ///
    /// Requires at least one full weekly cycle.
    pub fn fit(&self, series: &ObservationSeries) -> Result<TrainedDecomposition> {
        let observations = series.observations();
        if observations.len() < SEASONAL_PERIOD {
            return Err(ForecastError::InsufficientData {
                needed: SEASONAL_PERIOD,
                actual: observations.len(),
            });
        }

        let n = observations.len();
        let values: Vec<f64> = observations.iter().map(|o| o.value).collect();

        // Least-squares linear trend over the ordinal index 0..n
        let mean_x = (n as f64 - 1.0) / 2.0;
        let mean_y = values.iter().mean();
        let mut covariance = 0.0;
        let mut variance = 0.0;
        for (i, &value) in values.iter().enumerate() {
            let dx = i as f64 - mean_x;
            covariance += dx * (value - mean_y);
            variance += dx * dx;
        }
        let slope = if variance > 0.0 { covariance / variance } else { 0.0 };
        let intercept = mean_y - slope * mean_x;

        // Mean detrended value per weekday
        let mut sums = [0.0; SEASONAL_PERIOD];
        let mut counts = [0usize; SEASONAL_PERIOD];
        for (i, observation) in observations.iter().enumerate() {
            let weekday = observation.date.weekday().num_days_from_sunday() as usize;
            sums[weekday] += observation.value - (intercept + slope * i as f64);
            counts[weekday] += 1;
        }

        let mut seasonal = [0.0; SEASONAL_PERIOD];
        for weekday in 0..SEASONAL_PERIOD {
            if counts[weekday] > 0 {
                seasonal[weekday] = sums[weekday] / counts[weekday] as f64;
            }
        }

        info!(
            "Fitted decomposition on {} observations (slope {:.4})",
            n, slope
        );

        Ok(TrainedDecomposition {
            name: "TrendSeasonalDecomposition(period=7)".to_string(),
            slope,
            intercept,
            seasonal,
            n,
            last_date: observations[n - 1].date,
        })
    }
}

impl HorizonModel for TrainedDecomposition {
    fn forecast_horizon(&self, horizon: usize) -> Result<Vec<f64>> {
        let mut values = Vec::with_capacity(horizon);
        for h in 1..=horizon {
            let index = (self.n - 1 + h) as f64;
            let date = self.last_date + Duration::days(h as i64);
            let weekday = date.weekday().num_days_from_sunday() as usize;
            values.push(self.intercept + self.slope * index + self.seasonal[weekday]);
        }

        Ok(values)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Observation;
    use assert_approx_eq::assert_approx_eq;

    fn series_with(values: &[f64]) -> ObservationSeries {
        let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        ObservationSeries::new(
            values
                .iter()
                .enumerate()
                .map(|(i, &value)| Observation {
                    date: start + Duration::days(i as i64),
                    value,
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn requires_one_full_cycle() {
        let series = series_with(&[1.0, 2.0, 3.0]);
        assert!(matches!(
            DecompositionModel::new().fit(&series),
            Err(ForecastError::InsufficientData { needed: 7, .. })
        ));
    }

    #[test]
    fn recovers_pure_linear_trend() {
        let values: Vec<f64> = (0..28).map(|i| 50.0 + 2.0 * i as f64).collect();
        let series = series_with(&values);

        let trained = DecompositionModel::new().fit(&series).unwrap();
        let forecast = trained.forecast_horizon(3).unwrap();

        assert_eq!(forecast.len(), 3);
        assert_approx_eq!(forecast[0], 50.0 + 2.0 * 28.0, 1e-6);
        assert_approx_eq!(forecast[2], 50.0 + 2.0 * 30.0, 1e-6);
    }

    #[test]
    fn recovers_weekly_pattern() {
        // Repeating weekly shape, symmetric within the week so the fitted
        // trend slope is exactly zero
        let pattern = [8.0, 12.0, 9.0, 13.0, 9.0, 12.0, 8.0];
        let values: Vec<f64> = (0..28).map(|i| pattern[i % 7]).collect();
        let series = series_with(&values);

        let trained = DecompositionModel::new().fit(&series).unwrap();
        let forecast = trained.forecast_horizon(7).unwrap();

        for (h, value) in forecast.iter().enumerate() {
            assert_approx_eq!(*value, pattern[(28 + h) % 7], 1e-6);
        }
    }
}
