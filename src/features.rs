//! Lag, rolling-window and calendar feature engineering

use crate::data::{Observation, ObservationSeries};
use crate::error::{ForecastError, Result};
use chrono::{Datelike, NaiveDate};

/// Number of prior observations a feature row depends on
pub const LAG_WINDOW: usize = 7;

/// Minimum series length that yields at least one training row
pub const MIN_TRAINING_OBSERVATIONS: usize = LAG_WINDOW + 1;

/// Feature column names, in the order [`FeatureRow::to_input_vector`] emits
/// them. Single source of truth shared with the regressor.
pub const FEATURE_NAMES: [&str; 8] = [
    "lag1",
    "lag7",
    "rolling_mean7",
    "year",
    "month",
    "day",
    "day_of_week",
    "is_weekend",
];

/// One supervised-learning row derived from a position in a sorted series.
///
/// In training mode `label` is the observed balance at the target date. In
/// forecasting mode the row describes a date with no observed value yet and
/// `label` is left at 0.0.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub label: f64,
    pub lag1: f64,
    pub lag7: f64,
    pub rolling_mean7: f64,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// Day of week with Sunday = 0 through Saturday = 6
    pub day_of_week: u32,
    pub is_weekend: bool,
}

impl FeatureRow {
    /// Concatenate the feature columns (label excluded) into one numeric
    /// vector, ordered per [`FEATURE_NAMES`].
    pub fn to_input_vector(&self) -> Vec<f64> {
        vec![
            self.lag1,
            self.lag7,
            self.rolling_mean7,
            self.year as f64,
            self.month as f64,
            self.day as f64,
            self.day_of_week as f64,
            if self.is_weekend { 1.0 } else { 0.0 },
        ]
    }
}

fn calendar_fields(date: NaiveDate) -> (i32, u32, u32, u32, bool) {
    let day_of_week = date.weekday().num_days_from_sunday();
    let is_weekend = day_of_week == 0 || day_of_week == 6;
    (date.year(), date.month(), date.day(), day_of_week, is_weekend)
}

fn row_at(observations: &[Observation], i: usize) -> FeatureRow {
    let lag1 = observations[i - 1].value;
    let lag7 = observations[i - LAG_WINDOW].value;
    let window = &observations[i - LAG_WINDOW..i];
    let rolling_mean7 = window.iter().map(|o| o.value).sum::<f64>() / window.len() as f64;

    let (year, month, day, day_of_week, is_weekend) = calendar_fields(observations[i].date);

    FeatureRow {
        label: observations[i].value,
        lag1,
        lag7,
        rolling_mean7,
        year,
        month,
        day,
        day_of_week,
        is_weekend,
    }
}

/// Build one training row per index `7 <= i < n` of a date-sorted series.
///
/// The first 7 observations serve only as lag/window context. A series too
/// short to produce any row fails fast instead of yielding an empty training
/// set.
pub fn build_feature_rows(series: &ObservationSeries) -> Result<Vec<FeatureRow>> {
    let observations = series.observations();
    if observations.len() < MIN_TRAINING_OBSERVATIONS {
        return Err(ForecastError::InsufficientData {
            needed: MIN_TRAINING_OBSERVATIONS,
            actual: observations.len(),
        });
    }

    Ok((LAG_WINDOW..observations.len())
        .map(|i| row_at(observations, i))
        .collect())
}

/// Build the forecasting-mode row for `next_date` from the tail of a series.
///
/// `next_date` has no observed value, so the lags come straight from the
/// working series tail. With fewer than 7 entries the row degrades rather
/// than fails: `lag7` reuses `lag1` and the rolling mean averages whatever
/// is available. This mirrors the upstream behavior and is intentional.
pub fn next_day_features(series: &ObservationSeries, next_date: NaiveDate) -> Result<FeatureRow> {
    let observations = series.observations();
    let last = observations
        .last()
        .ok_or(ForecastError::InsufficientData { needed: 1, actual: 0 })?;

    let lag1 = last.value;
    let lag7 = if observations.len() >= LAG_WINDOW {
        observations[observations.len() - LAG_WINDOW].value
    } else {
        lag1
    };

    let window_start = observations.len().saturating_sub(LAG_WINDOW);
    let window = &observations[window_start..];
    let rolling_mean7 = window.iter().map(|o| o.value).sum::<f64>() / window.len() as f64;

    let (year, month, day, day_of_week, is_weekend) = calendar_fields(next_date);

    Ok(FeatureRow {
        label: 0.0,
        lag1,
        lag7,
        rolling_mean7,
        year,
        month,
        day,
        day_of_week,
        is_weekend,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_vector_matches_feature_names() {
        let row = FeatureRow {
            label: 1.0,
            lag1: 2.0,
            lag7: 3.0,
            rolling_mean7: 4.0,
            year: 2026,
            month: 8,
            day: 29,
            day_of_week: 6,
            is_weekend: true,
        };

        assert_eq!(row.to_input_vector().len(), FEATURE_NAMES.len());
    }

    #[test]
    fn weekend_flag_follows_day_of_week() {
        // 2026-08-29 is a Saturday, 2026-08-31 a Monday
        let (.., dow_sat, weekend_sat) =
            calendar_fields(NaiveDate::from_ymd_opt(2026, 8, 29).unwrap());
        let (.., dow_mon, weekend_mon) =
            calendar_fields(NaiveDate::from_ymd_opt(2026, 8, 31).unwrap());

        assert_eq!(dow_sat, 6);
        assert!(weekend_sat);
        assert_eq!(dow_mon, 1);
        assert!(!weekend_mon);
    }
}
