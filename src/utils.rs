//! Utility functions for the forecast_inventory crate

use crate::data::ObservationSeries;
use crate::forecast::ForecastPoint;
use chrono::{Duration, NaiveDate};

/// Split rows into training and test sets, keeping input order.
///
/// The final `test_fraction` of the rows (rounded) becomes the test set.
/// This is the crate's one split policy: deterministic, so evaluation
/// numbers are reproducible run to run.
pub fn train_test_split<T: Clone>(rows: &[T], test_fraction: f64) -> (Vec<T>, Vec<T>) {
    if rows.is_empty() || test_fraction <= 0.0 || test_fraction >= 1.0 {
        return (rows.to_vec(), Vec::new());
    }

    let test_size = (rows.len() as f64 * test_fraction).round() as usize;
    let train_size = rows.len() - test_size;

    (rows[..train_size].to_vec(), rows[train_size..].to_vec())
}

/// Format one console line for a dated value: `YYYY-MM-DD: <2 decimals>`
pub fn format_value_line(date: NaiveDate, value: f64) -> String {
    format!("{}: {:.2}", date, value)
}

/// Create the consecutive future dates for a forecast horizon
pub fn future_dates(last_date: NaiveDate, horizon: usize) -> Vec<NaiveDate> {
    (1..=horizon as i64)
        .map(|offset| last_date + Duration::days(offset))
        .collect()
}

/// Build the two (date, value) point sequences an external chart renderer
/// consumes: historical observations and forecasted points.
pub fn chart_series(
    history: &ObservationSeries,
    forecast: &[ForecastPoint],
) -> (Vec<(NaiveDate, f64)>, Vec<(NaiveDate, f64)>) {
    let historical = history
        .observations()
        .iter()
        .map(|o| (o.date, o.value))
        .collect();
    let forecasted = forecast.iter().map(|p| (p.date, p.forecast)).collect();

    (historical, forecasted)
}
