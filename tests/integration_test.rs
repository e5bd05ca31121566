//! End-to-end runs through the public API, from configuration to forecast

use chrono::{Duration, NaiveDate};
use forecast_inventory::config::{DataSource, RunConfig};
use forecast_inventory::data::DataLoader;
use forecast_inventory::forecast::{run_forecast, ForecastStrategy};
use forecast_inventory::models::gradient_boosting::GradientBoostingParams;
use forecast_inventory::utils::{chart_series, format_value_line, future_dates, train_test_split};

#[test]
fn synthetic_config_runs_end_to_end() {
    let config = RunConfig::synthetic_default(42);
    let series = config.load_series().unwrap();
    assert_eq!(series.len(), 90);

    let outcome =
        run_forecast(&series, &config.strategy, config.horizon, config.test_fraction).unwrap();

    assert_eq!(outcome.points.len(), config.horizon);
    assert!(outcome.points.iter().all(|p| p.forecast.is_finite()));
    assert!(outcome.metrics.rmse.is_finite());

    let (historical, forecasted) = chart_series(&series, &outcome.points);
    assert_eq!(historical.len(), 90);
    assert_eq!(forecasted.len(), config.horizon);
    // The forecast picks up where the history ends
    assert_eq!(forecasted[0].0, historical.last().unwrap().0 + Duration::days(1));
}

#[test]
fn csv_source_runs_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input.csv");

    let reference = RunConfig::synthetic_default(9).load_series().unwrap();
    DataLoader::to_csv(&reference, &path).unwrap();

    let config = RunConfig {
        source: DataSource::Csv {
            path,
            date_column: "date".to_string(),
            value_column: "balance".to_string(),
        },
        strategy: ForecastStrategy::IterativeRegression(GradientBoostingParams {
            n_trees: 50,
            learning_rate: 0.1,
        }),
        horizon: 3,
        test_fraction: 0.2,
    };

    let series = config.load_series().unwrap();
    let outcome =
        run_forecast(&series, &config.strategy, config.horizon, config.test_fraction).unwrap();

    assert_eq!(outcome.points.len(), 3);
}

#[test]
fn both_strategies_forecast_the_same_series() {
    let series = RunConfig::synthetic_default(17).load_series().unwrap();

    let regression = run_forecast(
        &series,
        &ForecastStrategy::IterativeRegression(GradientBoostingParams::default()),
        7,
        0.2,
    )
    .unwrap();
    let decomposition =
        run_forecast(&series, &ForecastStrategy::DecompositionHorizon, 7, 0.2).unwrap();

    assert_eq!(regression.points.len(), 7);
    assert_eq!(decomposition.points.len(), 7);
    for (a, b) in regression.points.iter().zip(decomposition.points.iter()) {
        assert_eq!(a.date, b.date);
    }
}

#[test]
fn repeated_runs_are_reproducible() {
    let config = RunConfig::synthetic_default(42);
    let series = config.load_series().unwrap();

    let first =
        run_forecast(&series, &config.strategy, config.horizon, config.test_fraction).unwrap();
    let second =
        run_forecast(&series, &config.strategy, config.horizon, config.test_fraction).unwrap();

    assert_eq!(first.points, second.points);
    assert_eq!(first.metrics, second.metrics);
}

#[test]
fn split_is_order_preserving_80_20() {
    let rows: Vec<i32> = (0..10).collect();
    let (train, test) = train_test_split(&rows, 0.2);

    assert_eq!(train, (0..8).collect::<Vec<_>>());
    assert_eq!(test, vec![8, 9]);
}

#[test]
fn console_lines_cover_history_and_forecast() {
    let config = RunConfig::synthetic_default(42);
    let series = config.load_series().unwrap();
    let outcome =
        run_forecast(&series, &config.strategy, config.horizon, config.test_fraction).unwrap();

    // Every historical observation gets an echo line, then every forecast point
    let lines: Vec<String> = series
        .observations()
        .iter()
        .map(|o| format_value_line(o.date, o.value))
        .chain(
            outcome
                .points
                .iter()
                .map(|p| format_value_line(p.date, p.forecast)),
        )
        .collect();

    assert_eq!(lines.len(), series.len() + config.horizon);
    assert!(lines[0].starts_with("2026-06-01: "));
}

#[test]
fn value_lines_use_iso_dates_and_two_decimals() {
    let date = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();

    assert_eq!(format_value_line(date, 105.0), "2026-08-29: 105.00");
    assert_eq!(format_value_line(date, 100.456), "2026-08-29: 100.46");
}

#[test]
fn future_dates_are_consecutive() {
    let last = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();
    let dates = future_dates(last, 3);

    assert_eq!(
        dates,
        vec![
            NaiveDate::from_ymd_opt(2026, 8, 30).unwrap(),
            NaiveDate::from_ymd_opt(2026, 8, 31).unwrap(),
            NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
        ]
    );
}
