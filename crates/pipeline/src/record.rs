//! The flattened per-run record handed to results stores.

use nimbus_arima::{FittedModel, ForecastResult};
use nimbus_calendar::YearMonth;
use nimbus_evaluate::ScoreReport;
use nimbus_series::TimeSeries;
use nimbus_stationarity::StationarityReport;
use serde::{Deserialize, Serialize};

/// One row of the results table.
///
/// Field order is the column order of the `arima_model` table. Dates are
/// formatted `YYYY-MM`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    pub adf_stat: f64,
    pub adf_pvalue: f64,
    pub adf_stat_diff: f64,
    pub adf_pvalue_diff: f64,
    pub order_p: usize,
    pub order_d: usize,
    pub order_q: usize,
    pub forecast_steps: usize,
    pub model_summary: String,
    pub mse: f64,
    pub mae: f64,
    pub city: String,
    pub train_start: String,
    pub train_end: String,
    pub test_start: String,
    pub test_end: String,
}

impl ModelRecord {
    /// Assembles the record from the results of a completed run.
    #[allow(clippy::too_many_arguments)]
    pub fn from_run(
        city: &str,
        train: &TimeSeries,
        test: &TimeSeries,
        level_adf: &StationarityReport,
        diff_adf: &StationarityReport,
        model: &FittedModel,
        forecast: &ForecastResult,
        score: &ScoreReport,
    ) -> Self {
        let order = model.order();
        Self {
            adf_stat: level_adf.statistic(),
            adf_pvalue: level_adf.p_value(),
            adf_stat_diff: diff_adf.statistic(),
            adf_pvalue_diff: diff_adf.p_value(),
            order_p: order.p(),
            order_d: order.d(),
            order_q: order.q(),
            forecast_steps: forecast.len(),
            model_summary: model.summary(),
            mse: score.mse,
            mae: score.mae,
            city: city.to_string(),
            train_start: month_label(train.start()),
            train_end: month_label(train.end()),
            test_start: month_label(test.start()),
            test_end: month_label(test.end()),
        }
    }
}

fn month_label(month: Option<YearMonth>) -> String {
    month.map(|m| m.to_string()).unwrap_or_default()
}
