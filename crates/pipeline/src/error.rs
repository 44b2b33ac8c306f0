//! Error types for pipeline runs.

use nimbus_arima::{ArimaError, FittedModel, ForecastResult};
use nimbus_evaluate::{EvaluateError, ScoreReport};
use nimbus_series::SeriesError;
use nimbus_stationarity::{StationarityError, StationarityReport};

use crate::record::ModelRecord;
use crate::sink::SinkError;

/// The stage error that aborted a run, carried unmodified.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// ADF test failed on the level or differenced training series.
    #[error("ADF test on {series} training series failed")]
    Stationarity {
        series: &'static str,
        #[source]
        source: StationarityError,
    },

    /// Splitting or differencing the input series failed.
    #[error("preparing the series failed")]
    Series(#[source] SeriesError),

    /// Model estimation failed, or did not converge under strict mode.
    #[error("fitting the model failed")]
    Fit(#[source] ArimaError),

    /// Forecasting failed.
    #[error("forecasting failed")]
    Forecast(#[source] ArimaError),

    /// Scoring against the test series failed.
    #[error("scoring failed")]
    Score(#[source] EvaluateError),

    /// The results sink rejected the record.
    #[error("writing the model record failed")]
    Sink(#[source] SinkError),
}

impl PipelineError {
    /// Short name of the stage that failed.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Stationarity { .. } => "stationarity",
            Self::Series(_) => "series",
            Self::Fit(_) => "fit",
            Self::Forecast(_) => "forecast",
            Self::Score(_) => "score",
            Self::Sink(_) => "record",
        }
    }
}

/// Results computed before a run aborted.
#[derive(Clone, Debug, Default)]
pub struct PartialRun {
    pub level_adf: Option<StationarityReport>,
    pub diff_adf: Option<StationarityReport>,
    pub model: Option<FittedModel>,
    pub forecast: Option<ForecastResult>,
    pub score: Option<ScoreReport>,
    pub record: Option<ModelRecord>,
}

/// A failed run: the stage error and the partial results.
#[derive(Debug, thiserror::Error)]
#[error("forecast pipeline stopped at the {} stage", error.stage())]
pub struct PipelineFailure {
    #[source]
    pub error: PipelineError,
    pub partial: PartialRun,
}

impl PipelineFailure {
    pub(crate) fn new(error: PipelineError, partial: PartialRun) -> Self {
        Self { error, partial }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_stage_names() {
        let err = PipelineError::Score(EvaluateError::Empty);
        assert_eq!(err.stage(), "score");
        let err = PipelineError::Stationarity {
            series: "level",
            source: StationarityError::InsufficientData { n: 3, min: 20 },
        };
        assert_eq!(err.stage(), "stationarity");
        assert_eq!(err.to_string(), "ADF test on level training series failed");
    }

    #[test]
    fn test_failure_keeps_source_chain() {
        let failure = PipelineFailure::new(
            PipelineError::Fit(ArimaError::ConstantData { d: 0 }),
            PartialRun::default(),
        );
        assert_eq!(failure.to_string(), "forecast pipeline stopped at the fit stage");
        let fit = failure.source().unwrap();
        assert_eq!(fit.to_string(), "fitting the model failed");
        assert!(fit.source().is_some());
    }
}
