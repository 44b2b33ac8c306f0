//! # nimbus-pipeline
//!
//! Runs the forecasting stages for one city in a fixed order:
//!
//! 1. **ADF** on the training levels
//! 2. **ADF** on the training series differenced `max(d, 1)` times
//! 3. **Fit** an ARIMA model of the configured order
//! 4. **Forecast** as many steps as the test series holds
//! 5. **Score** the forecast against the test series
//! 6. **Record** the flattened [`ModelRecord`] into a [`ResultsSink`]
//!
//! The first failing stage aborts the run. Its error is returned inside a
//! [`PipelineFailure`] together with everything computed before it.
//!
//! ```ignore
//! let pipeline = ForecastPipeline::new(PipelineConfig::new(ArimaOrder::new(1, 0, 0)));
//! let mut sink = MemorySink::new();
//! let run = pipeline.run("Rome", &train, &test, &mut sink)?;
//! println!("{}", run.score().mse);
//! ```

mod config;
mod error;
mod record;
mod run;
mod sink;

pub use config::PipelineConfig;
pub use error::{PartialRun, PipelineError, PipelineFailure};
pub use record::ModelRecord;
pub use run::{ForecastPipeline, ForecastRun};
pub use sink::{MemorySink, ResultsSink, SinkError};
