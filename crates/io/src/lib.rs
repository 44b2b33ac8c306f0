//! # nimbus-io
//!
//! File formats at the edge of the forecasting pipeline:
//!
//! - [`read_city_series`] loads one city's monthly temperatures from the
//!   Berkeley Earth `GlobalLandTemperaturesByMajorCity.csv` layout.
//! - [`CsvResultsStore`] appends [`ModelRecord`](nimbus_pipeline::ModelRecord)
//!   rows to the `arima_model` results table.
//! - [`write_plot_data`] exports series, forecasts and residuals as JSON
//!   for external plotting.

mod error;
mod plot;
mod reader;
mod store;

pub use error::IoError;
pub use plot::{PlotData, write_plot_data};
pub use reader::{ReaderConfig, read_city_series};
pub use store::{CsvResultsStore, RESULT_COLUMNS};
