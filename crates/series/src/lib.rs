//! # nimbus-series
//!
//! Timestamped monthly series and the differencing transform that makes
//! them stationary before ARMA estimation.
//!
//! ```mermaid
//! graph LR
//!     A["TimeSeries::new(months, values)?"] -->|".split_at(k)?"| B["(train, test)"]
//!     A -->|".difference(d)?"| C["TimeSeries (n - d)"]
//!     D["difference(values, d)?"] --> E["Vec (n - d)"]
//!     E -->|"undifference(diff, seeds)"| F["level continuation"]
//! ```
//!
//! The seeds for [`undifference`] come from [`seeds_at`]: entry `k` is the
//! value of the `k`-th difference at the time step just before the
//! window being integrated. Seeds taken at `d - 1` rebuild the original
//! series; seeds taken at the last observation extend it into the future.

mod difference;
mod error;
mod series;

pub use difference::{difference, seeds_at, undifference};
pub use error::SeriesError;
pub use series::{TimeSeries, split_train_test};
