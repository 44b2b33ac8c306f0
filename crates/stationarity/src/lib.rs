//! # nimbus-stationarity
//!
//! Augmented Dickey-Fuller (ADF) unit-root test.
//!
//! ```mermaid
//! graph LR
//!     A["AdfConfig::new()"] -->|".with_regression(..)"| A
//!     A -->|".test(&values)?"| B["StationarityReport"]
//!     B --> C[".statistic() / .p_value()"]
//!     B --> D[".critical_value(Significance::FivePercent)"]
//!     B --> E[".is_stationary(Significance::FivePercent)"]
//! ```
//!
//! The first difference of the series is regressed on its lagged level,
//! optional deterministic terms and `k` lagged differences:
//!
//! ```text
//! dy[t] = gamma * y[t-1] + sum_i delta_i * dy[t-i] + (c) + (b * t) + e[t]
//! ```
//!
//! The statistic is the OLS t-value of `gamma`. Under the null the series
//! has a unit root, so strongly negative statistics reject non-stationarity.
//! p-values follow MacKinnon (1994); critical values follow the MacKinnon
//! (2010) finite-sample response surfaces.

mod adf;
mod config;
mod error;
mod mackinnon;
mod ols;
mod report;

pub use config::{AdfConfig, Autolag, Regression};
pub use error::StationarityError;
pub use mackinnon::{critical_values, p_value};
pub use report::{Significance, StationarityReport};
