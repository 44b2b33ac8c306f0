//! # nimbus-arima
//!
//! ARIMA(p,d,q) fitting by exact Gaussian maximum likelihood (Kalman
//! filter) and multi-step forecasting with confidence intervals.
//!
//! ## Workflow
//!
//! ```mermaid
//! graph LR
//!     A["ArimaSpec::new(ArimaOrder::new(p, d, q))"] -->|".fit(&train)?"| B["FittedModel"]
//!     B --> C[".ar() / .ma() / .mean()"]
//!     B --> D[".sigma2() / .residuals()"]
//!     B --> E[".aic() / .bic() / .summary()"]
//!     B -->|".forecast(steps, 0.95)?"| F["ForecastResult"]
//! ```
//!
//! ```ignore
//! let model = ArimaSpec::new(ArimaOrder::new(1, 0, 0)).fit(&train)?;
//! let forecast = model.forecast(test.len(), 0.95)?;
//! ```
//!
//! ## Estimation
//!
//! The training series is differenced `d` times. The ARMA(p,q) part is put
//! in companion state-space form and the innovation variance is
//! concentrated out of the likelihood. Nelder-Mead searches an
//! unconstrained space that maps through `tanh` to partial
//! autocorrelations, clamped strictly inside (-1, 1) so that saturated
//! parameters still give a stationary AR and an invertible MA polynomial
//! in floating point. Reaching the iteration limit still yields a
//! model; see [`FittedModel::convergence()`].
//!
//! ## Mathematical Glossary
//!
//! | Symbol | Accessor | Meaning |
//! |--------|----------|---------|
//! | phi | [`FittedModel::ar()`] | AR coefficients: weights on past (differenced) observations |
//! | theta | [`FittedModel::ma()`] | MA coefficients: weights on past forecast errors |
//! | mu | [`FittedModel::mean()`] | mean of the differenced series |
//! | sigma2 | [`FittedModel::sigma2()`] | innovation (white-noise) variance |
//! | psi | | impulse-response weights driving forecast variance |

mod error;
mod fit;
mod forecast;
mod spec;

pub(crate) mod kalman;
pub(crate) mod optimizer;
pub(crate) mod params;
pub(crate) mod state_space;

pub use error::ArimaError;
pub use fit::{Convergence, FittedModel};
pub use forecast::{ForecastPoint, ForecastResult, IntervalMethod};
pub use spec::{ArimaOrder, ArimaSpec};
