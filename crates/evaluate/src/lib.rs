//! Nimbus evaluation: score point forecasts against held-out observations.

mod error;
mod scoring;

pub use error::EvaluateError;
pub use scoring::{ScoreReport, score, score_values};
