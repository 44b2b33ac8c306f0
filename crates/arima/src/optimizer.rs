//! Nelder-Mead estimation of ARIMA parameters.
//!
//! Wraps the `argmin` crate to minimise the negative concentrated
//! log-likelihood over the mean shift and unconstrained PACF parameters.
//!
//! **Not part of the public API.**

use argmin::core::{CostFunction, Executor, State, TerminationReason, TerminationStatus};
use argmin::solver::neldermead::NelderMead;
use nimbus_series::{TimeSeries, difference, seeds_at};
use nimbus_stats::is_constant;
use tracing::{debug, warn};

use crate::error::ArimaError;
use crate::fit::{Convergence, FitParts, FittedModel};
use crate::kalman;
use crate::params;
use crate::spec::ArimaSpec;
use crate::state_space::StateSpace;

/// Simplex edge length in the unconstrained space.
const SIMPLEX_STEP: f64 = 0.5;

/// Relative tolerance for the constant-series check.
const CONSTANT_TOL: f64 = 1e-12;

/// Parameter layout: `[mean shift (optional), alpha_1..p, beta_1..q]`.
///
/// The mean is `centre + scale * shift`, so a unit step moves it by one
/// sample standard deviation.
#[derive(Clone, Copy, Debug)]
struct Layout {
    p: usize,
    q: usize,
    mean: Option<(f64, f64)>,
}

impl Layout {
    fn dim(&self) -> usize {
        usize::from(self.mean.is_some()) + self.p + self.q
    }

    fn unpack(&self, x: &[f64]) -> (f64, Vec<f64>, Vec<f64>) {
        let (mu, rest) = match self.mean {
            Some((centre, scale)) => (centre + scale * x[0], &x[1..]),
            None => (0.0, x),
        };
        let (alpha, beta) = rest.split_at(self.p);
        (
            mu,
            params::unconstrained_to_coeffs(alpha),
            params::unconstrained_to_ma(beta),
        )
    }

    /// Partial autocorrelations of the AR and MA blocks.
    fn partial_autocorrelations(&self, x: &[f64]) -> (Vec<f64>, Vec<f64>) {
        let rest = if self.mean.is_some() { &x[1..] } else { x };
        let (alpha, beta) = rest.split_at(self.p);
        (
            params::unconstrained_to_pacf(alpha),
            params::unconstrained_to_pacf(beta),
        )
    }
}

/// Fits the ARIMA model described by `spec` to `train`.
///
/// 1. Validate length and settings
/// 2. Difference `d` times
/// 3. Start from Yule-Walker AR values, zero MA and the sample mean
/// 4. Minimise the negative concentrated log-likelihood via Nelder-Mead
/// 5. Re-check stability and run a final Kalman pass
#[tracing::instrument(skip_all, fields(order = %spec.order(), n = train.len()))]
pub(crate) fn fit_arima(spec: &ArimaSpec, train: &TimeSeries) -> Result<FittedModel, ArimaError> {
    let order = spec.order();
    let (p, d, q) = (order.p(), order.d(), order.q());
    let values = train.values();

    // 1. Validate
    let min = order.min_observations();
    if values.len() < min {
        return Err(ArimaError::InsufficientData {
            order,
            n: values.len(),
            min,
        });
    }
    if spec.max_iters() == 0 {
        return Err(ArimaError::InvalidArgument {
            name: "max_iters",
            reason: "must be at least 1".to_string(),
        });
    }
    if !(spec.tolerance() > 0.0) {
        return Err(ArimaError::InvalidArgument {
            name: "tolerance",
            reason: format!("must be positive, got {}", spec.tolerance()),
        });
    }
    let last_timestamp = train.end().ok_or(ArimaError::InsufficientData { order, n: 0, min })?;

    // 2. Difference
    let w = difference(values, d)?;
    if is_constant(&w, CONSTANT_TOL) {
        return Err(ArimaError::ConstantData { d });
    }
    let seeds = if d == 0 {
        Vec::new()
    } else {
        seeds_at(values, d, values.len() - 1)?
    };

    let layout = Layout {
        p,
        q,
        mean: spec
            .include_mean()
            .then(|| (nimbus_stats::mean(&w), nimbus_stats::sd(&w).max(f64::EPSILON))),
    };

    // 3-4. Optimise
    let (best, convergence) = if p == 0 && q == 0 {
        // Only the mean is free and its estimate is the sample mean.
        (vec![0.0; layout.dim()], Convergence::Converged { iterations: 0 })
    } else {
        optimise(&layout, &w, spec)?
    };

    // 5. Final coefficients
    let (mu, ar, ma) = layout.unpack(&best);
    let (ar_pacf, ma_pacf) = layout.partial_autocorrelations(&best);
    if !params::pacf_is_stable(&ar_pacf) || !ar.iter().all(|c| c.is_finite()) {
        return Err(ArimaError::NonStationaryFit {
            polynomial: "AR",
            coefficients: ar,
        });
    }
    if !params::pacf_is_stable(&ma_pacf) || !ma.iter().all(|c| c.is_finite()) {
        return Err(ArimaError::NonStationaryFit {
            polynomial: "MA",
            coefficients: ma,
        });
    }
    let centred: Vec<f64> = w.iter().map(|x| x - mu).collect();
    let ss = StateSpace::new(&ar, &ma);
    let output = kalman::kalman_full(&ss, &centred).ok_or_else(|| ArimaError::NonStationaryFit {
        polynomial: "AR",
        coefficients: ar.clone(),
    })?;

    let convergence = match convergence {
        Convergence::DidNotConverge { iterations, .. } => {
            warn!(
                iterations,
                log_likelihood = output.log_likelihood,
                "ARIMA optimisation hit its iteration limit"
            );
            Convergence::DidNotConverge {
                iterations,
                log_likelihood: output.log_likelihood,
            }
        }
        converged => converged,
    };
    debug!(
        ?ar,
        ?ma,
        mean = mu,
        sigma2 = output.sigma2,
        log_likelihood = output.log_likelihood,
        "fit complete"
    );

    Ok(FittedModel::from_parts(FitParts {
        order,
        ar,
        ma,
        mean: layout.mean.map(|_| mu),
        sigma2: output.sigma2,
        residuals: output.residuals,
        log_likelihood: output.log_likelihood,
        convergence,
        params: best,
        predicted_state: output.predicted_state,
        seeds,
        last_timestamp,
    }))
}

fn optimise(
    layout: &Layout,
    w: &[f64],
    spec: &ArimaSpec,
) -> Result<(Vec<f64>, Convergence), ArimaError> {
    let mut start = Vec::with_capacity(layout.dim());
    if layout.mean.is_some() {
        start.push(0.0);
    }
    let centre = layout.mean.map_or(0.0, |(c, _)| c);
    let centred: Vec<f64> = w.iter().map(|x| x - centre).collect();
    start.extend(params::yule_walker_start(&centred, layout.p));
    start.extend(std::iter::repeat_n(0.0, layout.q));

    let mut simplex = Vec::with_capacity(start.len() + 1);
    simplex.push(start.clone());
    for i in 0..start.len() {
        let mut vertex = start.clone();
        vertex[i] += SIMPLEX_STEP;
        simplex.push(vertex);
    }

    let cost = ArimaCost { data: w, layout };
    let solver = NelderMead::new(simplex)
        .with_sd_tolerance(spec.tolerance())
        .map_err(|e| ArimaError::OptimizationFailed {
            reason: e.to_string(),
        })?;
    let result = Executor::new(cost, solver)
        .configure(|state| state.max_iters(spec.max_iters()))
        .run()
        .map_err(|e| ArimaError::OptimizationFailed {
            reason: e.to_string(),
        })?;

    let state = result.state();
    let iterations = state.get_iter();
    let best = state
        .get_best_param()
        .cloned()
        .ok_or_else(|| ArimaError::OptimizationFailed {
            reason: "solver returned no parameters".to_string(),
        })?;
    let hit_limit = matches!(
        state.get_termination_status(),
        TerminationStatus::Terminated(TerminationReason::MaxItersReached)
    );
    debug!(iterations, best_cost = state.get_best_cost(), hit_limit, "Nelder-Mead finished");

    let convergence = if hit_limit {
        Convergence::DidNotConverge {
            iterations,
            log_likelihood: -state.get_best_cost(),
        }
    } else {
        Convergence::Converged { iterations }
    };
    Ok((best, convergence))
}

/// Cost function for argmin: negative concentrated log-likelihood.
struct ArimaCost<'a> {
    data: &'a [f64],
    layout: &'a Layout,
}

impl CostFunction for ArimaCost<'_> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, x: &Self::Param) -> Result<Self::Output, argmin::core::Error> {
        let (mu, ar, ma) = self.layout.unpack(x);
        let centred: Vec<f64> = self.data.iter().map(|v| v - mu).collect();
        let ss = StateSpace::new(&ar, &ma);
        match kalman::kalman_concentrated_loglik(&ss, &centred) {
            Some(loglik) if loglik.is_finite() => Ok(-loglik),
            _ => Ok(f64::MAX),
        }
    }
}
