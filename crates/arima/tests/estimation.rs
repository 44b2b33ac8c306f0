//! Estimation properties of nimbus-arima.

use nimbus_arima::{ArimaError, ArimaOrder, ArimaSpec};
use nimbus_calendar::YearMonth;
use nimbus_series::TimeSeries;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

fn generate_ar1(phi: f64, n: usize, seed: u64) -> Vec<f64> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 1.0).unwrap();
    let mut data = vec![0.0; n];
    for t in 1..n {
        data[t] = phi * data[t - 1] + normal.sample(&mut rng);
    }
    data
}

fn generate_arma11(phi: f64, theta: f64, n: usize, seed: u64) -> Vec<f64> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 1.0).unwrap();
    let mut data = vec![0.0; n];
    let mut prev_eps = 0.0;
    for t in 0..n {
        let eps = normal.sample(&mut rng);
        let ar_part = if t > 0 { phi * data[t - 1] } else { 0.0 };
        data[t] = ar_part + eps + theta * prev_eps;
        prev_eps = eps;
    }
    data
}

fn monthly(values: Vec<f64>) -> TimeSeries {
    TimeSeries::monthly(YearMonth::new(1900, 1).unwrap(), values).unwrap()
}

#[test]
fn ar1_estimate_tightens_with_sample_size() {
    let phi = 0.6;
    let spec = ArimaSpec::new(ArimaOrder::new(1, 0, 0));
    let errors: Vec<f64> = [100, 400, 1600]
        .iter()
        .map(|&n| {
            let fit = spec.fit(&monthly(generate_ar1(phi, n, 2024))).unwrap();
            (fit.ar()[0] - phi).abs()
        })
        .collect();
    assert!(errors[0] < 0.25, "n=100 error {}", errors[0]);
    assert!(errors[2] < 0.06, "n=1600 error {}", errors[2]);
}

#[test]
fn fitted_ar_is_always_stationary() {
    // Near-unit-root data still yields |phi| < 1.
    let data = generate_ar1(0.995, 400, 3);
    let fit = ArimaSpec::new(ArimaOrder::new(1, 0, 0))
        .fit(&monthly(data))
        .unwrap();
    assert!(fit.ar()[0].abs() < 1.0);
}

#[test]
fn arma11_recovery() {
    let data = generate_arma11(0.5, 0.3, 2000, 11);
    let fit = ArimaSpec::new(ArimaOrder::new(1, 0, 1))
        .with_max_iters(3000)
        .fit(&monthly(data))
        .unwrap();
    assert!((fit.ar()[0] - 0.5).abs() < 0.12, "phi = {}", fit.ar()[0]);
    assert!((fit.ma()[0] - 0.3).abs() < 0.12, "theta = {}", fit.ma()[0]);
    assert!((fit.sigma2() - 1.0).abs() < 0.15, "sigma2 = {}", fit.sigma2());
}

#[test]
fn residuals_cover_differenced_sample() {
    let mut level = 0.0;
    let data: Vec<f64> = generate_ar1(0.3, 120, 8)
        .into_iter()
        .map(|dx| {
            level += dx;
            level
        })
        .collect();
    let fit = ArimaSpec::new(ArimaOrder::new(1, 1, 1))
        .fit(&monthly(data))
        .unwrap();
    assert_eq!(fit.residuals().len(), 119);
    assert_eq!(fit.nobs(), 119);
    assert!(fit.residuals().iter().all(|r| r.is_finite()));
    assert!(fit.aic().is_finite());
}

#[test]
fn short_series_is_rejected_with_context() {
    let err = ArimaSpec::new(ArimaOrder::new(3, 1, 2))
        .fit(&monthly(vec![1.0, 2.0, 0.5, 3.0, 2.5, 1.0]))
        .unwrap_err();
    assert_eq!(
        err,
        ArimaError::InsufficientData {
            order: ArimaOrder::new(3, 1, 2),
            n: 6,
            min: 7,
        }
    );
}

#[test]
fn fit_is_deterministic() {
    let data = generate_arma11(0.4, -0.2, 300, 5);
    let spec = ArimaSpec::new(ArimaOrder::new(1, 0, 1));
    let a = spec.fit(&monthly(data.clone())).unwrap();
    let b = spec.fit(&monthly(data)).unwrap();
    assert_eq!(a.ar(), b.ar());
    assert_eq!(a.ma(), b.ma());
    assert_eq!(a.log_likelihood(), b.log_likelihood());
}

/// Monthly temperature-like series: annual cycle plus unit noise.
fn seasonal_temperatures(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 1.0).unwrap();
    (0..n)
        .map(|t| {
            let phase = 2.0 * std::f64::consts::PI * t as f64 / 12.0;
            11.0 + 7.0 * phase.sin() + normal.sample(&mut rng)
        })
        .collect()
}

/// `1 + theta_1 z + theta_2 z^2` has both roots outside the unit circle.
fn ma2_invertible(theta: &[f64]) -> bool {
    theta[1].abs() < 1.0 && theta[0].abs() < 1.0 + theta[1]
}

#[test]
fn seasonal_series_fits_near_ma_unit_root() {
    // Differencing an annual cycle pushes the MA part onto its unit root.
    for seed in 0..12 {
        let data = seasonal_temperatures(156, seed);
        let train = monthly(data[..140].to_vec());

        let fit = ArimaSpec::new(ArimaOrder::new(2, 1, 2))
            .fit(&train)
            .unwrap_or_else(|e| panic!("seed {seed}: {e}"));
        assert!(ma2_invertible(fit.ma()), "seed {seed}: {:?}", fit.ma());
        let fc = fit.forecast(16, 0.95).unwrap();
        assert!(fc.forecasts().iter().all(|f| f.is_finite()));

        let fit = ArimaSpec::new(ArimaOrder::new(0, 1, 1))
            .fit(&train)
            .unwrap_or_else(|e| panic!("seed {seed}: {e}"));
        assert!(fit.ma()[0].abs() < 1.0, "seed {seed}: {:?}", fit.ma());
    }
}
