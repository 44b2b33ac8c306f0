//! Behavioural tests for the ADF test.

use nimbus_stationarity::{AdfConfig, Regression, Significance};
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

fn ar1(phi: f64, n: usize, seed: u64) -> Vec<f64> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 1.0).unwrap();
    let mut x = vec![0.0; n];
    for t in 1..n {
        x[t] = phi * x[t - 1] + normal.sample(&mut rng);
    }
    x
}

#[test]
fn linear_series_then_its_difference() {
    let level: Vec<f64> = (0..120).map(|t| 5.0 + 0.5 * t as f64).collect();
    let config = AdfConfig::new();

    let r = config.test(&level).unwrap();
    assert!(r.p_value() > 0.05, "level p = {}", r.p_value());
    assert!(!r.is_stationary(Significance::FivePercent));

    let diff: Vec<f64> = level.windows(2).map(|w| w[1] - w[0]).collect();
    let r = config.test(&diff).unwrap();
    assert!(r.p_value() <= 0.05, "diff p = {}", r.p_value());
    assert!(r.is_stationary(Significance::FivePercent));
}

#[test]
fn deterministic_for_fixed_input() {
    let data = ar1(0.5, 150, 99);
    let config = AdfConfig::new();
    let a = config.test(&data).unwrap();
    let b = config.test(&data).unwrap();
    assert_eq!(a, b);
}

#[test]
fn strongly_mean_reverting_series_rejects_unit_root() {
    let data = ar1(0.3, 300, 17);
    for regression in [
        Regression::None,
        Regression::Constant,
        Regression::ConstantTrend,
    ] {
        let r = AdfConfig::new()
            .with_regression(regression)
            .test(&data)
            .unwrap();
        assert!(
            r.is_stationary(Significance::FivePercent),
            "{regression}: stat = {}",
            r.statistic()
        );
        assert_eq!(r.critical_values().len(), 3);
    }
}

#[test]
fn critical_values_ordered() {
    let r = AdfConfig::new().test(&ar1(0.9, 100, 4)).unwrap();
    let one = r.critical_value(Significance::OnePercent).unwrap();
    let five = r.critical_value(Significance::FivePercent).unwrap();
    let ten = r.critical_value(Significance::TenPercent).unwrap();
    assert!(one < five && five < ten);
    assert!((0.0..=1.0).contains(&r.p_value()));
}

#[test]
fn min_obs_is_configurable() {
    let data = ar1(0.2, 15, 8);
    assert!(AdfConfig::new().test(&data).is_err());
    assert!(AdfConfig::new().with_min_obs(10).test(&data).is_ok());
}
