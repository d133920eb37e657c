//! Logistic activation noise.
//!
//! The noise term is drawn by inverting the logistic CDF:
//!
//! ```text
//! noise = s * ln((1 - u) / u),  u ~ Uniform(0, 1)
//! ```
//!
//! `u` is sampled from the open interval so the logarithm stays finite.

use rand::distributions::Open01;
use rand::Rng;
use std::f64::consts::PI;

/// Draw one logistic noise sample with scale `noise_scale`.
pub fn activation_noise<R: Rng>(rng: &mut R, noise_scale: f64) -> f64 {
    let u: f64 = rng.sample(Open01);
    noise_scale * ((1.0 - u) / u).ln()
}

/// Variance of the logistic distribution with scale `s`: `(s * pi)^2 / 3`.
pub fn logistic_variance(scale: f64) -> f64 {
    (scale * PI).powi(2) / 3.0
}

/// Standard deviation of the logistic distribution.
pub fn logistic_std_dev(scale: f64) -> f64 {
    logistic_variance(scale).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_noise_distribution() {
        let mut rng = seeded_rng();
        let scale = 0.4;

        let samples: Vec<f64> = (0..20000)
            .map(|_| activation_noise(&mut rng, scale))
            .collect();

        let mean: f64 = samples.iter().sum::<f64>() / samples.len() as f64;
        assert!(mean.abs() < 0.05, "Mean {} should be close to 0", mean);

        let variance: f64 =
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / samples.len() as f64;
        let std_dev = variance.sqrt();
        let expected_std = logistic_std_dev(scale);
        assert!(
            (std_dev - expected_std).abs() < 0.05,
            "Std dev {} should be close to theoretical {}",
            std_dev,
            expected_std
        );
    }

    #[test]
    fn test_noise_is_always_finite() {
        let mut rng = seeded_rng();
        assert!((0..100_000).all(|_| activation_noise(&mut rng, 1.0).is_finite()));
    }

    #[test]
    fn test_noise_scale_effect() {
        let mut rng = seeded_rng();
        let small: f64 = (0..1000).map(|_| activation_noise(&mut rng, 0.1).abs()).sum();
        let large: f64 = (0..1000).map(|_| activation_noise(&mut rng, 1.0).abs()).sum();
        assert!(large > small * 5.0, "{} vs {}", large, small);
    }

    #[test]
    fn test_same_seed_same_noise() {
        let mut a = StdRng::seed_from_u64(9);
        let mut b = StdRng::seed_from_u64(9);
        for _ in 0..10 {
            assert_eq!(activation_noise(&mut a, 0.7), activation_noise(&mut b, 0.7));
        }
    }

    #[test]
    fn test_logistic_statistics() {
        let variance = logistic_variance(0.4);
        assert!((logistic_std_dev(0.4).powi(2) - variance).abs() < 1e-12);
        assert!((variance - 0.526).abs() < 0.01, "Variance {}", variance);
    }
}
