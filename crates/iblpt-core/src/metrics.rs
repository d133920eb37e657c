//! Fit metrics between a simulated series and a human reference series.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorCode, IblError, IblResult};

/// Floor applied to the MSD before taking its logarithm in [`aic`].
pub const AIC_EPSILON: f64 = 1e-8;

/// Variance below which a series is treated as constant by [`corr`].
const CONSTANT_VARIANCE: f64 = 1e-12;

fn check_lengths(x: &[f64], y: &[f64]) -> IblResult<()> {
    if x.is_empty() || y.is_empty() {
        return Err(IblError::validation("cannot score an empty series"));
    }
    if x.len() != y.len() {
        return Err(IblError::validation_code(
            ErrorCode::ValLengthMismatch,
            format!("series lengths differ: {} vs {}", x.len(), y.len()),
        ));
    }
    Ok(())
}

/// Mean squared deviation.
pub fn msd(x: &[f64], y: &[f64]) -> IblResult<f64> {
    check_lengths(x, y)?;
    let sum: f64 = x.iter().zip(y).map(|(a, b)| (a - b).powi(2)).sum();
    Ok(sum / x.len() as f64)
}

/// Pearson correlation coefficient.
///
/// `None` when either series is constant, where the coefficient is undefined.
pub fn corr(x: &[f64], y: &[f64]) -> IblResult<Option<f64>> {
    check_lengths(x, y)?;

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x < CONSTANT_VARIANCE || var_y < CONSTANT_VARIANCE {
        return Ok(None);
    }
    Ok(Some(cov / (var_x.sqrt() * var_y.sqrt())))
}

/// AIC-like score `100 * ln(max(msd, 1e-8)) + 2k`.
pub fn aic(msd: f64, k: usize) -> f64 {
    100.0 * msd.max(AIC_EPSILON).ln() + 2.0 * k as f64
}

/// MSD, correlation and AIC of one series against its reference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesScore {
    pub msd: f64,
    pub corr: Option<f64>,
    pub aic: f64,
}

/// Score `model` against `human` for a model with `k` free parameters.
pub fn score_series(model: &[f64], human: &[f64], k: usize) -> IblResult<SeriesScore> {
    let msd = msd(model, human)?;
    Ok(SeriesScore {
        msd,
        corr: corr(model, human)?,
        aic: aic(msd, k),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msd_identity_is_zero() {
        let x = [0.1, 0.5, 0.9, 0.3];
        assert_eq!(msd(&x, &x).unwrap(), 0.0);
    }

    #[test]
    fn test_msd_value() {
        assert!((msd(&[0.0, 1.0], &[1.0, 1.0]).unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_length_mismatch() {
        let err = msd(&[0.1, 0.2], &[0.1]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValLengthMismatch);
        assert!(corr(&[], &[]).is_err());
    }

    #[test]
    fn test_corr_self_is_one() {
        let x = [0.1, 0.5, 0.9, 0.3, 0.35];
        let r = corr(&x, &x).unwrap().unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_corr_anti() {
        let r = corr(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]).unwrap().unwrap();
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_corr_constant_is_undefined() {
        assert_eq!(corr(&[0.4, 0.4, 0.4], &[0.1, 0.2, 0.3]).unwrap(), None);
    }

    #[test]
    fn test_aic_monotone() {
        assert!(aic(0.02, 3) > aic(0.01, 3));
        assert!(aic(0.01, 6) > aic(0.01, 3));
        assert_eq!(aic(0.0, 3), aic(AIC_EPSILON, 3));
        assert!((aic(1.0, 3) - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_score_series() {
        let score = score_series(&[0.2, 0.4, 0.6], &[0.25, 0.35, 0.65], 3).unwrap();
        assert!(score.msd > 0.0);
        assert!(score.corr.unwrap() > 0.9);
        assert_eq!(score.aic, aic(score.msd, 3));
    }
}
