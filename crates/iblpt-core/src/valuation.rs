//! Outcome valuation applied before blending.
//!
//! IBL blends raw payoffs. PT-IBL first passes each payoff through the
//! prospect-theory value function:
//!
//! ```text
//! v(x) = x^alpha              if x >= 0
//! v(x) = -lambda * (-x)^beta  if x <  0
//! ```
//!
//! This is the only behavioral difference between the two variants; memory,
//! activation and blending are shared.

use serde::{Deserialize, Serialize};

/// How a remembered outcome is turned into the value that gets blended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Valuation {
    /// Outcomes are blended as-is.
    #[default]
    Identity,
    /// Outcomes are transformed by the prospect-theory value function.
    ProspectTheory {
        /// Curvature for gains.
        alpha: f64,
        /// Curvature for losses.
        beta: f64,
        /// Loss aversion.
        lambda: f64,
    },
}

impl Valuation {
    /// Value of outcome `x`.
    #[inline]
    pub fn value(&self, x: f64) -> f64 {
        match *self {
            Valuation::Identity => x,
            Valuation::ProspectTheory {
                alpha,
                beta,
                lambda,
            } => prospect_value(x, alpha, beta, lambda),
        }
    }
}

/// Prospect-theory value function.
#[inline]
pub fn prospect_value(x: f64, alpha: f64, beta: f64, lambda: f64) -> f64 {
    if x >= 0.0 {
        x.powf(alpha)
    } else {
        -lambda * (-x).powf(beta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(alpha: f64, beta: f64, lambda: f64) -> Valuation {
        Valuation::ProspectTheory {
            alpha,
            beta,
            lambda,
        }
    }

    #[test]
    fn test_identity() {
        assert_eq!(Valuation::Identity.value(-3.5), -3.5);
        assert_eq!(Valuation::Identity.value(30.0), 30.0);
    }

    #[test]
    fn test_zero_maps_to_zero() {
        assert_eq!(pt(0.8, 0.8, 2.25).value(0.0), 0.0);
        assert_eq!(pt(0.2, 1.0, 5.0).value(0.0), 0.0);
    }

    #[test]
    fn test_gains_strictly_increasing() {
        let v = pt(0.6, 0.9, 2.0);
        let xs = [0.0, 0.5, 1.0, 2.0, 10.0, 100.0];
        for pair in xs.windows(2) {
            assert!(v.value(pair[1]) > v.value(pair[0]), "{:?}", pair);
        }
    }

    #[test]
    fn test_losses_deepen_with_lambda() {
        for x in [-0.5, -1.0, -20.0] {
            let mild = pt(0.8, 0.8, 1.0).value(x);
            let averse = pt(0.8, 0.8, 2.25).value(x);
            assert!(averse < mild, "x={} mild={} averse={}", x, mild, averse);
        }
    }

    #[test]
    fn test_loss_aversion_asymmetry() {
        let v = pt(1.0, 1.0, 2.0);
        assert_eq!(v.value(10.0), 10.0);
        assert_eq!(v.value(-10.0), -20.0);
    }

    #[test]
    fn test_continuity_at_zero() {
        let v = pt(0.7, 0.7, 3.0);
        assert!(v.value(1e-12).abs() < 1e-6);
        assert!(v.value(-1e-12).abs() < 1e-6);
    }

    #[test]
    fn test_serde_tagged() {
        let json = serde_json::to_string(&pt(0.8, 0.7, 2.0)).unwrap();
        assert!(json.contains("prospect_theory"));
        let parsed: Valuation = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, pt(0.8, 0.7, 2.0));
    }
}
