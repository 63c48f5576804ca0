use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_SHARPNESS, EPSILON, MARGIN, VACUUM_ITERATIONS};
use crate::error::{CoreError, Result};

/// Run parameters. Every field has a default so partial TOML files work.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub sharpness: f64,
    pub epsilon: f64,
    pub vacuum_iterations: usize,
    /// Early exit for the vacuum estimate. `None` runs the full iteration count.
    pub vacuum_tolerance: Option<f64>,
    pub margin: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            sharpness: DEFAULT_SHARPNESS,
            epsilon: EPSILON,
            vacuum_iterations: VACUUM_ITERATIONS,
            vacuum_tolerance: None,
            margin: MARGIN,
        }
    }
}

impl SimConfig {
    pub fn with_sharpness(sharpness: f64) -> Self {
        Self {
            sharpness,
            ..Self::default()
        }
    }

    /// Reject out-of-domain parameters before anything is computed from them.
    pub fn validate(&self) -> Result<()> {
        if !(self.sharpness.is_finite() && self.sharpness > 0.0) {
            return Err(CoreError::InvalidSharpness(self.sharpness));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(CoreError::InvalidEpsilon(self.epsilon));
        }
        if self.vacuum_iterations == 0 {
            return Err(CoreError::InvalidIterations);
        }
        if let Some(tol) = self.vacuum_tolerance
            && !(tol.is_finite() && tol > 0.0)
        {
            return Err(CoreError::InvalidTolerance(tol));
        }
        if !(self.margin.is_finite() && self.margin >= 0.0) {
            return Err(CoreError::InvalidMargin(self.margin));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_sharpness() {
        for s in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = SimConfig::with_sharpness(s).validate().unwrap_err();
            assert!(matches!(err, CoreError::InvalidSharpness(_)), "{s}: {err}");
        }
    }

    #[test]
    fn test_rejects_bad_epsilon_and_iterations() {
        let cfg = SimConfig {
            epsilon: 0.0,
            ..SimConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(CoreError::InvalidEpsilon(_))));

        let cfg = SimConfig {
            vacuum_iterations: 0,
            ..SimConfig::default()
        };
        assert_eq!(cfg.validate(), Err(CoreError::InvalidIterations));
    }

    #[test]
    fn test_rejects_bad_tolerance_and_margin() {
        let cfg = SimConfig {
            vacuum_tolerance: Some(-1e-9),
            ..SimConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(CoreError::InvalidTolerance(_))));

        let cfg = SimConfig {
            margin: -1.0,
            ..SimConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(CoreError::InvalidMargin(_))));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg: SimConfig = serde_json::from_str(r#"{"sharpness": 12.0}"#).unwrap();
        assert_eq!(cfg.sharpness, 12.0);
        assert_eq!(cfg.epsilon, EPSILON);
        assert_eq!(cfg.vacuum_iterations, VACUUM_ITERATIONS);
        assert_eq!(cfg.vacuum_tolerance, None);
    }
}
