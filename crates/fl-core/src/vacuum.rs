use crate::config::SimConfig;
use crate::constants::{BIRTH_LOW, CROWD_HIGH, NEIGHBORS};
use crate::error::Result;
use crate::threshold::threshold;

/// Outcome of the fixed-point iteration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VacuumEstimate {
    pub value: f64,
    pub iterations: usize,
    /// `|f(v) - v|` at the returned value. Large residuals mean the
    /// iteration did not settle; nothing downstream checks this.
    pub residual: f64,
}

/// One application of the rule to a cell whose neighbors all equal `v`.
fn uniform_update(sharpness: f64, v: f64) -> f64 {
    threshold(sharpness, BIRTH_LOW - v, CROWD_HIGH, NEIGHBORS * v)
}

/// Background value of an infinite uniform field: iterate the all-equal
/// rule from 0 for `iterations` rounds, or until successive values differ
/// by less than `tolerance` when one is given.
pub fn estimate(sharpness: f64, iterations: usize, tolerance: Option<f64>) -> VacuumEstimate {
    let mut v = 0.0;
    let mut ran = 0;
    for _ in 0..iterations {
        let next = uniform_update(sharpness, v);
        ran += 1;
        let delta = (next - v).abs();
        v = next;
        if let Some(tol) = tolerance
            && delta < tol
        {
            break;
        }
    }
    VacuumEstimate {
        value: v,
        iterations: ran,
        residual: (uniform_update(sharpness, v) - v).abs(),
    }
}

/// Validated estimate using the configured sharpness and iteration budget.
pub fn vacuum_for(config: &SimConfig) -> Result<VacuumEstimate> {
    config.validate()?;
    Ok(estimate(
        config.sharpness,
        config.vacuum_iterations,
        config.vacuum_tolerance,
    ))
}
