/// Default sharpness of the smooth threshold (steepness of the tanh edges).
pub const DEFAULT_SHARPNESS: f64 = 5.0;

/// Cells within this distance of the vacuum value are pruned from the live map.
pub const EPSILON: f64 = 1e-6;

/// Fixed-point iterations used to estimate the vacuum value.
pub const VACUUM_ITERATIONS: usize = 100;

/// Lower edge of the birth band. A live cell's own value shifts it down,
/// widening the survival band to roughly 2..3.
pub const BIRTH_LOW: f64 = 2.5;

/// Upper edge of the survival/birth band (overcrowding above this).
pub const CROWD_HIGH: f64 = 3.5;

/// Size of the Moore neighborhood.
pub const NEIGHBORS: f64 = 8.0;

/// Default viewport hysteresis margin, in cells.
pub const MARGIN: f64 = 10.0;

/// Relaxation applied when the observed edge sits just inside the bound.
pub const FAST_RELAX: f64 = 0.5;

/// Relaxation applied when the observed edge is more than a margin inside.
pub const SLOW_RELAX: f64 = 0.25;
