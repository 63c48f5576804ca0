use std::fmt;

/// Caller-contract violations. The simulation itself never fails; these are
/// raised before a run starts or when the viewport is misused.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    InvalidSharpness(f64),
    InvalidEpsilon(f64),
    InvalidIterations,
    InvalidTolerance(f64),
    InvalidMargin(f64),
    InvalidDimensions { width: usize, height: usize },
    EmptyViewport,
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::InvalidSharpness(s) => {
                write!(f, "sharpness must be positive and finite, got {s}")
            }
            CoreError::InvalidEpsilon(e) => {
                write!(f, "epsilon must be positive and finite, got {e}")
            }
            CoreError::InvalidIterations => write!(f, "vacuum iterations must be at least 1"),
            CoreError::InvalidTolerance(t) => {
                write!(f, "vacuum tolerance must be positive and finite, got {t}")
            }
            CoreError::InvalidMargin(m) => {
                write!(f, "viewport margin must be non-negative and finite, got {m}")
            }
            CoreError::InvalidDimensions { width, height } => {
                write!(f, "field dimensions must be non-zero, got {width}x{height}")
            }
            CoreError::EmptyViewport => {
                write!(f, "cannot frame an empty set of cells (pattern has decayed)")
            }
        }
    }
}

impl std::error::Error for CoreError {}

pub type Result<T> = std::result::Result<T, CoreError>;
