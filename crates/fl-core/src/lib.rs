//! Fuzzy Game of Life engine.
//!
//! A continuous relaxation of Conway's Life: cell values live in [0, 1] and
//! the birth/survival rule is a product of two `tanh` edges instead of a
//! boolean test. The grid is unbounded and sparse; only cells that differ
//! from the background equilibrium (the vacuum) are stored. A hysteretic
//! margin frame turns the live set into a stable camera rectangle.
//!
//! Zero I/O — pure math, no opinions about rendering or file formats.

pub mod automaton;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod field;
pub mod simulation;
pub mod threshold;
pub mod vacuum;
pub mod viewport;

pub use automaton::Automaton;
pub use config::SimConfig;
pub use constants::{DEFAULT_SHARPNESS, EPSILON, MARGIN, VACUUM_ITERATIONS};
pub use coord::{Bounds, Coord, LiveMap};
pub use error::{CoreError, Result};
pub use field::{Boundary, DenseField};
pub use simulation::{FrameSink, FrameView, RunSummary, Simulation, StepOutcome, simulate_points};
pub use threshold::threshold;
pub use vacuum::{VacuumEstimate, estimate as estimate_vacuum, vacuum_for};
pub use viewport::{MarginFrame, MarginTracker, Viewport};
