use serde::Serialize;

use crate::automaton::Automaton;
use crate::config::SimConfig;
use crate::coord::{Coord, LiveMap};
use crate::error::Result;
use crate::viewport::{MarginFrame, Viewport};

/// Everything a renderer needs for one frame.
pub struct FrameView<'a> {
    pub generation: u64,
    pub cells: &'a LiveMap,
    pub vacuum: f64,
    pub viewport: Viewport,
}

/// Consumer of painted frames (window, image recorder, test probe).
pub trait FrameSink {
    fn paint(&mut self, frame: &FrameView<'_>);
}

/// Result of advancing one generation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepOutcome {
    Alive {
        generation: u64,
        live: usize,
        viewport: Viewport,
    },
    /// Every cell relaxed back to vacuum. Terminal, not an error.
    Decayed { generation: u64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RunSummary {
    pub generations: u64,
    pub final_live: usize,
    pub peak_live: usize,
    pub decayed: bool,
    pub vacuum: f64,
    pub viewport: Option<Viewport>,
}

/// Engine plus camera: the per-frame loop body.
pub struct Simulation {
    automaton: Automaton,
    frame: MarginFrame,
}

impl Simulation {
    pub fn new(automaton: Automaton, margin: f64) -> Self {
        Self {
            automaton,
            frame: MarginFrame::new(margin),
        }
    }

    pub fn from_config(config: &SimConfig, automaton: Automaton) -> Self {
        Self::new(automaton, config.margin)
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.frame.current()
    }

    /// Frame the current cells without stepping. `None` once decayed.
    pub fn observe(&mut self) -> Option<Viewport> {
        if self.automaton.is_empty() {
            return None;
        }
        self.frame.set(self.automaton.cells().keys()).ok()
    }

    /// Step once and reframe.
    pub fn advance(&mut self) -> StepOutcome {
        self.automaton.step();
        let generation = self.automaton.generation();
        match self.observe() {
            Some(viewport) => StepOutcome::Alive {
                generation,
                live: self.automaton.len(),
                viewport,
            },
            None => StepOutcome::Decayed { generation },
        }
    }

    fn paint(&self, viewport: Viewport, sink: &mut impl FrameSink) {
        sink.paint(&FrameView {
            generation: self.automaton.generation(),
            cells: self.automaton.cells(),
            vacuum: self.automaton.vacuum(),
            viewport,
        });
    }

    /// Paint the initial state, then step and paint up to `steps` times,
    /// stopping early if the pattern decays.
    pub fn run(&mut self, steps: u64, sink: &mut impl FrameSink) -> RunSummary {
        let mut peak_live = self.automaton.len();
        let mut decayed = false;

        match self.observe() {
            Some(viewport) => self.paint(viewport, sink),
            None => decayed = true,
        }

        let mut taken = 0;
        while !decayed && taken < steps {
            taken += 1;
            match self.advance() {
                StepOutcome::Alive { live, viewport, .. } => {
                    peak_live = peak_live.max(live);
                    self.paint(viewport, sink);
                }
                StepOutcome::Decayed { .. } => decayed = true,
            }
        }

        RunSummary {
            generations: self.automaton.generation(),
            final_live: self.automaton.len(),
            peak_live,
            decayed,
            vacuum: self.automaton.vacuum(),
            viewport: self.frame.current(),
        }
    }
}

/// Build the automaton and simulation in one go from validated config.
pub fn simulate_points(
    config: &SimConfig,
    points: impl IntoIterator<Item = Coord>,
) -> Result<Simulation> {
    let automaton = Automaton::from_points(config, points)?;
    Ok(Simulation::from_config(config, automaton))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Probe {
        generations: Vec<u64>,
        live: Vec<usize>,
    }

    impl FrameSink for Probe {
        fn paint(&mut self, frame: &FrameView<'_>) {
            self.generations.push(frame.generation);
            self.live.push(frame.cells.len());
            for c in frame.cells.keys() {
                assert!(frame.viewport.contains(*c), "{c:?} clipped");
            }
        }
    }

    #[test]
    fn test_single_cell_run_reports_decay() {
        let mut sim = simulate_points(&SimConfig::default(), [Coord::new(0, 0)]).unwrap();
        let mut probe = Probe::default();
        let summary = sim.run(10, &mut probe);
        assert!(summary.decayed);
        assert_eq!(summary.generations, 1);
        assert_eq!(summary.final_live, 0);
        assert_eq!(probe.generations, vec![0]);
    }

    #[test]
    fn test_blinker_runs_full_length() {
        let cfg = SimConfig::with_sharpness(50.0);
        let cells = [Coord::new(-1, 0), Coord::new(0, 0), Coord::new(1, 0)];
        let mut sim = simulate_points(&cfg, cells).unwrap();
        let mut probe = Probe::default();
        let summary = sim.run(6, &mut probe);
        assert!(!summary.decayed);
        assert_eq!(summary.generations, 6);
        assert_eq!(probe.generations, vec![0, 1, 2, 3, 4, 5, 6]);
        assert!(probe.live.iter().all(|&n| n == 3));
        assert_eq!(summary.peak_live, 3);
    }

    #[test]
    fn test_advance_on_empty_is_decayed() {
        let automaton = Automaton::new(&SimConfig::default()).unwrap();
        let mut sim = Simulation::new(automaton, 10.0);
        assert_eq!(sim.advance(), StepOutcome::Decayed { generation: 1 });
        assert!(sim.viewport().is_none());
    }
}
