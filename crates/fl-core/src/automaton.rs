use std::collections::HashSet;

use rand::Rng;

use crate::config::SimConfig;
use crate::constants::{BIRTH_LOW, CROWD_HIGH};
use crate::coord::{Bounds, Coord, LiveMap};
use crate::error::Result;
use crate::threshold::threshold;
use crate::vacuum::{VacuumEstimate, vacuum_for};

/// Sparse fuzzy Life on an unbounded grid.
///
/// Only cells whose value differs from the vacuum by more than `epsilon`
/// are stored. Each step builds a fresh map from the previous one; the old
/// map is never mutated while the new one is computed.
#[derive(Clone, Debug)]
pub struct Automaton {
    cells: LiveMap,
    sharpness: f64,
    epsilon: f64,
    vacuum: VacuumEstimate,
    generation: u64,
}

impl Automaton {
    /// Empty (all-vacuum) automaton. Validates the config and estimates the
    /// vacuum value once; it is fixed for the lifetime of the automaton.
    pub fn new(config: &SimConfig) -> Result<Self> {
        let vacuum = vacuum_for(config)?;
        Ok(Self {
            cells: LiveMap::new(),
            sharpness: config.sharpness,
            epsilon: config.epsilon,
            vacuum,
            generation: 0,
        })
    }

    /// Seed value 1.0 at every given point.
    pub fn from_points(config: &SimConfig, points: impl IntoIterator<Item = Coord>) -> Result<Self> {
        let mut automaton = Self::new(config)?;
        let map = points.into_iter().map(|p| (p, 1.0)).collect();
        automaton.replace(map);
        Ok(automaton)
    }

    /// Seed arbitrary values; entries already at vacuum are dropped.
    pub fn from_map(config: &SimConfig, map: LiveMap) -> Result<Self> {
        let mut automaton = Self::new(config)?;
        automaton.replace(map);
        Ok(automaton)
    }

    /// Uniform random values in `[0, 1)` over a `width x height` block whose
    /// top-left cell is `origin`.
    pub fn from_random(
        config: &SimConfig,
        origin: Coord,
        width: u32,
        height: u32,
        rng: &mut impl Rng,
    ) -> Result<Self> {
        let mut map = LiveMap::with_capacity(width as usize * height as usize);
        for y in 0..i64::from(height) {
            for x in 0..i64::from(width) {
                map.insert(origin.offset(x, y), rng.random::<f64>());
            }
        }
        Self::from_map(config, map)
    }

    fn replace(&mut self, map: LiveMap) {
        let vacuum = self.vacuum.value;
        let epsilon = self.epsilon;
        self.cells = map
            .into_iter()
            .filter(|(_, v)| (v - vacuum).abs() > epsilon)
            .collect();
    }

    pub fn cells(&self) -> &LiveMap {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True once the pattern has relaxed entirely to vacuum.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Value at `coord`, vacuum if not stored.
    pub fn get(&self, coord: Coord) -> f64 {
        self.cells.get(&coord).copied().unwrap_or(self.vacuum.value)
    }

    pub fn vacuum(&self) -> f64 {
        self.vacuum.value
    }

    pub fn vacuum_estimate(&self) -> VacuumEstimate {
        self.vacuum
    }

    pub fn sharpness(&self) -> f64 {
        self.sharpness
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of(self.cells.keys())
    }

    /// Advance one generation, replacing the live map.
    pub fn step(&mut self) {
        let next = self.next_map(&self.cells);
        self.cells = next;
        self.generation += 1;
    }

    /// Pure form of [`step`](Self::step): the successor of `map` under this
    /// automaton's sharpness, vacuum and epsilon.
    pub fn next_map(&self, map: &LiveMap) -> LiveMap {
        let vacuum = self.vacuum.value;
        let value_at = |c: &Coord| map.get(c).copied().unwrap_or(vacuum);

        // Only cells in the 3x3 block of a live cell can leave vacuum. The
        // block includes the live cell itself so isolated cells get to decay.
        let candidates: HashSet<Coord> = map.keys().flat_map(|c| c.block()).collect();

        let mut next = LiveMap::with_capacity(candidates.len());
        for p in candidates {
            let neighbor_sum: f64 = p.moore().map(|n| value_at(&n)).sum();
            let self_value = value_at(&p);
            let value = threshold(
                self.sharpness,
                BIRTH_LOW - self_value,
                CROWD_HIGH,
                neighbor_sum,
            );
            if (value - vacuum).abs() > self.epsilon {
                next.insert(p, value);
            }
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn pts(cells: &[(i64, i64)]) -> Vec<Coord> {
        cells.iter().map(|&c| Coord::from(c)).collect()
    }

    #[test]
    fn test_isolated_cell_decays() {
        let cfg = SimConfig::default();
        let mut a = Automaton::from_points(&cfg, pts(&[(0, 0)])).unwrap();
        assert_eq!(a.len(), 1);
        a.step();
        assert!(a.is_empty(), "left {:?}", a.cells());
        assert_eq!(a.generation(), 1);
    }

    #[test]
    fn test_empty_stays_empty() {
        let mut a = Automaton::new(&SimConfig::default()).unwrap();
        a.step();
        assert!(a.is_empty());
    }

    #[test]
    fn test_block_center_suppressed_by_crowding() {
        let cfg = SimConfig::with_sharpness(5.0);
        let block: Vec<Coord> = (-1..=1)
            .flat_map(|y| (-1..=1).map(move |x| Coord::new(x, y)))
            .collect();
        let a = Automaton::from_points(&cfg, block).unwrap();
        let next = a.next_map(a.cells());
        let center = next.get(&Coord::new(0, 0)).copied().unwrap_or(a.vacuum());
        let corner = next[&Coord::new(1, 1)];
        assert!(center < corner, "center {center} corner {corner}");
        assert!(center < 1e-6);
        assert!(corner > 0.99);
    }

    #[test]
    fn test_blinker_oscillates_at_high_sharpness() {
        let cfg = SimConfig::with_sharpness(50.0);
        let horizontal = pts(&[(-1, 0), (0, 0), (1, 0)]);
        let vertical = pts(&[(0, -1), (0, 0), (0, 1)]);
        let mut a = Automaton::from_points(&cfg, horizontal.clone()).unwrap();

        a.step();
        assert_eq!(a.len(), 3);
        for c in &vertical {
            assert!((a.get(*c) - 1.0).abs() < 1e-9, "{c:?} = {}", a.get(*c));
        }

        a.step();
        assert_eq!(a.len(), 3);
        for c in &horizontal {
            assert!((a.get(*c) - 1.0).abs() < 1e-9, "{c:?} = {}", a.get(*c));
        }
    }

    #[test]
    fn test_get_defaults_to_vacuum() {
        let a = Automaton::from_points(&SimConfig::default(), pts(&[(0, 0)])).unwrap();
        assert_eq!(a.get(Coord::new(100, -100)), a.vacuum());
        assert_eq!(a.get(Coord::new(0, 0)), 1.0);
    }

    #[test]
    fn test_from_map_prunes_vacuum_entries() {
        let cfg = SimConfig::with_sharpness(5.0);
        let probe = Automaton::new(&cfg).unwrap();
        let mut map = LiveMap::new();
        map.insert(Coord::new(0, 0), probe.vacuum());
        map.insert(Coord::new(1, 0), 0.7);
        let a = Automaton::from_map(&cfg, map).unwrap();
        assert_eq!(a.len(), 1);
        assert_eq!(a.get(Coord::new(1, 0)), 0.7);
    }

    #[test]
    fn test_from_random_fills_block() {
        let mut rng = SmallRng::seed_from_u64(7);
        let origin = Coord::new(-3, 10);
        let a = Automaton::from_random(&SimConfig::default(), origin, 8, 4, &mut rng).unwrap();
        let b = a.bounds().unwrap();
        assert!(a.len() <= 32);
        assert!(a.len() > 20);
        assert!(b.min.x >= -3 && b.max.x < 5);
        assert!(b.min.y >= 10 && b.max.y < 14);
    }

    #[test]
    fn test_step_at_coordinate_limit() {
        let cfg = SimConfig::default();
        let mut a = Automaton::from_points(&cfg, [Coord::new(i64::MAX, 0)]).unwrap();
        a.step();
        assert!(a.is_empty());

        // A blinker straddling the seam behaves as anywhere else.
        let cfg = SimConfig::with_sharpness(50.0);
        let seam = pts(&[(i64::MAX, 0), (i64::MIN, 0), (i64::MIN + 1, 0)]);
        let mut a = Automaton::from_points(&cfg, seam).unwrap();
        a.step();
        assert_eq!(a.len(), 3);
        for y in -1..=1 {
            let c = Coord::new(i64::MIN, y);
            assert!((a.get(c) - 1.0).abs() < 1e-9, "{c:?} = {}", a.get(c));
        }
    }

    #[test]
    fn test_rejects_invalid_sharpness() {
        assert!(Automaton::new(&SimConfig::with_sharpness(-2.0)).is_err());
    }
}
