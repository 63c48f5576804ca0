use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{BIRTH_LOW, CROWD_HIGH};
use crate::coord::Coord;
use crate::error::{CoreError, Result};
use crate::threshold::threshold;

/// How neighbors past the edge of a dense field are read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    /// Toroidal: the field wraps around.
    #[default]
    Wrap,
    /// Cells outside the field are dead (0.0).
    Zero,
}

/// Fixed-size fuzzy Life on a dense row-major array.
///
/// Same rule as [`Automaton`](crate::Automaton) but bounded, so there is no
/// vacuum tracking: every cell is stored.
#[derive(Clone, Debug)]
pub struct DenseField {
    width: usize,
    height: usize,
    sharpness: f64,
    boundary: Boundary,
    cells: Vec<f64>,
}

impl DenseField {
    pub fn new(width: usize, height: usize, sharpness: f64, boundary: Boundary) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        if !(sharpness.is_finite() && sharpness > 0.0) {
            return Err(CoreError::InvalidSharpness(sharpness));
        }
        Ok(Self {
            width,
            height,
            sharpness,
            boundary,
            cells: vec![0.0; width * height],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[f64] {
        &self.cells
    }

    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.cells[y * self.width + x]
    }

    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        self.cells[y * self.width + x] = value;
    }

    /// Uniform random values in `[0, 1)` everywhere.
    pub fn randomize(&mut self, rng: &mut impl Rng) {
        for c in &mut self.cells {
            *c = rng.random::<f64>();
        }
    }

    /// Zero everything outside the middle third of each axis.
    pub fn mask_center(&mut self) {
        let (w, h) = (self.width as f64, self.height as f64);
        for y in 0..self.height {
            for x in 0..self.width {
                let (fx, fy) = (x as f64, y as f64);
                let inside =
                    fy > h / 3.0 && fy < h * 2.0 / 3.0 && fx > w / 3.0 && fx < w * 2.0 / 3.0;
                if !inside {
                    self.set(x, y, 0.0);
                }
            }
        }
    }

    /// Set 1.0 at each point, wrapped into the field.
    pub fn stamp(&mut self, points: impl IntoIterator<Item = Coord>) {
        for p in points {
            let x = p.x.rem_euclid(self.width as i64) as usize;
            let y = p.y.rem_euclid(self.height as i64) as usize;
            self.set(x, y, 1.0);
        }
    }

    fn neighbor(&self, x: usize, y: usize, dx: i64, dy: i64) -> f64 {
        let nx = x as i64 + dx;
        let ny = y as i64 + dy;
        let (w, h) = (self.width as i64, self.height as i64);
        match self.boundary {
            Boundary::Wrap => self.get(nx.rem_euclid(w) as usize, ny.rem_euclid(h) as usize),
            Boundary::Zero if nx < 0 || ny < 0 || nx >= w || ny >= h => 0.0,
            Boundary::Zero => self.get(nx as usize, ny as usize),
        }
    }

    fn neighbor_sum(&self, x: usize, y: usize) -> f64 {
        let mut sum = 0.0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx != 0 || dy != 0 {
                    sum += self.neighbor(x, y, dx, dy);
                }
            }
        }
        sum
    }

    /// Advance every cell one generation.
    pub fn step(&mut self) {
        let mut next = Vec::with_capacity(self.cells.len());
        for y in 0..self.height {
            for x in 0..self.width {
                let n_sum = self.neighbor_sum(x, y);
                let own = self.get(x, y);
                next.push(threshold(self.sharpness, BIRTH_LOW - own, CROWD_HIGH, n_sum));
            }
        }
        self.cells = next;
    }

    /// Cell values scaled to bytes, row-major.
    pub fn to_gray(&self) -> Vec<u8> {
        self.cells
            .iter()
            .map(|v| (v.clamp(0.0, 1.0) * 255.0) as u8)
            .collect()
    }
}
