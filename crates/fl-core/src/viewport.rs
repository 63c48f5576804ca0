use serde::Serialize;

use crate::constants::{FAST_RELAX, MARGIN, SLOW_RELAX};
use crate::coord::Coord;
use crate::error::{CoreError, Result};

/// One-dimensional hysteresis on a running minimum or maximum.
///
/// Growth past the bound is followed immediately, so the bound never clips
/// a live cell. Shrinkage is followed slowly: half a cell when the edge is
/// right at the bound, a quarter cell once it is more than `margin` inside,
/// and not at all in between.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarginTracker {
    margin: f64,
    value: Option<f64>,
}

impl MarginTracker {
    pub fn new(margin: f64) -> Self {
        Self {
            margin,
            value: None,
        }
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Feed the current minimum; returns the updated lower bound.
    pub fn set_min(&mut self, candidate: f64) -> f64 {
        let next = match self.value {
            None => candidate - 1.0,
            Some(v) if candidate < v => candidate,
            Some(v) if candidate < v + 1.0 => v - FAST_RELAX,
            Some(v) if candidate > v + self.margin => v + SLOW_RELAX,
            Some(v) => v,
        };
        self.value = Some(next);
        next
    }

    /// Feed the current maximum; returns the updated upper bound.
    pub fn set_max(&mut self, candidate: f64) -> f64 {
        let next = match self.value {
            None => candidate + 1.0,
            Some(v) if candidate > v => candidate,
            Some(v) if candidate > v - 1.0 => v + FAST_RELAX,
            Some(v) if candidate < v - self.margin => v - SLOW_RELAX,
            Some(v) => v,
        };
        self.value = Some(next);
        next
    }
}

/// Camera rectangle in cell units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Viewport {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Viewport {
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    /// Whether the unit square of `cell` lies inside the rectangle.
    pub fn contains(&self, cell: Coord) -> bool {
        let (x, y) = (cell.x as f64, cell.y as f64);
        x >= self.x_min && y >= self.y_min && x + 1.0 <= self.x_max && y + 1.0 <= self.y_max
    }
}

/// Four independent trackers framing the live region across frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarginFrame {
    x_min: MarginTracker,
    y_min: MarginTracker,
    x_max: MarginTracker,
    y_max: MarginTracker,
}

impl Default for MarginFrame {
    fn default() -> Self {
        Self::new(MARGIN)
    }
}

impl MarginFrame {
    pub fn new(margin: f64) -> Self {
        Self {
            x_min: MarginTracker::new(margin),
            y_min: MarginTracker::new(margin),
            x_max: MarginTracker::new(margin),
            y_max: MarginTracker::new(margin),
        }
    }

    /// Update every edge once from the current live cells.
    ///
    /// Cell `(x, y)` covers `[x, x+1) x [y, y+1)`, so the max edges observe
    /// `max + 1`. Fails on an empty set: there is nothing to frame once a
    /// pattern has decayed.
    pub fn set<'a>(&mut self, cells: impl IntoIterator<Item = &'a Coord>) -> Result<Viewport> {
        let mut iter = cells.into_iter();
        let first = iter.next().ok_or(CoreError::EmptyViewport)?;
        let (mut lo_x, mut lo_y, mut hi_x, mut hi_y) = (first.x, first.y, first.x, first.y);
        for c in iter {
            lo_x = lo_x.min(c.x);
            lo_y = lo_y.min(c.y);
            hi_x = hi_x.max(c.x);
            hi_y = hi_y.max(c.y);
        }
        Ok(Viewport {
            x_min: self.x_min.set_min(lo_x as f64),
            y_min: self.y_min.set_min(lo_y as f64),
            x_max: self.x_max.set_max(hi_x as f64 + 1.0),
            y_max: self.y_max.set_max(hi_y as f64 + 1.0),
        })
    }

    /// Last rectangle produced, if `set` has been called.
    pub fn current(&self) -> Option<Viewport> {
        Some(Viewport {
            x_min: self.x_min.value()?,
            y_min: self.y_min.value()?,
            x_max: self.x_max.value()?,
            y_max: self.y_max.value()?,
        })
    }
}
