use crate::{Error, Result, MIN_GRID_STEPS};

use geo::{Coord, Rect};
use spade::Point2;

/// Regular grid of `steps` x `steps` nodes covering a bounding rectangle.
///
/// Nodes are numbered row by row, starting at the minimum corner.
/// The first and last node of every row and column lie exactly on the rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid {
    pub bounds: Rect,
    pub steps: usize,
}

// at least MIN_GRID_STEPS per axis, never empty
#[allow(clippy::len_without_is_empty)]
impl Grid {
    pub fn new(bounds: Rect, steps: usize) -> Result<Grid> {
        if steps < MIN_GRID_STEPS {
            return Err(Error::InvalidParameters(format!(
                "a grid needs at least {MIN_GRID_STEPS} steps per axis, got {steps}"
            )));
        }
        Ok(Grid { bounds, steps })
    }

    pub fn len(&self) -> usize {
        self.steps * self.steps
    }

    /// Distance between neighbouring nodes in x and y
    pub fn cell_size(&self) -> (f64, f64) {
        let cells = (self.steps - 1) as f64;
        (self.bounds.width() / cells, self.bounds.height() / cells)
    }

    #[inline]
    pub fn index2coord(&self, yi: usize, xi: usize) -> Coord {
        let min = self.bounds.min();
        let max = self.bounds.max();
        Coord {
            x: Self::linspace(min.x, max.x, xi, self.steps),
            y: Self::linspace(min.y, max.y, yi, self.steps),
        }
    }

    #[inline]
    pub fn index2spade(&self, yi: usize, xi: usize) -> Point2<f64> {
        let c = self.index2coord(yi, xi);
        Point2::new(c.x, c.y)
    }

    pub fn row(&self, yi: usize) -> impl Iterator<Item = Point2<f64>> + '_ {
        (0..self.steps).map(move |xi| self.index2spade(yi, xi))
    }

    pub fn nodes(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.steps)
            .flat_map(move |yi| (0..self.steps).map(move |xi| self.index2coord(yi, xi)))
    }

    fn linspace(start: f64, end: f64, i: usize, steps: usize) -> f64 {
        if i + 1 == steps {
            // avoid rounding the last node off the bounds
            end
        } else {
            start + (end - start) * (i as f64 / (steps - 1) as f64)
        }
    }
}
