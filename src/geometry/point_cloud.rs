use super::Point3;
use crate::{Result, Surface};

use geo::{Coord, Rect};
use log::{log, Level};
use std::collections::HashSet;
use std::ops::Index;

/// An unordered set of elevation samples as loaded from disk.
///
/// Surfaces expect clean input, this is where it gets cleaned:
/// rows with missing values and duplicates are removed here and not by the surface.
#[derive(Clone, Debug, Default)]
pub struct PointCloud {
    pub points: Vec<Point3>,
}

impl PointCloud {
    pub fn new(points: Vec<Point3>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Remove every point with a NaN or infinite coordinate
    pub fn drop_non_finite(&mut self) -> usize {
        let before = self.len();
        self.points.retain(Point3::is_finite);

        let removed = before - self.len();
        if removed > 0 {
            log!(Level::Info, "Removed {removed} points with missing values");
        }
        removed
    }

    /// Remove exact duplicates, keeping the first occurrence
    pub fn dedup(&mut self) -> usize {
        let mut seen = HashSet::with_capacity(self.len());
        self.retain_unique(
            |p| seen.insert([p.x.to_bits(), p.y.to_bits(), p.z.to_bits()]),
            "duplicate",
        )
    }

    /// Remove points sharing an (x, y) position with an earlier point.
    ///
    /// A height field can only have one elevation per position, the triangulation
    /// cannot place two vertices on top of each other.
    pub fn dedup_xy(&mut self) -> usize {
        let mut seen = HashSet::with_capacity(self.len());
        self.retain_unique(|p| seen.insert([p.x.to_bits(), p.y.to_bits()]), "stacked")
    }

    /// Translate the cloud so the per-axis minimum is at the origin, returns the applied offset
    pub fn shift_to_origin(&mut self) -> Point3 {
        let Some(first) = self.points.first() else {
            return Point3::default();
        };

        let min = self.points.iter().fold(*first, |acc, p| Point3 {
            x: acc.x.min(p.x),
            y: acc.y.min(p.y),
            z: acc.z.min(p.z),
        });

        for p in self.points.iter_mut() {
            *p = *p - min;
        }
        min
    }

    /// Random subset of `n` points, the whole cloud if it has `n` points or fewer.
    /// The same seed gives the same subset.
    pub fn sample(&self, n: usize, seed: u64) -> PointCloud {
        if n >= self.len() {
            return self.clone();
        }

        let mut rng = fastrand::Rng::with_seed(seed);
        let mut indices = (0..self.len()).collect::<Vec<_>>();

        // partial fisher-yates, the first n indices end up as the sample
        for i in 0..n {
            let j = rng.usize(i..indices.len());
            indices.swap(i, j);
        }
        indices.truncate(n);
        indices.sort_unstable();

        PointCloud::new(indices.into_iter().map(|i| self.points[i]).collect())
    }

    /// Bounding rectangle of the xy-projection, None for an empty cloud
    pub fn bounds(&self) -> Option<Rect> {
        xy_bounds(&self.points)
    }

    pub fn into_surface(self) -> Result<Surface> {
        Surface::new(self.points)
    }

    fn retain_unique(&mut self, mut keep: impl FnMut(&Point3) -> bool, kind: &str) -> usize {
        let before = self.len();
        self.points.retain(|p| keep(p));

        let removed = before - self.len();
        if removed > 0 {
            log!(Level::Info, "Removed {removed} {kind} points");
        }
        removed
    }
}

pub(crate) fn xy_bounds(points: &[Point3]) -> Option<Rect> {
    let first = points.first()?;

    let mut min = Coord {
        x: first.x,
        y: first.y,
    };
    let mut max = min;
    for p in points.iter() {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    Some(Rect::new(min, max))
}

impl From<Vec<Point3>> for PointCloud {
    fn from(points: Vec<Point3>) -> Self {
        PointCloud::new(points)
    }
}

impl Index<usize> for PointCloud {
    type Output = Point3;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}
