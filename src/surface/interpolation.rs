use crate::Point3;

use spade::handles::VertexHandle;
use spade::{DelaunayTriangulation, FloatTriangulation, Point2};
use std::fmt::Display;
use std::str::FromStr;

/// Scattered data interpolation over a delaunay triangulation
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum Interpolation {
    /// Piecewise linear, barycentric weights of the enclosing triangle
    #[default]
    Linear,
    /// Sibson's natural neighbor interpolation, smooth except at the samples
    NaturalNeighbor,
}

impl Interpolation {
    /// Interpolated height at every given position, NaN for positions outside the convex hull.
    pub(crate) fn heights(
        &self,
        triangulation: &DelaunayTriangulation<Point3>,
        positions: impl Iterator<Item = Point2<f64>>,
    ) -> Vec<f64> {
        let height = |v: VertexHandle<'_, Point3>| v.data().z;

        match self {
            Interpolation::Linear => {
                let barycentric = triangulation.barycentric();
                positions
                    .map(|pos| barycentric.interpolate(height, pos).unwrap_or(f64::NAN))
                    .collect()
            }
            Interpolation::NaturalNeighbor => {
                let natural_neighbor = triangulation.natural_neighbor();
                positions
                    .map(|pos| natural_neighbor.interpolate(height, pos).unwrap_or(f64::NAN))
                    .collect()
            }
        }
    }
}

impl Display for Interpolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Interpolation::Linear => f.write_str("linear"),
            Interpolation::NaturalNeighbor => f.write_str("natural"),
        }
    }
}

impl FromStr for Interpolation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linear" => Ok(Interpolation::Linear),
            "natural" | "natural-neighbor" | "natural_neighbor" => {
                Ok(Interpolation::NaturalNeighbor)
            }
            _ => Err(format!(
                "unknown interpolation '{s}', expected 'linear' or 'natural'"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spade::Triangulation;

    // z = 1 + 2x - y over a unit square with one interior sample
    fn triangulation() -> DelaunayTriangulation<Point3> {
        let plane = |x: f64, y: f64| 1. + 2. * x - y;
        let points = [(0., 0.), (1., 0.), (1., 1.), (0., 1.), (0.4, 0.3)]
            .into_iter()
            .map(|(x, y)| Point3::new(x, y, plane(x, y)))
            .collect();
        DelaunayTriangulation::bulk_load_stable(points).unwrap()
    }

    #[test]
    fn heights_inside_and_outside_hull() {
        let triangulation = triangulation();
        let positions = [Point2::new(0.25, 0.5), Point2::new(0.9, 0.1), Point2::new(2., 2.)];

        for interpolation in [Interpolation::Linear, Interpolation::NaturalNeighbor] {
            let heights = interpolation.heights(&triangulation, positions.into_iter());

            assert_eq!(heights.len(), 3);
            assert!((heights[0] - 1.).abs() < 1e-9, "{interpolation}");
            assert!((heights[1] - 2.7).abs() < 1e-9, "{interpolation}");
            assert!(heights[2].is_nan(), "{interpolation}");
        }
    }

    #[test]
    fn parse_and_display() {
        for interpolation in [Interpolation::Linear, Interpolation::NaturalNeighbor] {
            assert_eq!(
                interpolation.to_string().parse::<Interpolation>(),
                Ok(interpolation)
            );
        }
        assert_eq!("Natural".parse(), Ok(Interpolation::NaturalNeighbor));
        assert!("cubic".parse::<Interpolation>().is_err());
    }
}
