use super::Point3;
use crate::{is_close, Error, Result};

use std::fmt::Display;

/// A triangle in 3D space given by its vertices A, B and C.
///
/// The vertex order decides the winding and with it the direction of the normal.
/// Nothing is cached, every quantity is derived from the vertices on each call.
///
/// Barycentric coordinates, containment and interpolation work on the projection
/// onto the xy-plane, i.e. the triangle is treated as a patch of a height field.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Triangle {
    pub a: Point3,
    pub b: Point3,
    pub c: Point3,
}

impl Triangle {
    pub const fn new(a: Point3, b: Point3, c: Point3) -> Triangle {
        Triangle { a, b, c }
    }

    /// Build a triangle from rows of coordinates, fails unless there are exactly 3 rows
    pub fn from_coordinates(coordinates: &[[f64; 3]]) -> Result<Triangle> {
        match coordinates {
            [a, b, c] => Ok(Triangle::new((*a).into(), (*b).into(), (*c).into())),
            _ => Err(vertex_count_error(coordinates.len())),
        }
    }

    pub fn vertices(&self) -> [Point3; 3] {
        [self.a, self.b, self.c]
    }

    pub fn centroid(&self) -> Point3 {
        (self.a + self.b + self.c) / 3.
    }

    /// Half the length of (B - A) x (C - A), exactly 0 for collinear or coincident vertices
    pub fn area(&self) -> f64 {
        0.5 * self.cross().length()
    }

    /// Signed area of the projection onto the xy-plane, positive for counter-clockwise winding
    pub fn signed_area_xy(&self) -> f64 {
        0.5 * ((self.b.x - self.a.x) * (self.c.y - self.a.y)
            - (self.b.y - self.a.y) * (self.c.x - self.a.x))
    }

    pub fn is_degenerate(&self) -> bool {
        self.area() == 0.
    }

    /// (B - A) x (C - A), optionally scaled to unit length.
    ///
    /// Normalizing a degenerate triangle divides by zero and gives NaN components,
    /// use [`Triangle::try_normal`] to get an error instead.
    pub fn normal(&self, normalize: bool) -> Point3 {
        let normal = self.cross();
        if normalize {
            normal / normal.length()
        } else {
            normal
        }
    }

    pub fn try_normal(&self) -> Result<Point3> {
        if self.is_degenerate() {
            return Err(Error::DegenerateTriangle);
        }
        Ok(self.normal(true))
    }

    /// Barycentric coordinates of the point in the xy-projection of the triangle.
    ///
    /// The weight of each vertex is the area of the sub-triangle spanned by the point
    /// and the opposite edge, divided by the area of the whole triangle. The areas are
    /// unsigned, so the weights sum to 1 inside the projected triangle and to more
    /// than 1 outside of it. The z-coordinates of both the triangle and the point are ignored.
    ///
    /// Each sub-area belongs to the vertex it does not touch, so alpha is the area of
    /// (B, P, C) and not of (A, P, B). Only this pairing gives alpha * A + beta * B + gamma * C == P,
    /// which [`Triangle::interpolate`] depends on. Swapping it keeps the sum but breaks interpolation.
    pub fn barycentric(&self, point: &Point3) -> [f64; 3] {
        let p = point.flatten();
        let [a, b, c] = self.vertices().map(Point3::flatten);

        let area_abc = Triangle::new(a, b, c).area();

        let area_bpc = Triangle::new(b, p, c).area();
        let area_cpa = Triangle::new(c, p, a).area();
        let area_apb = Triangle::new(a, p, b).area();

        [area_bpc / area_abc, area_cpa / area_abc, area_apb / area_abc]
    }

    pub fn try_barycentric(&self, point: &Point3) -> Result<[f64; 3]> {
        if self.signed_area_xy() == 0. {
            return Err(Error::DegenerateTriangle);
        }
        Ok(self.barycentric(point))
    }

    /// True if the barycentric coordinates of the point sum to 1.
    ///
    /// Only the xy-projection matters, a point straight above or below the
    /// triangle is within it regardless of its height.
    pub fn is_within(&self, point: &Point3) -> bool {
        is_close(self.barycentric(point).iter().sum(), 1.)
    }

    /// Weighted sum of the vertices using the barycentric coordinates of the point.
    ///
    /// The z-component is the height of the triangle's plane above the point's (x, y),
    /// while x and y reproduce the point's own for points within the triangle.
    pub fn interpolate(&self, point: &Point3) -> Point3 {
        let [alpha, beta, gamma] = self.barycentric(point);
        self.a * alpha + self.b * beta + self.c * gamma
    }

    pub fn try_interpolate(&self, point: &Point3) -> Result<Point3> {
        let [alpha, beta, gamma] = self.try_barycentric(point)?;
        Ok(self.a * alpha + self.b * beta + self.c * gamma)
    }

    fn cross(&self) -> Point3 {
        (self.b - self.a).cross(&(self.c - self.a))
    }
}

impl TryFrom<&[Point3]> for Triangle {
    type Error = Error;

    fn try_from(vertices: &[Point3]) -> Result<Triangle> {
        match vertices {
            [a, b, c] => Ok(Triangle::new(*a, *b, *c)),
            _ => Err(vertex_count_error(vertices.len())),
        }
    }
}

impl From<[Point3; 3]> for Triangle {
    fn from([a, b, c]: [Point3; 3]) -> Triangle {
        Triangle::new(a, b, c)
    }
}

impl Display for Triangle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Triangle(vertices=[{}, {}, {}])", self.a, self.b, self.c)
    }
}

fn vertex_count_error(count: usize) -> Error {
    Error::InvalidGeometry(format!("a triangle needs exactly 3 vertices, got {count}"))
}
