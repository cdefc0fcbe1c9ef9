use super::{Grid, Interpolation};
use crate::geometry::point_cloud::xy_bounds;
use crate::{io, Error, Point3, ResampleParameters, Result, Triangle};

use geo::Rect;
use log::{log, Level};
use spade::{DelaunayTriangulation, Point2, Triangulation};
use std::fmt::Debug;
use std::path::Path;
use std::sync::mpsc;
use std::thread;

/// A height field given by a sequence of points and the delaunay triangulation
/// of their projection onto the xy-plane.
///
/// The points are expected to be free of NaNs and duplicates. Both the points and
/// the triangulation are fixed at construction, resampling produces a new surface.
#[derive(Clone)]
pub struct Surface {
    points: Vec<Point3>,
    bounds: Rect,
    triangulation: DelaunayTriangulation<Point3>,
    simplices: Vec<[usize; 3]>,
}

#[allow(clippy::len_without_is_empty)]
impl Surface {
    /// Triangulates the (x, y) projection of the points, z is only carried along.
    ///
    /// Fails if fewer than 3 points are given, if all points are collinear in the
    /// xy-plane or if several points share the same (x, y) position.
    pub fn new(points: Vec<Point3>) -> Result<Surface> {
        let bounds = match xy_bounds(&points) {
            Some(bounds) if points.len() >= 3 => bounds,
            _ => {
                return Err(Error::InvalidGeometry(format!(
                    "at least 3 points are needed for a triangulation, got {}",
                    points.len()
                )))
            }
        };

        let triangulation = DelaunayTriangulation::<Point3>::bulk_load_stable(points.clone())?;

        // the simplices index into the caller's points, nothing may be merged away
        if triangulation.num_vertices() != points.len() {
            return Err(Error::InvalidGeometry(format!(
                "{} points share their (x, y) position with another point",
                points.len() - triangulation.num_vertices()
            )));
        }

        let simplices = triangulation
            .inner_faces()
            .map(|face| face.vertices().map(|v| v.fix().index()))
            .collect::<Vec<_>>();

        if simplices.is_empty() {
            return Err(Error::InvalidGeometry(
                "all points are collinear in the xy-plane".to_string(),
            ));
        }

        log!(
            Level::Debug,
            "Triangulated {} points into {} faces",
            points.len(),
            simplices.len()
        );

        Ok(Surface {
            points,
            bounds,
            triangulation,
            simplices,
        })
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn num_faces(&self) -> usize {
        self.simplices.len()
    }

    /// Bounding rectangle of the xy-projection
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Vertex indices of every face, in the order the triangulation produced them
    pub fn simplices(&self) -> &[[usize; 3]] {
        &self.simplices
    }

    /// The three vertices of every face, same order as [`Surface::simplices`]
    pub fn coordinates(&self) -> Vec<[Point3; 3]> {
        self.simplices
            .iter()
            .map(|simplex| simplex.map(|i| self.points[i]))
            .collect()
    }

    pub fn triangles(&self) -> Vec<Triangle> {
        self.coordinates().into_iter().map(Triangle::from).collect()
    }

    pub fn centroids(&self) -> Vec<Point3> {
        self.triangles().iter().map(Triangle::centroid).collect()
    }

    /// Normal of every face.
    ///
    /// The winding of a face is whatever the triangulation produced, callers
    /// should not rely on all normals pointing the same way.
    pub fn normals(&self, normalize: bool) -> Vec<Point3> {
        self.triangles().iter().map(|t| t.normal(normalize)).collect()
    }

    /// Sum of the face areas in 3D
    pub fn area(&self) -> f64 {
        self.triangles().iter().map(Triangle::area).sum()
    }

    /// Sum of the face areas projected onto the xy-plane, the area of the convex hull
    pub fn projected_area(&self) -> f64 {
        self.triangles().iter().map(|t| t.signed_area_xy().abs()).sum()
    }

    /// Index of the first face the point lies within, judged in the xy-plane
    pub fn locate(&self, point: &Point3) -> Option<usize> {
        self.triangles().iter().position(|t| t.is_within(point))
    }

    /// Linearly interpolated height at (x, y), NaN outside the convex hull
    pub fn height_at(&self, x: f64, y: f64) -> f64 {
        Interpolation::Linear.heights(&self.triangulation, std::iter::once(Point2::new(x, y)))[0]
    }

    /// Resample onto a `grid_steps` x `grid_steps` grid using linear interpolation.
    /// Grid nodes outside the convex hull of the samples get a NaN height.
    pub fn resample(&self, grid_steps: usize) -> Result<Surface> {
        self.resample_with(&ResampleParameters::new(grid_steps))
    }

    pub fn resample_with(&self, params: &ResampleParameters) -> Result<Surface> {
        params.validate()?;
        let grid = Grid::new(self.bounds, params.grid_steps)?;

        let heights = if params.threads > 1 {
            self.grid_heights_multithread(&grid, params.interpolation, params.threads)
        } else {
            let positions = (0..grid.steps).flat_map(|yi| grid.row(yi));
            params.interpolation.heights(&self.triangulation, positions)
        };

        let outside = heights.iter().filter(|z| z.is_nan()).count();
        if outside > 0 {
            log!(
                Level::Warn,
                "{outside} of {} grid nodes are outside the convex hull and have no height",
                grid.len()
            );
        }

        let points = grid
            .nodes()
            .zip(heights)
            .map(|(c, z)| Point3::new(c.x, c.y, z))
            .collect();

        Surface::new(points)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        io::write_xyz(path, &self.points)
    }

    fn grid_heights_multithread(
        &self,
        grid: &Grid,
        interpolation: Interpolation,
        num_threads: usize,
    ) -> Vec<f64> {
        let num_threads = num_threads.min(grid.steps);
        let mut heights = vec![f64::NAN; grid.len()];

        thread::scope(|s| {
            let (sender, receiver) = mpsc::channel();

            for thread_i in 0..num_threads {
                let thread_sender = sender.clone();
                let triangulation = &self.triangulation;

                s.spawn(move || {
                    let mut y_index = thread_i;

                    while y_index < grid.steps {
                        let row = interpolation.heights(triangulation, grid.row(y_index));
                        if thread_sender.send((y_index, row)).is_err() {
                            break;
                        }
                        y_index += num_threads;
                    }
                });
            }
            drop(sender);

            for (yi, row) in receiver.iter() {
                heights[yi * grid.steps..(yi + 1) * grid.steps].copy_from_slice(&row);
            }
        });

        heights
    }
}

impl Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("points", &self.points)
            .field("simplices", &self.simplices)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn square() -> Surface {
        Surface::new(vec![
            Point3::new(0., 0., 0.),
            Point3::new(1., 0., 0.),
            Point3::new(1., 1., 0.),
            Point3::new(0., 1., 0.),
        ])
        .unwrap()
    }

    fn plane(x: f64, y: f64) -> f64 {
        2. * x - 3. * y + 1.
    }

    fn planar_grid(n: usize) -> Surface {
        let mut points = Vec::with_capacity(n * n);
        for yi in 0..n {
            for xi in 0..n {
                let (x, y) = (xi as f64, yi as f64);
                points.push(Point3::new(x, y, plane(x, y)));
            }
        }
        Surface::new(points).unwrap()
    }

    #[test]
    fn square_has_two_faces() {
        let surface = square();

        assert_eq!(surface.num_faces(), 2);
        assert_eq!(surface.triangles().len(), 2);
        assert!((surface.area() - 1.).abs() < EPS);
        assert!((surface.projected_area() - 1.).abs() < EPS);

        for simplex in surface.simplices() {
            assert!(simplex.iter().all(|&i| i < surface.len()));
            let [a, b, c] = *simplex;
            assert!(a != b && b != c && a != c);
        }
    }

    #[test]
    fn area_weighted_centroid() {
        let surface = square();

        let weighted = surface
            .triangles()
            .iter()
            .fold(Point3::default(), |acc, t| acc + t.centroid() * t.area());
        let total = surface.area();

        let centroid = weighted / total;
        assert!((centroid - Point3::new(0.5, 0.5, 0.)).length() < EPS);
        assert_eq!(surface.centroids().len(), 2);
    }

    #[test]
    fn coordinates_follow_simplices() {
        let surface = square();

        for (simplex, coords) in surface.simplices().iter().zip(surface.coordinates()) {
            for (&i, c) in simplex.iter().zip(coords) {
                assert_eq!(surface.points()[i], c);
            }
        }
    }

    #[test]
    fn normals_are_vertical_for_flat_surface() {
        for normal in square().normals(true) {
            assert!((normal.z.abs() - 1.).abs() < EPS);
            assert!(normal.x.abs() < EPS && normal.y.abs() < EPS);
        }
    }

    #[test]
    fn deterministic() {
        assert_eq!(square().simplices(), square().simplices());
    }

    #[test]
    fn too_few_points() {
        let points = vec![Point3::new(0., 0., 0.), Point3::new(1., 0., 0.)];
        assert!(matches!(
            Surface::new(points),
            Err(Error::InvalidGeometry(_))
        ));
        assert!(matches!(
            Surface::new(vec![]),
            Err(Error::InvalidGeometry(_))
        ));
    }

    #[test]
    fn collinear_points() {
        let points = (0..5).map(|i| Point3::new(i as f64, 2. * i as f64, 1.)).collect();
        assert!(matches!(
            Surface::new(points),
            Err(Error::InvalidGeometry(_))
        ));
    }

    #[test]
    fn stacked_points() {
        let points = vec![
            Point3::new(0., 0., 0.),
            Point3::new(1., 0., 0.),
            Point3::new(0., 1., 0.),
            Point3::new(0., 1., 5.),
        ];
        assert!(matches!(
            Surface::new(points),
            Err(Error::InvalidGeometry(_))
        ));
    }

    #[test]
    fn locate() {
        let surface = square();

        let face = surface.locate(&Point3::new(0.25, 0.7, 3.)).unwrap();
        assert!(surface.triangles()[face].is_within(&Point3::new(0.25, 0.7, 0.)));
        assert_eq!(surface.locate(&Point3::new(5., 5., 0.)), None);
    }

    #[test]
    fn height_at() {
        let surface = planar_grid(4);

        assert!((surface.height_at(1.3, 2.2) - plane(1.3, 2.2)).abs() < EPS);
        assert!(surface.height_at(-1., 0.5).is_nan());
    }

    #[test]
    fn resample_reproduces_plane() -> Result<()> {
        let resampled = planar_grid(5).resample(9)?;

        assert_eq!(resampled.len(), 81);
        assert_eq!(resampled.bounds(), planar_grid(5).bounds());

        let interior = resampled
            .points()
            .iter()
            .filter(|p| p.x > 0. && p.x < 4. && p.y > 0. && p.y < 4.);
        for p in interior {
            assert!((p.z - plane(p.x, p.y)).abs() < EPS, "{p}");
        }
        Ok(())
    }

    #[test]
    fn resample_natural_neighbor() -> Result<()> {
        let params = ResampleParameters {
            grid_steps: 7,
            interpolation: Interpolation::NaturalNeighbor,
            threads: 1,
        };
        let resampled = planar_grid(5).resample_with(&params)?;

        let interior = resampled
            .points()
            .iter()
            .filter(|p| p.x > 0. && p.x < 4. && p.y > 0. && p.y < 4.);
        for p in interior {
            assert!((p.z - plane(p.x, p.y)).abs() < 1e-6, "{p}");
        }
        Ok(())
    }

    #[test]
    fn resample_outside_hull_is_nan() -> Result<()> {
        let surface = Surface::new(vec![
            Point3::new(0., 0., 1.),
            Point3::new(2., 0., 1.),
            Point3::new(0., 2., 1.),
            Point3::new(0.5, 0.5, 1.),
        ])?;

        let resampled = surface.resample(3)?;
        let corner = resampled
            .points()
            .iter()
            .find(|p| p.x == 2. && p.y == 2.)
            .unwrap();
        assert!(corner.z.is_nan());

        let inside = resampled
            .points()
            .iter()
            .find(|p| p.x == 1. && p.y == 0.)
            .unwrap();
        assert!((inside.z - 1.).abs() < EPS);
        Ok(())
    }

    #[test]
    fn resample_multithread_matches() -> Result<()> {
        let surface = Surface::new(vec![
            Point3::new(0., 0., 1.),
            Point3::new(3., 0., 2.),
            Point3::new(0., 3., 4.),
            Point3::new(1., 1., 0.5),
            Point3::new(2.5, 0.2, 3.),
        ])?;

        let single = surface.resample(11)?;
        let multi = surface.resample_with(&ResampleParameters {
            grid_steps: 11,
            interpolation: Interpolation::Linear,
            threads: 4,
        })?;

        assert_eq!(single.len(), multi.len());
        for (a, b) in single.points().iter().zip(multi.points()) {
            assert_eq!(a.z.to_bits(), b.z.to_bits());
        }
        assert_eq!(single.simplices(), multi.simplices());
        Ok(())
    }

    #[test]
    fn resample_too_few_steps() {
        assert!(matches!(
            square().resample(1),
            Err(Error::InvalidParameters(_))
        ));
    }
}
