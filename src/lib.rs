pub mod error;
pub mod geometry;
pub mod io;
pub mod parameters;
pub mod surface;

// closeness test used for barycentric sums, same semantics as numpy.isclose
const IS_CLOSE_RTOL: f64 = 1e-5;
const IS_CLOSE_ATOL: f64 = 1e-8;

pub const DEFAULT_GRID_STEPS: usize = 50;
pub const MIN_GRID_STEPS: usize = 2;

pub use error::{Error, Result};
pub use geometry::{Point3, PointCloud, Triangle};
pub use parameters::ResampleParameters;
pub use surface::{Grid, Interpolation, Surface};

#[inline]
pub(crate) fn is_close(a: f64, b: f64) -> bool {
    (a - b).abs() <= IS_CLOSE_ATOL + IS_CLOSE_RTOL * b.abs()
}
