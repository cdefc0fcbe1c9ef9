pub mod grid;
pub mod interpolation;
#[allow(clippy::module_inception)]
pub mod surface;

pub use self::grid::Grid;
pub use self::interpolation::Interpolation;
pub use self::surface::Surface;
