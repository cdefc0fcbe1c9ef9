use crate::surface::Interpolation;
use crate::{Error, Result, DEFAULT_GRID_STEPS, MIN_GRID_STEPS};

/// How a surface gets resampled onto a regular grid
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResampleParameters {
    /// Number of grid nodes along each axis, both ends of the bounding box included
    pub grid_steps: usize,
    pub interpolation: Interpolation,
    /// Worker threads sharing the grid rows, 0 and 1 both mean the calling thread only
    pub threads: usize,
}

impl ResampleParameters {
    pub fn new(grid_steps: usize) -> Self {
        Self {
            grid_steps,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.grid_steps < MIN_GRID_STEPS {
            return Err(Error::InvalidParameters(format!(
                "a grid needs at least {MIN_GRID_STEPS} steps per axis, got {}",
                self.grid_steps
            )));
        }
        Ok(())
    }
}

impl Default for ResampleParameters {
    fn default() -> Self {
        Self {
            grid_steps: DEFAULT_GRID_STEPS,
            interpolation: Default::default(),
            threads: 1,
        }
    }
}
