//! Uniform sample coordinates over the unit interval.

use ndarray as nd;
use crate::error::ConfigError;

/// An ordered, uniformly spaced coordinate array over [0, 1].
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    // coordinate array
    x: nd::Array1<f64>,
    // grid spacing
    dx: f64,
}

impl Grid {
    /// Generate `length` points `x[i] = i / (length - 1)`.
    ///
    /// Both endpoints are included exactly.
    pub fn unit(length: usize) -> Result<Self, ConfigError> {
        ConfigError::check_length(length)?;
        let denom = (length - 1) as f64;
        let x: nd::Array1<f64>
            = (0..length).map(|i| i as f64 / denom).collect();
        let dx = x[1] - x[0];
        Ok(Self { x, dx })
    }

    /// Get a reference to the coordinate array.
    pub fn get_x(&self) -> &nd::Array1<f64> { &self.x }

    /// Get the grid spacing.
    pub fn get_dx(&self) -> f64 { self.dx }

    /// Get the number of grid points.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.x.len() }
}
