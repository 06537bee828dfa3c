//! Harmonic potential sampled on a [`Grid`].

use ndarray as nd;
use crate::{ error::ConfigError, grid::Grid };

/// Stand-in for an infinite potential at the grid edges.
///
/// Large enough that any state with appreciable weight on an edge point lies
/// far above the harmonic part of the spectrum.
pub const WALL: f64 = 1e30;

/// Center of the well.
pub const CENTER: f64 = 0.5;

/// Harmonic potential `k (x - 1/2)² / 2` at a single point.
pub fn harmonic(x: f64, k: f64) -> f64 {
    0.5 * k * (x - CENTER).powi(2)
}

/// Sample the harmonic potential over `grid`.
///
/// With `edge_v_inf`, the first and last entries are overwritten by [`WALL`]
/// to approximate an infinite square well enclosing the oscillator.
pub fn harmonic_potential(grid: &Grid, k: f64, edge_v_inf: bool)
    -> Result<nd::Array1<f64>, ConfigError>
{
    ConfigError::check_spring(k)?;
    let mut v: nd::Array1<f64> = grid.get_x().mapv(|xk| harmonic(xk, k));
    if edge_v_inf {
        let n = v.len();
        v[0] = WALL;
        v[n - 1] = WALL;
    }
    Ok(v)
}

/// Energy of the `n`-th level of the continuum oscillator,
/// `(n + 1/2) √(k/m)`, for comparison against discretized levels.
pub fn harmonic_level(n: usize, k: f64, mass: f64) -> f64 {
    (n as f64 + 0.5) * (k / mass).sqrt()
}
