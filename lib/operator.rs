//! Finite-difference operators on a uniform [`Grid`].

use ndarray as nd;
use crate::{
    Arr1,
    banded::SymTridiag,
    error::{ ConfigError, EigenError },
    grid::Grid,
};

/// Build the three-point central-difference approximation to ∂²/∂x².
///
/// Row *i* holds `-2/dx²` on the diagonal and `1/dx²` at columns *i* ± 1
/// where those exist. The first and last rows simply drop the missing
/// neighbor; no reflective or periodic correction is applied, so a hard wall
/// has to come from the potential.
pub fn laplacian(grid: &Grid) -> SymTridiag {
    let ondx2 = grid.get_dx().powi(2).recip();
    SymTridiag::from_elems(grid.len(), -2.0 * ondx2, ondx2)
}

/// Assemble the Hamiltonian `-(1/2m) L + diag(V)` from a Laplacian `L` and a
/// sampled potential `V`.
pub fn hamiltonian<S>(lap: &SymTridiag, V: &Arr1<S>, mass: f64)
    -> Result<SymTridiag, EigenError>
where S: nd::Data<Elem = f64>
{
    ConfigError::check_mass(mass)?;
    let mut H = lap.scaled(-0.5 / mass);
    H.add_diag(V)?;
    Ok(H)
}
