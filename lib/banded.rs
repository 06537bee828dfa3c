//! Band storage for real symmetric tridiagonal matrices.
//!
//! Only the main diagonal (length *N*) and the first off-diagonal (length
//! *N* - 1) are kept; since the matrix is symmetric, the same off-diagonal
//! serves as both the sub- and super-diagonal.

use ndarray as nd;
use crate::{
    Arr1,
    Arr2,
    error::{ DimensionError, LengthError },
    SYMMETRY_TOLERANCE,
};

/// A real symmetric tridiagonal matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct SymTridiag {
    // main diagonal
    diag: nd::Array1<f64>,
    // off[i] = A[i, i + 1] = A[i + 1, i]
    off: nd::Array1<f64>,
}

impl SymTridiag {
    /// Create a new matrix from its diagonal and off-diagonal.
    pub fn new(diag: nd::Array1<f64>, off: nd::Array1<f64>)
        -> Result<Self, DimensionError>
    {
        if diag.is_empty() { return Err(DimensionError::Empty); }
        let n = diag.len();
        if off.len() + 1 != n {
            return Err(LengthError(n - 1, off.len()).into());
        }
        Ok(Self { diag, off })
    }

    /// Create a matrix with every diagonal entry equal to `d` and every
    /// off-diagonal entry equal to `e`.
    ///
    /// *Panics if `n` is 0*.
    pub fn from_elems(n: usize, d: f64, e: f64) -> Self {
        assert!(n > 0, "SymTridiag::from_elems: empty matrix");
        Self {
            diag: nd::Array1::from_elem(n, d),
            off: nd::Array1::from_elem(n - 1, e),
        }
    }

    /// Extract the band of a dense matrix, checking that it is square,
    /// symmetric within [`SYMMETRY_TOLERANCE`], and zero outside the band.
    pub fn from_dense<S>(a: &Arr2<S>) -> Result<Self, DimensionError>
    where S: nd::Data<Elem = f64>
    {
        check_square_symmetric(a)?;
        let n = a.nrows();
        if let Some(((i, j), _))
            = a.indexed_iter()
            .find(|((i, j), ajk)| i.abs_diff(*j) > 1 && **ajk != 0.0)
        {
            return Err(DimensionError::OutOfBand(i, j));
        }
        let diag = a.diag().to_owned();
        let off: nd::Array1<f64>
            = (0..n - 1).map(|i| a[[i, i + 1]]).collect();
        Ok(Self { diag, off })
    }

    /// Get the main diagonal.
    pub fn diag(&self) -> nd::ArrayView1<'_, f64> { self.diag.view() }

    /// Get the off-diagonal.
    pub fn off(&self) -> nd::ArrayView1<'_, f64> { self.off.view() }

    /// Get the number of rows (and columns).
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.diag.len() }

    /// Get the `(i, j)`-th element, including the implicit zeros outside the
    /// band.
    ///
    /// *Panics if either index is out of bounds*.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        let n = self.len();
        assert!(i < n && j < n, "SymTridiag::get: index out of bounds");
        match i.abs_diff(j) {
            0 => self.diag[i],
            1 => self.off[i.min(j)],
            _ => 0.0,
        }
    }

    /// Multiply every element by `a`.
    pub fn scale(&mut self, a: f64) {
        self.diag *= a;
        self.off *= a;
    }

    /// Like [`Self::scale`], but create a scaled copy of `self`.
    pub fn scaled(&self, a: f64) -> Self {
        let mut new = self.clone();
        new.scale(a);
        new
    }

    /// Add `diag(v)` to `self` in place.
    pub fn add_diag<S>(&mut self, v: &Arr1<S>) -> Result<(), LengthError>
    where S: nd::Data<Elem = f64>
    {
        LengthError::check(&self.diag, v)?;
        self.diag += v;
        Ok(())
    }

    /// Compute the product `self · v`.
    pub fn dot<S>(&self, v: &Arr1<S>) -> Result<nd::Array1<f64>, LengthError>
    where S: nd::Data<Elem = f64>
    {
        LengthError::check(&self.diag, v)?;
        let n = self.len();
        let mut w: nd::Array1<f64> = &self.diag * v;
        for i in 0..n - 1 {
            w[i] += self.off[i] * v[i + 1];
            w[i + 1] += self.off[i] * v[i];
        }
        Ok(w)
    }

    /// Expand into a dense `N`×`N` array.
    pub fn to_dense(&self) -> nd::Array2<f64> {
        let n = self.len();
        let mut a: nd::Array2<f64> = nd::Array2::from_diag(&self.diag);
        a.slice_mut(nd::s![1..n, 0..n - 1]).diag_mut().assign(&self.off);
        a.slice_mut(nd::s![0..n - 1, 1..n]).diag_mut().assign(&self.off);
        a
    }
}

/// Check that `a` is square and equal to its transpose within
/// [`SYMMETRY_TOLERANCE`] (relative to the larger of the two entries, or
/// absolute below unit magnitude).
pub fn check_square_symmetric<S>(a: &Arr2<S>) -> Result<(), DimensionError>
where S: nd::Data<Elem = f64>
{
    let (nr, nc) = a.dim();
    if nr != nc { return Err(DimensionError::NotSquare(nr, nc)); }
    if nr == 0 { return Err(DimensionError::Empty); }
    for i in 0..nr {
        for j in i + 1..nc {
            let (aij, aji) = (a[[i, j]], a[[j, i]]);
            let delta = (aij - aji).abs();
            let scale = aij.abs().max(aji.abs()).max(1.0);
            if !(delta <= SYMMETRY_TOLERANCE * scale) {
                return Err(DimensionError::Asymmetric { i, j, delta });
            }
        }
    }
    Ok(())
}
