//! Functions to compute the eigenpairs of a discretized Hamiltonian.
//!
//! Every solver here relies on the Hamiltonian being real and symmetric, so
//! that all energies are real and the eigenvectors can be chosen orthonormal.
//! Results are always returned **sorted by ascending energy**, with each
//! eigenvector normalized to unit Euclidean length and its sign fixed so that
//! its largest-magnitude component is positive (see
//! [`fix_sign`][crate::utils::fix_sign]).

use ndarray as nd;
use crate::{
    Arr2,
    banded::{ SymTridiag, check_square_symmetric },
    error::EigenError,
    pipeline::CancelToken,
    utils::fix_sign,
    DEF_MAXITERS,
};

pub type EigenResult<T> = Result<T, EigenError>;

/// A single eigenpair of a Hamiltonian.
///
/// The eigenvector is allowed to be missing in the case that
/// `compute_wf = false` is passed to a solver function.
#[derive(Clone, Debug, PartialEq)]
pub struct Eigenpair {
    /// Energy
    pub e: f64,
    /// Eigenvector, with unit Euclidean norm
    pub wf: Option<nd::Array1<f64>>,
}

// sort by ascending energy and normalize eigenvector signs
//
// `vecs`, if present, holds one eigenvector per row, in the same order as
// `evals`
fn collect_sorted(evals: nd::Array1<f64>, vecs: Option<nd::Array2<f64>>)
    -> Vec<Eigenpair>
{
    let mut order: Vec<usize> = (0..evals.len()).collect();
    order.sort_by(|&a, &b| evals[a].total_cmp(&evals[b]));
    order.into_iter()
        .map(|k| {
            let wf = vecs.as_ref().map(|v| {
                let mut wf = v.row(k).to_owned();
                fix_sign(&mut wf);
                wf
            });
            Eigenpair { e: evals[k], wf }
        })
        .collect()
}

// apply a Givens rotation to rows `i` and `i + 1` of `z`
fn rotate(z: &mut nd::Array2<f64>, i: usize, s: f64, c: f64) {
    let (mut zi, mut zip1)
        = z.multi_slice_mut((nd::s![i, ..], nd::s![i + 1, ..]));
    nd::Zip::from(&mut zi).and(&mut zip1)
        .for_each(|a, b| {
            let f = *b;
            *b = s * *a + c * f;
            *a = c * *a - s * f;
        });
}

// implicit-shift QL iteration on a symmetric tridiagonal matrix
//
// on entry, `d` holds the diagonal and `e` the off-diagonal padded with a
// trailing zero to length n; on exit, `d` holds the (unsorted) eigenvalues and
// `e` is destroyed
//
// `z`, if present, must be the n×n identity on entry; rotations are
// accumulated on its rows so that on exit row k is the eigenvector belonging
// to d[k]
//
// the splitting test is local to each 2×2 block, not relative to the matrix
// norm: wall entries (~1e30) must not mask the interior couplings
fn tql_implicit(
    d: &mut nd::Array1<f64>,
    e: &mut nd::Array1<f64>,
    mut z: Option<&mut nd::Array2<f64>>,
    maxiters: usize,
    cancel: Option<&CancelToken>,
) -> EigenResult<()>
{
    let n = d.len();
    let mut sweeps: usize = 0;
    for l in 0..n {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            return Err(EigenError::Cancelled);
        }
        let mut iter: usize = 0;
        loop {
            let mut m = l;
            while m + 1 < n {
                let dd = d[m].abs() + d[m + 1].abs();
                if e[m].abs() <= f64::EPSILON * dd { break; }
                m += 1;
            }
            if m == l { break; }
            if iter == maxiters {
                return Err(EigenError::NumericalNonConvergence { index: l, maxiters });
            }
            iter += 1;

            let mut g = (d[l + 1] - d[l]) / (2.0 * e[l]);
            let mut r = g.hypot(1.0);
            g = d[m] - d[l] + e[l] / (g + r.copysign(g));
            let (mut s, mut c, mut p) = (1.0_f64, 1.0_f64, 0.0_f64);
            let mut underflow = false;
            for i in (l..m).rev() {
                let f = s * e[i];
                let b = c * e[i];
                r = f.hypot(g);
                e[i + 1] = r;
                if r == 0.0 {
                    d[i + 1] -= p;
                    e[m] = 0.0;
                    underflow = true;
                    break;
                }
                s = f / r;
                c = g / r;
                g = d[i + 1] - p;
                r = (d[i] - g) * s + 2.0 * c * b;
                p = s * r;
                d[i + 1] = g + p;
                g = c * r - b;
                if let Some(z) = z.as_deref_mut() { rotate(z, i, s, c); }
            }
            if underflow { continue; }
            d[l] -= p;
            e[l] = g;
            e[m] = 0.0;
        }
        sweeps += iter;
    }
    log::trace!("solve::tql_implicit: n = {n}, {sweeps} QL sweeps");
    Ok(())
}

/// Compute all eigenpairs of a symmetric tridiagonal matrix using the
/// implicit-shift QL algorithm.
///
/// Each eigenvalue is allowed at most `maxiters` QL sweeps before
/// [`EigenError::NumericalNonConvergence`] is returned. Pass
/// `compute_wf = false` to only calculate energies, which reduces the cost
/// from *O*(*N*³) to *O*(*N*²). If `cancel` is given, it is polled once per
/// eigenvalue.
pub fn solve_tridiagonal(
    H: &SymTridiag,
    maxiters: usize,
    compute_wf: bool,
    cancel: Option<&CancelToken>,
) -> EigenResult<Vec<Eigenpair>>
{
    EigenError::check_maxiters(maxiters)?;
    let n = H.len();
    let mut d: nd::Array1<f64> = H.diag().to_owned();
    let mut e: nd::Array1<f64> = nd::Array1::zeros(n);
    e.slice_mut(nd::s![..n - 1]).assign(&H.off());
    let mut z: Option<nd::Array2<f64>>
        = compute_wf.then(|| nd::Array2::eye(n));
    tql_implicit(&mut d, &mut e, z.as_mut(), maxiters, cancel)?;
    Ok(collect_sorted(d, z))
}

/// Compute all eigenpairs of a symmetric matrix using LAPACK's `syevd`
/// through `ndarray-linalg`.
///
/// The matrix is not checked for symmetry; only its lower triangle is read.
#[cfg(feature = "lapack")]
pub fn solve_lapack(H: nd::Array2<f64>, compute_wf: bool)
    -> EigenResult<Vec<Eigenpair>>
{
    use ndarray_linalg::{ self as la, EighInto, EigValshInto };
    if compute_wf {
        let (evals, evecs): (nd::Array1<f64>, nd::Array2<f64>)
            = H.eigh_into(la::UPLO::Lower)?;
        Ok(collect_sorted(evals, Some(evecs.reversed_axes())))
    } else {
        let evals: nd::Array1<f64> = H.eigvalsh_into(la::UPLO::Lower)?;
        Ok(collect_sorted(evals, None))
    }
}

/// Solving method selector and parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Method {
    /// Use the [implicit QL algorithm][solve_tridiagonal] on band storage.
    Tridiagonal {
        /// Maximum number of QL sweeps per eigenvalue (default: `60`).
        maxiters: Option<usize>,
    },
    /// Use [LAPACK][solve_lapack] on the densified matrix.
    #[cfg(feature = "lapack")]
    Dense,
}

impl Default for Method {
    fn default() -> Self { Self::Tridiagonal { maxiters: None } }
}

impl Method {
    /// Return `true` if `self` is `Tridiagonal`.
    pub fn is_tridiagonal(&self) -> bool {
        matches!(self, Self::Tridiagonal { .. })
    }

    /// Return `true` if `self` is `Dense`.
    pub fn is_dense(&self) -> bool { !self.is_tridiagonal() }
}

/// Master solving function for all [methods][Method].
pub fn solve(
    H: &SymTridiag,
    method: &Method,
    compute_wf: bool,
    cancel: Option<&CancelToken>,
) -> EigenResult<Vec<Eigenpair>>
{
    match method {
        Method::Tridiagonal { maxiters } => {
            solve_tridiagonal(
                H, maxiters.unwrap_or(DEF_MAXITERS), compute_wf, cancel)
        },
        #[cfg(feature = "lapack")]
        Method::Dense => {
            if cancel.is_some_and(CancelToken::is_cancelled) {
                return Err(EigenError::Cancelled);
            }
            if compute_wf && H.len() > 2000 {
                log::warn!(
                    "solve::solve: dense eigenvectors requested for n = {}; \
                    this needs {} MB",
                    H.len(),
                    H.len().pow(2) * 8 / 1_000_000,
                );
            }
            solve_lapack(H.to_dense(), compute_wf)
        },
    }
}

/// Like [`solve`], but for a Hamiltonian given as a dense array.
///
/// Returns [`EigenError::DimensionMismatch`] if `H` is not square or not
/// symmetric within [`SYMMETRY_TOLERANCE`][crate::SYMMETRY_TOLERANCE]. The
/// tridiagonal method additionally requires `H` to be zero outside its
/// tridiagonal band.
pub fn solve_dense<S>(H: &Arr2<S>, method: &Method, compute_wf: bool)
    -> EigenResult<Vec<Eigenpair>>
where S: nd::Data<Elem = f64>
{
    check_square_symmetric(H)?;
    match method {
        Method::Tridiagonal { .. } => {
            let H = SymTridiag::from_dense(H)?;
            solve(&H, method, compute_wf, None)
        },
        #[cfg(feature = "lapack")]
        Method::Dense => solve_lapack(H.to_owned(), compute_wf),
    }
}
