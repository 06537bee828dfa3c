//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use ndarray as nd;
use thiserror::Error;

/// Returned when an operation requiring equal-length arrays encounters arrays
/// with unequal length.
#[derive(Debug, Error)]
#[error("encountered arrays with incompatible lengths; got {0} and {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check<S, A, T, B>(
        a: &nd::ArrayBase<S, nd::Ix1>,
        b: &nd::ArrayBase<T, nd::Ix1>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = A>,
        T: nd::Data<Elem = B>,
    {
        let na = a.len();
        let nb = b.len();
        (na == nb).then_some(()).ok_or(Self(na, nb))
    }
}

/// Returned when oscillator parameters are out of range.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when fewer than two grid points are requested.
    #[error("grid length must be at least 2; got {0}")]
    BadLength(usize),

    /// Returned when a non-positive or non-finite mass is encountered.
    #[error("mass must be finite and greater than 0; got {0}")]
    BadMass(f64),

    /// Returned when a negative or non-finite spring constant is encountered.
    #[error("spring constant must be finite and non-negative; got {0}")]
    BadSpring(f64),

    /// Returned when a parameter document cannot be parsed.
    #[error("malformed parameters: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    pub(crate) fn check_length(length: usize) -> Result<(), Self> {
        (length >= 2).then_some(()).ok_or(Self::BadLength(length))
    }

    pub(crate) fn check_mass(mass: f64) -> Result<(), Self> {
        (mass.is_finite() && mass > 0.0).then_some(()).ok_or(Self::BadMass(mass))
    }

    pub(crate) fn check_spring(k: f64) -> Result<(), Self> {
        (k.is_finite() && k >= 0.0).then_some(()).ok_or(Self::BadSpring(k))
    }
}

/// Returned when matrix or vector shapes disagree with each other or with the
/// structure a solver requires.
#[derive(Debug, Error)]
pub enum DimensionError {
    /// Returned when a matrix is not square.
    #[error("matrix must be square; got shape {0}×{1}")]
    NotSquare(usize, usize),

    /// Returned when a matrix differs from its transpose by more than
    /// [`SYMMETRY_TOLERANCE`][crate::SYMMETRY_TOLERANCE].
    #[error("matrix is not symmetric: entries ({i}, {j}) and ({j}, {i}) differ by {delta:e}")]
    Asymmetric { i: usize, j: usize, delta: f64 },

    /// Returned when a matrix has non-zero entries outside its tridiagonal
    /// band.
    #[error("matrix is not tridiagonal: entry ({0}, {1}) is non-zero")]
    OutOfBand(usize, usize),

    /// Returned when a matrix has no rows.
    #[error("matrix must be non-empty")]
    Empty,

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),
}

/// Returned from the solver and pipeline functions.
#[derive(Debug, Error)]
pub enum EigenError {
    /// [`ConfigError`]; raised before any matrix work is done.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// [`DimensionError`]; signals a defect in how stages were wired together.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(#[from] DimensionError),

    /// Returned when the implicit QL iteration exceeds its sweep budget while
    /// isolating an eigenvalue.
    #[error("eigenvalue {index} did not converge within {maxiters} iterations")]
    NumericalNonConvergence { index: usize, maxiters: usize },

    /// Returned when a solver function receives a zero sweep budget.
    #[error("maxiters must be greater than 0; got {0}")]
    BadMaxiters(usize),

    /// Returned when a computation was cancelled through its
    /// [`CancelToken`][crate::pipeline::CancelToken].
    #[error("computation was cancelled")]
    Cancelled,

    /// Returned when a background worker exits without delivering a result.
    #[error("background worker exited without delivering a result")]
    WorkerLost,

    /// Returned when the operating system refuses to start a worker thread.
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),

    /// Returned when an eigenstate store is built from pairs that are not in
    /// ascending order of energy; carries the index of the first pair that is
    /// out of order.
    #[error("eigenpair {0} is out of energy order")]
    Unsorted(usize),

    /// Returned when an eigenstate store is built from energies-only
    /// solutions.
    #[error("eigenpair {0} has no wavefunction")]
    MissingWavefunction(usize),

    /// [`LinalgError`][ndarray_linalg::error::LinalgError].
    #[cfg(feature = "lapack")]
    #[error("linalg error: {0}")]
    Linalg(#[from] ndarray_linalg::error::LinalgError),
}

impl EigenError {
    pub(crate) fn check_maxiters(maxiters: usize) -> Result<(), Self> {
        (maxiters != 0).then_some(()).ok_or(Self::BadMaxiters(maxiters))
    }
}

impl From<LengthError> for EigenError {
    fn from(err: LengthError) -> Self {
        Self::DimensionMismatch(err.into())
    }
}
