//! Composition of the discretization and eigendecomposition stages.
//!
//! Each configuration is processed independently from scratch: nothing is
//! shared between runs, so any number of them may be computed at once.

use std::{
    sync::{
        Arc,
        atomic::{ AtomicBool, Ordering },
        mpsc,
    },
    thread,
    time::Instant,
};
use ndarray as nd;
use rayon::prelude::*;
use crate::{
    banded::SymTridiag,
    error::EigenError,
    grid::Grid,
    operator::{ hamiltonian, laplacian },
    params::Params,
    potential::harmonic_potential,
    solve::{ self, EigenResult, Method },
    store::EigenstateStore,
};

/// Shared flag used to ask a running computation to stop.
///
/// Cancellation is cooperative: the solver checks the flag between
/// eigenvalues and returns [`EigenError::Cancelled`] once it is set.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a new, unset token.
    pub fn new() -> Self { Self::default() }

    /// Set the flag.
    pub fn cancel(&self) { self.0.store(true, Ordering::Relaxed); }

    /// Return `true` if the flag has been set.
    pub fn is_cancelled(&self) -> bool { self.0.load(Ordering::Relaxed) }
}

/// Record of the intermediate products for one configuration.
///
/// All arrays are guaranteed to have the same length and to be sampled on the
/// same uniform grid.
#[derive(Clone, Debug)]
pub struct System {
    // coordinate grid
    grid: Grid,
    // potential array
    V: nd::Array1<f64>,
    // Hamiltonian, band-stored
    H: SymTridiag,
}

impl System {
    /// Run every stage up to (but not including) the eigensolver.
    ///
    /// Parameters are validated before any array is allocated.
    pub fn new(params: &Params) -> EigenResult<Self> {
        params.validate()?;
        let grid = Grid::unit(params.length)?;
        let V = harmonic_potential(&grid, params.k, params.edge_v_inf)?;
        let lap = laplacian(&grid);
        let H = hamiltonian(&lap, &V, params.mass)?;
        log::debug!(
            "pipeline::System::new: assembled n = {} (dx = {:.3e}, wall = {})",
            grid.len(),
            grid.get_dx(),
            params.edge_v_inf,
        );
        Ok(Self { grid, V, H })
    }

    /// Get the coordinate grid.
    pub fn get_grid(&self) -> &Grid { &self.grid }

    /// Get a reference to the coordinate array.
    pub fn get_x(&self) -> &nd::Array1<f64> { self.grid.get_x() }

    /// Get a reference to the potential array.
    pub fn get_V(&self) -> &nd::Array1<f64> { &self.V }

    /// Get the coordinate array grid spacing.
    pub fn get_dx(&self) -> f64 { self.grid.get_dx() }

    /// Get the band-stored Hamiltonian.
    pub fn get_H(&self) -> &SymTridiag { &self.H }

    /// Get the number of grid points.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.grid.len() }

    /// Diagonalize the Hamiltonian and pack the result into a store.
    pub fn solve(&self, method: &Method, cancel: Option<&CancelToken>)
        -> EigenResult<EigenstateStore>
    {
        let t0 = Instant::now();
        let pairs = solve::solve(&self.H, method, true, cancel)?;
        log::debug!(
            "pipeline::System::solve: {} eigenpairs in {:.3} s",
            pairs.len(),
            t0.elapsed().as_secs_f64(),
        );
        EigenstateStore::from_pairs(self.grid.get_x().clone(), pairs)
    }

    /// Compute only the energies, in ascending order.
    pub fn energies(&self, method: &Method, cancel: Option<&CancelToken>)
        -> EigenResult<nd::Array1<f64>>
    {
        let pairs = solve::solve(&self.H, method, false, cancel)?;
        Ok(pairs.into_iter().map(|p| p.e).collect())
    }
}

/// Compute the full eigenstate store for `params` with the default
/// [method][Method].
pub fn compute(params: &Params) -> EigenResult<EigenstateStore> {
    compute_with(params, &Method::default(), None)
}

/// Compute the full eigenstate store for `params`.
pub fn compute_with(
    params: &Params,
    method: &Method,
    cancel: Option<&CancelToken>,
) -> EigenResult<EigenstateStore>
{
    System::new(params)?.solve(method, cancel)
}

/// Compute only the sorted energies for `params` with the default
/// [method][Method].
///
/// This skips eigenvector accumulation and is much cheaper than [`compute`]
/// for large grids.
pub fn compute_spectrum(params: &Params) -> EigenResult<nd::Array1<f64>> {
    System::new(params)?.energies(&Method::default(), None)
}

/// Compute stores for several independent configurations in parallel on the
/// global rayon pool.
///
/// Results are returned in the same order as `params`.
pub fn compute_many(params: &[Params], method: &Method)
    -> Vec<EigenResult<EigenstateStore>>
{
    params.par_iter()
        .map(|p| compute_with(p, method, None))
        .collect()
}

/// Handle to a computation running on a background thread.
///
/// Dropping the handle cancels the computation.
#[derive(Debug)]
pub struct Pending {
    rx: mpsc::Receiver<EigenResult<EigenstateStore>>,
    cancel: CancelToken,
    handle: Option<thread::JoinHandle<()>>,
}

impl Pending {
    /// Ask the computation to stop at its next checkpoint.
    pub fn cancel(&self) { self.cancel.cancel(); }

    /// Get the token controlling this computation.
    pub fn token(&self) -> &CancelToken { &self.cancel }

    /// Return the result if it is ready, without blocking.
    ///
    /// The result is delivered once; later calls return `None`.
    pub fn try_result(&mut self) -> Option<EigenResult<EigenstateStore>> {
        self.handle.as_ref()?;
        match self.rx.try_recv() {
            Ok(res) => { self.join(); Some(res) },
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => {
                self.join();
                Some(Err(EigenError::WorkerLost))
            },
        }
    }

    /// Block until the computation finishes.
    pub fn wait(mut self) -> EigenResult<EigenstateStore> {
        let res = self.rx.recv().unwrap_or(Err(EigenError::WorkerLost));
        self.join();
        res
    }

    fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("pipeline::Pending: worker thread panicked");
            }
        }
    }
}

impl Drop for Pending {
    fn drop(&mut self) {
        if self.handle.is_some() { self.cancel.cancel(); }
    }
}

/// Start computing the eigenstate store for `params` on a new thread.
///
/// Parameters are validated before the thread is started, so configuration
/// errors are reported immediately.
pub fn spawn(params: Params, method: Method) -> EigenResult<Pending> {
    params.validate()?;
    let cancel = CancelToken::new();
    let token = cancel.clone();
    let (tx, rx) = mpsc::channel();
    let handle = thread::Builder::new()
        .name(format!("qho-n{}", params.length))
        .spawn(move || {
            let res = compute_with(&params, &method, Some(&token));
            // the receiver may already be gone if the handle was dropped
            let _ = tx.send(res);
        })?;
    Ok(Pending { rx, cancel, handle: Some(handle) })
}
