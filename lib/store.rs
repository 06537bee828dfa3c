//! Read-only container for a computed spectrum.
//!
//! This is the only artifact handed to rendering code: an indexable sequence
//! of eigenstates, sorted by ascending energy, each sampled on the same grid
//! as the Hamiltonian it came from.

use std::{ cmp::Ordering, ops::Index };
use ndarray as nd;
use crate::{
    error::{ EigenError, LengthError },
    solve::{ EigenResult, Eigenpair },
    utils::wf_normalized,
};

/// A borrowed view of a single eigenstate in an [`EigenstateStore`].
#[derive(Copy, Clone, Debug)]
pub struct StateRef<'a> {
    /// Energy
    pub e: f64,
    /// Eigenvector, with unit Euclidean norm
    pub wf: nd::ArrayView1<'a, f64>,
}

impl<'a> StateRef<'a> {
    /// Return `|ψ[i]|` at every grid point.
    pub fn magnitudes(&self) -> nd::Array1<f64> { self.wf.mapv(f64::abs) }

    /// Return the eigenvector rescaled so that `∫|ψ|² dx = 1` on a grid with
    /// spacing `dx` (trapezoidal rule).
    pub fn wavefunction(&self, dx: f64) -> nd::Array1<f64> {
        wf_normalized(&self.wf, dx)
    }
}

/// The sorted eigenpairs of one oscillator configuration.
///
/// Contents are fixed at construction; all accessors are *O*(1).
#[derive(Clone, Debug, PartialEq)]
pub struct EigenstateStore {
    // grid coordinates
    x: nd::Array1<f64>,
    // grid spacing
    dx: f64,
    // energies, ascending
    energies: nd::Array1<f64>,
    // row k is the eigenvector belonging to energies[k]
    states: nd::Array2<f64>,
}

impl EigenstateStore {
    /// Pack solver output into a store.
    ///
    /// `pairs` must be in ascending order of energy and every pair must carry
    /// an eigenvector of the same length as `x`.
    pub fn from_pairs(x: nd::Array1<f64>, pairs: Vec<Eigenpair>)
        -> EigenResult<Self>
    {
        let n = x.len();
        if n < 2 { return Err(LengthError(2, n).into()); }
        if pairs.len() != n { return Err(LengthError(n, pairs.len()).into()); }
        let in_order = |w: &[Eigenpair]| {
            matches!(
                w[0].e.partial_cmp(&w[1].e),
                Some(Ordering::Less | Ordering::Equal),
            )
        };
        if let Some(k) = pairs.windows(2).position(|w| !in_order(w)) {
            return Err(EigenError::Unsorted(k + 1));
        }
        let dx = x[1] - x[0];
        let mut energies: nd::Array1<f64> = nd::Array1::zeros(n);
        let mut states: nd::Array2<f64> = nd::Array2::zeros((n, n));
        for (k, (pair, (ek, mut row)))
            in pairs.into_iter()
            .zip(energies.iter_mut().zip(states.rows_mut()))
            .enumerate()
        {
            let wf = pair.wf.ok_or(EigenError::MissingWavefunction(k))?;
            LengthError::check(&x, &wf)?;
            *ek = pair.e;
            row.assign(&wf);
        }
        Ok(Self { x, dx, energies, states })
    }

    /// Get the number of eigenstates.
    pub fn len(&self) -> usize { self.energies.len() }

    /// Return `true` if the store holds no eigenstates.
    pub fn is_empty(&self) -> bool { self.energies.is_empty() }

    /// Get the `k`-th eigenstate, counting from the ground state.
    pub fn get(&self, k: usize) -> Option<StateRef<'_>> {
        (k < self.len())
            .then(|| StateRef { e: self.energies[k], wf: self.states.row(k) })
    }

    /// Get the energy of the `k`-th eigenstate.
    pub fn energy(&self, k: usize) -> Option<f64> {
        self.energies.get(k).copied()
    }

    /// Get the eigenvector of the `k`-th eigenstate.
    pub fn state(&self, k: usize) -> Option<nd::ArrayView1<'_, f64>> {
        (k < self.len()).then(|| self.states.row(k))
    }

    /// Get the eigenstate displayed at animation frame `frame_no`, i.e. the
    /// one at index `frame_no mod len`.
    pub fn frame(&self, frame_no: usize) -> StateRef<'_> {
        let k = frame_no % self.len();
        StateRef { e: self.energies[k], wf: self.states.row(k) }
    }

    /// Iterate over all eigenstates in order of ascending energy.
    pub fn iter(&self) -> impl Iterator<Item = StateRef<'_>> + '_ {
        self.energies.iter().zip(self.states.rows())
            .map(|(e, wf)| StateRef { e: *e, wf })
    }

    /// Get a view of all energies.
    pub fn energies(&self) -> nd::ArrayView1<'_, f64> { self.energies.view() }

    /// Get a view of all eigenvectors, one per row.
    pub fn states(&self) -> nd::ArrayView2<'_, f64> { self.states.view() }

    /// Get a reference to the coordinate array.
    pub fn get_x(&self) -> &nd::Array1<f64> { &self.x }

    /// Get the coordinate array grid spacing.
    pub fn get_dx(&self) -> f64 { self.dx }
}

/// `store[k]` is the energy of the `k`-th eigenstate.
///
/// Panics if `k` is out of range; use [`EigenstateStore::get`] for a checked
/// lookup of the full state.
impl Index<usize> for EigenstateStore {
    type Output = f64;

    fn index(&self, k: usize) -> &f64 { &self.energies[k] }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DimensionError;

    fn store() -> EigenstateStore {
        let h = std::f64::consts::FRAC_1_SQRT_2;
        EigenstateStore::from_pairs(
            nd::array![0.0, 1.0],
            vec![
                Eigenpair { e: 1.0, wf: Some(nd::array![h, -h]) },
                Eigenpair { e: 3.0, wf: Some(nd::array![h, h]) },
            ],
        ).unwrap()
    }

    #[test]
    fn indexed_access() {
        let s = store();
        assert_eq!(s.len(), 2);
        assert!(!s.is_empty());
        assert_eq!(s.energy(1), Some(3.0));
        assert_eq!(s.energy(2), None);
        assert!(s.get(2).is_none());
        assert!(s.state(5).is_none());
        assert_eq!(s.get(0).unwrap().e, 1.0);
        assert!(s.get(0).unwrap().magnitudes().iter().all(|m| *m > 0.0));
        assert_eq!(s.energies().to_vec(), vec![1.0, 3.0]);
        assert_eq!(s.states().dim(), (2, 2));
        assert_eq!(s.get_dx(), 1.0);
    }

    #[test]
    fn index_gives_energy() {
        let s = store();
        assert_eq!(s[0], 1.0);
        assert_eq!(s[1], 3.0);
        assert_eq!((0..s.len()).map(|k| s[k]).collect::<Vec<_>>(), s.energies().to_vec());
    }

    #[test]
    #[should_panic]
    fn index_out_of_range() {
        let s = store();
        let _e = s[2];
    }

    #[test]
    fn frames_wrap_around() {
        let s = store();
        assert_eq!(s.frame(0).e, 1.0);
        assert_eq!(s.frame(1).e, 3.0);
        assert_eq!(s.frame(2).e, 1.0);
        assert_eq!(s.frame(7).e, 3.0);
        assert_eq!(s.iter().map(|st| st.e).collect::<Vec<_>>(), vec![1.0, 3.0]);
    }

    #[test]
    fn rejects_bad_pairs() {
        let x = nd::array![0.0, 0.5, 1.0];
        let short = vec![Eigenpair { e: 0.0, wf: Some(nd::array![1.0, 0.0, 0.0]) }];
        assert!(matches!(
            EigenstateStore::from_pairs(x.clone(), short),
            Err(EigenError::DimensionMismatch(DimensionError::Length(_))),
        ));
        let missing = vec![
            Eigenpair { e: 0.0, wf: Some(nd::array![1.0, 0.0, 0.0]) },
            Eigenpair { e: 1.0, wf: None },
            Eigenpair { e: 2.0, wf: Some(nd::array![0.0, 0.0, 1.0]) },
        ];
        assert!(matches!(
            EigenstateStore::from_pairs(x.clone(), missing),
            Err(EigenError::MissingWavefunction(1)),
        ));
        let ragged = vec![
            Eigenpair { e: 0.0, wf: Some(nd::array![1.0, 0.0, 0.0]) },
            Eigenpair { e: 1.0, wf: Some(nd::array![0.0, 1.0]) },
            Eigenpair { e: 2.0, wf: Some(nd::array![0.0, 0.0, 1.0]) },
        ];
        assert!(matches!(
            EigenstateStore::from_pairs(x, ragged),
            Err(EigenError::DimensionMismatch(_)),
        ));
    }

    #[test]
    fn rejects_unsorted_pairs() {
        let x = nd::array![0.0, 0.5, 1.0];
        let e1 = nd::array![1.0, 0.0, 0.0];
        let e2 = nd::array![0.0, 1.0, 0.0];
        let e3 = nd::array![0.0, 0.0, 1.0];
        let unsorted = vec![
            Eigenpair { e: 0.0, wf: Some(e1.clone()) },
            Eigenpair { e: 2.0, wf: Some(e2.clone()) },
            Eigenpair { e: 1.0, wf: Some(e3.clone()) },
        ];
        assert!(matches!(
            EigenstateStore::from_pairs(x.clone(), unsorted),
            Err(EigenError::Unsorted(2)),
        ));
        let nan = vec![
            Eigenpair { e: f64::NAN, wf: Some(e1.clone()) },
            Eigenpair { e: 1.0, wf: Some(e2.clone()) },
            Eigenpair { e: 2.0, wf: Some(e3.clone()) },
        ];
        assert!(matches!(
            EigenstateStore::from_pairs(x.clone(), nan),
            Err(EigenError::Unsorted(1)),
        ));
        // degenerate levels are in order
        let degenerate = vec![
            Eigenpair { e: 1.0, wf: Some(e1) },
            Eigenpair { e: 1.0, wf: Some(e2) },
            Eigenpair { e: 2.0, wf: Some(e3) },
        ];
        assert!(EigenstateStore::from_pairs(x, degenerate).is_ok());
    }

    #[test]
    fn grid_normalized_wavefunction() {
        let s = store();
        let psi = s.get(1).unwrap().wavefunction(s.get_dx());
        // two-point trapezoid: (dx/2)(ψ₀² + ψ₁²) = 1
        assert!((0.5 * (psi[0].powi(2) + psi[1].powi(2)) - 1.0).abs() < 1e-14);
    }
}
