#![allow(non_snake_case)]

//! Provides the stationary states of the one-dimensional quantum harmonic
//! oscillator on the unit interval, computed by discretizing the Hamiltonian
//! with a three-point finite-difference stencil and diagonalizing the
//! resulting symmetric tridiagonal matrix.
//!
//! The computation is a strictly forward pipeline:
//! - [`grid`]: uniform sample coordinates over [0, 1]
//! - [`potential`]: harmonic potential, with an optional hard wall
//! - [`operator`]: finite-difference Laplacian and Hamiltonian assembly, in
//!   [band storage][banded::SymTridiag]
//! - [`solve`]: symmetric eigensolvers (implicit QL; LAPACK with the `lapack`
//!   feature)
//! - [`store`]: the sorted, read-only [`EigenstateStore`][store::EigenstateStore]
//!
//! [`pipeline`] composes the stages, either synchronously or on a background
//! thread with cooperative cancellation.
//!
//! ```
//! use qho::{ params::Params, pipeline };
//!
//! let params = Params { k: 1e4, length: 101, mass: 1.0, edge_v_inf: true };
//! let store = pipeline::compute(&params).unwrap();
//! assert_eq!(store.len(), 101);
//! assert!(store.energy(0).unwrap() < store.energy(1).unwrap());
//! ```
//!
//! See [`docs`] for theoretical background.

pub mod banded;
pub mod error;
pub mod grid;
pub mod operator;
pub mod params;
pub mod pipeline;
pub mod potential;
pub mod solve;
pub mod store;
pub mod utils;

pub mod docs;

/// Default per-eigenvalue sweep budget for the implicit QL solver.
pub const DEF_MAXITERS: usize = 60;

/// Relative tolerance used when checking dense input matrices for symmetry.
pub const SYMMETRY_TOLERANCE: f64 = 1e-10;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
pub type Arr2<S> = ndarray::ArrayBase<S, ndarray::Ix2>;
