//! Theoretical background.
//!
//! # Contents
//! - [Background](#background)
//! - [Discretization](#discretization)
//! - [Boundaries](#boundaries)
//! - [Diagonalization](#diagonalization)
//! - [Ordering and signs](#ordering-and-signs)
//!
//! # Background
//! Stationary states of a particle of mass *m* in a potential *V*(*x*) are
//! eigenpairs of the Hamiltonian operator
//! ```text
//!        1   ∂²
//! H = - --- --- + V(x)
//!       2 m ∂x²
//! ```
//! (in units where ħ = 1). For the harmonic oscillator,
//! ```text
//!        k
//! V(x) = - (x - x₀)²
//!        2
//! ```
//! and the exact spectrum on the infinite line is *E*<sub>*n*</sub> =
//! (*n* + 1/2) *ω* with *ω* = √(*k*/*m*). This crate always works on the unit
//! interval with the well centered at *x*₀ = 1/2, so the continuum result is
//! only recovered when the ground-state width 1/√(*m ω*) is small compared to
//! the interval.
//!
//! # Discretization
//! Sampling on a uniform grid
//! ```text
//! x[i] = i δx, i ∊ {0, ..., N - 1}, δx = 1 / (N - 1)
//! ```
//! and replacing the second derivative with the three-point central
//! difference
//! ```text
//! ∂²f       f[i + 1] - 2 f[i] + f[i - 1]
//! ---[i] ≈ ----------------------------
//! ∂x²                  δx²
//! ```
//! turns *H* into the *N*×*N* matrix
//! ```text
//!        1
//! H = - --- L + diag(V)
//!       2 m
//!
//! L = (I{-1} - 2 I{0} + I{+1}) / δx²
//! ```
//! where *I*{*k*} is the *N*×*N* matrix with elements equal to 1 on the *k*-th
//! diagonal and 0 elsewhere. *H* is real, symmetric, and tridiagonal, so only
//! 2*N* - 1 numbers are needed to describe it; see
//! [`SymTridiag`][crate::banded::SymTridiag]. The truncation error of the
//! stencil is *O*(*δx*²), so low-lying levels converge quadratically in the
//! grid spacing.
//!
//! # Boundaries
//! In the first and last rows of *L* the missing neighbor is simply dropped,
//! which is equivalent to pinning the wavefunction to zero one grid step
//! outside the interval. To put the wall exactly on the interval edges, the
//! potential at *x*[0] and *x*[*N* - 1] can instead be set to a huge value
//! ([`WALL`][crate::potential::WALL]). The couplings of the edge points to
//! their neighbors are then negligible next to their diagonal entries, the
//! two edge points decouple into a pair of states near `WALL`, and the
//! remaining spectrum is that of the interior with Dirichlet conditions at
//! the edges.
//!
//! # Diagonalization
//! Eigenpairs are found with the implicit-shift QL algorithm for symmetric
//! tridiagonal matrices. Each sweep applies a sequence of plane rotations
//! that preserves the tridiagonal form while driving one off-diagonal
//! element towards zero; with Wilkinson-type shifts convergence is cubic and
//! typically needs only one or two sweeps per eigenvalue. An off-diagonal
//! element *e*[*i*] is treated as zero once
//! ```text
//! |e[i]| ≤ ε (|d[i]| + |d[i + 1]|)
//! ```
//! where ε is the machine epsilon. Because this test is local, the `WALL`
//! entries split off immediately without affecting the rest of the matrix.
//! Eigenvalues alone cost *O*(*N*²); accumulating eigenvectors costs
//! *O*(*N*³).
//!
//! # Ordering and signs
//! Eigenvectors of a real symmetric matrix are only defined up to sign. All
//! solvers return eigenpairs sorted by ascending energy with every
//! eigenvector flipped so that its largest-magnitude component is positive,
//! which makes repeated runs reproducible and lets rendering code index
//! states by position.
