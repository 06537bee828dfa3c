//! Miscellaneous tools.

use ndarray::{ self as nd, Ix1 };
use num_traits::Float;

/// Integrate using the trapezoidal rule.
///
/// *Panics if `y` has length less than 2*.
pub fn trapz<S, A>(y: &nd::ArrayBase<S, Ix1>, dx: A) -> A
where
    S: nd::Data<Elem = A>,
    A: Float,
{
    let n: usize = y.len();
    let two = A::one() + A::one();
    let inner = y.slice(nd::s![1..n - 1]).iter()
        .fold(A::zero(), |acc, yk| acc + *yk);
    (dx / two) * (y[0] + two * inner + y[n - 1])
}

/// Calculate the norm `∫|q|² dx` of a sampled wavefunction.
///
/// *Panics if `q` has length less than 2*.
pub fn wf_norm<S, A>(q: &nd::ArrayBase<S, Ix1>, dx: A) -> A
where
    S: nd::Data<Elem = A>,
    A: Float,
{
    let q2: nd::Array1<A> = q.mapv(|qk| qk * qk);
    trapz(&q2, dx)
}

/// Calculate the inner product `∫q p dx` of two real wavefunctions.
///
/// *Panics if either array has length less than 2*.
pub fn wf_dot<S, T, A>(
    q: &nd::ArrayBase<S, Ix1>,
    p: &nd::ArrayBase<T, Ix1>,
    dx: A,
) -> A
where
    S: nd::Data<Elem = A>,
    T: nd::Data<Elem = A>,
    A: Float,
{
    let n: usize = q.len().min(p.len());
    let qp: nd::Array1<A>
        = q.iter().zip(p).take(n).map(|(qk, pk)| *qk * *pk).collect();
    trapz(&qp, dx)
}

/// Renormalize a wavefunction in place.
///
/// *Panics if `q` has length less than 2*.
pub fn wf_renormalize<S, A>(q: &mut nd::ArrayBase<S, Ix1>, dx: A)
where
    S: nd::DataMut<Elem = A>,
    A: Float,
{
    let norm = wf_norm(q, dx).sqrt();
    q.map_inplace(|qk| { *qk = *qk / norm; });
}

/// Return a normalized copy of a wavefunction.
///
/// *Panics if `q` has length less than 2*.
pub fn wf_normalized<S, A>(q: &nd::ArrayBase<S, Ix1>, dx: A)
    -> nd::Array1<A>
where
    S: nd::Data<Elem = A>,
    A: Float,
{
    let norm = wf_norm(q, dx).sqrt();
    q.mapv(|qk| qk / norm)
}

/// Flip the sign of a vector in place so that its component of largest
/// magnitude is positive.
///
/// Ties are resolved in favor of the lowest index.
pub fn fix_sign<S, A>(q: &mut nd::ArrayBase<S, Ix1>)
where
    S: nd::DataMut<Elem = A>,
    A: Float,
{
    let pivot
        = q.iter()
        .fold(A::zero(), |best, qk| if qk.abs() > best.abs() { *qk } else { best });
    if pivot < A::zero() {
        q.map_inplace(|qk| { *qk = -*qk; });
    }
}
