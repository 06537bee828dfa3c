#![allow(non_snake_case)]

use ndarray as nd;
use proptest::prelude::*;
use qho::{
    error::{ ConfigError, EigenError },
    grid::Grid,
    operator::{ hamiltonian, laplacian },
    params::Params,
    pipeline::{ self, System },
    potential::{ harmonic_level, harmonic_potential },
    solve::Method,
};

// count sign changes, ignoring components too small to carry a sign reliably
fn nodes(wf: nd::ArrayView1<f64>) -> usize {
    let peak = wf.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    let signif: Vec<f64>
        = wf.iter().copied().filter(|v| v.abs() > 1e-6 * peak).collect();
    signif.windows(2).filter(|w| w[0] * w[1] < 0.0).count()
}

#[test]
fn stencil_length_five() {
    let grid = Grid::unit(5).unwrap();
    let lap = laplacian(&grid).to_dense();
    let expected = nd::array![
        [-32.0,  16.0,   0.0,   0.0,   0.0],
        [ 16.0, -32.0,  16.0,   0.0,   0.0],
        [  0.0,  16.0, -32.0,  16.0,   0.0],
        [  0.0,   0.0,  16.0, -32.0,  16.0],
        [  0.0,   0.0,   0.0,  16.0, -32.0],
    ];
    assert_eq!(lap, expected);
}

#[test]
fn boundary_effect() {
    let grid = Grid::unit(3).unwrap();
    let open = harmonic_potential(&grid, 100.0, false).unwrap();
    assert_eq!(open.to_vec(), vec![12.5, 0.0, 12.5]);

    let sys = System::new(&Params { k: 100.0, length: 3, mass: 1.0, edge_v_inf: true })
        .unwrap();
    let walled = sys.get_V();
    assert!(walled[0] > 1e20 && walled[2] > 1e20);
    assert_eq!(walled[1], 0.0);
}

#[test]
fn harmonic_spacing_fine_grid() {
    let params = Params { k: 1e5, length: 1001, mass: 1.0, edge_v_inf: true };
    let energies = pipeline::compute_spectrum(&params).unwrap();
    assert_eq!(energies.len(), 1001);
    assert!(energies.iter().all(|e| e.is_finite()));
    assert!(energies.windows(2).into_iter().all(|w| w[0] <= w[1]));

    let omega = params.omega();
    assert!((energies[0] - harmonic_level(0, params.k, params.mass)).abs() < 0.01 * omega);
    for n in 0..6 {
        let gap = energies[n + 1] - energies[n];
        assert!(
            (gap - omega).abs() < 0.01 * omega,
            "gap {n} → {} is {gap}, expected ≈ {omega}", n + 1,
        );
    }
    // the two wall states sit at the top
    assert!(energies[999] > 1e29 && energies[1000] > 1e29);
}

#[test]
fn orthonormal_states() {
    let params = Params { k: 1e4, length: 201, mass: 1.0, edge_v_inf: true };
    let store = pipeline::compute(&params).unwrap();
    let states = store.states();
    let gram = states.dot(&states.t());
    for ((i, j), gij) in gram.indexed_iter() {
        let expected = if i == j { 1.0 } else { 0.0 };
        assert!((gij - expected).abs() < 1e-6, "⟨{i}|{j}⟩ = {gij}");
    }
}

#[test]
fn node_counts_follow_level() {
    let params = Params { k: 1e4, length: 201, mass: 1.0, edge_v_inf: true };
    let store = pipeline::compute(&params).unwrap();
    for n in 0..5 {
        assert_eq!(nodes(store.state(n).unwrap()), n, "state {n}");
    }
    // ground state peaks at the well center with positive sign
    let ground = store.state(0).unwrap();
    let (imax, vmax)
        = ground.iter().enumerate()
        .fold((0, 0.0_f64), |best, (i, v)| if v.abs() > best.1.abs() { (i, *v) } else { best });
    assert!(vmax > 0.0);
    assert!((imax as i64 - 100).abs() <= 1);
}

#[test]
fn repeated_runs_agree() {
    let params = Params { k: 2e4, length: 151, mass: 0.5, edge_v_inf: true };
    let a = pipeline::compute(&params).unwrap();
    let b = pipeline::compute(&params).unwrap();
    a.energies().iter().zip(b.energies())
        .for_each(|(x, y)| assert!((x - y).abs() <= 1e-12 * x.abs().max(1.0)));
    a.states().iter().zip(b.states())
        .for_each(|(x, y)| assert!((x - y).abs() < 1e-12));
}

#[test]
fn frames_index_modulo_length() {
    let params = Params { k: 1e3, length: 21, mass: 1.0, edge_v_inf: false };
    let store = pipeline::compute(&params).unwrap();
    for frame_no in [0, 5, 20, 21, 45] {
        let k = frame_no % 21;
        assert_eq!(store.frame(frame_no).e, store.energy(k).unwrap());
        assert_eq!(store.frame(frame_no).wf, store.state(k).unwrap());
    }
    assert_eq!(store.get_x().len(), 21);
}

#[test]
fn invalid_configuration_is_eager() {
    let cases = [
        (Params { length: 1, ..Params::default() }, "length"),
        (Params { mass: 0.0, ..Params::default() }, "mass"),
        (Params { k: -5.0, ..Params::default() }, "k"),
    ];
    for (params, what) in cases {
        assert!(
            matches!(pipeline::compute(&params), Err(EigenError::InvalidConfiguration(_))),
            "bad {what} accepted",
        );
    }
    assert!(matches!(
        pipeline::compute_spectrum(&Params { length: 0, ..Params::default() }),
        Err(EigenError::InvalidConfiguration(ConfigError::BadLength(0))),
    ));
}

#[test]
fn cancel_running_worker() {
    // large enough that the worker is still busy when cancelled
    let params = Params { k: 1e5, length: 1501, mass: 1.0, edge_v_inf: true };
    let mut pending = pipeline::spawn(params, Method::default()).unwrap();
    pending.cancel();
    let res = loop {
        if let Some(res) = pending.try_result() { break res; }
        std::thread::sleep(std::time::Duration::from_millis(5));
    };
    assert!(matches!(res, Err(EigenError::Cancelled)));
}

proptest! {
    #[test]
    fn hamiltonian_is_symmetric(
        k in 0.0f64..1e6,
        length in 2usize..120,
        mass in 0.01f64..100.0,
        wall in any::<bool>(),
    ) {
        let grid = Grid::unit(length).unwrap();
        let v = harmonic_potential(&grid, k, wall).unwrap();
        let H = hamiltonian(&laplacian(&grid), &v, mass).unwrap().to_dense();
        prop_assert_eq!(&H, &H.t());
    }

    #[test]
    fn spectrum_real_sorted_complete(
        k in 0.0f64..1e5,
        length in 2usize..60,
        mass in 0.1f64..10.0,
        wall in any::<bool>(),
    ) {
        let params = Params { k, length, mass, edge_v_inf: wall };
        let store = pipeline::compute(&params).unwrap();
        prop_assert_eq!(store.len(), length);
        prop_assert!(store.energies().iter().all(|e| e.is_finite()));
        prop_assert!(store.energies().windows(2).into_iter().all(|w| w[0] <= w[1]));
    }

    #[test]
    fn residuals_small_without_wall(
        k in 0.0f64..1e4,
        length in 3usize..60,
        mass in 0.1f64..10.0,
    ) {
        let params = Params { k, length, mass, edge_v_inf: false };
        let sys = System::new(&params).unwrap();
        let store = sys.solve(&Method::default(), None).unwrap();
        let H = sys.get_H();
        let scale
            = H.diag().iter().chain(H.off().iter())
            .fold(1.0_f64, |acc, v| acc.max(v.abs()));
        for state in store.iter() {
            let hv = H.dot(&state.wf).unwrap();
            let res
                = hv.iter().zip(state.wf.iter())
                .map(|(a, b)| (a - state.e * b).abs())
                .fold(0.0_f64, f64::max);
            prop_assert!(res < 1e-10 * scale, "residual {} at e = {}", res, state.e);
        }
    }
}
