//! Physical consistency of the closed-form evaluators, checked with finite differences
//! and discrete contour integrals on sampled grids.

use ndarray::Array2;

use potflow_fields::FlowField;
use potflow_fields::diagnostics::{
    boundary_circulation, boundary_flux, divergence, velocity_from_stream_function, vorticity,
};
use potflow_mesh::CartesianGrid;
use potflow_models::{
    Singularity, get_doublet_info, get_freestream_info, get_ss_info, get_vortex_info,
};

/// 原点の特異点から十分離れた上半平面の格子（atan2 の分岐線 y = 0 を含まない）。
fn upper_grid() -> CartesianGrid {
    CartesianGrid::new(201, -2.0, 2.0, 1.0, 3.0)
}

fn max_abs_diff(a: &Array2<f64>, b: &Array2<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

/// 内部点の速度 `(u, v)` と、ψ から差分で復元した速度の最大誤差。
fn stream_velocity_error(field: &FlowField, grid: &CartesianGrid, sign: f64) -> (f64, f64) {
    let (u_fd, v_fd) = velocity_from_stream_function(&field.psi, grid).unwrap();
    let u_int = field.u.slice(ndarray::s![1..-1, 1..-1]).to_owned() * sign;
    let v_int = field.v.slice(ndarray::s![1..-1, 1..-1]).to_owned() * sign;
    (max_abs_diff(&u_fd, &u_int), max_abs_diff(&v_fd, &v_int))
}

// ===== stream function ↔ velocity =====

#[test]
fn source_stream_function_matches_velocity() {
    let g = upper_grid();
    let f = get_ss_info(1.0, 0.0, 0.0, g.x(), g.y());
    let (eu, ev) = stream_velocity_error(&f, &g, 1.0);
    assert!(eu < 2e-3, "u error {eu}");
    assert!(ev < 2e-3, "v error {ev}");
}

#[test]
fn doublet_stream_function_matches_velocity() {
    let g = upper_grid();
    let f = get_doublet_info(1.0, 0.0, 0.0, g.x(), g.y());
    let (eu, ev) = stream_velocity_error(&f, &g, 1.0);
    assert!(eu < 2e-3, "u error {eu}");
    assert!(ev < 2e-3, "v error {ev}");
}

#[test]
fn angled_freestream_stream_function_matches_velocity() {
    let g = CartesianGrid::new(21, -1.0, 1.0, -1.0, 1.0);
    let f = get_freestream_info(2.0, 0.4, g.x(), g.y(), 21);
    let (eu, ev) = stream_velocity_error(&f, &g, 1.0);
    assert!(eu < 1e-10, "u error {eu}");
    assert!(ev < 1e-10, "v error {ev}");
}

/// 点渦の ψ = −Γ/(4π)·ln(r²) は速度と逆符号の勾配を持つ（等値線は同心円のまま）。
#[test]
fn vortex_stream_function_gradient_opposes_velocity() {
    let g = upper_grid();
    let f = Singularity::vortex(1.0, 0.0, 0.0).field(g.x(), g.y());
    let (eu, ev) = stream_velocity_error(&f, &g, -1.0);
    assert!(eu < 2e-3, "u error {eu}");
    assert!(ev < 2e-3, "v error {ev}");
}

/// `get_vortex_info` の ψ = Γ/(4π)·ln(√(r²)) の勾配は速度の 1/2。
#[test]
fn free_vortex_stream_function_gradient_is_half_velocity() {
    let g = upper_grid();
    let f = get_vortex_info(1.0, 0.0, 0.0, g.x(), g.y());
    let (eu, ev) = stream_velocity_error(&f, &g, 0.5);
    assert!(eu < 2e-3, "u error {eu}");
    assert!(ev < 2e-3, "v error {ev}");
}

// ===== vortex: solenoidal and irrotational =====

#[test]
fn vortex_is_divergence_free_and_irrotational_away_from_core() {
    let g = CartesianGrid::new(201, -2.0, 2.0, -2.0, 2.0);
    let f = get_vortex_info(1.0, 0.0, 0.0, g.x(), g.y());
    let div = divergence(&f.u, &f.v, &g).unwrap();
    let curl = vorticity(&f.u, &f.v, &g).unwrap();
    for ((idx, &d), &c) in div.indexed_iter().zip(curl.iter()) {
        // 内部配列のインデックスは格子の (i + 1, j + 1)
        let p = g.point(idx.0 + 1, idx.1 + 1);
        let r = p.x().hypot(p.y());
        if r < 0.5 {
            continue;
        }
        assert!(d.abs() < 1e-2, "divergence {d} at r = {r}");
        assert!(c.abs() < 1e-2, "vorticity {c} at r = {r}");
    }
}

#[test]
fn vortex_circulation_is_minus_gamma() {
    let g = CartesianGrid::new(201, -2.0, 2.0, -2.0, 2.0);
    let gamma = 1.5;
    let f = get_vortex_info(gamma, 0.0, 0.0, g.x(), g.y());
    let circ = boundary_circulation(&f.u, &f.v, &g, (50, 150), (50, 150)).unwrap();
    let flux = boundary_flux(&f.u, &f.v, &g, (50, 150), (50, 150)).unwrap();
    assert!((circ + gamma).abs() < 1e-3, "circulation {circ}");
    assert!(flux.abs() < 1e-10, "flux {flux}");
}

// ===== source: flux conservation =====

#[test]
fn source_flux_equals_strength() {
    let g = CartesianGrid::new(201, -2.0, 2.0, -2.0, 2.0);
    let strength = 2.0;
    let f = get_ss_info(strength, 0.1, -0.2, g.x(), g.y());
    for (rows, cols) in [((50, 150), (50, 150)), ((20, 180), (60, 190))] {
        let flux = boundary_flux(&f.u, &f.v, &g, rows, cols).unwrap();
        assert!((flux - strength).abs() < 2e-3, "flux {flux} over {rows:?}x{cols:?}");
    }
    let circ = boundary_circulation(&f.u, &f.v, &g, (50, 150), (50, 150)).unwrap();
    assert!(circ.abs() < 1e-3, "circulation {circ}");
}

#[test]
fn source_flux_vanishes_when_not_enclosed() {
    let g = CartesianGrid::new(201, -2.0, 2.0, -2.0, 2.0);
    let f = get_ss_info(1.0, -1.5, -1.5, g.x(), g.y());
    let flux = boundary_flux(&f.u, &f.v, &g, (100, 180), (100, 180)).unwrap();
    assert!(flux.abs() < 1e-3, "flux {flux}");
}

// ===== doublet as the limit of a source-sink pair =====

#[test]
fn doublet_is_limit_of_source_sink_pair() {
    let g = CartesianGrid::new(21, -1.5, 1.5, 0.5, 1.5);
    let kappa = 1.3;
    let doublet = get_doublet_info(kappa, 0.0, 0.0, g.x(), g.y());

    let mut errors = Vec::new();
    for eps in [1e-1, 1e-2, 1e-3] {
        let strength = kappa / eps;
        let pair = Singularity::source(strength, -eps / 2.0, 0.0).field(g.x(), g.y())
            + Singularity::source(-strength, eps / 2.0, 0.0).field(g.x(), g.y());
        let err = max_abs_diff(&pair.u, &doublet.u)
            .max(max_abs_diff(&pair.v, &doublet.v))
            .max(max_abs_diff(&pair.psi, &doublet.psi));
        errors.push(err);
    }
    assert!(errors[1] < errors[0], "errors {errors:?}");
    assert!(errors[2] < errors[1], "errors {errors:?}");
    assert!(errors[2] < 1e-5, "errors {errors:?}");
}

// ===== singular cells =====

#[test]
fn cartesian_evaluators_are_non_finite_only_at_their_own_location() {
    let g = CartesianGrid::new(5, -1.0, 1.0, -1.0, 1.0);
    let (x, y) = (g.x(), g.y());
    let (xs, ys) = (0.5, -0.5);
    // (i, j) = (1, 3) ↔ (x, y) = (0.5, −0.5)
    let at = (1, 3);

    let src = get_ss_info(1.0, xs, ys, x, y);
    assert!(src.u[at].is_nan() && src.v[at].is_nan());
    // atan2(0, 0) = 0 なので湧き出しの ψ だけは有限
    assert_eq!(src.psi[at], 0.0);

    let vtx = get_vortex_info(1.0, xs, ys, x, y);
    assert!(vtx.u[at].is_nan() && vtx.v[at].is_nan());
    assert!(vtx.psi[at].is_infinite());

    let dbl = get_doublet_info(1.0, xs, ys, x, y);
    assert!(dbl.u[at].is_nan() && dbl.v[at].is_nan() && dbl.psi[at].is_nan());

    for field in [&src, &vtx, &dbl] {
        assert_eq!(field.non_finite_cells(), vec![at]);
    }
}
