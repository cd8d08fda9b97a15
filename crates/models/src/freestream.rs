use ndarray::{Array2, Zip};

use potflow_fields::{FlowField, PolarFlowField};

/// 速さ `u_inf`、迎角 `alpha`（ラジアン）の一様流。
///
/// - `u = U cos α`
/// - `v = U sin α`
/// - `ψ = U (Y cos α − X sin α)`
///
/// `u`, `v` の形状は `(n, n)`、`ψ` の形状は `x`, `y` と同じ。`create_grid(n, ..)` の格子と
/// 組み合わせて使う前提で、両者が食い違っても検査しない。
///
/// # Panics
///
/// `x` と `y` の形状が異なる場合。
pub fn get_freestream_info(
    u_inf: f64,
    alpha: f64,
    x: &Array2<f64>,
    y: &Array2<f64>,
    n: usize,
) -> FlowField {
    let u = Array2::from_elem((n, n), u_inf * alpha.cos());
    let v = Array2::from_elem((n, n), u_inf * alpha.sin());
    let psi = Zip::from(x)
        .and(y)
        .map_collect(|&x, &y| u_inf * (y * alpha.cos() - x * alpha.sin()));
    FlowField { u, v, psi }
}

/// 極座標表現の一様流（+x 向き）。
///
/// - `vr = U cos θ`
/// - `vθ = −U sin θ`
/// - `ψ = U R sin θ`
///
/// # Panics
///
/// `r` と `theta` の形状が異なる場合。
pub fn get_freestream_cylindrical_info(
    u_inf: f64,
    r: &Array2<f64>,
    theta: &Array2<f64>,
) -> PolarFlowField {
    let vr = theta.mapv(|t| u_inf * t.cos());
    let vtheta = theta.mapv(|t| -u_inf * t.sin());
    let psi = Zip::from(r)
        .and(theta)
        .map_collect(|&r, &t| u_inf * r * t.sin());
    PolarFlowField { vr, vtheta, psi }
}
