use std::f64::consts::PI;

use ndarray::{Array2, Zip};

use potflow_fields::{FlowField, PolarFlowField};

/// 点 `(xd, yd)` にあるモーメント `strength` の二重湧き出しが誘起する速度と流れ関数。
///
/// - `u = −κ/(2π)·(dx² − dy²)/r⁴`
/// - `v = −κ/(2π)·2·dx·dy/r⁴`
/// - `ψ = −κ/(2π)·dy/r²`
///
/// 軸は +x 向き（吸い込み側が +x、湧き出し側が −x の対の極限）。
///
/// # Panics
///
/// `x` と `y` の形状が異なる場合。
pub fn get_doublet_info(
    strength: f64,
    xd: f64,
    yd: f64,
    x: &Array2<f64>,
    y: &Array2<f64>,
) -> FlowField {
    let mut u = Array2::zeros(x.dim());
    let mut v = Array2::zeros(x.dim());
    let mut psi = Array2::zeros(x.dim());
    Zip::from(&mut u)
        .and(&mut v)
        .and(&mut psi)
        .and(x)
        .and(y)
        .for_each(|u, v, psi, &x, &y| {
            let (dx, dy) = (x - xd, y - yd);
            let r2 = dx * dx + dy * dy;
            *u = -strength / (2.0 * PI) * (dx * dx - dy * dy) / (r2 * r2);
            *v = -strength / (2.0 * PI) * 2.0 * dx * dy / (r2 * r2);
            *psi = -strength / (2.0 * PI) * dy / r2;
        });
    FlowField { u, v, psi }
}

/// 原点にある二重湧き出しの極座標表現。
///
/// - `vr = −κ cos θ/(2π R²)`
/// - `vθ = −κ sin θ/(2π R²)`
/// - `ψ = −κ sin θ/(2π R)`
///
/// `R = 0` の格子点では `inf` / `NaN` になる。
///
/// # Panics
///
/// `r` と `theta` の形状が異なる場合。
pub fn get_doublet_cylindrical_info(
    strength: f64,
    r: &Array2<f64>,
    theta: &Array2<f64>,
) -> PolarFlowField {
    let mut vr = Array2::zeros(r.dim());
    let mut vtheta = Array2::zeros(r.dim());
    let mut psi = Array2::zeros(r.dim());
    Zip::from(&mut vr)
        .and(&mut vtheta)
        .and(&mut psi)
        .and(r)
        .and(theta)
        .for_each(|vr, vtheta, psi, &r, &t| {
            *vr = -(strength * t.cos() / (2.0 * PI * (r * r)));
            *vtheta = -(strength * t.sin() / (2.0 * PI * (r * r)));
            *psi = -strength * t.sin() / (2.0 * PI * r);
        });
    PolarFlowField { vr, vtheta, psi }
}
