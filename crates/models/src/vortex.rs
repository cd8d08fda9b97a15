use std::f64::consts::PI;

use ndarray::{Array2, Zip};

use potflow_fields::{FlowField, VelocityField};

use crate::error::ModelError;

/// 点渦の点ごとの速度 `(u, v)`。正の循環で時計回りに回る。
///
/// `u = +Γ/(2π)·dy/r²`, `v = −Γ/(2π)·dx/r²`。
#[inline]
pub(crate) fn velocity(strength: f64, dx: f64, dy: f64) -> (f64, f64) {
    let r2 = dx * dx + dy * dy;
    (
        strength / (2.0 * PI) * dy / r2,
        -strength / (2.0 * PI) * dx / r2,
    )
}

/// 点渦の流れ関数 `ψ = −Γ/(4π)·ln(r²)`。[`Singularity`](crate::Singularity) が使う形。
///
/// 等値線は渦中心の同心円。特異点上では `ln(0) = −inf` により `+inf`（Γ > 0）。
#[inline]
pub(crate) fn stream_function(strength: f64, dx: f64, dy: f64) -> f64 {
    -strength / (4.0 * PI) * (dx * dx + dy * dy).ln()
}

/// [`get_vortex_info`] の流れ関数 `ψ = +Γ/(4π)·ln(√(r²))`。
///
/// [`stream_function`] とは符号と係数が異なり、値は常に `−1/2` 倍の関係にある。
/// 特異点上では `−inf`（Γ > 0）。
#[inline]
fn stream_function_sqrt_log(strength: f64, dx: f64, dy: f64) -> f64 {
    strength / (4.0 * PI) * (dx * dx + dy * dy).sqrt().ln()
}

/// 点 `(xv, yv)` にある循環 `strength` の点渦が格子上に誘起する速度と流れ関数。
///
/// 流れ関数は `ψ = Γ/(4π)·ln(√(r²))`。[`Singularity::stream_function`](crate::Singularity::stream_function)
/// の `−Γ/(4π)·ln(r²)` とは別の形で、呼び出し側はどちらにも依存しうるため両方を残す。
/// 速度は両者で同一。
///
/// # Panics
///
/// `x` と `y` の形状が異なる場合。
pub fn get_vortex_info(
    strength: f64,
    xv: f64,
    yv: f64,
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
            let (dx, dy) = (x - xv, y - yv);
            (*u, *v) = velocity(strength, dx, dy);
            *psi = stream_function_sqrt_log(strength, dx, dy);
        });
    FlowField { u, v, psi }
}

/// x 軸上に等間隔 `a` で並ぶ無限渦列が誘起する速度。
///
/// `a = x_vortices[1] − x_vortices[0]`, `c = 2π/a` として
///
/// - `u = +(Γ/2a)·sinh(cY)/(cosh(cY) − cos(cX))`
/// - `v = −(Γ/2a)·sin(cX)/(cosh(cY) − cos(cX))`
///
/// 渦列は `y = 0` 上にあり、`x_vortices` は間隔の決定にのみ使う。
/// 各渦の位置（`x = k·a`, `y = 0`）では分母が零になる。
///
/// # Errors
///
/// `x_vortices` の要素数が 2 未満なら [`ModelError::VortexRowTooShort`]。
pub fn get_velocity_infinite_vortices(
    gamma: f64,
    x: &Array2<f64>,
    y: &Array2<f64>,
    x_vortices: &[f64],
) -> Result<VelocityField, ModelError> {
    let [x0, x1, ..] = x_vortices else {
        return Err(ModelError::VortexRowTooShort {
            len: x_vortices.len(),
        });
    };
    let a = x1 - x0;
    let c = 2.0 * PI / a;

    let mut u = Array2::zeros(x.dim());
    let mut v = Array2::zeros(x.dim());
    Zip::from(&mut u)
        .and(&mut v)
        .and(x)
        .and(y)
        .for_each(|u, v, &x, &y| {
            let denom = (c * y).cosh() - (c * x).cos();
            *u = (gamma / (2.0 * a)) * ((c * y).sinh() / denom);
            *v = -(gamma / (2.0 * a)) * ((c * x).sin() / denom);
        });
    Ok(VelocityField { u, v })
}
