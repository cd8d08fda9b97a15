use std::f64::consts::PI;

use ndarray::{Array2, Zip};

use potflow_fields::FlowField;

/// 湧き出し（吸い込み）の点ごとの速度 `(u, v)`。`dx = X − x0`, `dy = Y − y0`。
///
/// `u = Λ/(2π)·dx/r²`, `v = Λ/(2π)·dy/r²`。
#[inline]
pub(crate) fn velocity(strength: f64, dx: f64, dy: f64) -> (f64, f64) {
    let r2 = dx * dx + dy * dy;
    (
        strength / (2.0 * PI) * dx / r2,
        strength / (2.0 * PI) * dy / r2,
    )
}

/// 湧き出しの流れ関数 `ψ = Λ/(2π)·atan2(dy, dx)`。
///
/// 特異点上では `atan2(0, 0) = 0` となり有限値を返す。
#[inline]
pub(crate) fn stream_function(strength: f64, dx: f64, dy: f64) -> f64 {
    strength / (2.0 * PI) * dy.atan2(dx)
}

/// 点 `(xs, ys)` にある強さ `strength` の湧き出し（負なら吸い込み）が
/// 格子 `(X, Y)` 上に誘起する速度と流れ関数を返す。
///
/// # Panics
///
/// `x` と `y` の形状が異なる場合。
pub fn get_ss_info(strength: f64, xs: f64, ys: f64, x: &Array2<f64>, y: &Array2<f64>) -> FlowField {
    let mut u = Array2::zeros(x.dim());
    let mut v = Array2::zeros(x.dim());
    let mut psi = Array2::zeros(x.dim());
    Zip::from(&mut u)
        .and(&mut v)
        .and(&mut psi)
        .and(x)
        .and(y)
        .for_each(|u, v, psi, &x, &y| {
            let (dx, dy) = (x - xs, y - ys);
            (*u, *v) = velocity(strength, dx, dy);
            *psi = stream_function(strength, dx, dy);
        });
    FlowField { u, v, psi }
}

#[cfg(test)]
mod tests {
    use super::*;
    use potflow_mesh::create_grid;

    #[test]
    fn radial_velocity_on_unit_circle() {
        // r = 1 の点では |V| = Λ/(2π)、向きは放射方向
        let (x, y) = create_grid(3, -1.0, 1.0, -1.0, 1.0);
        let f = get_ss_info(2.0 * PI, 0.0, 0.0, &x, &y);
        // (i, j) = (1, 2) → (x, y) = (1, 0)
        assert!((f.u[[1, 2]] - 1.0).abs() < 1e-14);
        assert!(f.v[[1, 2]].abs() < 1e-14);
        // (2, 1) → (0, 1)
        assert!(f.u[[2, 1]].abs() < 1e-14);
        assert!((f.v[[2, 1]] - 1.0).abs() < 1e-14);
    }

    #[test]
    fn sink_reverses_direction() {
        let (x, y) = create_grid(3, -1.0, 1.0, -1.0, 1.0);
        let src = get_ss_info(1.0, 0.0, 0.0, &x, &y);
        let sink = get_ss_info(-1.0, 0.0, 0.0, &x, &y);
        for (idx, &u) in src.u.indexed_iter() {
            if idx == (1, 1) {
                continue;
            }
            assert_eq!(u, -sink.u[idx]);
            assert_eq!(src.v[idx], -sink.v[idx]);
        }
    }

    #[test]
    fn stream_function_is_scaled_polar_angle() {
        let (x, y) = create_grid(3, -1.0, 1.0, -1.0, 1.0);
        let f = get_ss_info(2.0 * PI, 0.0, 0.0, &x, &y);
        // (0, 1) → (x, y) = (0, −1): atan2(−1, 0) = −π/2
        assert!((f.psi[[0, 1]] + PI / 2.0).abs() < 1e-14);
        // (1, 0) → (−1, 0): atan2(0, −1) = π
        assert!((f.psi[[1, 0]] - PI).abs() < 1e-14);
    }

    #[test]
    fn translated_source_matches_origin_source() {
        let (x, y) = create_grid(5, -2.0, 2.0, -2.0, 2.0);
        let shifted_x = &x + 1.5;
        let shifted_y = &y - 0.5;
        let a = get_ss_info(3.0, 0.0, 0.0, &x, &y);
        let b = get_ss_info(3.0, 1.5, -0.5, &shifted_x, &shifted_y);
        for (idx, &u) in a.u.indexed_iter() {
            if idx == (2, 2) {
                continue;
            }
            assert!((u - b.u[idx]).abs() < 1e-12);
            assert!((a.v[idx] - b.v[idx]).abs() < 1e-12);
        }
    }

    #[test]
    fn singular_cell_is_nan_velocity_and_zero_psi() {
        let (x, y) = create_grid(5, -1.0, 1.0, -1.0, 1.0);
        let f = get_ss_info(1.0, 0.0, 0.0, &x, &y);
        assert!(f.u[[2, 2]].is_nan());
        assert!(f.v[[2, 2]].is_nan());
        assert_eq!(f.psi[[2, 2]], 0.0);
        assert_eq!(f.non_finite_cells(), vec![(2, 2)]);
    }
}
