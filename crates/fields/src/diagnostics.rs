//! 中心差分による流れ場の診断量。
//!
//! 解析解の検証に用いる。微分量は格子内部 `[1..rows-1, 1..cols-1]` のみで評価し、
//! 戻り値の形状は `(rows - 2, cols - 2)` になる。

use ndarray::{Array2, s};

use potflow_mesh::CartesianGrid;

use crate::error::FieldError;

fn check_interior(shape: (usize, usize)) -> Result<(), FieldError> {
    if shape.0 < 3 || shape.1 < 3 {
        return Err(FieldError::GridTooSmall { shape });
    }
    Ok(())
}

fn check_same(expected: (usize, usize), got: (usize, usize)) -> Result<(), FieldError> {
    if expected != got {
        return Err(FieldError::ShapeMismatch { expected, got });
    }
    Ok(())
}

/// `∂f/∂x` の中心差分（内部点のみ）。
fn ddx(f: &Array2<f64>, dx: f64) -> Array2<f64> {
    let mut out = f.slice(s![1..-1, 2..]).to_owned();
    out -= &f.slice(s![1..-1, ..-2]);
    out /= 2.0 * dx;
    out
}

/// `∂f/∂y` の中心差分（内部点のみ）。
fn ddy(f: &Array2<f64>, dy: f64) -> Array2<f64> {
    let mut out = f.slice(s![2.., 1..-1]).to_owned();
    out -= &f.slice(s![..-2, 1..-1]);
    out /= 2.0 * dy;
    out
}

/// スカラー場の勾配 `(∂f/∂x, ∂f/∂y)`。
pub fn gradient(
    f: &Array2<f64>,
    grid: &CartesianGrid,
) -> Result<(Array2<f64>, Array2<f64>), FieldError> {
    check_same(grid.shape(), f.dim())?;
    check_interior(f.dim())?;
    let (dx, dy) = grid.spacing();
    Ok((ddx(f, dx), ddy(f, dy)))
}

/// 流れ関数から速度を復元する: `u = ∂ψ/∂y`, `v = −∂ψ/∂x`。
pub fn velocity_from_stream_function(
    psi: &Array2<f64>,
    grid: &CartesianGrid,
) -> Result<(Array2<f64>, Array2<f64>), FieldError> {
    let (dpsi_dx, dpsi_dy) = gradient(psi, grid)?;
    Ok((dpsi_dy, -dpsi_dx))
}

/// 発散 `∂u/∂x + ∂v/∂y`。
pub fn divergence(
    u: &Array2<f64>,
    v: &Array2<f64>,
    grid: &CartesianGrid,
) -> Result<Array2<f64>, FieldError> {
    check_same(grid.shape(), u.dim())?;
    check_same(grid.shape(), v.dim())?;
    check_interior(u.dim())?;
    let (dx, dy) = grid.spacing();
    Ok(ddx(u, dx) + ddy(v, dy))
}

/// 渦度（z 成分）`∂v/∂x − ∂u/∂y`。
pub fn vorticity(
    u: &Array2<f64>,
    v: &Array2<f64>,
    grid: &CartesianGrid,
) -> Result<Array2<f64>, FieldError> {
    check_same(grid.shape(), u.dim())?;
    check_same(grid.shape(), v.dim())?;
    check_interior(u.dim())?;
    let (dx, dy) = grid.spacing();
    Ok(ddx(v, dx) - ddy(u, dy))
}

fn check_contour(
    shape: (usize, usize),
    rows: (usize, usize),
    cols: (usize, usize),
) -> Result<(), FieldError> {
    let ok = rows.0 < rows.1 && cols.0 < cols.1 && rows.1 < shape.0 && cols.1 < shape.1;
    if !ok {
        return Err(FieldError::ContourOutOfRange { rows, cols, shape });
    }
    Ok(())
}

/// 1 次元の台形則 `h · (Σ f − (f₀ + fₙ)/2)`。
fn trapezoid<'a, I>(values: I, h: f64) -> f64
where
    I: IntoIterator<Item = &'a f64>,
{
    let values: Vec<f64> = values.into_iter().copied().collect();
    match values.as_slice() {
        [] | [_] => 0.0,
        [first, .., last] => h * (values.iter().sum::<f64>() - 0.5 * (first + last)),
    }
}

/// 格子インデックスで囲まれた長方形境界を通る外向き流束 `∮ V·n ds`（台形則）。
///
/// `rows = (i0, i1)`, `cols = (j0, j1)` は境界を含む閉区間。
pub fn boundary_flux(
    u: &Array2<f64>,
    v: &Array2<f64>,
    grid: &CartesianGrid,
    rows: (usize, usize),
    cols: (usize, usize),
) -> Result<f64, FieldError> {
    check_same(grid.shape(), u.dim())?;
    check_same(grid.shape(), v.dim())?;
    check_contour(u.dim(), rows, cols)?;
    let (dx, dy) = grid.spacing();
    let (i0, i1) = rows;
    let (j0, j1) = cols;

    let bottom = -trapezoid(v.slice(s![i0, j0..=j1]), dx);
    let top = trapezoid(v.slice(s![i1, j0..=j1]), dx);
    let left = -trapezoid(u.slice(s![i0..=i1, j0]), dy);
    let right = trapezoid(u.slice(s![i0..=i1, j1]), dy);
    Ok(bottom + top + left + right)
}

/// 同じ長方形境界に沿った反時計回りの循環 `∮ V·t ds`（台形則）。
pub fn boundary_circulation(
    u: &Array2<f64>,
    v: &Array2<f64>,
    grid: &CartesianGrid,
    rows: (usize, usize),
    cols: (usize, usize),
) -> Result<f64, FieldError> {
    check_same(grid.shape(), u.dim())?;
    check_same(grid.shape(), v.dim())?;
    check_contour(u.dim(), rows, cols)?;
    let (dx, dy) = grid.spacing();
    let (i0, i1) = rows;
    let (j0, j1) = cols;

    let bottom = trapezoid(u.slice(s![i0, j0..=j1]), dx);
    let right = trapezoid(v.slice(s![i0..=i1, j1]), dy);
    let top = -trapezoid(u.slice(s![i1, j0..=j1]), dx);
    let left = -trapezoid(v.slice(s![i0..=i1, j0]), dy);
    Ok(bottom + right + top + left)
}
