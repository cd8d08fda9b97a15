use ndarray::{Array1, Array2};

use potflow_types::Vector2;

use crate::error::MeshError;

/// `[start, end]` を `n` 点で等分割した 1 次元配列を返す（端点を含む）。
///
/// - `n == 0` のとき空配列。
/// - `n == 1` のとき `[start]`。
/// - `n > 1` のとき `start + k·(end − start)/(n − 1)`、最終要素は厳密に `end`。
///
/// `start > end` の場合は降順の配列になる（エラーではない）。
pub fn linspace(start: f64, end: f64, n: usize) -> Array1<f64> {
    match n {
        0 => Array1::zeros(0),
        1 => Array1::from_elem(1, start),
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut out = Array1::from_shape_fn(n, |k| start + k as f64 * step);
            out[n - 1] = end;
            out
        }
    }
}

/// 2 本の 1 次元座標列から meshgrid を構築する。
///
/// 戻り値 `(A, B)` の形状は `(rows.len(), cols.len())`。
/// `A[[i, j]] = cols[j]`、`B[[i, j]] = rows[i]`。
fn meshgrid(cols: &Array1<f64>, rows: &Array1<f64>) -> (Array2<f64>, Array2<f64>) {
    let shape = (rows.len(), cols.len());
    let a = Array2::from_shape_fn(shape, |(_, j)| cols[j]);
    let b = Array2::from_shape_fn(shape, |(i, _)| rows[i]);
    (a, b)
}

/// デカルト座標の標本格子 `(X, Y)`。
///
/// `X` は列方向に、`Y` は行方向に変化する。2 配列は常に同じ形状を持つ。
#[derive(Debug, Clone, PartialEq)]
pub struct CartesianGrid {
    x: Array2<f64>,
    y: Array2<f64>,
}

impl CartesianGrid {
    /// 各軸 `n` 点の等間隔格子を生成する。[`create_grid`] と同じ配列を保持する。
    pub fn new(n: usize, x_start: f64, x_end: f64, y_start: f64, y_end: f64) -> Self {
        let (x, y) = create_grid(n, x_start, x_end, y_start, y_end);
        Self { x, y }
    }

    /// 任意の座標配列から格子を組み立てる。形状が一致しない場合は
    /// [`MeshError::ShapeMismatch`] を返す。
    pub fn from_arrays(x: Array2<f64>, y: Array2<f64>) -> Result<Self, MeshError> {
        if x.dim() != y.dim() {
            return Err(MeshError::ShapeMismatch {
                first: x.dim(),
                second: y.dim(),
            });
        }
        Ok(Self { x, y })
    }

    pub fn x(&self) -> &Array2<f64> {
        &self.x
    }

    pub fn y(&self) -> &Array2<f64> {
        &self.y
    }

    /// `(rows, cols)`。
    pub fn shape(&self) -> (usize, usize) {
        self.x.dim()
    }

    /// 格子点 `(i, j)` の座標。範囲外ならパニックする。
    pub fn point(&self, i: usize, j: usize) -> Vector2 {
        Vector2::new(self.x[[i, j]], self.y[[i, j]])
    }

    /// 格子間隔 `(dx, dy)`。軸方向に 1 点しかない場合その成分は `0.0`。
    pub fn spacing(&self) -> (f64, f64) {
        let (rows, cols) = self.shape();
        let dx = if rows > 0 && cols > 1 {
            self.x[[0, 1]] - self.x[[0, 0]]
        } else {
            0.0
        };
        let dy = if rows > 1 && cols > 0 {
            self.y[[1, 0]] - self.y[[0, 0]]
        } else {
            0.0
        };
        (dx, dy)
    }
}

/// 極座標の標本格子 `(R, Θ)`。
///
/// `R` は列方向に、`Θ` は行方向に変化する。角度はラジアン。
#[derive(Debug, Clone, PartialEq)]
pub struct PolarGrid {
    r: Array2<f64>,
    theta: Array2<f64>,
}

impl PolarGrid {
    pub fn new(n: usize, r_start: f64, r_end: f64, theta_start: f64, theta_end: f64) -> Self {
        create_polar_grid(n, r_start, r_end, theta_start, theta_end)
    }

    pub fn r(&self) -> &Array2<f64> {
        &self.r
    }

    pub fn theta(&self) -> &Array2<f64> {
        &self.theta
    }

    pub fn shape(&self) -> (usize, usize) {
        self.r.dim()
    }

    /// 各格子点をデカルト座標 `X = R cos Θ`, `Y = R sin Θ` に写す。
    pub fn to_cartesian(&self) -> CartesianGrid {
        let mut x = Array2::zeros(self.shape());
        let mut y = Array2::zeros(self.shape());
        ndarray::Zip::from(&mut x)
            .and(&mut y)
            .and(&self.r)
            .and(&self.theta)
            .for_each(|x, y, &r, &t| {
                let p = Vector2::from_polar(r, t);
                *x = p.x();
                *y = p.y();
            });
        CartesianGrid { x, y }
    }
}

/// 境界値と各軸の点数から 2 次元 meshgrid `(X, Y)` を生成する。
///
/// `X[[i, j]] = x_start + j·(x_end − x_start)/(N − 1)`、
/// `Y[[i, j]] = y_start + i·(y_end − y_start)/(N − 1)`。形状は `(N, N)`。
///
/// - `N == 0` → 形状 `(0, 0)` の空配列。
/// - `N == 1` → 単一点 `(x_start, y_start)`。
/// - 逆順や縮退した境界はそのまま反転・縮退した格子になる。
///
/// ```
/// let (x, y) = potflow_mesh::create_grid(5, 0.0, 4.0, 0.0, 4.0);
/// assert_eq!(x.row(2).to_vec(), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
/// assert_eq!(y.column(2).to_vec(), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
/// ```
pub fn create_grid(
    n: usize,
    x_start: f64,
    x_end: f64,
    y_start: f64,
    y_end: f64,
) -> (Array2<f64>, Array2<f64>) {
    let x = linspace(x_start, x_end, n);
    let y = linspace(y_start, y_end, n);
    meshgrid(&x, &y)
}

/// 極座標版の [`create_grid`]。`R` は列方向、`Θ` は行方向に変化する。
pub fn create_polar_grid(
    n: usize,
    r_start: f64,
    r_end: f64,
    theta_start: f64,
    theta_end: f64,
) -> PolarGrid {
    let r = linspace(r_start, r_end, n);
    let theta = linspace(theta_start, theta_end, n);
    let (r, theta) = meshgrid(&r, &theta);
    PolarGrid { r, theta }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== linspace =====

    #[test]
    fn linspace_includes_endpoints() {
        let v = linspace(-1.0, 1.0, 5);
        assert_eq!(v.to_vec(), vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
    }

    #[test]
    fn linspace_zero_points_is_empty() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn linspace_single_point_is_start() {
        assert_eq!(linspace(3.0, 7.0, 1).to_vec(), vec![3.0]);
    }

    #[test]
    fn linspace_reversed_bounds_descend() {
        assert_eq!(linspace(2.0, 0.0, 3).to_vec(), vec![2.0, 1.0, 0.0]);
    }

    #[test]
    fn linspace_last_is_exact_end() {
        let v = linspace(0.0, 0.3, 7);
        assert_eq!(v[6], 0.3);
    }

    // ===== create_grid =====

    #[test]
    fn create_grid_rows_and_columns() {
        let (x, y) = create_grid(5, 0.0, 4.0, 0.0, 4.0);
        assert_eq!(x.dim(), (5, 5));
        assert_eq!(y.dim(), (5, 5));
        let expected = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        for i in 0..5 {
            assert_eq!(x.row(i).to_vec(), expected, "row {i} of X");
            assert_eq!(y.column(i).to_vec(), expected, "column {i} of Y");
        }
    }

    #[test]
    fn create_grid_x_constant_down_columns() {
        let (x, y) = create_grid(4, -1.0, 1.0, 10.0, 20.0);
        for j in 0..4 {
            let col = x.column(j);
            assert!(col.iter().all(|&v| v == col[0]));
            let row = y.row(j);
            assert!(row.iter().all(|&v| v == row[0]));
        }
    }

    #[test]
    fn create_grid_empty() {
        let (x, y) = create_grid(0, 0.0, 1.0, 0.0, 1.0);
        assert_eq!(x.dim(), (0, 0));
        assert_eq!(y.dim(), (0, 0));
    }

    #[test]
    fn create_grid_single_point() {
        let (x, y) = create_grid(1, 2.0, 5.0, -3.0, 9.0);
        assert_eq!(x.dim(), (1, 1));
        assert_eq!(x[[0, 0]], 2.0);
        assert_eq!(y[[0, 0]], -3.0);
    }

    // ===== CartesianGrid =====

    #[test]
    fn cartesian_grid_spacing() {
        let grid = CartesianGrid::new(5, 0.0, 2.0, -1.0, 3.0);
        let (dx, dy) = grid.spacing();
        assert!((dx - 0.5).abs() < 1e-14, "dx {dx}");
        assert!((dy - 1.0).abs() < 1e-14, "dy {dy}");
    }

    #[test]
    fn cartesian_grid_spacing_degenerate() {
        let grid = CartesianGrid::new(1, 0.0, 2.0, -1.0, 3.0);
        assert_eq!(grid.spacing(), (0.0, 0.0));
    }

    #[test]
    fn cartesian_grid_point() {
        let grid = CartesianGrid::new(3, 0.0, 2.0, 10.0, 12.0);
        assert_eq!(grid.point(2, 1), Vector2::new(1.0, 12.0));
    }

    #[test]
    fn cartesian_grid_rejects_mismatched_arrays() {
        let err = CartesianGrid::from_arrays(Array2::zeros((2, 3)), Array2::zeros((3, 2)))
            .unwrap_err();
        match err {
            MeshError::ShapeMismatch { first, second } => {
                assert_eq!(first, (2, 3));
                assert_eq!(second, (3, 2));
            }
        }
    }

    // ===== PolarGrid =====

    #[test]
    fn polar_grid_meshgrid_convention() {
        let grid = create_polar_grid(3, 1.0, 3.0, 0.0, 1.0);
        assert_eq!(grid.r().row(1).to_vec(), vec![1.0, 2.0, 3.0]);
        assert_eq!(grid.theta().column(0).to_vec(), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn polar_grid_to_cartesian() {
        let grid = PolarGrid::new(3, 1.0, 2.0, 0.0, std::f64::consts::PI);
        let cart = grid.to_cartesian();
        // 行 2 は θ = π → (−r, 0)
        for j in 0..3 {
            let p = cart.point(2, j);
            let r = grid.r()[[2, j]];
            assert!((p.x() + r).abs() < 1e-12, "x error at {j}");
            assert!(p.y().abs() < 1e-12, "y error at {j}");
        }
    }
}
