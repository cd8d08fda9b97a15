use std::ops::{Add, AddAssign};

use ndarray::{Array2, Zip};

use potflow_types::Vector2;

use crate::error::FieldError;

/// デカルト座標の流れ場 `{u, v, psi}`。3 配列は入力格子と同じ形状を持つ。
///
/// 特異点と一致する格子点では `inf` / `NaN` を含み得る。これはポテンシャル流理論上
/// 正しい値であり、平滑化や置換は行わない。
#[derive(Debug, Clone, PartialEq)]
pub struct FlowField {
    pub u: Array2<f64>,
    pub v: Array2<f64>,
    pub psi: Array2<f64>,
}

impl FlowField {
    /// 3 配列の形状が一致することを確認して流れ場を構築する。
    pub fn try_new(u: Array2<f64>, v: Array2<f64>, psi: Array2<f64>) -> Result<Self, FieldError> {
        let expected = u.dim();
        for got in [v.dim(), psi.dim()] {
            if got != expected {
                return Err(FieldError::ShapeMismatch { expected, got });
            }
        }
        Ok(Self { u, v, psi })
    }

    /// 全成分が零の流れ場（重ね合わせの単位元）。
    pub fn zeros(shape: (usize, usize)) -> Self {
        Self {
            u: Array2::zeros(shape),
            v: Array2::zeros(shape),
            psi: Array2::zeros(shape),
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        self.u.dim()
    }

    /// 格子点 `(i, j)` の速度ベクトル。
    pub fn velocity_at(&self, i: usize, j: usize) -> Vector2 {
        Vector2::new(self.u[[i, j]], self.v[[i, j]])
    }

    /// 各格子点の速さ `|V| = √(u² + v²)`。
    pub fn speed(&self) -> Array2<f64> {
        Zip::from(&self.u)
            .and(&self.v)
            .map_collect(|&u, &v| Vector2::new(u, v).mag())
    }

    /// 速さが `tol` 未満の格子点（よどみ点の候補）を行優先順で返す。
    ///
    /// 非有限値のセルは含まない。
    pub fn stagnation_points(&self, tol: f64) -> Vec<(usize, usize)> {
        self.speed()
            .indexed_iter()
            .filter(|(_, s)| **s < tol)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// `u`, `v`, `psi` のいずれかが非有限（特異点上）であるセル。
    pub fn non_finite_cells(&self) -> Vec<(usize, usize)> {
        let mut cells = Vec::new();
        for ((idx, &u), (&v, &psi)) in self
            .u
            .indexed_iter()
            .zip(self.v.iter().zip(self.psi.iter()))
        {
            if !(u.is_finite() && v.is_finite() && psi.is_finite()) {
                cells.push(idx);
            }
        }
        cells
    }

    /// 同形状の流れ場を要素ごとに加算する。形状が食い違えば
    /// [`FieldError::ShapeMismatch`]、空なら [`FieldError::Empty`]。
    pub fn try_superpose<I>(fields: I) -> Result<Self, FieldError>
    where
        I: IntoIterator<Item = FlowField>,
    {
        let mut iter = fields.into_iter();
        let mut total = iter.next().ok_or(FieldError::Empty)?;
        let expected = total.shape();
        for field in iter {
            for got in [field.u.dim(), field.v.dim(), field.psi.dim()] {
                if got != expected {
                    return Err(FieldError::ShapeMismatch { expected, got });
                }
            }
            total += &field;
        }
        Ok(total)
    }
}

impl Add for FlowField {
    type Output = Self;

    /// 要素ごとの和。形状が不整合なら ndarray のブロードキャスト規則に従いパニックする。
    fn add(mut self, rhs: Self) -> Self {
        self += &rhs;
        self
    }
}

impl AddAssign<&FlowField> for FlowField {
    fn add_assign(&mut self, rhs: &FlowField) {
        self.u += &rhs.u;
        self.v += &rhs.v;
        self.psi += &rhs.psi;
    }
}

/// 流れ関数を持たない速度場 `{u, v}`（無限渦列など）。
#[derive(Debug, Clone, PartialEq)]
pub struct VelocityField {
    pub u: Array2<f64>,
    pub v: Array2<f64>,
}

impl VelocityField {
    pub fn shape(&self) -> (usize, usize) {
        self.u.dim()
    }

    /// `psi ≡ 0` として [`FlowField`] に持ち上げる。重ね合わせ時に流れ関数へ寄与しない。
    pub fn into_flow_field(self) -> FlowField {
        let psi = Array2::zeros(self.u.dim());
        FlowField {
            u: self.u,
            v: self.v,
            psi,
        }
    }
}

impl From<VelocityField> for FlowField {
    fn from(field: VelocityField) -> Self {
        field.into_flow_field()
    }
}

/// 極座標の流れ場 `{vr, vtheta, psi}`。
#[derive(Debug, Clone, PartialEq)]
pub struct PolarFlowField {
    pub vr: Array2<f64>,
    pub vtheta: Array2<f64>,
    pub psi: Array2<f64>,
}

impl PolarFlowField {
    pub fn shape(&self) -> (usize, usize) {
        self.vr.dim()
    }

    /// 速度成分をデカルト座標へ回転する。
    ///
    /// `u = vr cos θ − vθ sin θ`、`v = vr sin θ + vθ cos θ`。`psi` はそのまま。
    pub fn to_cartesian(&self, theta: &Array2<f64>) -> FlowField {
        let u = Zip::from(&self.vr)
            .and(&self.vtheta)
            .and(theta)
            .map_collect(|&vr, &vt, &t| vr * t.cos() - vt * t.sin());
        let v = Zip::from(&self.vr)
            .and(&self.vtheta)
            .and(theta)
            .map_collect(|&vr, &vt, &t| vr * t.sin() + vt * t.cos());
        FlowField {
            u,
            v,
            psi: self.psi.clone(),
        }
    }
}

impl Add for PolarFlowField {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self.vr += &rhs.vr;
        self.vtheta += &rhs.vtheta;
        self.psi += &rhs.psi;
        self
    }
}
