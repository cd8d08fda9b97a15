use ndarray::{Array2, Zip};

use potflow_fields::{FlowField, VelocityField};
use potflow_types::Vector2;

use crate::{source, vortex};

/// 強さと位置だけで決まる点特異点の種類。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SingularityKind {
    /// 湧き出し（強さが負なら吸い込み）。
    Source,
    /// 点渦。強さは循環 Γ。
    Vortex,
}

/// 点特異点 `{kind, strength, position}`。構築後は変更しない値型。
///
/// 強さ 0 は全域で零の流れを与える（有効な退化ケース）。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Singularity {
    kind: SingularityKind,
    strength: f64,
    position: Vector2,
}

impl Singularity {
    pub fn new(kind: SingularityKind, strength: f64, x: f64, y: f64) -> Self {
        Self {
            kind,
            strength,
            position: Vector2::new(x, y),
        }
    }

    pub fn source(strength: f64, x: f64, y: f64) -> Self {
        Self::new(SingularityKind::Source, strength, x, y)
    }

    pub fn vortex(strength: f64, x: f64, y: f64) -> Self {
        Self::new(SingularityKind::Vortex, strength, x, y)
    }

    pub fn kind(&self) -> SingularityKind {
        self.kind
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }

    pub fn position(&self) -> Vector2 {
        self.position
    }

    /// 格子 `(X, Y)` 上の速度。
    ///
    /// # Panics
    ///
    /// `x` と `y` の形状が異なる場合。
    pub fn velocity(&self, x: &Array2<f64>, y: &Array2<f64>) -> VelocityField {
        let (x0, y0) = (self.position.x(), self.position.y());
        let kernel = match self.kind {
            SingularityKind::Source => source::velocity,
            SingularityKind::Vortex => vortex::velocity,
        };
        let mut u = Array2::zeros(x.dim());
        let mut v = Array2::zeros(x.dim());
        Zip::from(&mut u)
            .and(&mut v)
            .and(x)
            .and(y)
            .for_each(|u, v, &x, &y| {
                (*u, *v) = kernel(self.strength, x - x0, y - y0);
            });
        VelocityField { u, v }
    }

    /// 格子 `(X, Y)` 上の流れ関数。
    ///
    /// 湧き出しは `Λ/(2π)·atan2(dy, dx)`、点渦は `−Γ/(4π)·ln(r²)`。
    ///
    /// # Panics
    ///
    /// `x` と `y` の形状が異なる場合。
    pub fn stream_function(&self, x: &Array2<f64>, y: &Array2<f64>) -> Array2<f64> {
        let (x0, y0) = (self.position.x(), self.position.y());
        let kernel = match self.kind {
            SingularityKind::Source => source::stream_function,
            SingularityKind::Vortex => vortex::stream_function,
        };
        Zip::from(x)
            .and(y)
            .map_collect(|&x, &y| kernel(self.strength, x - x0, y - y0))
    }

    /// 速度と流れ関数をまとめて評価する。
    pub fn field(&self, x: &Array2<f64>, y: &Array2<f64>) -> FlowField {
        let VelocityField { u, v } = self.velocity(x, y);
        let psi = self.stream_function(x, y);
        FlowField { u, v, psi }
    }
}

/// 最後に計算した `u`, `v`, `psi` を保持する [`Singularity`] のラッパー。
///
/// [`velocity`](Self::velocity) は `u`, `v` を、[`stream_function`](Self::stream_function) は
/// `psi` を上書きする。片方だけを呼ぶと、もう片方は以前の格子の値のまま残る。
#[derive(Debug, Clone, PartialEq)]
pub struct CachedSingularity {
    singularity: Singularity,
    u: Option<Array2<f64>>,
    v: Option<Array2<f64>>,
    psi: Option<Array2<f64>>,
}

impl CachedSingularity {
    pub fn new(singularity: Singularity) -> Self {
        Self {
            singularity,
            u: None,
            v: None,
            psi: None,
        }
    }

    pub fn singularity(&self) -> &Singularity {
        &self.singularity
    }

    /// 速度を計算し `u`, `v` に格納する。
    pub fn velocity(&mut self, x: &Array2<f64>, y: &Array2<f64>) {
        let VelocityField { u, v } = self.singularity.velocity(x, y);
        self.u = Some(u);
        self.v = Some(v);
    }

    /// 流れ関数を計算し `psi` に格納する。
    pub fn stream_function(&mut self, x: &Array2<f64>, y: &Array2<f64>) {
        self.psi = Some(self.singularity.stream_function(x, y));
    }

    pub fn u(&self) -> Option<&Array2<f64>> {
        self.u.as_ref()
    }

    pub fn v(&self) -> Option<&Array2<f64>> {
        self.v.as_ref()
    }

    pub fn psi(&self) -> Option<&Array2<f64>> {
        self.psi.as_ref()
    }

    /// 3 量すべてが計算済みで形状が揃っていれば [`FlowField`] として複製して返す。
    pub fn field(&self) -> Option<FlowField> {
        match (&self.u, &self.v, &self.psi) {
            (Some(u), Some(v), Some(psi)) => {
                FlowField::try_new(u.clone(), v.clone(), psi.clone()).ok()
            }
            _ => None,
        }
    }

    /// キャッシュを破棄する。
    pub fn clear(&mut self) {
        self.u = None;
        self.v = None;
        self.psi = None;
    }
}

impl From<Singularity> for CachedSingularity {
    fn from(singularity: Singularity) -> Self {
        Self::new(singularity)
    }
}
