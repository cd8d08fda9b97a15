/// 平面上の 2 成分ベクトル `(x, y)`。
///
/// 特異点の位置や格子点上の速度サンプルを表す値型。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    data: [f64; 2],
}

impl Vector2 {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { data: [x, y] }
    }

    #[inline]
    pub const fn x(&self) -> f64 {
        self.data[0]
    }

    #[inline]
    pub const fn y(&self) -> f64 {
        self.data[1]
    }

    /// 極座標 `(r, θ)` からデカルト座標のベクトルを作る。
    #[inline]
    pub fn from_polar(r: f64, theta: f64) -> Self {
        Self::new(r * theta.cos(), r * theta.sin())
    }

    /// Euclidean ノルム `√(x² + y²)`。
    ///
    /// 特異点上の値（`inf` / `NaN`）はそのまま IEEE 値として伝播する。
    #[inline]
    pub fn mag(&self) -> f64 {
        self.data[0].hypot(self.data[1])
    }
}
