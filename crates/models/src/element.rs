use ndarray::Array2;

use potflow_fields::{FlowField, PolarFlowField};
use potflow_mesh::{CartesianGrid, PolarGrid};

use crate::doublet::{get_doublet_cylindrical_info, get_doublet_info};
use crate::error::ModelError;
use crate::freestream::{get_freestream_cylindrical_info, get_freestream_info};
use crate::singularity::{Singularity, SingularityKind};
use crate::vortex::get_velocity_infinite_vortices;

/// デカルト格子上で重ね合わせ可能な流れ要素。
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// 迎角 `alpha`（ラジアン）の一様流。
    Freestream { u_inf: f64, alpha: f64 },
    /// 湧き出し・吸い込み・点渦。
    Point(Singularity),
    /// 点 `(x, y)` にある +x 軸向きの二重湧き出し。
    Doublet { strength: f64, x: f64, y: f64 },
    /// `y = 0` 上の無限渦列。流れ関数には寄与しない（`ψ ≡ 0`）。
    VortexRow { strength: f64, x_vortices: Vec<f64> },
}

impl Element {
    /// 格子上の寄与を評価する。
    ///
    /// # Errors
    ///
    /// `VortexRow` の `x_vortices` が 2 要素未満の場合。
    pub fn evaluate(&self, grid: &CartesianGrid) -> Result<FlowField, ModelError> {
        let (x, y) = (grid.x(), grid.y());
        let field = match self {
            Element::Freestream { u_inf, alpha } => {
                let (rows, cols) = grid.shape();
                let mut field = get_freestream_info(*u_inf, *alpha, x, y, rows);
                // 非正方格子では (n, n) の一様成分を格子形状に合わせ直す
                if rows != cols {
                    field.u = Array2::from_elem((rows, cols), u_inf * alpha.cos());
                    field.v = Array2::from_elem((rows, cols), u_inf * alpha.sin());
                }
                field
            }
            Element::Point(singularity) => singularity.field(x, y),
            Element::Doublet {
                strength,
                x: xd,
                y: yd,
            } => get_doublet_info(*strength, *xd, *yd, x, y),
            Element::VortexRow {
                strength,
                x_vortices,
            } => get_velocity_infinite_vortices(*strength, x, y, x_vortices)?.into(),
        };
        Ok(field)
    }

    /// ログ出力用の短い名前。
    pub fn label(&self) -> &'static str {
        match self {
            Element::Freestream { .. } => "freestream",
            Element::Point(s) => match s.kind() {
                SingularityKind::Source => "source",
                SingularityKind::Vortex => "vortex",
            },
            Element::Doublet { .. } => "doublet",
            Element::VortexRow { .. } => "vortex_row",
        }
    }
}

impl From<Singularity> for Element {
    fn from(singularity: Singularity) -> Self {
        Element::Point(singularity)
    }
}

/// 極座標格子上の流れ要素。いずれも原点中心。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PolarElement {
    /// +x 向きの一様流。
    Freestream { u_inf: f64 },
    /// 原点の二重湧き出し。
    Doublet { strength: f64 },
}

impl PolarElement {
    pub fn evaluate(&self, grid: &PolarGrid) -> PolarFlowField {
        match *self {
            PolarElement::Freestream { u_inf } => {
                get_freestream_cylindrical_info(u_inf, grid.r(), grid.theta())
            }
            PolarElement::Doublet { strength } => {
                get_doublet_cylindrical_info(strength, grid.r(), grid.theta())
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PolarElement::Freestream { .. } => "freestream",
            PolarElement::Doublet { .. } => "doublet",
        }
    }
}
