use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use potflow_mesh::{CartesianGrid, PolarGrid};
use potflow_models::{Element, PolarElement, PolarScenario, Scenario, Singularity};

use crate::error::IoError;

/// 標本格子の指定。`kind` タグで座標系を選ぶ。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GridSpec {
    Cartesian {
        n: usize,
        x_start: f64,
        x_end: f64,
        y_start: f64,
        y_end: f64,
    },
    Polar {
        n: usize,
        r_start: f64,
        r_end: f64,
        theta_start: f64,
        theta_end: f64,
    },
}

impl GridSpec {
    fn n(&self) -> usize {
        match self {
            GridSpec::Cartesian { n, .. } | GridSpec::Polar { n, .. } => *n,
        }
    }
}

/// 流れ要素の指定。`type` タグで種類を選ぶ。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementSpec {
    Freestream {
        u_inf: f64,
        #[serde(default)]
        alpha: f64,
    },
    Source {
        strength: f64,
        x: f64,
        y: f64,
    },
    Vortex {
        strength: f64,
        x: f64,
        y: f64,
    },
    Doublet {
        strength: f64,
        #[serde(default)]
        x: f64,
        #[serde(default)]
        y: f64,
    },
    VortexRow {
        strength: f64,
        x_vortices: Vec<f64>,
    },
}

impl ElementSpec {
    fn label(&self) -> &'static str {
        match self {
            ElementSpec::Freestream { .. } => "freestream",
            ElementSpec::Source { .. } => "source",
            ElementSpec::Vortex { .. } => "vortex",
            ElementSpec::Doublet { .. } => "doublet",
            ElementSpec::VortexRow { .. } => "vortex_row",
        }
    }

    fn to_element(&self) -> Result<Element, IoError> {
        let element = match self {
            ElementSpec::Freestream { u_inf, alpha } => Element::Freestream {
                u_inf: *u_inf,
                alpha: *alpha,
            },
            ElementSpec::Source { strength, x, y } => Singularity::source(*strength, *x, *y).into(),
            ElementSpec::Vortex { strength, x, y } => Singularity::vortex(*strength, *x, *y).into(),
            ElementSpec::Doublet { strength, x, y } => Element::Doublet {
                strength: *strength,
                x: *x,
                y: *y,
            },
            ElementSpec::VortexRow {
                strength,
                x_vortices,
            } => {
                if x_vortices.len() < 2 {
                    return Err(IoError::InvalidCase {
                        reason: format!(
                            "vortex_row needs at least two x_vortices, got {}",
                            x_vortices.len()
                        ),
                    });
                }
                Element::VortexRow {
                    strength: *strength,
                    x_vortices: x_vortices.clone(),
                }
            }
        };
        Ok(element)
    }

    fn to_polar_element(&self) -> Result<PolarElement, IoError> {
        match self {
            ElementSpec::Freestream { u_inf, alpha } => {
                if *alpha != 0.0 {
                    log::warn!("polar freestream ignores alpha = {alpha}");
                }
                Ok(PolarElement::Freestream { u_inf: *u_inf })
            }
            ElementSpec::Doublet { strength, x, y } => {
                if *x != 0.0 || *y != 0.0 {
                    return Err(IoError::InvalidCase {
                        reason: format!("polar doublet must sit at the origin, got ({x}, {y})"),
                    });
                }
                Ok(PolarElement::Doublet {
                    strength: *strength,
                })
            }
            other => Err(IoError::InvalidCase {
                reason: format!("{} is not available on a polar grid", other.label()),
            }),
        }
    }
}

/// ケースファイル（JSON）の内容。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseFile {
    pub name: String,
    pub grid: GridSpec,
    #[serde(default)]
    pub elements: Vec<ElementSpec>,
    #[serde(default)]
    pub parallel: bool,
}

/// 検証済みのケース。座標系ごとの重ね合わせ。
#[derive(Debug, Clone, PartialEq)]
pub enum Case {
    Cartesian(Scenario),
    Polar(PolarScenario),
}

impl CaseFile {
    pub fn from_json_str(s: &str) -> Result<Self, IoError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let text = fs::read_to_string(path.as_ref())?;
        log::debug!("read case file {}", path.as_ref().display());
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String, IoError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 格子を生成し、要素を座標系に合わせて検証・変換する。
    pub fn build(&self) -> Result<Case, IoError> {
        if self.grid.n() == 0 {
            return Err(IoError::InvalidCase {
                reason: "grid must have at least one point per axis".to_string(),
            });
        }
        match self.grid {
            GridSpec::Cartesian {
                n,
                x_start,
                x_end,
                y_start,
                y_end,
            } => {
                let mut scenario =
                    Scenario::new(CartesianGrid::new(n, x_start, x_end, y_start, y_end));
                for spec in &self.elements {
                    scenario.push(spec.to_element()?);
                }
                Ok(Case::Cartesian(scenario))
            }
            GridSpec::Polar {
                n,
                r_start,
                r_end,
                theta_start,
                theta_end,
            } => {
                let mut scenario =
                    PolarScenario::new(PolarGrid::new(n, r_start, r_end, theta_start, theta_end));
                for spec in &self.elements {
                    scenario = scenario.with_element(spec.to_polar_element()?);
                }
                Ok(Case::Polar(scenario))
            }
        }
    }
}
