use std::fmt;

use potflow_fields::FlowField;

/// 実行ログ用の流れ場の要約。
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSummary {
    pub shape: (usize, usize),
    pub max_speed: Option<f64>,
    pub non_finite: usize,
    pub stagnation: usize,
}

/// よどみ点とみなす速さの閾値。
const STAGNATION_TOL: f64 = 1e-6;

impl FieldSummary {
    pub fn of(field: &FlowField) -> Self {
        let max_speed = field
            .speed()
            .iter()
            .copied()
            .filter(|s| s.is_finite())
            .reduce(f64::max);
        Self {
            shape: field.shape(),
            max_speed,
            non_finite: field.non_finite_cells().len(),
            stagnation: field.stagnation_points(STAGNATION_TOL).len(),
        }
    }
}

impl fmt::Display for FieldSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field {:?}", self.shape)?;
        match self.max_speed {
            Some(s) => write!(f, ", max |V| = {s:.6}")?,
            None => write!(f, ", no finite velocity")?,
        }
        write!(
            f,
            ", {} singular cells, {} stagnation cells",
            self.non_finite, self.stagnation
        )
    }
}
