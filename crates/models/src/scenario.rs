use ndarray::Array2;
use rayon::prelude::*;

use potflow_fields::{FlowField, PolarFlowField};
use potflow_mesh::{CartesianGrid, PolarGrid};

use crate::element::{Element, PolarElement};
use crate::error::ModelError;

/// 1 つの格子と、その上で重ね合わせる流れ要素の集合。
///
/// 要素の寄与は互いに独立なので、[`evaluate_parallel`](Self::evaluate_parallel) は
/// 要素ごとに rayon のタスクへ分配し、加算で集約する。
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    grid: CartesianGrid,
    elements: Vec<Element>,
}

impl Scenario {
    pub fn new(grid: CartesianGrid) -> Self {
        Self {
            grid,
            elements: Vec::new(),
        }
    }

    pub fn with_element(mut self, element: impl Into<Element>) -> Self {
        self.elements.push(element.into());
        self
    }

    pub fn push(&mut self, element: impl Into<Element>) {
        self.elements.push(element.into());
    }

    pub fn grid(&self) -> &CartesianGrid {
        &self.grid
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// 全要素の寄与を順に加算する。要素が無ければ零の場。
    pub fn evaluate(&self) -> Result<FlowField, ModelError> {
        log::debug!(
            "evaluating {} elements on {:?} grid",
            self.elements.len(),
            self.grid.shape()
        );
        let mut total = FlowField::zeros(self.grid.shape());
        for element in &self.elements {
            log::trace!("element {}", element.label());
            total += &element.evaluate(&self.grid)?;
        }
        report_non_finite(&total);
        Ok(total)
    }

    /// [`evaluate`](Self::evaluate) の並列版。加算順序が異なるため結果は丸め誤差の範囲で一致する。
    pub fn evaluate_parallel(&self) -> Result<FlowField, ModelError> {
        log::debug!(
            "evaluating {} elements on {:?} grid in parallel",
            self.elements.len(),
            self.grid.shape()
        );
        let shape = self.grid.shape();
        let total = self
            .elements
            .par_iter()
            .map(|element| element.evaluate(&self.grid))
            .try_reduce(|| FlowField::zeros(shape), |a, b| Ok(a + b))?;
        report_non_finite(&total);
        Ok(total)
    }
}

fn report_non_finite(field: &FlowField) {
    let cells = field.non_finite_cells();
    if !cells.is_empty() {
        log::warn!(
            "{} grid cells coincide with a singularity and hold non-finite values (first at {:?})",
            cells.len(),
            cells[0]
        );
    }
}

/// 極座標格子上の重ね合わせ（一様流と原点の二重湧き出し）。
#[derive(Debug, Clone, PartialEq)]
pub struct PolarScenario {
    grid: PolarGrid,
    elements: Vec<PolarElement>,
}

impl PolarScenario {
    pub fn new(grid: PolarGrid) -> Self {
        Self {
            grid,
            elements: Vec::new(),
        }
    }

    pub fn with_element(mut self, element: PolarElement) -> Self {
        self.elements.push(element);
        self
    }

    pub fn grid(&self) -> &PolarGrid {
        &self.grid
    }

    pub fn elements(&self) -> &[PolarElement] {
        &self.elements
    }

    pub fn evaluate(&self) -> PolarFlowField {
        log::debug!(
            "evaluating {} polar elements on {:?} grid",
            self.elements.len(),
            self.grid.shape()
        );
        let shape = self.grid.shape();
        let zero = PolarFlowField {
            vr: Array2::zeros(shape),
            vtheta: Array2::zeros(shape),
            psi: Array2::zeros(shape),
        };
        self.elements
            .iter()
            .map(|e| e.evaluate(&self.grid))
            .fold(zero, |acc, f| acc + f)
    }
}
