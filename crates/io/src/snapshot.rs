use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use potflow_fields::{FlowField, PolarFlowField};
use potflow_mesh::{CartesianGrid, PolarGrid};

use crate::error::IoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateSystem {
    Cartesian,
    Polar,
}

/// 名前付きの 2 次元配列。行ごとの入れ子配列で、非有限値は `null`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    pub values: Vec<Vec<Option<f64>>>,
}

impl Component {
    fn new(name: &str, array: &Array2<f64>) -> Self {
        let values = array
            .rows()
            .into_iter()
            .map(|row| {
                row.iter()
                    .map(|&v| if v.is_finite() { Some(v) } else { None })
                    .collect()
            })
            .collect();
        Self {
            name: name.to_string(),
            values,
        }
    }

    /// `null` を `NaN` に戻して配列を復元する。
    ///
    /// # Errors
    ///
    /// 行の長さが揃っていない場合は [`IoError::RaggedComponent`]。
    pub fn to_array(&self) -> Result<Array2<f64>, IoError> {
        let rows = self.values.len();
        let cols = self.values.first().map_or(0, Vec::len);
        let mut flat = Vec::with_capacity(rows * cols);
        for (row, values) in self.values.iter().enumerate() {
            if values.len() != cols {
                return Err(IoError::RaggedComponent {
                    name: self.name.clone(),
                    row,
                    len: values.len(),
                    expected: cols,
                });
            }
            flat.extend(values.iter().map(|v| v.unwrap_or(f64::NAN)));
        }
        Ok(Array2::from_shape_vec((rows, cols), flat)?)
    }
}

/// 格子座標と計算済みの流れ場をまとめた JSON スナップショット。
///
/// 座標（`x`, `y` または `r`, `theta`）に続いて速度成分と `psi` を並べる。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub name: String,
    pub coordinates: CoordinateSystem,
    pub shape: (usize, usize),
    pub components: Vec<Component>,
}

impl Snapshot {
    pub fn from_flow(name: &str, grid: &CartesianGrid, field: &FlowField) -> Self {
        Self {
            name: name.to_string(),
            coordinates: CoordinateSystem::Cartesian,
            shape: grid.shape(),
            components: vec![
                Component::new("x", grid.x()),
                Component::new("y", grid.y()),
                Component::new("u", &field.u),
                Component::new("v", &field.v),
                Component::new("psi", &field.psi),
            ],
        }
    }

    pub fn from_polar(name: &str, grid: &PolarGrid, field: &PolarFlowField) -> Self {
        Self {
            name: name.to_string(),
            coordinates: CoordinateSystem::Polar,
            shape: grid.shape(),
            components: vec![
                Component::new("r", grid.r()),
                Component::new("theta", grid.theta()),
                Component::new("vr", &field.vr),
                Component::new("vtheta", &field.vtheta),
                Component::new("psi", &field.psi),
            ],
        }
    }

    pub fn component(&self, name: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.name == name)
    }

    pub fn to_json_string(&self) -> Result<String, IoError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;
        log::info!(
            "wrote {} snapshot {:?} to {}",
            self.name,
            self.shape,
            path.as_ref().display()
        );
        Ok(())
    }
}
