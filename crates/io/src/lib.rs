//! Case files and field snapshots for Potflow
//!
//! A case file (JSON) names a sampling grid and the flow elements to superpose on it;
//! a snapshot (JSON) records the resulting arrays for downstream plotting.

mod case;
mod error;
mod snapshot;

pub use case::{Case, CaseFile, ElementSpec, GridSpec};
pub use error::IoError;
pub use snapshot::{Component, CoordinateSystem, Snapshot};
