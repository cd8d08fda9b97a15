//! Closed-form potential-flow singularity evaluators
//!
//! Every evaluator maps a sampling grid to velocity and stream-function arrays of
//! the same shape. Grid points that coincide with a singularity yield IEEE `inf` /
//! `NaN` in the affected cell; this is the analytic value and is never smoothed.

mod doublet;
mod element;
mod error;
mod freestream;
mod scenario;
mod singularity;
mod source;
mod vortex;

pub use doublet::{get_doublet_cylindrical_info, get_doublet_info};
pub use element::{Element, PolarElement};
pub use error::ModelError;
pub use freestream::{get_freestream_cylindrical_info, get_freestream_info};
pub use scenario::{PolarScenario, Scenario};
pub use singularity::{CachedSingularity, Singularity, SingularityKind};
pub use source::get_ss_info;
pub use vortex::{get_velocity_infinite_vortices, get_vortex_info};
