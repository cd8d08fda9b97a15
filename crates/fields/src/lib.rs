//! Flow field value types for Potflow
//!
//! Velocity / stream-function arrays produced by the singularity evaluators,
//! their superposition, and finite-difference diagnostics used to check them.

pub mod diagnostics;
mod error;
mod flow;

pub use error::FieldError;
pub use flow::{FlowField, PolarFlowField, VelocityField};
