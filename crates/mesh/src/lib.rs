//! Sampling grids for Potflow field evaluation
//!
//! Provides evenly spaced Cartesian and polar meshgrids with numpy-style
//! `meshgrid` semantics: the row index follows y (or θ), the column index follows x (or r).

mod error;
mod grid;

pub use error::MeshError;
pub use grid::{CartesianGrid, PolarGrid, create_grid, create_polar_grid, linspace};
