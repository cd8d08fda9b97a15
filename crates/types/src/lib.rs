//! Fundamental value types for the Potflow potential-flow library
//!
//! Provides the planar vector type shared by all crates.

mod vector;

pub use vector::Vector2;
