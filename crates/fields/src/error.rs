#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    #[error("field shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },
    #[error("cannot superpose an empty set of fields")]
    Empty,
    #[error("grid too small for central differences: shape {shape:?}, need at least 3x3")]
    GridTooSmall { shape: (usize, usize) },
    #[error("contour out of range: rows {rows:?}, cols {cols:?}, shape {shape:?}")]
    ContourOutOfRange {
        rows: (usize, usize),
        cols: (usize, usize),
        shape: (usize, usize),
    },
}
