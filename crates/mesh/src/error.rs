#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    #[error("coordinate shape mismatch: first {first:?}, second {second:?}")]
    ShapeMismatch {
        first: (usize, usize),
        second: (usize, usize),
    },
}
