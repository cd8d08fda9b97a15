#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
    #[error("invalid case: {reason}")]
    InvalidCase { reason: String },
    #[error("component '{name}' row {row} has {len} values, expected {expected}")]
    RaggedComponent {
        name: String,
        row: usize,
        len: usize,
        expected: usize,
    },
}
