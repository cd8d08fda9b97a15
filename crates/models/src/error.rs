#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("vortex row needs at least two vortex positions to define its spacing, got {len}")]
    VortexRowTooShort { len: usize },
}
