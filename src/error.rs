/// Errors raised while building or writing a detail-normal texture.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    /// Rejected before any work starts (grid size, pixel format, buffer shape).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TextureError>;
