use std::io;

/// All error types for the portal-dodeca crate.
#[derive(thiserror::Error, Debug)]
pub enum PortalError {
    /// The fixed 12 x 3 face partition only holds for the unsubdivided solid.
    #[error("Invalid detail: {0} (only detail 0 yields 12 faces of 3 triangles)")]
    InvalidDetail(u32),
    #[error("Input error: {0}")]
    Input(String),
    #[error("Scene error: {0}")]
    Scene(String),
    #[error("Output error: {0}")]
    Output(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PortalError>;
