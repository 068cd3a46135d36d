use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid camera configuration: {0}")]
    InvalidConfig(&'static str),

    #[error("camera must be initialized (again after resizing the image or tiles) before rendering")]
    CameraNotInitialized,

    #[error("invalid thread count {0}: expected -1 (all cores) or a positive number")]
    InvalidThreadCount(i64),

    #[error("pixel buffer holds {actual} colors, image needs {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error(transparent)]
    Io(#[from] io::Error),
}
