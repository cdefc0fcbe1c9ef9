use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// crate specific Error enum
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
    #[error("The triangle is degenerate, its projected area is zero")]
    DegenerateTriangle,
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
    #[error(transparent)]
    InsertionError(#[from] spade::InsertionError),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("Could not parse line {line}: {reason}")]
    ParseError { line: usize, reason: String },
}
