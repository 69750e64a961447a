/// Errors raised by geometry operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A coordinate or extent fell outside the permitted region.
    Geometry(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Geometry(s) => write!(f, "geometry: {s}"),
        }
    }
}

impl std::error::Error for Error {}

/// Result alias for geometry operations.
pub type Result<T> = std::result::Result<T, Error>;
