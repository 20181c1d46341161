use gridpath_core::Point;
use gridpath_paths::PathError;

/// Errors raised while building, querying, or generating a [`Grid`](crate::Grid).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    /// A coordinate outside `[0, width) × [0, height)`.
    #[error("{point} is outside the {width}x{height} grid")]
    OutOfBounds { point: Point, width: i32, height: i32 },
    /// Unequal row lengths, an empty dimension, or an unknown cell value.
    #[error("malformed grid: {0}")]
    MalformedGrid(String),
    /// An obstacle probability outside `[0, 1]`.
    #[error("obstacle probability {0} is not in [0, 1]")]
    InvalidProbability(f64),
}

impl From<PathError> for GridError {
    fn from(err: PathError) -> Self {
        match err {
            PathError::OutOfRange { point, range } => Self::OutOfBounds {
                point,
                width: range.width(),
                height: range.height(),
            },
        }
    }
}
