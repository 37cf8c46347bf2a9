//! Error taxonomy of the triangulation entry points.

use std::fmt;

use crate::hull::HullError;

/// Errors surfaced by `triangulate*` and `compute_delaunay_triangulation_2d`.
#[derive(Clone, Debug, PartialEq)]
pub enum TriangulationError {
    /// Fewer than three input points.
    InsufficientPoints { got: usize },
    /// Collinear, coincident or otherwise rank-deficient input.
    DegenerateInput { reason: String },
    /// A coordinate is NaN or infinite.
    NonFiniteCoordinate { index: usize },
}

impl TriangulationError {
    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateInput {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for TriangulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientPoints { got } => {
                write!(f, "need at least 3 points for a triangulation, got {got}")
            }
            Self::DegenerateInput { reason } => write!(f, "degenerate input: {reason}"),
            Self::NonFiniteCoordinate { index } => {
                write!(f, "point {index} has a non-finite coordinate")
            }
        }
    }
}

impl std::error::Error for TriangulationError {}

impl From<HullError> for TriangulationError {
    fn from(err: HullError) -> Self {
        match err {
            HullError::TooFewPoints { got } => Self::InsufficientPoints { got },
            other => Self::degenerate(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hull_errors_map_onto_taxonomy() {
        let e: TriangulationError = HullError::TooFewPoints { got: 2 }.into();
        assert_eq!(e, TriangulationError::InsufficientPoints { got: 2 });
        let e: TriangulationError = HullError::Flat.into();
        assert!(matches!(e, TriangulationError::DegenerateInput { .. }));
        assert!(e.to_string().starts_with("degenerate input"));
    }
}
