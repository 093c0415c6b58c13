use crate::generator::RenderError;
use crate::registry::LookupError;
use std::fmt;

/// Failure of the skeleton operation exposed to the HTTP layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkeletonError {
    /// The id could not be resolved; `reason` tells an unloaded registry
    /// apart from an unknown id
    ProblemNotFound {
        /// Requested problem id
        id: String,
        /// Lookup outcome
        reason: LookupError,
    },
    /// The problem was found but its definition cannot be rendered
    RenderingFailed {
        /// Requested problem id
        id: String,
        /// Underlying template failure
        source: RenderError,
    },
}

impl SkeletonError {
    /// Problem id the error refers to.
    pub fn problem_id(&self) -> &str {
        match self {
            SkeletonError::ProblemNotFound { id, .. } | SkeletonError::RenderingFailed { id, .. } => {
                id
            }
        }
    }
}

impl fmt::Display for SkeletonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkeletonError::ProblemNotFound {
                id,
                reason: LookupError::NotReady,
            } => write!(f, "problem {id} unavailable: problems could not be downloaded"),
            SkeletonError::ProblemNotFound {
                id,
                reason: LookupError::UnknownProblem,
            } => write!(f, "problem {id} not found"),
            SkeletonError::RenderingFailed { id, source } => {
                write!(f, "Cannot process template {id}: {source}")
            }
        }
    }
}

impl std::error::Error for SkeletonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SkeletonError::ProblemNotFound { reason, .. } => Some(reason),
            SkeletonError::RenderingFailed { source, .. } => Some(source),
        }
    }
}
