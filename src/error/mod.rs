use std::path::PathBuf;
use thiserror::Error;

use crate::pipeline::OpError;
use serde_json::Value;

pub mod codes;

pub use codes::{describe_error_code, ErrorCode};

/// Failure of a caller-supplied function inside one of the transform primitives.
///
/// Every fallible primitive stops at the first element whose transform,
/// predicate or combine function fails, and reports that element together
/// with its position and the underlying cause. For mappings the element is
/// the `(key, value)` entry and the position is its ordinal in iteration order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError<T, E> {
    #[error("invalid argument at position {index} ({element:?}): {source}")]
    InvalidArgument {
        index: usize,
        element: T,
        #[source]
        source: E,
    },
}

impl<T, E> TransformError<T, E> {
    pub fn invalid_argument(index: usize, element: T, source: E) -> Self {
        Self::InvalidArgument {
            index,
            element,
            source,
        }
    }

    /// Position of the offending element
    pub fn index(&self) -> usize {
        match self {
            Self::InvalidArgument { index, .. } => *index,
        }
    }

    /// The element the caller-supplied function rejected
    pub fn element(&self) -> &T {
        match self {
            Self::InvalidArgument { element, .. } => element,
        }
    }

    /// The underlying cause
    pub fn cause(&self) -> &E {
        match self {
            Self::InvalidArgument { source, .. } => source,
        }
    }

    pub fn into_parts(self) -> (usize, T, E) {
        match self {
            Self::InvalidArgument {
                index,
                element,
                source,
            } => (index, element, source),
        }
    }
}

/// Errors raised while loading, validating or running a pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("[E{code:04}] Pipeline has no steps", code = ErrorCode::PIPELINE_EMPTY)]
    EmptyPipeline,

    #[error(
        "[E{code:04}] Reduce must be the last step, found at step {position} of {len}",
        code = ErrorCode::PIPELINE_REDUCE_NOT_LAST
    )]
    ReduceNotLast { position: usize, len: usize },

    #[error(
        "[E{code:04}] Step {step}: reduce is not defined over a mapping",
        code = ErrorCode::EXEC_REDUCE_ON_MAPPING
    )]
    ReduceOnMapping { step: usize },

    #[error("[E{code:04}] Step {step} failed: {source}", code = ErrorCode::EXEC_STEP_FAILED)]
    Step {
        step: usize,
        #[source]
        source: TransformError<Value, OpError>,
    },

    #[error("[E{code:04}] Step {step} failed: {source}", code = ErrorCode::EXEC_STEP_FAILED)]
    EntryStep {
        step: usize,
        #[source]
        source: TransformError<(String, Value), OpError>,
    },

    #[error(
        "[E{code:04}] Unsupported pipeline format: {} (expected .toml or .json)",
        path.display(),
        code = ErrorCode::PIPELINE_UNSUPPORTED_FORMAT
    )]
    UnsupportedFormat { path: PathBuf },

    #[error(
        "[E{code:04}] Failed to read {}: {source}",
        path.display(),
        code = ErrorCode::IO_READ
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[E{code:04}] TOML error: {0}", code = ErrorCode::PIPELINE_INVALID_TOML)]
    Toml(#[from] toml::de::Error),

    #[error("[E{code:04}] JSON error: {0}", code = ErrorCode::PIPELINE_INVALID_JSON)]
    Json(#[from] serde_json::Error),

    #[error("[E{code:04}] Invalid input data: {0}", code = ErrorCode::INPUT_INVALID_JSON)]
    InvalidInput(#[source] serde_json::Error),
}

impl PipelineError {
    /// Get the error code
    pub fn code(&self) -> u16 {
        match self {
            Self::EmptyPipeline => ErrorCode::PIPELINE_EMPTY,
            Self::ReduceNotLast { .. } => ErrorCode::PIPELINE_REDUCE_NOT_LAST,
            Self::ReduceOnMapping { .. } => ErrorCode::EXEC_REDUCE_ON_MAPPING,
            Self::Step { .. } | Self::EntryStep { .. } => ErrorCode::EXEC_STEP_FAILED,
            Self::UnsupportedFormat { .. } => ErrorCode::PIPELINE_UNSUPPORTED_FORMAT,
            Self::Io { .. } => ErrorCode::IO_READ,
            Self::Toml(_) => ErrorCode::PIPELINE_INVALID_TOML,
            Self::Json(_) => ErrorCode::PIPELINE_INVALID_JSON,
            Self::InvalidInput(_) => ErrorCode::INPUT_INVALID_JSON,
        }
    }

    /// Index of the failing step, for errors raised while running
    pub fn step(&self) -> Option<usize> {
        match self {
            Self::ReduceOnMapping { step }
            | Self::Step { step, .. }
            | Self::EntryStep { step, .. } => Some(*step),
            Self::ReduceNotLast { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// Check if the error comes from the pipeline definition rather than the data
    pub fn is_definition_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyPipeline
                | Self::ReduceNotLast { .. }
                | Self::UnsupportedFormat { .. }
                | Self::Toml(_)
                | Self::Json(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
