//! # transform-kit
//!
//! Generic map, filter and reduce primitives over ordered sequences and
//! key-unique mappings, plus a small engine that runs declarative
//! map/filter/reduce pipelines over JSON data.
//!
//! ## Usage
//!
//! ```
//! use transform_kit::core::{filter_seq, map_seq, reduce_seq};
//!
//! let values = [1, 2, 3, 4, 5, 6, 890];
//! let bumped = map_seq(&values, |x| x + 1);
//! let thirds = filter_seq(&bumped, |x| x % 3 == 0);
//! assert_eq!(reduce_seq(&thirds, 0, |acc, x| acc + x), 900);
//! ```
//!
//! ## Modules
//!
//! - `core` - Pure transform primitives and their extension traits
//! - `error` - Error types for fallible transforms and pipelines
//! - `pipeline` - Declarative pipelines over JSON values, loaded from TOML or JSON
pub mod core;
pub mod error;
pub mod pipeline;

pub use crate::core::{AssocTransformExt, SeqTransformExt};
pub use error::{PipelineError, TransformError};
