//! Core transform primitives as pure functions
//!
//! This module contains the map, filter and reduce primitives without any I/O.
//! Following the "functional core, imperative shell" pattern, all functions here:
//! - Borrow their input and return a freshly allocated result
//! - Never mutate the input or keep state between calls
//! - Invoke the caller-supplied function once per element, in order
//! - Are easily testable without mocks

pub mod assoc;
pub mod ext;
pub mod sequence;

pub use assoc::{filter_assoc, map_assoc, try_filter_assoc, try_map_assoc};
pub use ext::{AssocTransformExt, SeqTransformExt};
pub use sequence::{
    apply, filter_seq, in_range, map_seq, reduce_seq, try_filter_seq, try_map_seq,
    try_reduce_seq,
};
