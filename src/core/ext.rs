//! Extension traits for method-call style transforms
//!
//! These let callers write `values.map_seq(..)` instead of
//! `map_seq(&values, ..)`. Each method delegates to the free function of the
//! same name; nothing is chained or deferred, every call is a complete pass.
//!
//! ```
//! use transform_kit::core::SeqTransformExt;
//!
//! let values = vec![1, 2, 3, 4, 5, 6, 890];
//! let total = values
//!     .map_seq(|x| x + 1)
//!     .filter_seq(|x| x % 3 == 0)
//!     .reduce_seq(0, |acc, x| acc + x);
//! assert_eq!(total, 900);
//! ```

use super::{assoc, sequence};
use crate::error::TransformError;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

/// Map, filter and reduce as methods on slices (and `Vec` through deref)
pub trait SeqTransformExt<T> {
    fn map_seq<R, F>(&self, transform: F) -> Vec<R>
    where
        F: FnMut(&T) -> R;

    fn filter_seq<F>(&self, predicate: F) -> Vec<T>
    where
        T: Clone,
        F: FnMut(&T) -> bool;

    fn reduce_seq<A, F>(&self, seed: A, combine: F) -> A
    where
        F: FnMut(A, &T) -> A;

    fn try_map_seq<R, E, F>(&self, transform: F) -> Result<Vec<R>, TransformError<T, E>>
    where
        T: Clone,
        F: FnMut(&T) -> Result<R, E>;

    fn try_filter_seq<E, F>(&self, predicate: F) -> Result<Vec<T>, TransformError<T, E>>
    where
        T: Clone,
        F: FnMut(&T) -> Result<bool, E>;

    fn try_reduce_seq<A, E, F>(&self, seed: A, combine: F) -> Result<A, TransformError<T, E>>
    where
        T: Clone,
        F: FnMut(A, &T) -> Result<A, E>;
}

impl<T> SeqTransformExt<T> for [T] {
    fn map_seq<R, F>(&self, transform: F) -> Vec<R>
    where
        F: FnMut(&T) -> R,
    {
        sequence::map_seq(self, transform)
    }

    fn filter_seq<F>(&self, predicate: F) -> Vec<T>
    where
        T: Clone,
        F: FnMut(&T) -> bool,
    {
        sequence::filter_seq(self, predicate)
    }

    fn reduce_seq<A, F>(&self, seed: A, combine: F) -> A
    where
        F: FnMut(A, &T) -> A,
    {
        sequence::reduce_seq(self, seed, combine)
    }

    fn try_map_seq<R, E, F>(&self, transform: F) -> Result<Vec<R>, TransformError<T, E>>
    where
        T: Clone,
        F: FnMut(&T) -> Result<R, E>,
    {
        sequence::try_map_seq(self, transform)
    }

    fn try_filter_seq<E, F>(&self, predicate: F) -> Result<Vec<T>, TransformError<T, E>>
    where
        T: Clone,
        F: FnMut(&T) -> Result<bool, E>,
    {
        sequence::try_filter_seq(self, predicate)
    }

    fn try_reduce_seq<A, E, F>(&self, seed: A, combine: F) -> Result<A, TransformError<T, E>>
    where
        T: Clone,
        F: FnMut(A, &T) -> Result<A, E>,
    {
        sequence::try_reduce_seq(self, seed, combine)
    }
}

/// Map and filter over the values of a `HashMap`
pub trait AssocTransformExt<K, V, S> {
    fn map_assoc<R, F>(&self, transform: F) -> HashMap<K, R, S>
    where
        F: FnMut(&V) -> R;

    fn filter_assoc<F>(&self, predicate: F) -> HashMap<K, V, S>
    where
        V: Clone,
        F: FnMut(&V) -> bool;

    fn try_map_assoc<R, E, F>(
        &self,
        transform: F,
    ) -> Result<HashMap<K, R, S>, TransformError<(K, V), E>>
    where
        V: Clone,
        F: FnMut(&V) -> Result<R, E>;

    fn try_filter_assoc<E, F>(
        &self,
        predicate: F,
    ) -> Result<HashMap<K, V, S>, TransformError<(K, V), E>>
    where
        V: Clone,
        F: FnMut(&V) -> Result<bool, E>;
}

impl<K, V, S> AssocTransformExt<K, V, S> for HashMap<K, V, S>
where
    K: Clone + Eq + Hash,
    S: BuildHasher + Default,
{
    fn map_assoc<R, F>(&self, transform: F) -> HashMap<K, R, S>
    where
        F: FnMut(&V) -> R,
    {
        assoc::map_assoc(self, transform)
    }

    fn filter_assoc<F>(&self, predicate: F) -> HashMap<K, V, S>
    where
        V: Clone,
        F: FnMut(&V) -> bool,
    {
        assoc::filter_assoc(self, predicate)
    }

    fn try_map_assoc<R, E, F>(
        &self,
        transform: F,
    ) -> Result<HashMap<K, R, S>, TransformError<(K, V), E>>
    where
        V: Clone,
        F: FnMut(&V) -> Result<R, E>,
    {
        assoc::try_map_assoc(self, transform)
    }

    fn try_filter_assoc<E, F>(
        &self,
        predicate: F,
    ) -> Result<HashMap<K, V, S>, TransformError<(K, V), E>>
    where
        V: Clone,
        F: FnMut(&V) -> Result<bool, E>,
    {
        assoc::try_filter_assoc(self, predicate)
    }
}
