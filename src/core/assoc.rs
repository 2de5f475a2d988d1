//! Pure map and filter over the value side of a key-unique mapping
//!
//! Keys pass through unchanged. Iteration order of a `HashMap` is not
//! meaningful, so the position reported by the fallible variants is only the
//! ordinal of the failing entry within this particular pass.

use crate::error::TransformError;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

/// Transform every value of a mapping, keeping its key set
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use transform_kit::core::assoc::map_assoc;
///
/// let population = HashMap::from([("City 1", 1000), ("City 2", 6000)]);
/// let grown = map_assoc(&population, |v| (f64::from(*v) * 1.1) as i64);
/// assert_eq!(grown, HashMap::from([("City 1", 1100), ("City 2", 6600)]));
/// ```
pub fn map_assoc<K, V, R, S, F>(input: &HashMap<K, V, S>, mut transform: F) -> HashMap<K, R, S>
where
    K: Clone + Eq + Hash,
    S: BuildHasher + Default,
    F: FnMut(&V) -> R,
{
    let mut result = HashMap::with_capacity_and_hasher(input.len(), S::default());
    for (key, value) in input {
        result.insert(key.clone(), transform(value));
    }
    result
}

/// Retain the entries whose value satisfies a predicate
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use transform_kit::core::assoc::filter_assoc;
///
/// let population = HashMap::from([("City 1", 1000), ("City 2", 6000), ("City 3", 2500)]);
/// let small = filter_assoc(&population, |v| *v < 3000);
/// assert_eq!(small, HashMap::from([("City 1", 1000), ("City 3", 2500)]));
/// ```
pub fn filter_assoc<K, V, S, F>(input: &HashMap<K, V, S>, mut predicate: F) -> HashMap<K, V, S>
where
    K: Clone + Eq + Hash,
    V: Clone,
    S: BuildHasher + Default,
    F: FnMut(&V) -> bool,
{
    let mut result = HashMap::with_hasher(S::default());
    for (key, value) in input {
        if predicate(value) {
            result.insert(key.clone(), value.clone());
        }
    }
    result
}

/// Fallible variant of [`map_assoc`]
///
/// Stops at the first entry whose transform fails and reports that entry.
pub fn try_map_assoc<K, V, R, E, S, F>(
    input: &HashMap<K, V, S>,
    mut transform: F,
) -> Result<HashMap<K, R, S>, TransformError<(K, V), E>>
where
    K: Clone + Eq + Hash,
    V: Clone,
    S: BuildHasher + Default,
    F: FnMut(&V) -> Result<R, E>,
{
    let mut result = HashMap::with_capacity_and_hasher(input.len(), S::default());
    for (index, (key, value)) in input.iter().enumerate() {
        match transform(value) {
            Ok(mapped) => {
                result.insert(key.clone(), mapped);
            }
            Err(source) => {
                return Err(TransformError::invalid_argument(
                    index,
                    (key.clone(), value.clone()),
                    source,
                ))
            }
        }
    }
    Ok(result)
}

/// Fallible variant of [`filter_assoc`]
pub fn try_filter_assoc<K, V, E, S, F>(
    input: &HashMap<K, V, S>,
    mut predicate: F,
) -> Result<HashMap<K, V, S>, TransformError<(K, V), E>>
where
    K: Clone + Eq + Hash,
    V: Clone,
    S: BuildHasher + Default,
    F: FnMut(&V) -> Result<bool, E>,
{
    let mut result = HashMap::with_hasher(S::default());
    for (index, (key, value)) in input.iter().enumerate() {
        match predicate(value) {
            Ok(true) => {
                result.insert(key.clone(), value.clone());
            }
            Ok(false) => {}
            Err(source) => {
                return Err(TransformError::invalid_argument(
                    index,
                    (key.clone(), value.clone()),
                    source,
                ))
            }
        }
    }
    Ok(result)
}
