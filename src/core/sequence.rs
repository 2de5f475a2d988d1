//! Pure map, filter and reduce over ordered sequences
//!
//! Inputs are borrowed slices and are never modified. Every operation walks
//! the slice once, front to back, and allocates a new result.

use crate::error::TransformError;

/// Apply a transform to a single value
///
/// # Examples
///
/// ```
/// use transform_kit::core::sequence::apply;
///
/// assert_eq!(apply(10, |x| x * x), 100);
/// assert_eq!(apply("This".to_string(), |x| x + " is a text"), "This is a text");
/// ```
pub fn apply<T, R, F>(value: T, transform: F) -> R
where
    F: FnOnce(T) -> R,
{
    transform(value)
}

/// Transform every element of a sequence
///
/// # Arguments
///
/// * `input` - Slice of elements to transform
/// * `transform` - Function invoked once per element, in index order
///
/// # Returns
///
/// New vector of the same length where `output[i] == transform(&input[i])`
///
/// # Examples
///
/// ```
/// use transform_kit::core::sequence::map_seq;
///
/// let values = [10, 11, 12, 20];
/// assert_eq!(map_seq(&values, |x| x * x), vec![100, 121, 144, 400]);
/// ```
pub fn map_seq<T, R, F>(input: &[T], mut transform: F) -> Vec<R>
where
    F: FnMut(&T) -> R,
{
    let mut result = Vec::with_capacity(input.len());
    for element in input {
        result.push(transform(element));
    }
    result
}

/// Retain the elements of a sequence that satisfy a predicate
///
/// # Arguments
///
/// * `input` - Slice of elements to filter
/// * `predicate` - Function evaluated exactly once per element, in index order
///
/// # Returns
///
/// Order-preserving subsequence of `input` holding copies of the retained elements
///
/// # Examples
///
/// ```
/// use transform_kit::core::sequence::filter_seq;
///
/// let values = [1, 2, 3, 4, 5, 6, 890];
/// assert_eq!(filter_seq(&values, |x| x % 2 == 0), vec![2, 4, 6, 890]);
/// ```
pub fn filter_seq<T, F>(input: &[T], mut predicate: F) -> Vec<T>
where
    T: Clone,
    F: FnMut(&T) -> bool,
{
    let mut result = Vec::new();
    for element in input {
        if predicate(element) {
            result.push(element.clone());
        }
    }
    result
}

/// Fold a sequence into a single value, left to right
///
/// `acc_0 = seed`, `acc_i = combine(acc_{i-1}, &input[i])`. An empty input
/// returns `seed` unchanged.
///
/// # Examples
///
/// ```
/// use transform_kit::core::sequence::reduce_seq;
///
/// assert_eq!(reduce_seq(&[3, 6, 891], 0, |acc, x| acc + x), 900);
/// assert_eq!(reduce_seq(&[] as &[i32], 7, |acc, x| acc + x), 7);
/// ```
pub fn reduce_seq<T, A, F>(input: &[T], seed: A, mut combine: F) -> A
where
    F: FnMut(A, &T) -> A,
{
    let mut acc = seed;
    for element in input {
        acc = combine(acc, element);
    }
    acc
}

/// Fallible variant of [`map_seq`]
///
/// Stops at the first element whose transform fails; later elements are not
/// visited.
///
/// # Examples
///
/// ```
/// use transform_kit::core::sequence::try_map_seq;
///
/// let parsed = try_map_seq(&["1", "2", "3"], |s| s.parse::<i32>());
/// assert_eq!(parsed.unwrap(), vec![1, 2, 3]);
///
/// let err = try_map_seq(&["1", "x", "3"], |s| s.parse::<i32>()).unwrap_err();
/// assert_eq!(err.index(), 1);
/// assert_eq!(*err.element(), "x");
/// ```
pub fn try_map_seq<T, R, E, F>(
    input: &[T],
    mut transform: F,
) -> Result<Vec<R>, TransformError<T, E>>
where
    T: Clone,
    F: FnMut(&T) -> Result<R, E>,
{
    let mut result = Vec::with_capacity(input.len());
    for (index, element) in input.iter().enumerate() {
        match transform(element) {
            Ok(value) => result.push(value),
            Err(source) => {
                return Err(TransformError::invalid_argument(
                    index,
                    element.clone(),
                    source,
                ))
            }
        }
    }
    Ok(result)
}

/// Fallible variant of [`filter_seq`]
pub fn try_filter_seq<T, E, F>(
    input: &[T],
    mut predicate: F,
) -> Result<Vec<T>, TransformError<T, E>>
where
    T: Clone,
    F: FnMut(&T) -> Result<bool, E>,
{
    let mut result = Vec::new();
    for (index, element) in input.iter().enumerate() {
        match predicate(element) {
            Ok(true) => result.push(element.clone()),
            Ok(false) => {}
            Err(source) => {
                return Err(TransformError::invalid_argument(
                    index,
                    element.clone(),
                    source,
                ))
            }
        }
    }
    Ok(result)
}

/// Fallible variant of [`reduce_seq`]
///
/// The accumulator built so far is dropped when `combine` fails.
pub fn try_reduce_seq<T, A, E, F>(
    input: &[T],
    seed: A,
    mut combine: F,
) -> Result<A, TransformError<T, E>>
where
    T: Clone,
    F: FnMut(A, &T) -> Result<A, E>,
{
    let mut acc = seed;
    for (index, element) in input.iter().enumerate() {
        acc = combine(acc, element)
            .map_err(|source| TransformError::invalid_argument(index, element.clone(), source))?;
    }
    Ok(acc)
}

/// Closed-interval membership predicate, `lo <= x && x <= hi`
///
/// # Examples
///
/// ```
/// use transform_kit::core::sequence::{filter_seq, in_range};
///
/// let values = [1, 2, 3, 4, 5, 6, 890];
/// assert_eq!(filter_seq(&values, in_range(4, 6)), vec![4, 5, 6]);
/// ```
pub fn in_range<T>(lo: T, hi: T) -> impl Fn(&T) -> bool
where
    T: PartialOrd,
{
    move |value: &T| lo <= *value && *value <= hi
}
