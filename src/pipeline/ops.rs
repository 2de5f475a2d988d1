//! Named operations a pipeline step can apply to JSON values
//!
//! Numbers keep their integer-ness where the operation allows it: adding an
//! integer to an integer yields an integer, and `scale` truncates integer
//! inputs back to integers.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::cmp::Ordering;
use thiserror::Error;

/// Failure of a single operation on a single value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OpError {
    #[error("{op} expects {expected}, found {found}")]
    TypeMismatch {
        op: &'static str,
        expected: &'static str,
        found: String,
    },

    #[error("{op} overflowed")]
    Overflow { op: &'static str },

    #[error("{op} produced a non-finite number")]
    NonFinite { op: &'static str },

    #[error("divisible_by requires a non-zero divisor")]
    ZeroDivisor,
}

/// Transforms available to a `map` step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapFn {
    Identity,
    Square,
    Add(Number),
    Scale(f64),
    Prefix(String),
    Suffix(String),
}

/// Predicates available to a `filter` step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    Even,
    Odd,
    DivisibleBy(i64),
    InRange { lo: f64, hi: f64 },
    LessThan(f64),
    GreaterThan(f64),
    StartsWith(String),
    EndsWith(String),
}

/// Combine functions available to a `reduce` step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Combine {
    Sum,
    Product,
    Count,
    Max,
    Min,
    Join(String),
}

fn type_name(value: &Value) -> String {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
    .to_string()
}

fn mismatch(op: &'static str, expected: &'static str, found: &Value) -> OpError {
    OpError::TypeMismatch {
        op,
        expected,
        found: type_name(found),
    }
}

fn as_number<'a>(op: &'static str, value: &'a Value) -> Result<&'a Number, OpError> {
    match value {
        Value::Number(n) => Ok(n),
        other => Err(mismatch(op, "number", other)),
    }
}

/// Exact integer view of a JSON number, covering both `i64` and `u64` storage
fn integer(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

fn as_integer(op: &'static str, value: &Value) -> Result<i128, OpError> {
    integer(as_number(op, value)?).ok_or_else(|| mismatch(op, "integer", value))
}

/// Back to a JSON integer, or `Overflow` outside `i64::MIN..=u64::MAX`
fn integer_value(op: &'static str, x: i128) -> Result<Value, OpError> {
    if let Ok(small) = i64::try_from(x) {
        return Ok(Value::from(small));
    }
    u64::try_from(x)
        .map(Value::from)
        .map_err(|_| OpError::Overflow { op })
}

fn as_str<'a>(op: &'static str, value: &'a Value) -> Result<&'a str, OpError> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(mismatch(op, "string", other)),
    }
}

fn float(op: &'static str, x: f64) -> Result<Value, OpError> {
    Number::from_f64(x)
        .map(Value::Number)
        .ok_or(OpError::NonFinite { op })
}

fn to_f64(n: &Number) -> f64 {
    // as_f64 only fails for arbitrary-precision numbers, which are not enabled
    n.as_f64().unwrap_or(f64::NAN)
}

/// Add two numbers, staying integral when both sides are integers
fn add_numbers(op: &'static str, a: &Number, b: &Number) -> Result<Value, OpError> {
    match (integer(a), integer(b)) {
        (Some(x), Some(y)) => {
            integer_value(op, x.checked_add(y).ok_or(OpError::Overflow { op })?)
        }
        _ => float(op, to_f64(a) + to_f64(b)),
    }
}

/// Multiply two numbers, staying integral when both sides are integers
fn mul_numbers(op: &'static str, a: &Number, b: &Number) -> Result<Value, OpError> {
    match (integer(a), integer(b)) {
        (Some(x), Some(y)) => {
            integer_value(op, x.checked_mul(y).ok_or(OpError::Overflow { op })?)
        }
        _ => float(op, to_f64(a) * to_f64(b)),
    }
}

/// Order two numbers exactly when both are integers, by `f64` otherwise
fn compare_numbers(a: &Number, b: &Number) -> Ordering {
    match (integer(a), integer(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        // JSON numbers are finite, so the comparison is total
        _ => to_f64(a).partial_cmp(&to_f64(b)).unwrap_or(Ordering::Equal),
    }
}

impl MapFn {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Square => "square",
            Self::Add(_) => "add",
            Self::Scale(_) => "scale",
            Self::Prefix(_) => "prefix",
            Self::Suffix(_) => "suffix",
        }
    }

    pub fn apply(&self, value: &Value) -> Result<Value, OpError> {
        let op = self.name();
        match self {
            Self::Identity => Ok(value.clone()),
            Self::Square => {
                let n = as_number(op, value)?;
                mul_numbers(op, n, n)
            }
            Self::Add(amount) => add_numbers(op, as_number(op, value)?, amount),
            Self::Scale(factor) => {
                let n = as_number(op, value)?;
                let scaled = to_f64(n) * factor;
                if n.is_f64() {
                    return float(op, scaled);
                }
                if !scaled.is_finite() {
                    return Err(OpError::Overflow { op });
                }
                // integer inputs stay integers, truncated toward zero; the cast saturates
                integer_value(op, scaled.trunc() as i128)
            }
            Self::Prefix(prefix) => Ok(Value::String(format!("{prefix}{}", as_str(op, value)?))),
            Self::Suffix(suffix) => Ok(Value::String(format!("{}{suffix}", as_str(op, value)?))),
        }
    }
}

impl Predicate {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Even => "even",
            Self::Odd => "odd",
            Self::DivisibleBy(_) => "divisible_by",
            Self::InRange { .. } => "in_range",
            Self::LessThan(_) => "less_than",
            Self::GreaterThan(_) => "greater_than",
            Self::StartsWith(_) => "starts_with",
            Self::EndsWith(_) => "ends_with",
        }
    }

    pub fn test(&self, value: &Value) -> Result<bool, OpError> {
        let op = self.name();
        match self {
            Self::Even => Ok(as_integer(op, value)? % 2 == 0),
            Self::Odd => Ok(as_integer(op, value)? % 2 != 0),
            Self::DivisibleBy(0) => Err(OpError::ZeroDivisor),
            Self::DivisibleBy(divisor) => Ok(as_integer(op, value)? % i128::from(*divisor) == 0),
            Self::InRange { lo, hi } => {
                let x = to_f64(as_number(op, value)?);
                Ok(*lo <= x && x <= *hi)
            }
            Self::LessThan(bound) => Ok(to_f64(as_number(op, value)?) < *bound),
            Self::GreaterThan(bound) => Ok(to_f64(as_number(op, value)?) > *bound),
            Self::StartsWith(prefix) => Ok(as_str(op, value)?.starts_with(prefix.as_str())),
            Self::EndsWith(suffix) => Ok(as_str(op, value)?.ends_with(suffix.as_str())),
        }
    }
}

impl Combine {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Product => "product",
            Self::Count => "count",
            Self::Max => "max",
            Self::Min => "min",
            Self::Join(_) => "join",
        }
    }

    /// Seed used when a reduce step does not name one
    pub fn default_seed(&self) -> Value {
        match self {
            Self::Sum | Self::Count => Value::from(0),
            Self::Product => Value::from(1),
            Self::Max | Self::Min => Value::Null,
            Self::Join(_) => Value::String(String::new()),
        }
    }

    pub fn combine(&self, acc: Value, value: &Value) -> Result<Value, OpError> {
        let op = self.name();
        match self {
            Self::Sum => add_numbers(op, as_number(op, &acc)?, as_number(op, value)?),
            Self::Product => mul_numbers(op, as_number(op, &acc)?, as_number(op, value)?),
            Self::Count => {
                integer_value(op, as_integer(op, &acc)? + 1)
            }
            Self::Max | Self::Min => {
                let candidate = as_number(op, value)?;
                if acc.is_null() {
                    return Ok(value.clone());
                }
                let order = compare_numbers(candidate, as_number(op, &acc)?);
                let replace = match self {
                    Self::Max => order == Ordering::Greater,
                    _ => order == Ordering::Less,
                };
                Ok(if replace { value.clone() } else { acc })
            }
            Self::Join(separator) => {
                let text = as_str(op, value)?;
                let so_far = as_str(op, &acc)?;
                // the first text is taken alone so no leading separator appears
                if so_far.is_empty() {
                    Ok(Value::String(text.to_string()))
                } else {
                    Ok(Value::String(format!("{so_far}{separator}{text}")))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_square_keeps_integers() {
        assert_eq!(MapFn::Square.apply(&json!(12)).unwrap(), json!(144));
        assert_eq!(MapFn::Square.apply(&json!(1.5)).unwrap(), json!(2.25));
    }

    #[test]
    fn test_square_overflow() {
        let err = MapFn::Square.apply(&json!(i64::MAX)).unwrap_err();
        assert_eq!(err, OpError::Overflow { op: "square" });
    }

    #[test]
    fn test_add_mixed_numbers() {
        assert_eq!(MapFn::Add(1.into()).apply(&json!(890)).unwrap(), json!(891));
        let half = Number::from_f64(0.5).unwrap();
        assert_eq!(MapFn::Add(half).apply(&json!(1)).unwrap(), json!(1.5));
    }

    #[test]
    fn test_integers_above_i64_stay_integral() {
        let past_i64 = MapFn::Add(1.into()).apply(&json!(i64::MAX)).unwrap();
        assert_eq!(past_i64, json!(i64::MAX as u64 + 1));
        assert_eq!(
            MapFn::Square.apply(&json!(4_000_000_000u64)).unwrap(),
            json!(16_000_000_000_000_000_000u64)
        );
        let sum = Combine::Sum.combine(json!(u64::MAX - 1), &json!(1)).unwrap();
        assert_eq!(sum, json!(u64::MAX));
    }

    #[test]
    fn test_integer_overflow_past_u64() {
        assert_eq!(
            MapFn::Add(1.into()).apply(&json!(u64::MAX)),
            Err(OpError::Overflow { op: "add" })
        );
        assert_eq!(
            MapFn::Square.apply(&json!(10_000_000_000_000_000_000u64)),
            Err(OpError::Overflow { op: "square" })
        );
        assert_eq!(
            MapFn::Scale(2.0).apply(&json!(u64::MAX)),
            Err(OpError::Overflow { op: "scale" })
        );
    }

    #[test]
    fn test_parity_of_large_unsigned() {
        assert!(Predicate::Odd.test(&json!(u64::MAX)).unwrap());
        assert!(Predicate::DivisibleBy(3).test(&json!(u64::MAX)).unwrap());
    }

    #[test]
    fn test_scale_truncates_integers() {
        let ten_percent = MapFn::Scale(1.1);
        assert_eq!(ten_percent.apply(&json!(1000)).unwrap(), json!(1100));
        assert_eq!(ten_percent.apply(&json!(2500)).unwrap(), json!(2750));
        assert_eq!(MapFn::Scale(0.5).apply(&json!(5)).unwrap(), json!(2));
        assert_eq!(MapFn::Scale(0.5).apply(&json!(5.0)).unwrap(), json!(2.5));
    }

    #[test]
    fn test_prefix_and_suffix() {
        let greeting = MapFn::Prefix("Call me ".to_string());
        assert_eq!(greeting.apply(&json!("Saul")).unwrap(), json!("Call me Saul"));
        let text = MapFn::Suffix(" is a text".to_string());
        assert_eq!(text.apply(&json!("This")).unwrap(), json!("This is a text"));
    }

    #[test]
    fn test_type_mismatch_names_the_op() {
        let err = MapFn::Square.apply(&json!("ten")).unwrap_err();
        assert_eq!(err.to_string(), "square expects number, found string");
    }

    #[test]
    fn test_parity_requires_integers() {
        assert!(Predicate::Even.test(&json!(890)).unwrap());
        assert!(Predicate::Odd.test(&json!(-3)).unwrap());
        assert!(matches!(
            Predicate::Even.test(&json!(2.5)),
            Err(OpError::TypeMismatch {
                expected: "integer",
                ..
            })
        ));
    }

    #[test]
    fn test_divisible_by_zero() {
        assert_eq!(
            Predicate::DivisibleBy(0).test(&json!(3)),
            Err(OpError::ZeroDivisor)
        );
        assert!(Predicate::DivisibleBy(3).test(&json!(891)).unwrap());
    }

    #[test]
    fn test_in_range_closed() {
        let range = Predicate::InRange { lo: 4.0, hi: 6.0 };
        assert!(range.test(&json!(4)).unwrap());
        assert!(range.test(&json!(6)).unwrap());
        assert!(!range.test(&json!(6.5)).unwrap());
    }

    #[test]
    fn test_string_predicates() {
        assert!(Predicate::EndsWith("png".to_string())
            .test(&json!("image.png"))
            .unwrap());
        assert!(!Predicate::StartsWith("img".to_string())
            .test(&json!("image.png"))
            .unwrap());
    }

    #[test]
    fn test_join_has_no_leading_separator() {
        let join = Combine::Join(" ".to_string());
        let mut acc = join.default_seed();
        for word in ["This", "is", "a", "text"] {
            acc = join.combine(acc, &json!(word)).unwrap();
        }
        assert_eq!(acc, json!("This is a text"));
    }

    #[test]
    fn test_max_min_from_null_seed() {
        let mut max = Combine::Max.default_seed();
        let mut min = Combine::Min.default_seed();
        for v in [json!(3), json!(9), json!(1)] {
            max = Combine::Max.combine(max, &v).unwrap();
            min = Combine::Min.combine(min, &v).unwrap();
        }
        assert_eq!(max, json!(9));
        assert_eq!(min, json!(1));
    }

    #[test]
    fn test_max_min_exact_beyond_f64_precision() {
        let low = json!(9_007_199_254_740_992i64);
        let high = json!(9_007_199_254_740_993i64);
        let fold = |combine: &Combine| {
            [&low, &high].into_iter().try_fold(combine.default_seed(), |acc, v| {
                combine.combine(acc, v)
            })
        };
        assert_eq!(fold(&Combine::Max).unwrap(), high);
        assert_eq!(fold(&Combine::Min).unwrap(), low);

        let unsigned = Combine::Max.combine(json!(u64::MAX - 1), &json!(u64::MAX)).unwrap();
        assert_eq!(unsigned, json!(u64::MAX));
    }

    #[test]
    fn test_max_mixed_float_and_integer() {
        let acc = Combine::Max.combine(json!(2), &json!(2.5)).unwrap();
        assert_eq!(acc, json!(2.5));
        let acc = Combine::Min.combine(acc, &json!(-1)).unwrap();
        assert_eq!(acc, json!(-1));
    }

    #[test]
    fn test_count_ignores_element_type() {
        let acc = Combine::Count.combine(json!(2), &json!("anything")).unwrap();
        assert_eq!(acc, json!(3));
    }

    #[test]
    fn test_ops_deserialize_from_json() {
        let map: MapFn = serde_json::from_value(json!({"add": 1})).unwrap();
        assert_eq!(map, MapFn::Add(1.into()));
        let square: MapFn = serde_json::from_value(json!("square")).unwrap();
        assert_eq!(square, MapFn::Square);
        let range: Predicate =
            serde_json::from_value(json!({"in_range": {"lo": 4, "hi": 6}})).unwrap();
        assert_eq!(range, Predicate::InRange { lo: 4.0, hi: 6.0 });
        let join: Combine = serde_json::from_value(json!({"join": " "})).unwrap();
        assert_eq!(join, Combine::Join(" ".to_string()));
    }
}
