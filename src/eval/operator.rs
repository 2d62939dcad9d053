//! Operator semantics
//!
//! One function, [`matches`], decides whether an item's value passes a filter.
//! The backend compilers encode the same operators for a remote endpoint; this
//! is the reference reading of what they mean.
//!
//! - A missing or `null` item value never matches, whatever the operator.
//! - `eq` and `in` compare strictly, without coercion.
//! - `like`, `startsWith`, `endsWith` compare display strings case-insensitively.
//! - `gt`, `gte`, `lt`, `lte`, `between`, `range` dispatch on the declared
//!   field type: numbers numerically, dates as timestamps, anything else as
//!   strings.

use crate::core::field::{FieldType, FilterValue, Operator};
use crate::core::range::Range;
use crate::eval::coerce::{display_string, filter_as_datetime, value_as_datetime, value_as_number};
use serde_json::Value;
use std::cmp::Ordering;

/// Test `item` against `filter` with `operator`
pub fn matches(
    item: Option<&Value>,
    filter: &FilterValue,
    operator: Operator,
    field_type: FieldType,
) -> bool {
    let Some(item) = item.filter(|v| !v.is_null()) else {
        return false;
    };

    match operator {
        Operator::Eq => strict_eq(item, filter),
        Operator::Like => text_match(item, filter, |hay, needle| hay.contains(needle)),
        Operator::StartsWith => text_match(item, filter, |hay, needle| hay.starts_with(needle)),
        Operator::EndsWith => text_match(item, filter, |hay, needle| hay.ends_with(needle)),
        Operator::In => match filter {
            FilterValue::StrList(candidates) => candidates
                .iter()
                .any(|candidate| item.as_str() == Some(candidate.as_str())),
            scalar => strict_eq(item, scalar),
        },
        Operator::Gt => compare(item, filter, field_type).is_some_and(Ordering::is_gt),
        Operator::Gte => compare(item, filter, field_type).is_some_and(Ordering::is_ge),
        Operator::Lt => compare(item, filter, field_type).is_some_and(Ordering::is_lt),
        Operator::Lte => compare(item, filter, field_type).is_some_and(Ordering::is_le),
        Operator::Between | Operator::Range => between(item, filter, field_type),
    }
}

/// Order `item` against `operand` according to `field_type`
///
/// `None` when either side cannot be read as the type the comparison needs.
pub fn compare(item: &Value, operand: &FilterValue, field_type: FieldType) -> Option<Ordering> {
    match field_type {
        FieldType::Number => {
            let left = value_as_number(item)?;
            let right = operand.as_number()?;
            left.partial_cmp(&right)
        }
        FieldType::Date | FieldType::Datetime => {
            let left = value_as_datetime(item)?;
            let right = filter_as_datetime(operand)?;
            Some(left.cmp(&right))
        }
        _ => Some(display_string(item).as_str().cmp(operand.to_param_string().as_str())),
    }
}

fn strict_eq(item: &Value, filter: &FilterValue) -> bool {
    match (item, filter) {
        (Value::String(a), FilterValue::Str(b)) => a == b,
        (Value::Number(a), FilterValue::Num(b)) => a.as_f64() == Some(*b),
        (Value::Bool(a), FilterValue::Bool(b)) => a == b,
        (Value::Array(items), FilterValue::StrList(list)) => {
            items.len() == list.len()
                && items
                    .iter()
                    .zip(list)
                    .all(|(item, expected)| item.as_str() == Some(expected.as_str()))
        }
        _ => false,
    }
}

fn text_match(item: &Value, filter: &FilterValue, test: impl Fn(&str, &str) -> bool) -> bool {
    let haystack = display_string(item).to_lowercase();
    let needle = filter.to_param_string().to_lowercase();
    test(&haystack, &needle)
}

fn between(item: &Value, filter: &FilterValue, field_type: FieldType) -> bool {
    let raw = filter.to_param_string();
    let Some(range) = Range::parse(&raw) else {
        tracing::debug!(value = %raw, "range filter without ':' separator matches nothing");
        return false;
    };
    let (Some(min), Some(max)) = (range.min, range.max) else {
        tracing::debug!(value = %raw, "half-open range filter matches nothing");
        return false;
    };

    let above_min = compare(item, &FilterValue::Str(min), field_type).is_some_and(Ordering::is_ge);
    let below_max = compare(item, &FilterValue::Str(max), field_type).is_some_and(Ordering::is_le);
    above_min && below_max
}
