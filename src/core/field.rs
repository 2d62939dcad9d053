//! Field types, operators and typed filter values

use crate::core::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declared type of a filterable field
///
/// Governs value coercion and which comparison branch the operators take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    String,
    Number,
    Boolean,
    Date,
    Datetime,
    Select,
    Multiselect,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::Datetime => "datetime",
            FieldType::Select => "select",
            FieldType::Multiselect => "multiselect",
        }
    }

    /// Types whose values are free text or enumerated labels
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            FieldType::String | FieldType::Select | FieldType::Multiselect
        )
    }

    /// Types compared as timestamps by ordering operators
    pub fn is_temporal(&self) -> bool {
        matches!(self, FieldType::Date | FieldType::Datetime)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(FieldType::String),
            "number" => Ok(FieldType::Number),
            "boolean" => Ok(FieldType::Boolean),
            "date" => Ok(FieldType::Date),
            "datetime" => Ok(FieldType::Datetime),
            "select" => Ok(FieldType::Select),
            "multiselect" => Ok(FieldType::Multiselect),
            other => Err(ParseError::UnknownFieldType(other.to_string())),
        }
    }
}

/// Comparison applied between an item's value and a filter value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operator {
    #[default]
    Eq,
    Like,
    StartsWith,
    EndsWith,
    In,
    Gte,
    Lte,
    Gt,
    Lt,
    Between,
    Range,
}

impl Operator {
    pub const ALL: [Operator; 11] = [
        Operator::Eq,
        Operator::Like,
        Operator::StartsWith,
        Operator::EndsWith,
        Operator::In,
        Operator::Gte,
        Operator::Lte,
        Operator::Gt,
        Operator::Lt,
        Operator::Between,
        Operator::Range,
    ];

    /// Wire name, also used as the `key__<operator>` suffix
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Like => "like",
            Operator::StartsWith => "startsWith",
            Operator::EndsWith => "endsWith",
            Operator::In => "in",
            Operator::Gte => "gte",
            Operator::Lte => "lte",
            Operator::Gt => "gt",
            Operator::Lt => "lt",
            Operator::Between => "between",
            Operator::Range => "range",
        }
    }

    /// Substring operators, meaningful on text only
    pub fn is_text_match(&self) -> bool {
        matches!(
            self,
            Operator::Like | Operator::StartsWith | Operator::EndsWith
        )
    }

    /// Operators taking a `"min:max"` value
    pub fn is_ranged(&self) -> bool {
        matches!(self, Operator::Between | Operator::Range)
    }

    /// Whether this operator makes sense for `field_type`
    pub fn is_compatible_with(&self, field_type: FieldType) -> bool {
        if self.is_text_match() {
            return field_type.is_textual();
        }
        if self.is_ranged() {
            return field_type != FieldType::Boolean;
        }
        true
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| ParseError::UnknownOperator(s.to_string()))
    }
}

/// A typed filter value
///
/// Serialized untagged so that a JSON/YAML filter map reads naturally:
/// `{"brand": "Seiko", "price_min": 100, "in_stock": true, "tags": ["a"]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Str(String),
    Num(f64),
    Bool(bool),
    StrList(Vec<String>),
}

impl FilterValue {
    /// Empty values are never stored in a filter map
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Str(s) => s.is_empty(),
            FilterValue::Num(n) => n.is_nan(),
            FilterValue::Bool(_) => false,
            FilterValue::StrList(items) => items.is_empty(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FilterValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Numeric reading of the value, parsing strings
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            FilterValue::Num(n) => *n,
            FilterValue::Str(s) => s.trim().parse::<f64>().ok()?,
            FilterValue::Bool(b) => f64::from(u8::from(*b)),
            FilterValue::StrList(_) => return None,
        };
        (!n.is_nan()).then_some(n)
    }

    /// String form used in query strings and substring matching
    ///
    /// Lists are joined with `,`.
    pub fn to_param_string(&self) -> String {
        match self {
            FilterValue::Str(s) => s.clone(),
            FilterValue::Num(n) => format_number(*n),
            FilterValue::Bool(b) => b.to_string(),
            FilterValue::StrList(items) => items.join(","),
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_param_string())
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Str(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Str(value)
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        FilterValue::Num(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Num(value as f64)
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        FilterValue::Num(f64::from(value))
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(value: Vec<String>) -> Self {
        FilterValue::StrList(value)
    }
}

impl From<Vec<&str>> for FilterValue {
    fn from(value: Vec<&str>) -> Self {
        FilterValue::StrList(value.into_iter().map(String::from).collect())
    }
}

/// Format a number without a trailing `.0` for integral values
///
/// `100.0` renders as `"100"`, `12.5` as `"12.5"`.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
