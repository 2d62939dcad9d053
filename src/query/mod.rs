//! Backend query compilation
//!
//! A [`QueryCompiler`] turns [`FilterValues`] into the flat parameter map a
//! remote listing endpoint expects. Two backend contracts exist and both are
//! supported, selected by the caller:
//!
//! - [`FlatQueryStrategy`]: one parameter per filter, paired `x_min`/`x_max`
//!   keys merged into `x = "min:max"`, date ranges as compact timestamps.
//! - [`SuffixedQueryStrategy`]: operator-suffixed keys (`price__gte`,
//!   `name__like`), one parameter per filter with no merging.
//!
//! # Example
//! ```rust,ignore
//! let compiler: Box<dyn QueryCompiler> = Box::new(FlatQueryStrategy::new());
//! let params = compiler.compile(&values, &config);
//! // GET /watches?brand=Seiko&price=100:500&sort=price:asc
//! ```

pub mod flat;
pub mod suffixed;

pub use flat::FlatQueryStrategy;
pub use suffixed::SuffixedQueryStrategy;

use crate::config::FilterConfig;
use crate::core::field::{FilterValue, format_number};
use crate::core::values::FilterValues;
use indexmap::IndexMap;
use indexmap::map::Iter;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

/// Parameter name carrying the sort expression in every strategy
pub const SORT_PARAM: &str = "sort";

/// Compiles filter state into backend query parameters
///
/// Implementations are pure: no I/O, no shared state. Unknown filter keys are
/// skipped, never reported.
pub trait QueryCompiler: Send + Sync {
    /// Strategy name, used in logs
    fn name(&self) -> &'static str;

    fn compile(&self, values: &FilterValues, config: &FilterConfig) -> QueryParams;
}

/// A backend parameter value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Text(s) => f.write_str(s),
            QueryValue::Number(n) => f.write_str(&format_number(*n)),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Text(value)
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        QueryValue::Number(value)
    }
}

/// Pass a filter value through unchanged, lists joined with `,`
impl From<&FilterValue> for QueryValue {
    fn from(value: &FilterValue) -> Self {
        match value {
            FilterValue::Num(n) => QueryValue::Number(*n),
            other => QueryValue::Text(other.to_param_string()),
        }
    }
}

/// Ordered backend parameter map
///
/// Re-inserting a key replaces its value in place, so later compilation
/// rules override earlier ones without reordering the map.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct QueryParams(IndexMap<String, QueryValue>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, String, QueryValue> {
        self.0.iter()
    }

    /// String pairs, ready for a transport to encode
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(k, v)| (k.clone(), v.to_string()))
            .collect()
    }

    pub fn into_inner(self) -> IndexMap<String, QueryValue> {
        self.0
    }
}

impl<'a> IntoIterator for &'a QueryParams {
    type Item = (&'a String, &'a QueryValue);
    type IntoIter = Iter<'a, String, QueryValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Time-of-day suffix appended to a compact `from` date
pub const START_OF_DAY_SUFFIX: &str = "000000";

/// Time-of-day suffix appended to a compact `to` date
pub const END_OF_DAY_SUFFIX: &str = "235959";

/// Normalize a date to `YYYYMMDD` followed by `time_suffix`
///
/// Separators are stripped and only the date digits kept, so `"2024-01-31"`,
/// `"2024/01/31"` and `"2024-01-31T10:00"` all give `"20240131"`. Returns
/// `None` when fewer than eight digits remain.
pub fn compact_date(raw: &str, time_suffix: &str) -> Option<String> {
    static NON_DIGITS: OnceLock<Regex> = OnceLock::new();
    let regex = NON_DIGITS.get_or_init(|| Regex::new(r"\D").unwrap());

    let digits = regex.replace_all(raw, "");
    let date = digits.get(..8)?;
    Some(format!("{}{}", date, time_suffix))
}
