//! Filter state
//!
//! `FilterValues` is replaced wholesale on every change: each `with_*` helper
//! consumes the old state and returns a new one.

use crate::config::FilterConfig;
use crate::core::field::FilterValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An optional from/to range over one date field
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

impl DateRange {
    pub fn new(field: impl Into<String>, from: Option<&str>, to: Option<&str>) -> Self {
        Self {
            field: Some(field.into()),
            from: from.filter(|s| !s.is_empty()).map(String::from),
            to: to.filter(|s| !s.is_empty()).map(String::from),
        }
    }

    /// A range with neither bound is the same as no range at all
    pub fn has_bounds(&self) -> bool {
        self.from.as_deref().is_some_and(|s| !s.is_empty())
            || self.to.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Field name, when set and the range has at least one bound
    pub fn active_field(&self) -> Option<&str> {
        self.field
            .as_deref()
            .filter(|f| !f.is_empty() && self.has_bounds())
    }

    pub fn from(&self) -> Option<&str> {
        self.from.as_deref().filter(|s| !s.is_empty())
    }

    pub fn to(&self) -> Option<&str> {
        self.to.as_deref().filter(|s| !s.is_empty())
    }
}

/// Current search, filter, sort and date-range state of one listing
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterValues {
    #[serde(default)]
    pub search: String,

    /// Absence of a key means "not filtering on that field"
    #[serde(default)]
    pub filters: IndexMap<String, FilterValue>,

    #[serde(default)]
    pub sort: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
}

impl FilterValues {
    /// Fresh state: no search, no filters, first configured sort option
    pub fn defaults(config: &FilterConfig) -> Self {
        Self {
            sort: config.default_sort().unwrap_or_default().to_string(),
            ..Self::default()
        }
    }

    pub fn with_search(self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            ..self
        }
    }

    /// Set a filter; an empty value clears the key instead of being stored
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        let key = key.into();
        let value = value.into();
        if value.is_empty() {
            self.filters.shift_remove(&key);
        } else {
            self.filters.insert(key, value);
        }
        self
    }

    pub fn without_filter(mut self, key: &str) -> Self {
        self.filters.shift_remove(key);
        self
    }

    pub fn with_sort(self, sort: impl Into<String>) -> Self {
        Self {
            sort: sort.into(),
            ..self
        }
    }

    /// Set the date range; a range without bounds is stored as `None`
    pub fn with_date_range(self, date_range: Option<DateRange>) -> Self {
        Self {
            date_range: date_range.filter(DateRange::has_bounds),
            ..self
        }
    }

    /// Reset search, filters and date range, keeping the sort
    pub fn cleared(self) -> Self {
        Self {
            sort: self.sort,
            ..Self::default()
        }
    }

    /// Date range with a field and at least one bound
    pub fn active_date_range(&self) -> Option<(&str, &DateRange)> {
        let range = self.date_range.as_ref()?;
        range.active_field().map(|field| (field, range))
    }

    /// Filters with non-empty values, in insertion order
    pub fn active_filters(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.filters
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.as_str(), v))
    }

    pub fn has_active_filters(&self) -> bool {
        !self.search.is_empty()
            || self.active_filters().next().is_some()
            || self.active_date_range().is_some()
    }
}
