//! Explicit `min:max` ranges
//!
//! Ranges travel as `"min:max"` strings on the wire. Inside the crate they are
//! always a [`Range`], so the string format is parsed and produced in exactly
//! one place.

use crate::core::field::FilterValue;
use crate::eval::coerce::parse_datetime;
use serde::{Deserialize, Serialize};

/// Range separator on the wire
pub const RANGE_SEPARATOR: char = ':';

/// A range with optional bounds, both inclusive
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Range {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
}

impl Range {
    pub fn new(min: Option<String>, max: Option<String>) -> Self {
        Self {
            min: min.filter(|s| !s.is_empty()),
            max: max.filter(|s| !s.is_empty()),
        }
    }

    /// Build from the two halves of a paired filter (`x_min` / `x_max`)
    pub fn from_values(min: Option<&FilterValue>, max: Option<&FilterValue>) -> Self {
        Self::new(
            min.map(FilterValue::to_param_string),
            max.map(FilterValue::to_param_string),
        )
    }

    /// Parse `"min:max"`
    ///
    /// Returns `None` when the separator is missing. Either half may be empty.
    /// Date-times carry `:` themselves, so the split is taken at the first
    /// separator where both halves read as a number, a date or nothing; when
    /// no separator qualifies the first one wins.
    pub fn parse(raw: &str) -> Option<Self> {
        let (min, max) = raw
            .match_indices(RANGE_SEPARATOR)
            .map(|(at, _)| (&raw[..at], &raw[at + RANGE_SEPARATOR.len_utf8()..]))
            .find(|(min, max)| is_bound(min) && is_bound(max))
            .or_else(|| raw.split_once(RANGE_SEPARATOR))?;
        Some(Self::new(
            Some(min.trim().to_string()),
            Some(max.trim().to_string()),
        ))
    }

    /// Encode as `"min:max"`, `"min:"` or `":max"`
    pub fn encode(&self) -> String {
        format!(
            "{}{}{}",
            self.min.as_deref().unwrap_or_default(),
            RANGE_SEPARATOR,
            self.max.as_deref().unwrap_or_default()
        )
    }

    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Both bounds present
    pub fn is_closed(&self) -> bool {
        self.min.is_some() && self.max.is_some()
    }
}

fn is_bound(half: &str) -> bool {
    let half = half.trim();
    half.is_empty() || half.parse::<f64>().is_ok() || parse_datetime(half).is_some()
}
