//! Sort expressions
//!
//! # Format
//! - `field:asc` or `field` (ascending)
//! - `field:desc` (descending)
//! - several specs separated by `,` are applied in order as tie-breakers:
//!   `brand:asc,price:desc`

use crate::core::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(ParseError::InvalidSortDirection(s.to_string())),
        }
    }
}

/// One `field:direction` sort key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Lenient parse used by evaluators
    ///
    /// An absent or unrecognized direction means ascending. Returns `None`
    /// only when the field part is empty.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (field, direction) = match raw.split_once(':') {
            Some((field, direction)) => (
                field.trim(),
                direction.trim().parse::<SortDirection>().unwrap_or_default(),
            ),
            None => (raw, SortDirection::Asc),
        };
        if field.is_empty() {
            return None;
        }
        Some(Self::new(field, direction))
    }

    /// Strict parse used by config validation
    pub fn parse_strict(raw: &str) -> Result<Self, ParseError> {
        let raw = raw.trim();
        let (field, direction) = match raw.split_once(':') {
            Some((field, direction)) => (field.trim(), direction.trim().parse::<SortDirection>()?),
            None => (raw, SortDirection::Asc),
        };
        if field.is_empty() {
            return Err(ParseError::InvalidSortDirection(raw.to_string()));
        }
        Ok(Self::new(field, direction))
    }

    /// Parse a comma-separated list of sort specs, skipping blank entries
    pub fn parse_list(raw: &str) -> Vec<Self> {
        raw.split(',').filter_map(Self::parse).collect()
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.direction.as_str())
    }
}
