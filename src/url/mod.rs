//! URL query-string codec for filter state
//!
//! `FilterValues` is written to the address bar so a listing can be shared or
//! reloaded, and read back typed by the schema:
//!
//! ```text
//! ?search=red&sort=price:asc&brand=Seiko&price_min=100&created_at_from=2024-01-01
//! ```
//!
//! Only one date range is representable at a time: on read, the first
//! configured date-range field with a `_from` or `_to` parameter wins.

use crate::config::{FilterConfig, FilterField, RangeBound};
use crate::core::field::{FieldType, FilterValue, Operator};
use crate::core::values::{DateRange, FilterValues};
use ::url::form_urlencoded;
use indexmap::IndexMap;

pub const SEARCH_PARAM: &str = "search";
pub const SORT_PARAM: &str = "sort";
pub const FROM_SUFFIX: &str = "_from";
pub const TO_SUFFIX: &str = "_to";

/// Serializer and deserializer between `FilterValues` and query parameters
pub struct UrlCodec;

impl UrlCodec {
    /// Query parameters for `values`, empty values omitted
    ///
    /// Order: `search`, `sort`, filters in insertion order, then the date
    /// range bounds as `<field>_from` / `<field>_to`.
    pub fn serialize(values: &FilterValues) -> Vec<(String, String)> {
        let mut params = Vec::new();

        if !values.search.is_empty() {
            params.push((SEARCH_PARAM.to_string(), values.search.clone()));
        }
        if !values.sort.is_empty() {
            params.push((SORT_PARAM.to_string(), values.sort.clone()));
        }

        for (key, value) in values.active_filters() {
            let raw = value.to_param_string();
            if !raw.is_empty() {
                params.push((key.to_string(), raw));
            }
        }

        if let Some((field, range)) = values.active_date_range() {
            if let Some(from) = range.from() {
                params.push((format!("{}{}", field, FROM_SUFFIX), from.to_string()));
            }
            if let Some(to) = range.to() {
                params.push((format!("{}{}", field, TO_SUFFIX), to.to_string()));
            }
        }

        params
    }

    /// `application/x-www-form-urlencoded` query string, without the leading `?`
    pub fn to_query_string(values: &FilterValues) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(Self::serialize(values))
            .finish()
    }

    /// Read filter state from query parameters
    ///
    /// Only keys the schema declares are read: each filter field under its own
    /// key and its paired `_min`/`_max` keys, values coerced by the field type.
    /// The first occurrence of a repeated parameter wins.
    pub fn deserialize<I, K, V>(params: I, config: &FilterConfig) -> FilterValuesPatch
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut raw: IndexMap<String, String> = IndexMap::new();
        for (key, value) in params {
            raw.entry(key.as_ref().to_string())
                .or_insert_with(|| value.as_ref().to_string());
        }
        let get = |key: &str| raw.get(key).map(String::as_str).filter(|v| !v.is_empty());

        let mut patch = FilterValuesPatch {
            search: get(SEARCH_PARAM).map(String::from),
            sort: get(SORT_PARAM).map(String::from),
            ..FilterValuesPatch::default()
        };

        for field in &config.filter_fields {
            let keys = [
                field.key.clone(),
                config.range_suffixes.key_for(&field.key, RangeBound::Min),
                config.range_suffixes.key_for(&field.key, RangeBound::Max),
            ];
            for key in keys {
                let Some(value) = get(key.as_str()).and_then(|v| coerce(&key, v, field)) else {
                    continue;
                };
                patch.filters.entry(key).or_insert(value);
            }
        }

        patch.date_range = config.date_range_fields.iter().find_map(|field| {
            let from = get(format!("{}{}", field.key, FROM_SUFFIX).as_str());
            let to = get(format!("{}{}", field.key, TO_SUFFIX).as_str());
            (from.is_some() || to.is_some()).then(|| DateRange::new(field.key.as_str(), from, to))
        });

        patch
    }

    /// Parse a raw query string, with or without the leading `?`
    pub fn parse_query_string(query: &str, config: &FilterConfig) -> FilterValuesPatch {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::deserialize(form_urlencoded::parse(query.as_bytes()), config)
    }

    /// Full filter state for a query string, defaults filling the gaps
    pub fn restore(query: &str, config: &FilterConfig) -> FilterValues {
        Self::parse_query_string(query, config).into_values(config)
    }
}

fn coerce(key: &str, raw: &str, field: &FilterField) -> Option<FilterValue> {
    if field.field_type == FieldType::Multiselect || field.operator() == Operator::In {
        let items: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        return (!items.is_empty()).then_some(FilterValue::StrList(items));
    }

    match field.field_type {
        FieldType::Number if field.operator().is_ranged() => {
            Some(FilterValue::Str(raw.to_string()))
        }
        FieldType::Number => match raw.trim().parse::<f64>() {
            Ok(n) if !n.is_nan() => Some(FilterValue::Num(n)),
            _ => {
                tracing::debug!(key = %key, value = %raw, "dropping non-numeric url parameter");
                None
            }
        },
        FieldType::Boolean => Some(match raw {
            "true" => FilterValue::Bool(true),
            "false" => FilterValue::Bool(false),
            other => FilterValue::Str(other.to_string()),
        }),
        _ => Some(FilterValue::Str(raw.to_string())),
    }
}

/// Filter state read from a URL; absent parts are `None`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterValuesPatch {
    pub search: Option<String>,
    pub sort: Option<String>,
    pub filters: IndexMap<String, FilterValue>,
    pub date_range: Option<DateRange>,
}

impl FilterValuesPatch {
    /// Overlay onto `base`
    ///
    /// The URL is the source of truth for filters: they replace `base.filters`
    /// wholesale. Search, sort and date range override only when present.
    pub fn apply_to(self, base: FilterValues) -> FilterValues {
        FilterValues {
            search: self.search.unwrap_or(base.search),
            filters: self.filters,
            sort: self.sort.unwrap_or(base.sort),
            date_range: self.date_range.or(base.date_range),
        }
    }

    /// Overlay onto the schema's default state
    pub fn into_values(self, config: &FilterConfig) -> FilterValues {
        self.apply_to(FilterValues::defaults(config))
    }
}
