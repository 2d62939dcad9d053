//! In-memory filtering and sorting
//!
//! Applies [`FilterValues`] to a local collection with the same operator
//! semantics the backend compilers encode. The pipeline narrows in four
//! stages: search, per-field filters, date range, then sort.
//!
//! Items are read through their serde JSON form, so any `Serialize` type
//! works and fields are addressed by the same dot paths as the schema.

use crate::config::FilterConfig;
use crate::core::sort::{SortDirection, SortSpec};
use crate::core::values::FilterValues;
use crate::eval::coerce::{display_string, end_of_day, parse_datetime, value_as_datetime};
use crate::eval::operator::matches;
use crate::eval::path::{resolve_path, resolve_present};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::cmp::Ordering;

/// An item paired with its JSON reading
#[derive(Debug, Clone)]
pub struct Entry<T> {
    pub item: T,
    pub doc: Value,
}

impl<T: Serialize> Entry<T> {
    /// `None` when the item cannot be represented as JSON
    pub fn new(item: T) -> Option<Self> {
        match serde_json::to_value(&item) {
            Ok(doc) => Some(Self { item, doc }),
            Err(e) => {
                tracing::debug!(error = %e, "excluding item that does not serialize");
                None
            }
        }
    }
}

/// Filter and sort `data` without touching it
pub fn apply_filters<T>(data: &[T], values: &FilterValues, config: &FilterConfig) -> Vec<T>
where
    T: Serialize + Clone,
{
    let entries: Vec<Entry<T>> = data.iter().cloned().filter_map(Entry::new).collect();
    let total = entries.len();

    let entries = apply_search(entries, &values.search, config);
    let entries = apply_field_filters(entries, values, config);
    let entries = apply_date_range(entries, values);
    let entries = apply_sort(entries, &values.sort);

    tracing::trace!(total, kept = entries.len(), "applied client-side filters");
    entries.into_iter().map(|e| e.item).collect()
}

/// Keep entries where any search field contains the trimmed, lowercased term
///
/// A blank term leaves entries untouched. A term against a schema without
/// search fields keeps nothing.
pub fn apply_search<T>(
    entries: Vec<Entry<T>>,
    search: &str,
    config: &FilterConfig,
) -> Vec<Entry<T>> {
    let term = search.trim().to_lowercase();
    if term.is_empty() {
        return entries;
    }
    if config.search_fields.is_empty() {
        tracing::debug!(search = %term, "search without search fields matches nothing");
    }

    entries
        .into_iter()
        .filter(|entry| {
            config.search_fields.iter().any(|field| {
                resolve_present(&entry.doc, &field.key)
                    .is_some_and(|v| display_string(v).to_lowercase().contains(&term))
            })
        })
        .collect()
}

/// Keep entries passing every non-empty filter
///
/// Paired keys (`price_min`, `price_max`) test the base field (`price`) with
/// `gte` / `lte`. Unknown keys are skipped.
pub fn apply_field_filters<T>(
    mut entries: Vec<Entry<T>>,
    values: &FilterValues,
    config: &FilterConfig,
) -> Vec<Entry<T>> {
    for (key, value) in values.active_filters() {
        let (path, operator, field_type) = if let Some(pair) = config.paired_key(key) {
            (pair.base, pair.bound.operator(), pair.field_type)
        } else if let Some(field) = config.field(key) {
            (field.key.as_str(), field.operator(), field.field_type)
        } else {
            tracing::debug!(key = %key, "skipping filter on unknown field");
            continue;
        };

        entries.retain(|entry| {
            matches(resolve_path(&entry.doc, path), value, operator, field_type)
        });
    }
    entries
}

/// Keep entries whose date field falls within the active range
///
/// `to` is inclusive of its whole day (`23:59:59.999`). Entries with a missing
/// or unparseable date are always dropped; an unparseable bound only stops
/// bounding.
pub fn apply_date_range<T>(mut entries: Vec<Entry<T>>, values: &FilterValues) -> Vec<Entry<T>> {
    let Some((field, range)) = values.active_date_range() else {
        return entries;
    };

    let from = range.from().and_then(|raw| {
        let bound = parse_datetime(raw);
        if bound.is_none() {
            tracing::debug!(field = %field, from = %raw, "ignoring unparseable date range bound");
        }
        bound
    });
    let to = range.to().and_then(|raw| {
        let bound = end_of_day(raw);
        if bound.is_none() {
            tracing::debug!(field = %field, to = %raw, "ignoring unparseable date range bound");
        }
        bound
    });
    entries.retain(|entry| {
        let Some(date) = resolve_present(&entry.doc, field).and_then(value_as_datetime) else {
            return false;
        };
        from.is_none_or(|from| date >= from) && to.is_none_or(|to| date <= to)
    });
    entries
}

/// Stable sort by one or more `field:direction` specs
///
/// Equal entries keep their relative order. An empty or unparseable sort
/// leaves the order unchanged.
pub fn apply_sort<T>(entries: Vec<Entry<T>>, sort: &str) -> Vec<Entry<T>> {
    let specs = SortSpec::parse_list(sort);
    if specs.is_empty() {
        return entries;
    }

    let mut keyed: Vec<(Vec<SortKey>, Entry<T>)> = entries
        .into_iter()
        .map(|entry| {
            let keys = specs
                .iter()
                .map(|spec| SortKey::of(resolve_path(&entry.doc, &spec.field)))
                .collect();
            (keys, entry)
        })
        .collect();

    keyed.sort_by(|(a, _), (b, _)| {
        specs
            .iter()
            .zip(a.iter().zip(b))
            .map(|(spec, (x, y))| match spec.direction {
                SortDirection::Asc => x.cmp(y),
                SortDirection::Desc => x.cmp(y).reverse(),
            })
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    });
    keyed.into_iter().map(|(_, entry)| entry).collect()
}

/// Sort reading of one item value
///
/// Numbers compare numerically, date strings as timestamps and everything
/// else as lowercase text. Across kinds, numbers sort before dates and dates
/// before text, so any mix of values is totally ordered. Missing values read
/// as empty text.
#[derive(Debug, Clone)]
pub enum SortKey {
    Number(f64),
    Date(DateTime<Utc>),
    Text(String),
}

impl SortKey {
    pub fn of(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Number(n)) => match n.as_f64() {
                Some(f) => SortKey::Number(f),
                None => SortKey::Text(n.to_string()),
            },
            Some(Value::String(s)) => match parse_datetime(s) {
                Some(date) => SortKey::Date(date),
                None => SortKey::Text(s.to_lowercase()),
            },
            Some(other) => SortKey::Text(display_string(other).to_lowercase()),
            None => SortKey::Text(String::new()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Number(_) => 0,
            SortKey::Date(_) => 1,
            SortKey::Text(_) => 2,
        }
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Date(a), SortKey::Date(b)) => a.cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

/// Compare two item values by their runtime types, as [`SortKey`] orders them
pub fn compare_runtime(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    SortKey::of(a).cmp(&SortKey::of(b))
}
