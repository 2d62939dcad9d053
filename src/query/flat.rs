//! One parameter per filter, with merged ranges

use super::{
    END_OF_DAY_SUFFIX, QueryCompiler, QueryParams, QueryValue, SORT_PARAM, START_OF_DAY_SUFFIX,
    compact_date,
};
use crate::config::{FilterConfig, RangeBound};
use crate::core::field::FieldType;
use crate::core::range::Range;
use crate::core::values::FilterValues;

/// Flat-key backend convention
///
/// Rules, applied in order; later rules overwrite earlier keys:
///
/// 1. A non-empty search emits `<search field key> = <search>` for every
///    search field.
/// 2. Every non-empty filter on a known field is emitted under its own key,
///    numbers coerced for `number` fields. Paired keys (`price_min`,
///    `price_max`) merge into one `price = "min:max"` parameter, either half
///    left empty when absent.
/// 3. An active date range emits `<field> = "YYYYMMDD000000:YYYYMMDD235959"`.
/// 4. A non-empty sort emits `sort` verbatim.
#[derive(Debug, Clone, Default)]
pub struct FlatQueryStrategy;

impl FlatQueryStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl QueryCompiler for FlatQueryStrategy {
    fn name(&self) -> &'static str {
        "flat"
    }

    fn compile(&self, values: &FilterValues, config: &FilterConfig) -> QueryParams {
        let mut params = QueryParams::new();

        if !values.search.is_empty() {
            for field in &config.search_fields {
                params.insert(field.key.as_str(), values.search.as_str());
            }
        }

        for (key, value) in values.active_filters() {
            if let Some(pair) = config.paired_key(key) {
                let half = |bound| {
                    values
                        .filters
                        .get(&config.range_suffixes.key_for(pair.base, bound))
                        .filter(|v| !v.is_empty())
                };
                let range = Range::from_values(half(RangeBound::Min), half(RangeBound::Max));
                params.insert(pair.base, range.encode());
                continue;
            }

            let Some(field) = config.field(key) else {
                tracing::debug!(key = %key, "skipping filter on unknown field");
                continue;
            };

            match field.field_type {
                FieldType::Number if !field.operator().is_ranged() => match value.as_number() {
                    Some(n) => params.insert(key, n),
                    None => {
                        tracing::debug!(
                            key = %key,
                            value = %value,
                            "skipping non-numeric number filter"
                        );
                    }
                },
                _ => params.insert(key, value),
            }
        }

        if let Some((field, range)) = values.active_date_range() {
            let from = range
                .from()
                .and_then(|d| compact_date(d, START_OF_DAY_SUFFIX))
                .unwrap_or_default();
            let to = range
                .to()
                .and_then(|d| compact_date(d, END_OF_DAY_SUFFIX))
                .unwrap_or_default();
            if from.is_empty() && to.is_empty() {
                tracing::debug!(field = %field, "skipping date range without a readable bound");
            } else {
                params.insert(field, QueryValue::Text(format!("{}:{}", from, to)));
            }
        }

        if !values.sort.is_empty() {
            params.insert(SORT_PARAM, values.sort.as_str());
        }

        tracing::trace!(strategy = self.name(), params = params.len(), "compiled backend query");
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DateRangeField, FilterField, SortOption};
    use crate::core::field::Operator;
    use crate::core::values::DateRange;

    fn config() -> FilterConfig {
        FilterConfig::new()
            .with_search_field(FilterField::text("name"))
            .with_search_field(FilterField::text("sku"))
            .with_filter_field(FilterField::new("price", FieldType::Number))
            .with_filter_field(FilterField::new("brand", FieldType::String))
            .with_filter_field(FilterField::new("stock", FieldType::Number))
            .with_sort_option(SortOption::new("created_at:desc", "Newest"))
            .with_date_range_field(DateRangeField::new("created_at"))
    }

    fn compile(values: &FilterValues) -> QueryParams {
        FlatQueryStrategy::new().compile(values, &config())
    }

    #[test]
    fn test_search_emitted_per_search_field() {
        let params = compile(&FilterValues::default().with_search("red"));
        assert_eq!(params.get("name"), Some(&QueryValue::from("red")));
        assert_eq!(params.get("sku"), Some(&QueryValue::from("red")));
    }

    #[test]
    fn test_min_max_merge_into_one_param() {
        let values = FilterValues::default()
            .with_filter("price_min", 100)
            .with_filter("price_max", 500);
        let params = compile(&values);
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("price"), Some(&QueryValue::from("100:500")));
        assert!(!params.contains_key("price_min"));
    }

    #[test]
    fn test_half_open_pairs() {
        let min_only = compile(&FilterValues::default().with_filter("price_min", 100));
        assert_eq!(min_only.get("price"), Some(&QueryValue::from("100:")));

        let max_only = compile(&FilterValues::default().with_filter("price_max", "500"));
        assert_eq!(max_only.get("price"), Some(&QueryValue::from(":500")));
    }

    #[test]
    fn test_number_fields_are_coerced() {
        let values = FilterValues::default()
            .with_filter("stock", "12")
            .with_filter("brand", "Seiko");
        let params = compile(&values);
        assert_eq!(params.get("stock"), Some(&QueryValue::Number(12.0)));
        assert_eq!(params.get("brand"), Some(&QueryValue::from("Seiko")));
    }

    #[test]
    fn test_unparseable_number_is_skipped() {
        let params = compile(&FilterValues::default().with_filter("stock", "many"));
        assert!(params.is_empty());
    }

    #[test]
    fn test_unknown_keys_are_skipped() {
        let values = FilterValues::default()
            .with_filter("legacy_flag", "1")
            .with_filter("weight_min", 3);
        assert!(compile(&values).is_empty());
    }

    #[test]
    fn test_compact_date_range() {
        let both = FilterValues::default().with_date_range(Some(DateRange::new(
            "created_at",
            Some("2024-01-01"),
            Some("2024-01-31"),
        )));
        assert_eq!(
            compile(&both).get("created_at"),
            Some(&QueryValue::from("20240101000000:20240131235959"))
        );

        let from_only = FilterValues::default()
            .with_date_range(Some(DateRange::new("created_at", Some("2024-01-01"), None)));
        assert_eq!(
            compile(&from_only).get("created_at"),
            Some(&QueryValue::from("20240101000000:"))
        );

        let to_only = FilterValues::default()
            .with_date_range(Some(DateRange::new("created_at", None, Some("2024-01-31"))));
        assert_eq!(
            compile(&to_only).get("created_at"),
            Some(&QueryValue::from(":20240131235959"))
        );
    }

    #[test]
    fn test_sort_emitted_last_and_verbatim() {
        let values = FilterValues::defaults(&config()).with_filter("brand", "Seiko");
        let pairs = compile(&values).to_pairs();
        assert_eq!(pairs.last(), Some(&("sort".to_string(), "created_at:desc".to_string())));
    }

    #[test]
    fn test_filter_overrides_search_param_of_same_name() {
        let config = config().with_filter_field(FilterField::text("name"));
        let values = FilterValues::default()
            .with_search("red")
            .with_filter("name", "Red Watch");
        let params = FlatQueryStrategy::new().compile(&values, &config);
        assert_eq!(params.get("name"), Some(&QueryValue::from("Red Watch")));
    }

    #[test]
    fn test_ranged_number_field_passes_text_through() {
        let config = config().with_filter_field(
            FilterField::new("diameter", FieldType::Number).with_operator(Operator::Between),
        );
        let values = FilterValues::default().with_filter("diameter", "38:42");
        let params = FlatQueryStrategy::new().compile(&values, &config);
        assert_eq!(params.get("diameter"), Some(&QueryValue::from("38:42")));
    }
}
