//! Operator-suffixed keys

use super::{QueryCompiler, QueryParams, QueryValue, SORT_PARAM};
use crate::config::FilterConfig;
use crate::core::field::{FieldType, Operator};
use crate::core::values::FilterValues;

/// Default separator between a key and its operator
pub const DEFAULT_SEPARATOR: &str = "__";

/// Operator-suffixed backend convention
///
/// Each filter is emitted as `key` for `eq` and `key__<operator>` otherwise,
/// using the field's declared operator. Search emits `<field>__like` per
/// search field; an active date range emits `<field>__gte` / `<field>__lte`.
/// Paired `_min`/`_max` keys are not merged. A declared key keeps its own
/// operator; an undeclared one becomes `<base>__gte` / `<base>__lte`.
#[derive(Debug, Clone)]
pub struct SuffixedQueryStrategy {
    separator: String,
}

impl Default for SuffixedQueryStrategy {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl SuffixedQueryStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    /// Parameter name for `key` under `operator`
    pub fn param_key(&self, key: &str, operator: Operator) -> String {
        match operator {
            Operator::Eq => key.to_string(),
            op => format!("{}{}{}", key, self.separator, op),
        }
    }
}

impl QueryCompiler for SuffixedQueryStrategy {
    fn name(&self) -> &'static str {
        "suffixed"
    }

    fn compile(&self, values: &FilterValues, config: &FilterConfig) -> QueryParams {
        let mut params = QueryParams::new();

        if !values.search.is_empty() {
            for field in &config.search_fields {
                params.insert(
                    self.param_key(&field.key, Operator::Like),
                    values.search.as_str(),
                );
            }
        }

        for (key, value) in values.active_filters() {
            let (param, field_type, operator) = match config.field(key) {
                Some(field) => (key, field.field_type, field.operator()),
                None => match config.paired_key(key) {
                    Some(pair) => (pair.base, pair.field_type, pair.bound.operator()),
                    None => {
                        tracing::debug!(key = %key, "skipping filter on unknown field");
                        continue;
                    }
                },
            };
            let param = self.param_key(param, operator);

            let coerced = match (field_type, operator) {
                (_, op) if op.is_ranged() || op == Operator::In => {
                    Some(QueryValue::Text(value.to_param_string()))
                }
                (FieldType::Number, _) => value.as_number().map(QueryValue::Number),
                _ => Some(QueryValue::from(value)),
            };

            match coerced {
                Some(v) => params.insert(param, v),
                None => {
                    tracing::debug!(
                        key = %key,
                        value = %value,
                        "skipping non-numeric number filter"
                    );
                }
            }
        }

        if let Some((field, range)) = values.active_date_range() {
            if let Some(from) = range.from() {
                params.insert(self.param_key(field, Operator::Gte), from);
            }
            if let Some(to) = range.to() {
                params.insert(self.param_key(field, Operator::Lte), to);
            }
        }

        if !values.sort.is_empty() {
            params.insert(SORT_PARAM, values.sort.as_str());
        }

        tracing::trace!(strategy = self.name(), params = params.len(), "compiled backend query");
        params
    }
}
