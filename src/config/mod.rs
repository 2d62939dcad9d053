//! Filter schema loading and management

use crate::core::error::{ConfigError, SieveError};
use crate::core::field::{FieldType, Operator};
use crate::core::sort::SortSpec;
use crate::core::values::FilterValues;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// An enumerated choice for `select` / `multiselect` fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

impl FieldOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// One filterable or searchable attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterField {
    /// Query parameter name and property path into an item (`"variant.color.name"`)
    pub key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, rename = "type")]
    pub field_type: FieldType,

    /// Defaults to `eq` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<Operator>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl FilterField {
    pub fn new(key: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            key: key.into(),
            label: None,
            field_type,
            operator: None,
            options: Vec::new(),
            placeholder: None,
        }
    }

    /// Shorthand for a plain string field, the usual search field
    pub fn text(key: impl Into<String>) -> Self {
        Self::new(key, FieldType::String)
    }

    pub fn with_operator(mut self, operator: Operator) -> Self {
        self.operator = Some(operator);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_options(mut self, options: Vec<FieldOption>) -> Self {
        self.options = options;
        self
    }

    /// Effective operator
    pub fn operator(&self) -> Operator {
        self.operator.unwrap_or_default()
    }
}

/// An enumerated sort choice, `value` being `"field:asc|desc"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOption {
    pub value: String,
    pub label: String,
}

impl SortOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    pub fn specs(&self) -> Vec<SortSpec> {
        SortSpec::parse_list(&self.value)
    }
}

/// A field eligible for a from/to date range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRangeField {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl DateRangeField {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: None,
        }
    }
}

/// Which half of a paired range key a filter holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBound {
    Min,
    Max,
}

impl RangeBound {
    /// Operator the half applies against the base field
    pub fn operator(&self) -> Operator {
        match self {
            RangeBound::Min => Operator::Gte,
            RangeBound::Max => Operator::Lte,
        }
    }
}

/// Suffixes that pair two filter keys into one range (`price_min` + `price_max`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSuffixes {
    pub min: String,
    pub max: String,
}

impl Default for RangeSuffixes {
    fn default() -> Self {
        Self {
            min: "_min".to_string(),
            max: "_max".to_string(),
        }
    }
}

impl RangeSuffixes {
    /// Split `key` into its base name and bound
    ///
    /// The base must be non-empty: a key that is only the suffix is not paired.
    pub fn split<'a>(&self, key: &'a str) -> Option<(&'a str, RangeBound)> {
        let (base, bound) = if let Some(base) = key.strip_suffix(self.min.as_str()) {
            (base, RangeBound::Min)
        } else if let Some(base) = key.strip_suffix(self.max.as_str()) {
            (base, RangeBound::Max)
        } else {
            return None;
        };
        (!base.is_empty()).then_some((base, bound))
    }

    pub fn key_for(&self, base: &str, bound: RangeBound) -> String {
        match bound {
            RangeBound::Min => format!("{}{}", base, self.min),
            RangeBound::Max => format!("{}{}", base, self.max),
        }
    }
}

/// A filter key recognised as one half of a paired range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairedKey<'a> {
    pub base: &'a str,
    pub bound: RangeBound,
    pub field_type: FieldType,
}

/// Complete filter schema for one listing
///
/// Built once by the caller and never mutated; share it freely between threads.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterConfig {
    /// Fields scanned by free-text search
    #[serde(default)]
    pub search_fields: Vec<FilterField>,

    /// Fields addressable by key in `FilterValues::filters`
    #[serde(default)]
    pub filter_fields: Vec<FilterField>,

    #[serde(default)]
    pub sort_options: Vec<SortOption>,

    #[serde(default)]
    pub date_range_fields: Vec<DateRangeField>,

    #[serde(default)]
    pub range_suffixes: RangeSuffixes,
}

impl FilterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, SieveError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::from)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SieveError> {
        let config: Self = serde_yaml::from_str(yaml).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, SieveError> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::from)?;
        Ok(config)
    }

    pub fn with_search_field(mut self, field: FilterField) -> Self {
        self.search_fields.push(field);
        self
    }

    pub fn with_filter_field(mut self, field: FilterField) -> Self {
        self.filter_fields.push(field);
        self
    }

    pub fn with_sort_option(mut self, option: SortOption) -> Self {
        self.sort_options.push(option);
        self
    }

    pub fn with_date_range_field(mut self, field: DateRangeField) -> Self {
        self.date_range_fields.push(field);
        self
    }

    pub fn with_range_suffixes(mut self, suffixes: RangeSuffixes) -> Self {
        self.range_suffixes = suffixes;
        self
    }

    /// Find a filter field by key
    pub fn field(&self, key: &str) -> Option<&FilterField> {
        self.filter_fields.iter().find(|f| f.key == key)
    }

    pub fn date_range_field(&self, key: &str) -> Option<&DateRangeField> {
        self.date_range_fields.iter().find(|f| f.key == key)
    }

    /// Sort value every fresh `FilterValues` starts with
    pub fn default_sort(&self) -> Option<&str> {
        self.sort_options.first().map(|o| o.value.as_str())
    }

    /// Fresh filter state for this schema
    pub fn default_values(&self) -> FilterValues {
        FilterValues::defaults(self)
    }

    /// Recognise `key` as one half of a paired range
    ///
    /// The pair is known when either the base field or the suffixed key itself
    /// is declared. The base field's type wins when both are.
    pub fn paired_key<'a>(&self, key: &'a str) -> Option<PairedKey<'a>> {
        let (base, bound) = self.range_suffixes.split(key)?;
        let field_type = self
            .field(base)
            .or_else(|| self.field(key))
            .map(|f| f.field_type)?;
        Some(PairedKey {
            base,
            bound,
            field_type,
        })
    }

    /// Check the schema for authoring mistakes
    ///
    /// Evaluators tolerate every problem reported here; validation is opt-in.
    pub fn validate(&self) -> Result<(), SieveError> {
        let mut seen = HashSet::new();
        for field in &self.filter_fields {
            if !seen.insert(field.key.as_str()) {
                return Err(warn_invalid(ConfigError::DuplicateField {
                    key: field.key.clone(),
                }));
            }
            let operator = field.operator();
            if !operator.is_compatible_with(field.field_type) {
                return Err(warn_invalid(ConfigError::IncompatibleOperator {
                    key: field.key.clone(),
                    operator: operator.to_string(),
                    field_type: field.field_type.to_string(),
                }));
            }
        }

        for option in &self.sort_options {
            let all_valid = option
                .value
                .split(',')
                .all(|raw| SortSpec::parse_strict(raw).is_ok());
            if option.value.trim().is_empty() || !all_valid {
                return Err(warn_invalid(ConfigError::InvalidSortOption {
                    value: option.value.clone(),
                }));
            }
        }

        Ok(())
    }

    /// Check that `values` only refers to what this schema declares
    pub fn check_values(&self, values: &FilterValues) -> Result<(), SieveError> {
        let field = values
            .date_range
            .as_ref()
            .and_then(|r| r.field.as_deref())
            .filter(|f| !f.is_empty());
        match field {
            Some(field) if self.date_range_field(field).is_none() => {
                Err(warn_invalid(ConfigError::UnknownDateRangeField {
                    field: field.to_string(),
                }))
            }
            _ => Ok(()),
        }
    }
}

fn warn_invalid(err: ConfigError) -> SieveError {
    tracing::warn!(code = err.error_code(), "{}", err);
    err.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::values::DateRange;

    fn watch_config() -> FilterConfig {
        FilterConfig::new()
            .with_search_field(FilterField::text("name"))
            .with_filter_field(FilterField::new("price", FieldType::Number))
            .with_filter_field(
                FilterField::new("brand", FieldType::String).with_operator(Operator::Like),
            )
            .with_sort_option(SortOption::new("created_at:desc", "Newest"))
            .with_sort_option(SortOption::new("price:asc", "Cheapest"))
            .with_date_range_field(DateRangeField::new("created_at"))
    }

    #[test]
    fn test_default_sort_is_first_option() {
        assert_eq!(watch_config().default_sort(), Some("created_at:desc"));
        assert_eq!(FilterConfig::new().default_sort(), None);
    }

    #[test]
    fn test_field_lookup() {
        let config = watch_config();
        assert_eq!(config.field("brand").unwrap().operator(), Operator::Like);
        assert_eq!(config.field("price").unwrap().operator(), Operator::Eq);
        assert!(config.field("missing").is_none());
    }

    #[test]
    fn test_paired_key_uses_base_field_type() {
        let config = watch_config();
        let pair = config.paired_key("price_max").unwrap();
        assert_eq!(pair.base, "price");
        assert_eq!(pair.bound, RangeBound::Max);
        assert_eq!(pair.field_type, FieldType::Number);
        assert!(config.paired_key("weight_min").is_none());
        assert!(config.paired_key("_min").is_none());
        assert!(config.paired_key("brand").is_none());
    }

    #[test]
    fn test_paired_key_with_declared_suffixed_field() {
        let config = FilterConfig::new()
            .with_filter_field(FilterField::new("final_amount_min", FieldType::Number));
        let pair = config.paired_key("final_amount_min").unwrap();
        assert_eq!(pair.base, "final_amount");
        assert_eq!(pair.bound.operator(), Operator::Gte);
    }

    #[test]
    fn test_custom_range_suffixes() {
        let config = watch_config().with_range_suffixes(RangeSuffixes {
            min: "From".to_string(),
            max: "To".to_string(),
        });
        assert_eq!(config.paired_key("priceFrom").unwrap().base, "price");
        assert!(config.paired_key("price_min").is_none());
    }

    #[test]
    fn test_yaml_config() {
        let yaml = r#"
searchFields:
  - key: name
filterFields:
  - key: price
    type: number
    operator: between
  - key: status
    type: select
    options:
      - value: active
        label: Active
sortOptions:
  - value: "price:asc"
    label: Cheapest
dateRangeFields:
  - key: created_at
"#;
        let config = FilterConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.search_fields[0].field_type, FieldType::String);
        assert_eq!(config.field("price").unwrap().operator(), Operator::Between);
        assert_eq!(config.field("status").unwrap().options.len(), 1);
        assert_eq!(config.range_suffixes, RangeSuffixes::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_config_unknown_operator() {
        let json = r#"{"filterFields": [{"key": "price", "type": "number", "operator": "near"}]}"#;
        let err = FilterConfig::from_json_str(json).unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_FORMAT_ERROR");
    }

    #[test]
    fn test_validate_duplicate_field() {
        let config = watch_config().with_filter_field(FilterField::text("brand"));
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            SieveError::Config(ConfigError::DuplicateField { ref key }) if key == "brand"
        ));
    }

    #[test]
    fn test_validate_incompatible_operator() {
        let config = FilterConfig::new().with_filter_field(
            FilterField::new("price", FieldType::Number).with_operator(Operator::StartsWith),
        );
        assert_eq!(config.validate().unwrap_err().error_code(), "INCOMPATIBLE_OPERATOR");
    }

    #[test]
    fn test_validate_sort_option() {
        let config = watch_config().with_sort_option(SortOption::new("price:up", "?"));
        assert_eq!(config.validate().unwrap_err().error_code(), "INVALID_SORT_OPTION");
    }

    #[test]
    fn test_check_values_date_range_field() {
        let config = watch_config();
        let ok = config
            .default_values()
            .with_date_range(Some(DateRange::new("created_at", Some("2024-01-01"), None)));
        assert!(config.check_values(&ok).is_ok());

        let bad = config
            .default_values()
            .with_date_range(Some(DateRange::new("shipped_at", Some("2024-01-01"), None)));
        assert_eq!(
            config.check_values(&bad).unwrap_err().error_code(),
            "UNKNOWN_DATE_RANGE_FIELD"
        );
    }
}
