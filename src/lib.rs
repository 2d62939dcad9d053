//! # Sieve
//!
//! Declarative filter schemas for listing screens, compiled three ways from one
//! piece of state.
//!
//! ## Features
//!
//! - **Schema-driven**: a [`FilterConfig`](config::FilterConfig) declares which
//!   fields are searchable, filterable, sortable and date-ranged, with types and operators
//! - **Typed state**: [`FilterValues`](core::FilterValues) holds search, filters, sort and
//!   date range, replaced wholesale on every change
//! - **Backend queries**: two interchangeable [`QueryCompiler`](query::QueryCompiler)
//!   strategies, flat keys with merged ranges or operator-suffixed keys
//! - **Local filtering**: the same operator semantics applied to any `Serialize` collection
//! - **URL state**: serialize to a query string and read it back, typed by the schema
//! - **YAML/JSON schemas**: load configurations from files or strings
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sieve::prelude::*;
//!
//! let config = FilterConfig::new()
//!     .with_search_field(FilterField::text("name"))
//!     .with_filter_field(FilterField::new("price", FieldType::Number))
//!     .with_filter_field(FilterField::text("brand").with_operator(Operator::Like))
//!     .with_sort_option(SortOption::new("price:asc", "Cheapest"))
//!     .with_date_range_field(DateRangeField::new("created_at"));
//!
//! let values = config
//!     .default_values()
//!     .with_search("red")
//!     .with_filter("price_min", 100)
//!     .with_filter("price_max", 500);
//!
//! // Remote endpoint: ?name=red&price=100:500&sort=price:asc
//! let params = FlatQueryStrategy::new().compile(&values, &config);
//!
//! // Locally cached page
//! let visible = apply_filters(&watches, &values, &config);
//!
//! // Address bar
//! let query = UrlCodec::to_query_string(&values);
//! let restored = UrlCodec::restore(&query, &config);
//! ```

pub mod config;
pub mod core;
pub mod eval;
pub mod query;
pub mod store;
pub mod url;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Types ===
    pub use crate::core::{
        error::{ConfigError, ParseError, SieveError},
        field::{FieldType, FilterValue, Operator},
        range::Range,
        sort::{SortDirection, SortSpec},
        values::{DateRange, FilterValues},
    };

    // === Config ===
    pub use crate::config::{
        DateRangeField, FieldOption, FilterConfig, FilterField, RangeSuffixes, SortOption,
    };

    // === Evaluation ===
    pub use crate::eval::{matches, resolve_path};

    // === Backend Queries ===
    pub use crate::query::{
        FlatQueryStrategy, QueryCompiler, QueryParams, QueryValue, SuffixedQueryStrategy,
    };

    // === Local Collections ===
    pub use crate::store::{InMemoryStore, Page, PaginationMeta, QueryableStore, apply_filters};

    // === URL State ===
    pub use crate::url::{FilterValuesPatch, UrlCodec};
}
