//! Local collections queried with filter state
//!
//! [`evaluator`] holds the pure pipeline; [`InMemoryStore`] keeps a locally
//! cached page of items and answers queries against it.

pub mod evaluator;
pub mod page;

pub use evaluator::{
    Entry, SortKey, apply_date_range, apply_field_filters, apply_filters, apply_search,
    apply_sort, compare_runtime,
};
pub use page::{DEFAULT_LIMIT, MAX_LIMIT, Page, PaginationMeta};

use crate::config::FilterConfig;
use crate::core::values::FilterValues;
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock};

/// Trait for stores that can be queried with filter state
///
/// Implement this trait for any local collection; filtering, sorting and
/// paging come from the provided methods.
pub trait QueryableStore<T>: Send + Sync
where
    T: Serialize + Clone,
{
    /// Schema the store is queried with
    fn config(&self) -> &FilterConfig;

    /// Get all items (unfiltered, unsorted)
    fn list_all(&self) -> Vec<T>;

    /// Items matching `values`, sorted by `values.sort`
    fn query(&self, values: &FilterValues) -> Vec<T> {
        apply_filters(&self.list_all(), values, self.config())
    }

    /// One page of [`query`](Self::query)
    fn query_page(&self, values: &FilterValues, page: usize, limit: usize) -> Page<T> {
        Page::from_items(self.query(values), page, limit)
    }
}

/// In-memory store for a locally cached collection
///
/// Cheap to clone: clones share the same items and schema. Uses `RwLock` for
/// thread-safe access.
#[derive(Debug)]
pub struct InMemoryStore<T> {
    items: Arc<RwLock<Vec<T>>>,
    config: Arc<FilterConfig>,
}

impl<T> Clone for InMemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            config: Arc::clone(&self.config),
        }
    }
}

impl<T: Clone> InMemoryStore<T> {
    pub fn new(config: FilterConfig) -> Self {
        Self::with_shared_config(Arc::new(config))
    }

    /// Create a store sharing a schema with other stores
    pub fn with_shared_config(config: Arc<FilterConfig>) -> Self {
        Self {
            items: Arc::new(RwLock::new(Vec::new())),
            config,
        }
    }

    pub fn with_items(self, items: Vec<T>) -> Self {
        self.replace(items);
        self
    }

    /// Swap the cached collection for a fresh one
    pub fn replace(&self, items: Vec<T>) {
        let mut guard = self.items.write().unwrap_or_else(PoisonError::into_inner);
        *guard = items;
    }

    pub fn push(&self, item: T) {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(item);
    }

    pub fn len(&self) -> usize {
        self.items.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn shared_config(&self) -> Arc<FilterConfig> {
        Arc::clone(&self.config)
    }
}

impl<T> QueryableStore<T> for InMemoryStore<T>
where
    T: Serialize + Clone + Send + Sync,
{
    fn config(&self) -> &FilterConfig {
        &self.config
    }

    fn list_all(&self) -> Vec<T> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
