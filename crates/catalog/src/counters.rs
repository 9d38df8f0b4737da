//! Catalog-wide category/product counters.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

#[derive(Debug, Default)]
struct Counts {
    categories: AtomicU64,
    products: AtomicU64,
}

/// Shared counter registry.
///
/// Cloning yields another handle to the same counts. Both counts only ever
/// grow: removing a category or product is not a thing in this model.
#[derive(Debug, Clone, Default)]
pub struct CatalogCounters {
    inner: Arc<Counts>,
}

/// Point-in-time copy of the counters.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountersSnapshot {
    pub category_count: u64,
    pub product_count: u64,
}

impl CatalogCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of categories ever built against this registry.
    pub fn category_count(&self) -> u64 {
        self.inner.categories.load(Ordering::Relaxed)
    }

    /// Number of products ever added to those categories.
    pub fn product_count(&self) -> u64 {
        self.inner.products.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> CountersSnapshot {
        CountersSnapshot {
            category_count: self.category_count(),
            product_count: self.product_count(),
        }
    }

    pub(crate) fn record_category(&self, initial_products: usize) {
        self.inner.categories.fetch_add(1, Ordering::Relaxed);
        self.record_products(initial_products);
    }

    pub(crate) fn record_products(&self, added: usize) {
        self.inner.products.fetch_add(added as u64, Ordering::Relaxed);
    }
}
