//! Catalog module: categories of products and their counters.
//!
//! Categories own their products exclusively. Catalog-wide statistics live in
//! an explicit [`CatalogCounters`] registry shared by every category built
//! from it.

pub mod category;
pub mod counters;

pub use category::{Category, CategoryCursor, CategoryIterator};
pub use counters::{CatalogCounters, CountersSnapshot};
