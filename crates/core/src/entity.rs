//! Shared entity contract for catalog-level objects.

/// Named, described entity that can report a total.
///
/// What "total" means is up to the implementor: a category counts its
/// products, an order prices its line.
pub trait BaseEntity: core::fmt::Display {
    type Total;

    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn calculate_total(&self) -> Self::Total;
}
