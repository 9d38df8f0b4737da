//! Products domain module.
//!
//! This crate contains the catalog item model: plain products and their
//! specialized variants, the guarded price setter and merge-on-duplicate
//! ingestion. Pure domain logic apart from the console operator.

pub mod pricing;
pub mod product;
pub mod record;

pub use pricing::{
    ConsoleOperator, PriceRejection, PriceUpdate, PricingOperator, ScriptedOperator,
    is_affirmative,
};
pub use product::{
    GerminationPeriod, LawnGrassDetails, NewProduct, Product, ProductKind, SmartphoneDetails,
};
pub use record::{ProductData, ProductRecord};
