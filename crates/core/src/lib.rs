//! `storefront-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the catalog crates
//! (no IO, no presentation).

pub mod entity;
pub mod error;
pub mod money;
pub mod value_object;

pub use entity::BaseEntity;
pub use error::{DomainError, DomainResult};
pub use money::Price;
pub use value_object::ValueObject;
