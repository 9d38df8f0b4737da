//! Sales module: single-product orders.
//!
//! This crate contains order pricing on top of the product model, implemented
//! as deterministic domain logic (no IO, no storage).

pub mod order;

pub use order::{Order, SharedProduct};
