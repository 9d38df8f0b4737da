//! Loosely typed product descriptions (catalog ingestion input).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use storefront_core::{DomainError, DomainResult, Price};

use crate::product::{GerminationPeriod, LawnGrassDetails, Product, SmartphoneDetails};

/// Field mapping accepted by [`Product::new_product`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductData {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub quantity: u32,
}

impl ProductData {
    pub fn from_json(value: &Value) -> DomainResult<Self> {
        Self::deserialize(value).map_err(|e| DomainError::validation(e.to_string()))
    }
}

/// Any product variant as a `kind`-tagged record.
///
/// ```json
/// {"kind": "smartphone", "name": "iPhone", "description": "256GB", "price": 120000.0,
///  "quantity": 5, "efficiency": "Высокая", "model": "iPhone 13", "memory": 256, "color": "Черный"}
/// ```
///
/// A record without `kind` is read as a plain product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProductRecord {
    Product {
        name: String,
        description: String,
        price: Price,
        quantity: u32,
    },
    Smartphone {
        name: String,
        description: String,
        price: Price,
        quantity: u32,
        efficiency: String,
        model: String,
        memory: u32,
        color: String,
    },
    LawnGrass {
        name: String,
        description: String,
        price: Price,
        quantity: u32,
        country: String,
        germination_period: GerminationPeriod,
        color: String,
    },
}

impl ProductRecord {
    /// Decode a record, rejecting anything that does not describe a product.
    pub fn from_json(value: &Value) -> DomainResult<Self> {
        let not_a_product = |e: serde_json::Error| {
            DomainError::type_mismatch(format!("expected a product record: {e}"))
        };

        match value {
            Value::Object(map) if map.contains_key("kind") => {
                Self::deserialize(value).map_err(not_a_product)
            }
            Value::Object(_) => {
                let data = ProductData::deserialize(value).map_err(not_a_product)?;
                Ok(data.into())
            }
            other => Err(DomainError::type_mismatch(format!(
                "expected a product record, got {}",
                json_type_name(other)
            ))),
        }
    }

    pub fn into_product(self) -> Product {
        match self {
            ProductRecord::Product { name, description, price, quantity } => {
                Product::new(name, description, price, quantity)
            }
            ProductRecord::Smartphone {
                name,
                description,
                price,
                quantity,
                efficiency,
                model,
                memory,
                color,
            } => Product::smartphone(
                name,
                description,
                price,
                quantity,
                SmartphoneDetails { efficiency, model, memory, color },
            ),
            ProductRecord::LawnGrass {
                name,
                description,
                price,
                quantity,
                country,
                germination_period,
                color,
            } => Product::lawn_grass(
                name,
                description,
                price,
                quantity,
                LawnGrassDetails { country, germination_period, color },
            ),
        }
    }
}

impl From<ProductData> for ProductRecord {
    fn from(data: ProductData) -> Self {
        ProductRecord::Product {
            name: data.name,
            description: data.description,
            price: data.price,
            quantity: data.quantity,
        }
    }
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        record.into_product()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
