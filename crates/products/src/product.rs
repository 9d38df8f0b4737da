use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, Price};

use crate::pricing::{PriceRejection, PriceUpdate, PricingOperator, decrease_prompt, is_affirmative};
use crate::record::ProductData;

/// Smartphone-specific attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmartphoneDetails {
    pub efficiency: String,
    pub model: String,
    /// Built-in memory, GB.
    pub memory: u32,
    pub color: String,
}

/// Germination period of lawn grass: a day count or a free-form range ("7-14").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GerminationPeriod {
    Days(u32),
    Text(String),
}

impl From<u32> for GerminationPeriod {
    fn from(days: u32) -> Self {
        Self::Days(days)
    }
}

impl From<&str> for GerminationPeriod {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl core::fmt::Display for GerminationPeriod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GerminationPeriod::Days(days) => write!(f, "{days}"),
            GerminationPeriod::Text(text) => f.write_str(text),
        }
    }
}

/// Lawn-grass-specific attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LawnGrassDetails {
    pub country: String,
    pub germination_period: GerminationPeriod,
    pub color: String,
}

/// Closed set of product variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    Plain,
    Smartphone(SmartphoneDetails),
    LawnGrass(LawnGrassDetails),
}

impl ProductKind {
    /// Variant name used in logs and type-mismatch errors.
    pub fn class_name(&self) -> &'static str {
        match self {
            ProductKind::Plain => "Product",
            ProductKind::Smartphone(_) => "Smartphone",
            ProductKind::LawnGrass(_) => "LawnGrass",
        }
    }

    fn same_variant(&self, other: &ProductKind) -> bool {
        core::mem::discriminant(self) == core::mem::discriminant(other)
    }
}

/// Catalog item: a named, priced stock of goods.
///
/// Price and quantity are taken verbatim on construction. Afterwards the price
/// can only change through [`Product::set_price`].
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    name: String,
    description: String,
    price: Price,
    quantity: u32,
    kind: ProductKind,
}

/// Result of [`Product::new_product`].
#[derive(Debug)]
pub enum NewProduct<'a> {
    /// No product with that name existed; the caller owns a fresh one.
    Created(Product),
    /// An existing product absorbed the incoming stock.
    Merged(&'a mut Product),
}

impl NewProduct<'_> {
    pub fn is_merged(&self) -> bool {
        matches!(self, NewProduct::Merged(_))
    }

    pub fn product(&self) -> &Product {
        match self {
            NewProduct::Created(p) => p,
            NewProduct::Merged(p) => p,
        }
    }
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: impl Into<Price>,
        quantity: u32,
    ) -> Self {
        Self::with_kind(name, description, price, quantity, ProductKind::Plain)
    }

    pub fn smartphone(
        name: impl Into<String>,
        description: impl Into<String>,
        price: impl Into<Price>,
        quantity: u32,
        details: SmartphoneDetails,
    ) -> Self {
        Self::with_kind(name, description, price, quantity, ProductKind::Smartphone(details))
    }

    pub fn lawn_grass(
        name: impl Into<String>,
        description: impl Into<String>,
        price: impl Into<Price>,
        quantity: u32,
        details: LawnGrassDetails,
    ) -> Self {
        Self::with_kind(name, description, price, quantity, ProductKind::LawnGrass(details))
    }

    pub fn with_kind(
        name: impl Into<String>,
        description: impl Into<String>,
        price: impl Into<Price>,
        quantity: u32,
        kind: ProductKind,
    ) -> Self {
        let product = Self {
            name: name.into(),
            description: description.into(),
            price: price.into(),
            quantity,
            kind,
        };
        tracing::debug!(
            class = product.kind.class_name(),
            name = %product.name,
            description = %product.description,
            price = %product.price,
            quantity = product.quantity,
            "product created"
        );
        product
    }

    /// Build a product from loose data, merging into `existing` on a name match.
    ///
    /// Names are compared case-insensitively. On a match the existing product
    /// gains the incoming quantity and its price becomes the higher of the
    /// two (written through [`Product::set_price`]); the existing instance is
    /// handed back instead of a new one.
    ///
    /// Fails without touching the existing product when the merged quantity
    /// would not fit.
    pub fn new_product<'a>(
        data: ProductData,
        existing: Option<&'a mut [Product]>,
        operator: &dyn PricingOperator,
    ) -> DomainResult<NewProduct<'a>> {
        if let Some(existing) = existing {
            let wanted = data.name.to_lowercase();
            if let Some(found) = existing.iter_mut().find(|p| p.name.to_lowercase() == wanted) {
                tracing::debug!(name = %found.name, incoming = data.quantity, "merging duplicate product");
                found.add_quantity(data.quantity)?;
                let target = found.price.max(data.price);
                found.set_price(target, operator);
                return Ok(NewProduct::Merged(found));
            }
        }

        Ok(NewProduct::Created(Product::new(
            data.name,
            data.description,
            data.price,
            data.quantity,
        )))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn kind(&self) -> &ProductKind {
        &self.kind
    }

    /// Add stock. Overflowing the quantity is refused and leaves it unchanged.
    pub fn add_quantity(&mut self, delta: u32) -> DomainResult<()> {
        match self.quantity.checked_add(delta) {
            Some(quantity) => {
                self.quantity = quantity;
                Ok(())
            }
            None => {
                tracing::warn!(
                    name = %self.name,
                    quantity = self.quantity,
                    delta,
                    "stock quantity overflow"
                );
                Err(DomainError::validation(format!(
                    "quantity of {} cannot grow by {delta} beyond {}",
                    self.name,
                    u32::MAX
                )))
            }
        }
    }

    /// Guarded price write.
    ///
    /// Non-positive prices are refused. A decrease is applied only if the
    /// operator answers `y`. Refusals are reported to the operator and
    /// returned, never raised.
    pub fn set_price(
        &mut self,
        new_price: impl Into<Price>,
        operator: &dyn PricingOperator,
    ) -> PriceUpdate {
        let new_price = new_price.into();
        let old = self.price;

        if !new_price.is_positive() {
            return self.reject(PriceRejection::NonPositive, new_price, operator);
        }

        if new_price < old {
            let answer = operator.ask(&decrease_prompt(old, new_price));
            if !is_affirmative(&answer) {
                return self.reject(PriceRejection::DecreaseCancelled, new_price, operator);
            }
        }

        self.price = new_price;
        tracing::info!(name = %self.name, old = %old, new = %new_price, "price updated");
        PriceUpdate::Applied { old, new: new_price }
    }

    fn reject(
        &self,
        reason: PriceRejection,
        attempted: Price,
        operator: &dyn PricingOperator,
    ) -> PriceUpdate {
        tracing::warn!(
            name = %self.name,
            price = %self.price,
            attempted = %attempted,
            reason = ?reason,
            "price change rejected"
        );
        operator.notify(reason.notice());
        PriceUpdate::Rejected(reason)
    }

    /// Stock value of this product.
    pub fn stock_value(&self) -> Price {
        self.price.times(self.quantity)
    }

    /// Combined stock value of two products of the same variant.
    pub fn combine(&self, other: &Product) -> DomainResult<Price> {
        if !self.kind.same_variant(&other.kind) {
            return Err(DomainError::type_mismatch(format!(
                "cannot combine {} with {}",
                self.kind.class_name(),
                other.kind.class_name()
            )));
        }
        Ok(self.stock_value() + other.stock_value())
    }
}

impl core::ops::Add for &Product {
    type Output = DomainResult<Price>;

    fn add(self, rhs: &Product) -> Self::Output {
        self.combine(rhs)
    }
}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.kind {
            ProductKind::Plain => f.write_str(&self.name)?,
            ProductKind::Smartphone(d) => write!(
                f,
                "{} (Модель: {}, Память: {}GB, Производительность: {}, Цвет: {})",
                self.name, d.model, d.memory, d.efficiency, d.color
            )?,
            ProductKind::LawnGrass(d) => write!(
                f,
                "{} (Производство: {}, Срок прорастания: {} дней, Цвет: {})",
                self.name, d.country, d.germination_period, d.color
            )?,
        }
        write!(f, ", {} руб. Остаток: {} шт.", self.price, self.quantity)
    }
}
