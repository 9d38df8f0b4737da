use std::cell::RefCell;
use std::rc::Rc;

use storefront_core::{BaseEntity, Price};
use storefront_products::Product;

/// Product handle shared between its owner and the orders that reference it.
pub type SharedProduct = Rc<RefCell<Product>>;

/// Order for a quantity of one product.
///
/// `total_price` is fixed when the order is placed. [`BaseEntity::calculate_total`]
/// reprices against the product's current price, so the two drift apart once
/// the product is repriced.
#[derive(Debug, Clone)]
pub struct Order {
    name: String,
    description: String,
    product: SharedProduct,
    quantity: u32,
    total_price: Price,
}

impl Order {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        product: SharedProduct,
        quantity: u32,
    ) -> Self {
        let total_price = product.borrow().price().times(quantity);
        let order = Self {
            name: name.into(),
            description: description.into(),
            product,
            quantity,
            total_price,
        };
        tracing::debug!(
            class = "Order",
            name = %order.name,
            description = %order.description,
            product = %order.product.borrow().name(),
            quantity = order.quantity,
            total_price = %order.total_price,
            "order created"
        );
        order
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn product(&self) -> &SharedProduct {
        &self.product
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Total captured at construction.
    pub fn total_price(&self) -> Price {
        self.total_price
    }
}

impl BaseEntity for Order {
    type Total = Price;

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn calculate_total(&self) -> Price {
        self.product.borrow().price().times(self.quantity)
    }
}

impl core::fmt::Display for Order {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Заказ: {}, Товар: {}, Количество: {}, Общая стоимость: {} руб.",
            self.name,
            self.product.borrow().name(),
            self.quantity,
            self.total_price
        )
    }
}
