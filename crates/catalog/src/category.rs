use serde_json::Value;

use storefront_core::{BaseEntity, DomainResult};
use storefront_products::{NewProduct, PricingOperator, Product, ProductData, ProductRecord};

use crate::counters::CatalogCounters;

/// Named, ordered group of products.
///
/// Products are owned by the category and kept in insertion order. Every
/// construction and every added product is counted in the registry the
/// category was built with.
#[derive(Debug)]
pub struct Category {
    name: String,
    description: String,
    products: Vec<Product>,
    counters: CatalogCounters,
}

impl Category {
    pub fn new(
        counters: &CatalogCounters,
        name: impl Into<String>,
        description: impl Into<String>,
        products: Vec<Product>,
    ) -> Self {
        let category = Self {
            name: name.into(),
            description: description.into(),
            products,
            counters: counters.clone(),
        };
        category.counters.record_category(category.products.len());
        tracing::debug!(
            class = "Category",
            name = %category.name,
            description = %category.description,
            products = category.products.len(),
            "category created"
        );
        category
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn counters(&self) -> &CatalogCounters {
        &self.counters
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Product at `index` in insertion order.
    pub fn get(&self, index: usize) -> Option<&Product> {
        self.products.get(index)
    }

    pub fn add_product(&mut self, product: Product) {
        tracing::debug!(category = %self.name, product = %product.name(), "product added");
        self.products.push(product);
        self.counters.record_products(1);
    }

    /// Add a product described by a loosely typed record.
    ///
    /// Values that do not describe a product are refused with
    /// [`storefront_core::DomainError::TypeMismatch`]; nothing is counted then.
    pub fn add_record(&mut self, record: &Value) -> DomainResult<()> {
        let record = ProductRecord::from_json(record).inspect_err(|e| {
            tracing::warn!(category = %self.name, error = %e, "rejected non-product record");
        })?;
        self.add_product(record.into_product());
        Ok(())
    }

    /// Ingest product data, merging into an existing product of the same name.
    ///
    /// Returns `true` when a new product was appended, `false` when an
    /// existing one absorbed the data. A merge that would overflow the stored
    /// quantity is refused and leaves the category unchanged.
    pub fn ingest(&mut self, data: ProductData, operator: &dyn PricingOperator) -> DomainResult<bool> {
        let created = match Product::new_product(data, Some(self.products.as_mut_slice()), operator)? {
            NewProduct::Merged(_) => None,
            NewProduct::Created(product) => Some(product),
        };

        Ok(match created {
            Some(product) => {
                self.add_product(product);
                true
            }
            None => false,
        })
    }

    /// Rendered product lines, rebuilt on every call.
    pub fn products(&self) -> Vec<String> {
        self.products.iter().map(ToString::to_string).collect()
    }

    pub fn iter(&self) -> CategoryIterator<'_> {
        CategoryIterator::new(self)
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}, количество продуктов: {} шт.", self.name, self.products.len())
    }
}

impl BaseEntity for Category {
    /// Number of products in the category.
    type Total = usize;

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn calculate_total(&self) -> usize {
        self.products.len()
    }
}

/// Position in a category's product list that does not hold the category.
///
/// The category is passed to every [`CategoryCursor::next`] call and the
/// product at the position is rendered from its state at that moment, so
/// products added between steps are reached. The end is checked against the
/// current length on each step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryCursor {
    position: usize,
}

impl CategoryCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the next product to render.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn next(&mut self, category: &Category) -> Option<String> {
        let line = category.get(self.position)?.to_string();
        self.position += 1;
        Some(line)
    }

    pub fn remaining(&self, category: &Category) -> usize {
        category.len().saturating_sub(self.position)
    }
}

/// Single-pass iterator over a category's rendered products.
///
/// Each step renders the product currently at the cursor. The iterator
/// borrows the category, so the category cannot change while it is alive;
/// walk with a [`CategoryCursor`] to interleave steps with additions. Once
/// past the end it keeps returning `None`; build a new iterator to start over.
#[derive(Debug, Clone)]
pub struct CategoryIterator<'a> {
    category: &'a Category,
    cursor: CategoryCursor,
}

impl<'a> CategoryIterator<'a> {
    pub fn new(category: &'a Category) -> Self {
        Self { category, cursor: CategoryCursor::new() }
    }
}

impl Iterator for CategoryIterator<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.cursor.next(self.category)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cursor.remaining(self.category);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CategoryIterator<'_> {}

impl core::iter::FusedIterator for CategoryIterator<'_> {}

impl<'a> IntoIterator for &'a Category {
    type Item = String;
    type IntoIter = CategoryIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use storefront_core::{DomainError, Price};
    use storefront_products::{ScriptedOperator, SmartphoneDetails};

    fn product1() -> Product {
        Product::new("Product 1", "Description 1", 1500.0, 5)
    }

    fn product2() -> Product {
        Product::new("Product 2", "Description 2", 3000.0, 3)
    }

    fn test_category(counters: &CatalogCounters) -> Category {
        Category::new(counters, "Electronics", "Категория электроники", vec![product1(), product2()])
    }

    #[test]
    fn category_creation_stores_fields() {
        let counters = CatalogCounters::new();
        let category = test_category(&counters);

        assert_eq!(category.name(), "Electronics");
        assert_eq!(category.description(), "Категория электроники");
        assert_eq!(
            category.products(),
            vec![
                "Product 1, 1500.0 руб. Остаток: 5 шт.",
                "Product 2, 3000.0 руб. Остаток: 3 шт.",
            ]
        );
    }

    #[test]
    fn construction_counts_category_and_initial_products() {
        let counters = CatalogCounters::new();
        let _category = test_category(&counters);
        assert_eq!(counters.category_count(), 1);
        assert_eq!(counters.product_count(), 2);

        let _empty = Category::new(&counters, "Пусто", "Нет товаров", Vec::new());
        assert_eq!(counters.category_count(), 2);
        assert_eq!(counters.product_count(), 2);
    }

    #[test]
    fn add_product_appends_and_counts() {
        let counters = CatalogCounters::new();
        let mut category = test_category(&counters);

        category.add_product(Product::new("55\" QLED 4K", "Фоновая подсветка", 123000.0, 7));

        assert_eq!(category.len(), 3);
        assert_eq!(counters.product_count(), 3);
        assert_eq!(
            category.products().last().map(String::as_str),
            Some("55\" QLED 4K, 123000.0 руб. Остаток: 7 шт.")
        );
    }

    #[test]
    fn add_product_accepts_variants() {
        let counters = CatalogCounters::new();
        let mut category = Category::new(&counters, "Смартфоны", "Телефоны", Vec::new());
        category.add_product(Product::smartphone(
            "iPhone",
            "256GB",
            120000.0,
            5,
            SmartphoneDetails {
                efficiency: "Высокая".to_string(),
                model: "iPhone 13".to_string(),
                memory: 256,
                color: "Черный".to_string(),
            },
        ));
        assert_eq!(
            category.products(),
            vec![
                "iPhone (Модель: iPhone 13, Память: 256GB, Производительность: Высокая, Цвет: Черный), \
                 120000.0 руб. Остаток: 5 шт."
            ]
        );
    }

    #[test]
    fn add_record_rejects_non_product_without_counting() {
        let counters = CatalogCounters::new();
        let mut category = test_category(&counters);
        let before = counters.product_count();

        let err = category.add_record(&json!("Not a product")).unwrap_err();

        assert!(matches!(err, DomainError::TypeMismatch(_)));
        assert_eq!(counters.product_count(), before);
        assert_eq!(category.len(), 2);
    }

    #[test]
    fn add_record_accepts_product_records() {
        let counters = CatalogCounters::new();
        let mut category = test_category(&counters);

        category
            .add_record(&json!({
                "kind": "lawn_grass",
                "name": "Газонная трава",
                "description": "Элитная трава",
                "price": 500.0,
                "quantity": 20,
                "country": "Россия",
                "germination_period": 7,
                "color": "Зеленый",
            }))
            .unwrap();

        assert_eq!(category.len(), 3);
        assert_eq!(counters.product_count(), 3);
    }

    #[test]
    fn products_view_reflects_later_changes() {
        let counters = CatalogCounters::new();
        let mut category = test_category(&counters);
        let before = category.products();

        category.add_product(Product::new("Product 3", "Description 3", 10.0, 1));

        assert_eq!(before.len(), 2);
        assert_eq!(category.products().len(), 3);
    }

    #[test]
    fn category_renders_name_and_count() {
        let counters = CatalogCounters::new();
        let category = test_category(&counters);
        assert_eq!(category.to_string(), "Electronics, количество продуктов: 2 шт.");
    }

    #[test]
    fn calculate_total_is_product_count() {
        let counters = CatalogCounters::new();
        let mut category = test_category(&counters);
        assert_eq!(category.calculate_total(), 2);
        category.add_product(product1());
        assert_eq!(category.calculate_total(), 3);
        assert_eq!(BaseEntity::name(&category), "Electronics");
    }

    #[test]
    fn ingest_merges_duplicates_and_appends_new() {
        let counters = CatalogCounters::new();
        let mut category = test_category(&counters);
        let operator = ScriptedOperator::silent();

        let appended = category.ingest(
            ProductData {
                name: "product 1".to_string(),
                description: "ignored".to_string(),
                price: Price::new(1600.0),
                quantity: 2,
            },
            &operator,
        )
        .unwrap();
        assert!(!appended);
        assert_eq!(category.len(), 2);
        assert_eq!(counters.product_count(), 2);
        assert_eq!(category.products()[0], "Product 1, 1600.0 руб. Остаток: 7 шт.");

        let appended = category.ingest(
            ProductData {
                name: "Product 3".to_string(),
                description: "Description 3".to_string(),
                price: Price::new(99.9),
                quantity: 1,
            },
            &operator,
        )
        .unwrap();
        assert!(appended);
        assert_eq!(category.len(), 3);
        assert_eq!(counters.product_count(), 3);
    }

    #[test]
    fn iterator_yields_rendered_products_then_stays_exhausted() {
        let counters = CatalogCounters::new();
        let category = test_category(&counters);
        let mut iter = CategoryIterator::new(&category);

        assert_eq!(iter.len(), 2);
        assert_eq!(iter.next().as_deref(), Some("Product 1, 1500.0 руб. Остаток: 5 шт."));
        assert_eq!(iter.next().as_deref(), Some("Product 2, 3000.0 руб. Остаток: 3 шт."));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn ingest_refuses_quantity_overflow() {
        let counters = CatalogCounters::new();
        let mut category =
            Category::new(&counters, "Склад", "Полный", vec![Product::new("Full", "d", 10.0, u32::MAX)]);
        let operator = ScriptedOperator::silent();

        let err = category
            .ingest(
                ProductData {
                    name: "full".to_string(),
                    description: "d".to_string(),
                    price: Price::new(20.0),
                    quantity: 1,
                },
                &operator,
            )
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(category.len(), 1);
        assert_eq!(counters.product_count(), 1);
        assert_eq!(category.get(0).map(Product::quantity), Some(u32::MAX));
    }

    #[test]
    fn cursor_reaches_products_added_between_steps() {
        let counters = CatalogCounters::new();
        let mut category = test_category(&counters);
        let mut cursor = CategoryCursor::new();

        assert_eq!(cursor.next(&category).as_deref(), Some("Product 1, 1500.0 руб. Остаток: 5 шт."));
        category.add_product(Product::new("Product 3", "Description 3", 10.0, 1));
        assert_eq!(cursor.remaining(&category), 2);
        assert_eq!(cursor.next(&category).as_deref(), Some("Product 2, 3000.0 руб. Остаток: 3 шт."));
        assert_eq!(cursor.next(&category).as_deref(), Some("Product 3, 10.0 руб. Остаток: 1 шт."));
        assert_eq!(cursor.next(&category), None);
        assert_eq!(cursor.position(), 3);
    }

    #[test]
    fn cursor_renders_current_product_state() {
        let counters = CatalogCounters::new();
        let mut category = test_category(&counters);
        let mut cursor = CategoryCursor::new();
        let operator = ScriptedOperator::silent();

        category
            .ingest(
                ProductData {
                    name: "Product 1".to_string(),
                    description: "d".to_string(),
                    price: Price::new(1500.0),
                    quantity: 4,
                },
                &operator,
            )
            .unwrap();

        assert_eq!(cursor.next(&category).as_deref(), Some("Product 1, 1500.0 руб. Остаток: 9 шт."));
    }

    #[test]
    fn iterator_over_empty_category_is_exhausted() {
        let counters = CatalogCounters::new();
        let category = Category::new(&counters, "Пусто", "Нет товаров", Vec::new());
        assert_eq!(category.iter().next(), None);
    }

    #[test]
    fn new_iterator_restarts_from_the_beginning() {
        let counters = CatalogCounters::new();
        let category = test_category(&counters);

        let first: Vec<String> = category.iter().collect();
        let second: Vec<String> = (&category).into_iter().collect();

        assert_eq!(first, second);
        assert_eq!(first, category.products());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: counters grow by exactly one category plus the initial
            /// list, then by one per added product.
            #[test]
            fn counters_track_constructions_and_additions(
                initial in 0usize..20,
                added in 0usize..20,
                categories in 1usize..5
            ) {
                let counters = CatalogCounters::new();
                let mut last = counters.snapshot();

                for i in 0..categories {
                    let products = (0..initial)
                        .map(|n| Product::new(format!("P{n}"), "d", 1.0, 1))
                        .collect();
                    let mut category = Category::new(&counters, format!("C{i}"), "d", products);

                    let now = counters.snapshot();
                    prop_assert_eq!(now.category_count, last.category_count + 1);
                    prop_assert_eq!(now.product_count, last.product_count + initial as u64);
                    last = now;

                    for n in 0..added {
                        category.add_product(Product::new(format!("A{n}"), "d", 1.0, 1));
                        let now = counters.snapshot();
                        prop_assert_eq!(now.product_count, last.product_count + 1);
                        last = now;
                    }
                }

                prop_assert_eq!(last.category_count, categories as u64);
                prop_assert_eq!(last.product_count, (categories * (initial + added)) as u64);
            }
        }
    }
}
