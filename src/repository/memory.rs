use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    CategoryRepository, OrderRepository, ProductFilter, ProductRepository, parse_reference,
};
use crate::{
    error::{AppError, AppResult},
    models::{
        Category, Customer, Cut, NewProduct, Order, OrderItem, OrderLog, OrderStatus,
        OrderWithItems, Product, ProductName,
    },
};

#[derive(Debug, Default)]
struct Tables {
    categories: Vec<Category>,
    cuts: Vec<Cut>,
    products: Vec<Product>,
    customers: Vec<Customer>,
    orders: Vec<Order>,
    order_items: Vec<OrderItem>,
    order_logs: Vec<OrderLog>,
    last_timestamp: Option<DateTime<Utc>>,
}

impl Tables {
    /// Strictly increasing timestamps so "newest first" is deterministic.
    fn now(&mut self) -> DateTime<Utc> {
        let mut now = Utc::now();
        if let Some(last) = self.last_timestamp {
            if now <= last {
                now = last + Duration::microseconds(1);
            }
        }
        self.last_timestamp = Some(now);
        now
    }

    fn attach(&self, product: &Product) -> Product {
        let mut product = product.clone();
        product.category = self
            .categories
            .iter()
            .find(|c| c.id == product.category_id)
            .cloned();
        product.cut = product
            .cut_id
            .and_then(|id| self.cuts.iter().find(|c| c.id == id).cloned());
        product
    }

    fn product_name(&self, product_id: Uuid) -> Option<ProductName> {
        self.products
            .iter()
            .find(|p| p.id == product_id)
            .map(|p| ProductName {
                name_en: p.name_en.clone(),
                name_ms: p.name_ms.clone(),
            })
    }

    fn assemble(&self, order: &Order) -> OrderWithItems {
        let customer = self
            .customers
            .iter()
            .find(|c| c.id == order.customer_id)
            .cloned();
        let items = self
            .order_items
            .iter()
            .filter(|i| i.order_id == order.id)
            .map(|i| OrderItem {
                product: self.product_name(i.product_id),
                ..i.clone()
            })
            .collect();
        OrderWithItems {
            order: order.clone(),
            customer,
            items,
        }
    }

    fn resolve_references(&self, product: &NewProduct) -> AppResult<(Uuid, Option<Uuid>)> {
        let category_id = parse_reference(&product.category_id, "category")?;
        if !self.categories.iter().any(|c| c.id == category_id) {
            return Err(AppError::BadRequest("Unknown category".into()));
        }
        let cut_id = match product.cut_id.as_deref() {
            Some(raw) => {
                let id = parse_reference(raw, "cut")?;
                if !self.cuts.iter().any(|c| c.id == id) {
                    return Err(AppError::BadRequest("Unknown cut".into()));
                }
                Some(id)
            }
            None => None,
        };
        Ok((category_id, cut_id))
    }
}

/// In-process stand-in for the hosted store.
///
/// Mirrors the remote behaviour the services depend on, including the audit
/// rows the database writes on status changes, and can be told to fail
/// every write to exercise error paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the standard categories and cuts.
    pub async fn with_reference_data() -> Self {
        let store = Self::new();
        for (code, en, ms) in [
            ("beef", "Beef", "Daging Lembu"),
            ("chicken", "Chicken", "Ayam"),
            ("mutton", "Mutton", "Daging Kambing"),
        ] {
            store.insert_category(code, en, ms).await;
        }
        for (code, en, ms) in [
            ("belly", "Belly", "Perut"),
            ("breast", "Breast", "Dada"),
            ("leg", "Leg", "Kaki"),
            ("ribs", "Ribs", "Tulang Rusuk"),
            ("shoulder", "Shoulder", "Bahu"),
            ("thigh", "Thigh", "Peha"),
        ] {
            store.insert_cut(code, en, ms).await;
        }
        store
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::OrmError(sea_orm::DbErr::Custom(
                "store unavailable".into(),
            )));
        }
        Ok(())
    }

    pub async fn insert_category(&self, code: &str, name_en: &str, name_ms: &str) -> Category {
        let mut tables = self.tables.write().await;
        let category = Category {
            id: Uuid::new_v4(),
            code: code.to_string(),
            name_en: name_en.to_string(),
            name_ms: name_ms.to_string(),
            created_at: tables.now(),
        };
        tables.categories.push(category.clone());
        category
    }

    pub async fn insert_cut(&self, code: &str, name_en: &str, name_ms: &str) -> Cut {
        let mut tables = self.tables.write().await;
        let cut = Cut {
            id: Uuid::new_v4(),
            code: code.to_string(),
            name_en: name_en.to_string(),
            name_ms: name_ms.to_string(),
            created_at: tables.now(),
        };
        tables.cuts.push(cut.clone());
        cut
    }

    pub async fn category_by_code(&self, code: &str) -> Option<Category> {
        let tables = self.tables.read().await;
        tables.categories.iter().find(|c| c.code == code).cloned()
    }

    pub async fn cut_by_code(&self, code: &str) -> Option<Cut> {
        let tables = self.tables.read().await;
        tables.cuts.iter().find(|c| c.code == code).cloned()
    }

    pub async fn insert_customer(&self, business_name: &str, email: &str) -> Customer {
        let mut tables = self.tables.write().await;
        let customer = Customer {
            id: Uuid::new_v4(),
            business_name: business_name.to_string(),
            contact_person: None,
            email: email.to_string(),
            phone: None,
        };
        tables.customers.push(customer.clone());
        customer
    }

    /// Place an order the way the external ordering flow would.
    pub async fn insert_order(
        &self,
        customer_id: Uuid,
        order_number: &str,
        currency: &str,
        status: OrderStatus,
        lines: &[(Uuid, i32, Decimal)],
    ) -> OrderWithItems {
        let mut tables = self.tables.write().await;
        let created_at = tables.now();
        let order_id = Uuid::new_v4();
        let subtotal: Decimal = lines
            .iter()
            .map(|(_, qty, unit)| OrderItem::line_total(*qty, *unit))
            .sum();
        let order = Order {
            id: order_id,
            order_number: order_number.to_string(),
            status,
            currency: currency.to_string(),
            subtotal,
            total: subtotal,
            customer_id,
            notes: None,
            created_at,
            updated_at: created_at,
        };
        tables.orders.push(order.clone());
        for (product_id, quantity, unit_price) in lines {
            let item = OrderItem {
                id: Uuid::new_v4(),
                order_id,
                product_id: *product_id,
                quantity: *quantity,
                unit_price: *unit_price,
                total_price: OrderItem::line_total(*quantity, *unit_price),
                is_packed: false,
                packed_at: None,
                created_at,
                product: None,
            };
            tables.order_items.push(item);
        }
        tables.assemble(&order)
    }
}

impl CategoryRepository for MemoryStore {
    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        let tables = self.tables.read().await;
        let mut items = tables.categories.clone();
        items.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(items)
    }

    async fn list_cuts(&self) -> AppResult<Vec<Cut>> {
        let tables = self.tables.read().await;
        let mut items = tables.cuts.clone();
        items.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(items)
    }

    async fn get_category(&self, id: Uuid) -> AppResult<Option<Category>> {
        let tables = self.tables.read().await;
        Ok(tables.categories.iter().find(|c| c.id == id).cloned())
    }
}

impl ProductRepository for MemoryStore {
    async fn list_products(&self, filter: &ProductFilter) -> AppResult<Vec<Product>> {
        let tables = self.tables.read().await;
        let mut items: Vec<Product> = tables
            .products
            .iter()
            .filter(|p| !filter.active_only || p.is_active)
            .map(|p| tables.attach(p))
            .filter(|p| match filter.category_code.as_deref() {
                Some(code) if !code.is_empty() => {
                    p.category.as_ref().is_some_and(|c| c.code == code)
                }
                _ => true,
            })
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn get_product(&self, id: Uuid) -> AppResult<Option<Product>> {
        let tables = self.tables.read().await;
        Ok(tables
            .products
            .iter()
            .find(|p| p.id == id)
            .map(|p| tables.attach(p)))
    }

    async fn create_product(&self, product: NewProduct) -> AppResult<Product> {
        self.check_writable()?;
        let mut tables = self.tables.write().await;
        let (category_id, cut_id) = tables.resolve_references(&product)?;
        let now = tables.now();
        let row = Product {
            id: Uuid::new_v4(),
            category_id,
            cut_id,
            name_en: product.name_en,
            name_ms: product.name_ms,
            description_en: product.description_en,
            description_ms: product.description_ms,
            price_usd: product.price_usd,
            price_myr: product.price_myr,
            stock_quantity: product.stock_quantity,
            image_url: product.image_url,
            is_active: product.is_active,
            created_at: now,
            updated_at: now,
            category: None,
            cut: None,
        };
        tables.products.push(row.clone());
        Ok(tables.attach(&row))
    }

    async fn update_product(&self, id: Uuid, product: NewProduct) -> AppResult<Product> {
        self.check_writable()?;
        let mut tables = self.tables.write().await;
        if !tables.products.iter().any(|p| p.id == id) {
            return Err(AppError::NotFound);
        }
        let (category_id, cut_id) = tables.resolve_references(&product)?;
        let now = tables.now();
        let row = tables
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(AppError::NotFound)?;
        row.category_id = category_id;
        row.cut_id = cut_id;
        row.name_en = product.name_en;
        row.name_ms = product.name_ms;
        row.description_en = product.description_en;
        row.description_ms = product.description_ms;
        row.price_usd = product.price_usd;
        row.price_myr = product.price_myr;
        row.stock_quantity = product.stock_quantity;
        row.image_url = product.image_url;
        row.is_active = product.is_active;
        row.updated_at = now;
        let row = row.clone();
        Ok(tables.attach(&row))
    }

    async fn delete_product(&self, id: Uuid) -> AppResult<()> {
        self.check_writable()?;
        let mut tables = self.tables.write().await;
        let before = tables.products.len();
        tables.products.retain(|p| p.id != id);
        if tables.products.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

impl OrderRepository for MemoryStore {
    async fn list_orders(&self) -> AppResult<Vec<OrderWithItems>> {
        let tables = self.tables.read().await;
        let mut orders: Vec<&Order> = tables.orders.iter().collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders.into_iter().map(|o| tables.assemble(o)).collect())
    }

    async fn get_order(&self, id: Uuid) -> AppResult<Option<OrderWithItems>> {
        let tables = self.tables.read().await;
        Ok(tables
            .orders
            .iter()
            .find(|o| o.id == id)
            .map(|o| tables.assemble(o)))
    }

    async fn update_order_status(&self, id: Uuid, status: OrderStatus) -> AppResult<Order> {
        self.check_writable()?;
        let mut tables = self.tables.write().await;
        let now = tables.now();
        let order = tables
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(AppError::NotFound)?;
        let previous = order.status;
        order.status = status;
        order.updated_at = now;
        let order = order.clone();

        if previous != status {
            tables.order_logs.push(OrderLog {
                id: Uuid::new_v4(),
                order_id: id,
                status_from: Some(previous.as_str().to_string()),
                status_to: status.as_str().to_string(),
                changed_by: None,
                notes: None,
                created_at: now,
            });
        }
        Ok(order)
    }

    async fn set_item_packed(
        &self,
        item_id: Uuid,
        is_packed: bool,
        packed_at: Option<DateTime<Utc>>,
    ) -> AppResult<OrderItem> {
        self.check_writable()?;
        let mut tables = self.tables.write().await;
        let item = tables
            .order_items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or(AppError::NotFound)?;
        item.is_packed = is_packed;
        item.packed_at = packed_at;
        let item = item.clone();
        Ok(OrderItem {
            product: tables.product_name(item.product_id),
            ..item
        })
    }

    async fn list_order_logs(&self, order_id: Uuid) -> AppResult<Vec<OrderLog>> {
        let tables = self.tables.read().await;
        Ok(tables
            .order_logs
            .iter()
            .filter(|l| l.order_id == order_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_product(category_id: Uuid, name: &str) -> NewProduct {
        NewProduct {
            category_id: category_id.to_string(),
            cut_id: None,
            name_en: name.into(),
            name_ms: name.into(),
            description_en: None,
            description_ms: None,
            price_usd: Decimal::new(1000, 2),
            price_myr: Decimal::new(4250, 2),
            stock_quantity: 3,
            image_url: None,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn reference_data_is_ordered_by_code() {
        let store = MemoryStore::with_reference_data().await;
        let codes: Vec<_> = store
            .list_categories()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.code)
            .collect();
        assert_eq!(codes, ["beef", "chicken", "mutton"]);
        assert_eq!(store.list_cuts().await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn category_lookup_by_id() {
        let store = MemoryStore::with_reference_data().await;
        let beef = store.category_by_code("beef").await.unwrap();

        let found = store.get_category(beef.id).await.unwrap().unwrap();
        assert_eq!(found.code, "beef");
        assert_eq!(found.name_ms, beef.name_ms);
        assert!(store.get_category(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn products_filter_by_category_and_activity() {
        let store = MemoryStore::with_reference_data().await;
        let beef = store.category_by_code("beef").await.unwrap();
        let chicken = store.category_by_code("chicken").await.unwrap();
        store.create_product(new_product(beef.id, "Ribs")).await.unwrap();
        let thigh = store
            .create_product(new_product(chicken.id, "Thigh"))
            .await
            .unwrap();
        let mut hidden = new_product(chicken.id, "Hidden");
        hidden.is_active = false;
        store.create_product(hidden).await.unwrap();

        let all = store.list_products(&ProductFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].name_en, "Hidden");

        let active_chicken = store
            .list_products(&ProductFilter {
                active_only: true,
                category_code: Some("chicken".into()),
            })
            .await
            .unwrap();
        assert_eq!(active_chicken.len(), 1);
        assert_eq!(active_chicken[0].id, thigh.id);
        assert_eq!(active_chicken[0].category.as_ref().unwrap().code, "chicken");
    }

    #[tokio::test]
    async fn unknown_category_is_rejected() {
        let store = MemoryStore::with_reference_data().await;
        let err = store
            .create_product(new_product(Uuid::new_v4(), "Orphan"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn status_change_leaves_an_audit_row() {
        let store = MemoryStore::with_reference_data().await;
        let customer = store.insert_customer("Sunrise Cafe", "cafe@example.com").await;
        let order = store
            .insert_order(customer.id, "ORD-001", "USD", OrderStatus::Pending, &[])
            .await;
        store
            .update_order_status(order.order.id, OrderStatus::Packed)
            .await
            .unwrap();

        let logs = store.list_order_logs(order.order.id).await.unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].status_from.as_deref(), Some("pending"));
        assert_eq!(logs[0].status_to, "packed");
    }

    #[tokio::test]
    async fn failing_writes_leave_rows_untouched() {
        let store = MemoryStore::with_reference_data().await;
        let beef = store.category_by_code("beef").await.unwrap();
        let product = store.create_product(new_product(beef.id, "Ribs")).await.unwrap();

        store.set_fail_writes(true);
        assert!(store.delete_product(product.id).await.is_err());
        store.set_fail_writes(false);

        assert!(store.get_product(product.id).await.unwrap().is_some());
    }
}
