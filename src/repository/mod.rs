//! Typed access to the catalog and order tables.
//!
//! Mutations return the confirmed row and nothing is cached here: callers
//! re-read after a successful write to render the next view.

mod memory;
mod sea;

use std::future::Future;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        Category, Cut, NewProduct, Order, OrderItem, OrderLog, OrderStatus, OrderWithItems,
        Product,
    },
};

pub use memory::MemoryStore;
pub use sea::SeaStore;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub active_only: bool,
    pub category_code: Option<String>,
}

impl ProductFilter {
    pub fn active() -> Self {
        Self {
            active_only: true,
            category_code: None,
        }
    }
}

/// Read-only reference data, ordered by code.
pub trait CategoryRepository: Send + Sync {
    fn list_categories(&self) -> impl Future<Output = AppResult<Vec<Category>>> + Send;

    fn list_cuts(&self) -> impl Future<Output = AppResult<Vec<Cut>>> + Send;

    fn get_category(&self, id: Uuid) -> impl Future<Output = AppResult<Option<Category>>> + Send;
}

pub trait ProductRepository: Send + Sync {
    /// Newest first, with category and cut attached.
    fn list_products(
        &self,
        filter: &ProductFilter,
    ) -> impl Future<Output = AppResult<Vec<Product>>> + Send;

    fn get_product(&self, id: Uuid) -> impl Future<Output = AppResult<Option<Product>>> + Send;

    fn create_product(
        &self,
        product: NewProduct,
    ) -> impl Future<Output = AppResult<Product>> + Send;

    fn update_product(
        &self,
        id: Uuid,
        product: NewProduct,
    ) -> impl Future<Output = AppResult<Product>> + Send;

    fn delete_product(&self, id: Uuid) -> impl Future<Output = AppResult<()>> + Send;
}

/// Orders are created elsewhere; this side only reads them and records fulfilment.
pub trait OrderRepository: Send + Sync {
    /// Newest first, with customer and items attached.
    fn list_orders(&self) -> impl Future<Output = AppResult<Vec<OrderWithItems>>> + Send;

    fn get_order(
        &self,
        id: Uuid,
    ) -> impl Future<Output = AppResult<Option<OrderWithItems>>> + Send;

    fn update_order_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> impl Future<Output = AppResult<Order>> + Send;

    fn set_item_packed(
        &self,
        item_id: Uuid,
        is_packed: bool,
        packed_at: Option<DateTime<Utc>>,
    ) -> impl Future<Output = AppResult<OrderItem>> + Send;

    fn list_order_logs(
        &self,
        order_id: Uuid,
    ) -> impl Future<Output = AppResult<Vec<OrderLog>>> + Send;
}

/// Parse a reference id submitted through a form.
pub(crate) fn parse_reference(raw: &str, what: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::BadRequest(format!("Invalid {what} id")))
}
