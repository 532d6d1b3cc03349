use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use super::{
    CategoryRepository, OrderRepository, ProductFilter, ProductRepository, parse_reference,
};
use crate::{
    entity::{
        categories::{Column as CatCol, Entity as Categories, Model as CategoryModel},
        customers::{Column as CustCol, Entity as Customers, Model as CustomerModel},
        cuts::{Column as CutCol, Entity as Cuts, Model as CutModel},
        order_items::{
            ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems,
            Model as OrderItemModel,
        },
        order_logs::{Column as LogCol, Entity as OrderLogs, Model as OrderLogModel},
        orders::{
            ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel,
        },
        products::{
            ActiveModel as ProductActive, Column as ProdCol, Entity as Products,
            Model as ProductModel, Relation as ProductRelation,
        },
    },
    error::{AppError, AppResult},
    models::{
        Category, Customer, Cut, NewProduct, Order, OrderItem, OrderLog, OrderStatus,
        OrderWithItems, Product, ProductName,
    },
};

/// Repository backed by the Postgres tables through SeaORM.
#[derive(Debug, Clone)]
pub struct SeaStore {
    conn: DatabaseConnection,
}

impl SeaStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Parse form references and make sure they point at existing rows.
    async fn resolve_references(&self, product: &NewProduct) -> AppResult<(Uuid, Option<Uuid>)> {
        let category_id = parse_reference(&product.category_id, "category")?;
        if self.get_category(category_id).await?.is_none() {
            return Err(AppError::BadRequest("Unknown category".into()));
        }
        let cut_id = match product.cut_id.as_deref() {
            Some(raw) => {
                let id = parse_reference(raw, "cut")?;
                if Cuts::find_by_id(id).one(&self.conn).await?.is_none() {
                    return Err(AppError::BadRequest("Unknown cut".into()));
                }
                Some(id)
            }
            None => None,
        };
        Ok((category_id, cut_id))
    }

    async fn reference_data(&self) -> AppResult<ReferenceData> {
        let categories = Categories::find()
            .all(&self.conn)
            .await?
            .into_iter()
            .map(|m| (m.id, category_from_entity(m)))
            .collect();
        let cuts = Cuts::find()
            .all(&self.conn)
            .await?
            .into_iter()
            .map(|m| (m.id, cut_from_entity(m)))
            .collect();
        Ok(ReferenceData { categories, cuts })
    }

    async fn assemble_orders(&self, orders: Vec<OrderModel>) -> AppResult<Vec<OrderWithItems>> {
        if orders.is_empty() {
            return Ok(Vec::new());
        }
        let order_ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
        let customer_ids: Vec<Uuid> = orders.iter().map(|o| o.customer_id).collect();

        let customers: HashMap<Uuid, Customer> = Customers::find()
            .filter(CustCol::Id.is_in(customer_ids))
            .all(&self.conn)
            .await?
            .into_iter()
            .map(|m| (m.id, customer_from_entity(m)))
            .collect();

        let mut items_by_order: HashMap<Uuid, Vec<OrderItem>> = HashMap::new();
        let rows = OrderItems::find()
            .filter(OrderItemCol::OrderId.is_in(order_ids))
            .order_by_asc(OrderItemCol::CreatedAt)
            .find_also_related(Products)
            .all(&self.conn)
            .await?;
        for (item, product) in rows {
            items_by_order
                .entry(item.order_id)
                .or_default()
                .push(order_item_from_entity(item, product.as_ref()));
        }

        orders
            .into_iter()
            .map(|model| {
                let customer = customers.get(&model.customer_id).cloned();
                let items = items_by_order.remove(&model.id).unwrap_or_default();
                Ok(OrderWithItems {
                    order: order_from_entity(model)?,
                    customer,
                    items,
                })
            })
            .collect()
    }
}

impl CategoryRepository for SeaStore {
    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        let items = Categories::find()
            .order_by_asc(CatCol::Code)
            .all(&self.conn)
            .await?
            .into_iter()
            .map(category_from_entity)
            .collect();
        Ok(items)
    }

    async fn list_cuts(&self) -> AppResult<Vec<Cut>> {
        let items = Cuts::find()
            .order_by_asc(CutCol::Code)
            .all(&self.conn)
            .await?
            .into_iter()
            .map(cut_from_entity)
            .collect();
        Ok(items)
    }

    async fn get_category(&self, id: Uuid) -> AppResult<Option<Category>> {
        let category = Categories::find_by_id(id).one(&self.conn).await?;
        Ok(category.map(category_from_entity))
    }
}

impl ProductRepository for SeaStore {
    async fn list_products(&self, filter: &ProductFilter) -> AppResult<Vec<Product>> {
        let mut finder = Products::find();
        if filter.active_only {
            finder = finder.filter(ProdCol::IsActive.eq(true));
        }
        if let Some(code) = filter.category_code.as_ref().filter(|c| !c.is_empty()) {
            finder = finder
                .join(sea_orm::JoinType::InnerJoin, ProductRelation::Categories.def())
                .filter(CatCol::Code.eq(code.clone()));
        }

        let rows = finder
            .order_by_desc(ProdCol::CreatedAt)
            .all(&self.conn)
            .await?;
        let refs = self.reference_data().await?;
        Ok(rows.into_iter().map(|m| refs.attach(m)).collect())
    }

    async fn get_product(&self, id: Uuid) -> AppResult<Option<Product>> {
        let row = Products::find_by_id(id).one(&self.conn).await?;
        match row {
            Some(model) => {
                let refs = self.reference_data().await?;
                Ok(Some(refs.attach(model)))
            }
            None => Ok(None),
        }
    }

    async fn create_product(&self, product: NewProduct) -> AppResult<Product> {
        let (category_id, cut_id) = self.resolve_references(&product).await?;

        let active = ProductActive {
            id: Set(Uuid::new_v4()),
            category_id: Set(category_id),
            cut_id: Set(cut_id),
            name_en: Set(product.name_en),
            name_ms: Set(product.name_ms),
            description_en: Set(product.description_en),
            description_ms: Set(product.description_ms),
            price_usd: Set(product.price_usd),
            price_myr: Set(product.price_myr),
            stock_quantity: Set(product.stock_quantity),
            image_url: Set(product.image_url),
            is_active: Set(product.is_active),
            created_at: NotSet,
            updated_at: NotSet,
        };
        let model = active.insert(&self.conn).await?;
        let refs = self.reference_data().await?;
        Ok(refs.attach(model))
    }

    async fn update_product(&self, id: Uuid, product: NewProduct) -> AppResult<Product> {
        let existing = Products::find_by_id(id).one(&self.conn).await?;
        let existing = match existing {
            Some(p) => p,
            None => return Err(AppError::NotFound),
        };
        let (category_id, cut_id) = self.resolve_references(&product).await?;

        let mut active: ProductActive = existing.into();
        active.category_id = Set(category_id);
        active.cut_id = Set(cut_id);
        active.name_en = Set(product.name_en);
        active.name_ms = Set(product.name_ms);
        active.description_en = Set(product.description_en);
        active.description_ms = Set(product.description_ms);
        active.price_usd = Set(product.price_usd);
        active.price_myr = Set(product.price_myr);
        active.stock_quantity = Set(product.stock_quantity);
        active.image_url = Set(product.image_url);
        active.is_active = Set(product.is_active);
        active.updated_at = Set(Utc::now().into());

        let model = active.update(&self.conn).await?;
        let refs = self.reference_data().await?;
        Ok(refs.attach(model))
    }

    async fn delete_product(&self, id: Uuid) -> AppResult<()> {
        let result = Products::delete_by_id(id).exec(&self.conn).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

impl OrderRepository for SeaStore {
    async fn list_orders(&self) -> AppResult<Vec<OrderWithItems>> {
        let orders = Orders::find()
            .order_by_desc(OrderCol::CreatedAt)
            .all(&self.conn)
            .await?;
        self.assemble_orders(orders).await
    }

    async fn get_order(&self, id: Uuid) -> AppResult<Option<OrderWithItems>> {
        let order = Orders::find_by_id(id).one(&self.conn).await?;
        match order {
            Some(order) => Ok(self.assemble_orders(vec![order]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn update_order_status(&self, id: Uuid, status: OrderStatus) -> AppResult<Order> {
        let existing = Orders::find_by_id(id).one(&self.conn).await?;
        let existing = match existing {
            Some(o) => o,
            None => return Err(AppError::NotFound),
        };

        let mut active: OrderActive = existing.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(Utc::now().into());
        let order = active.update(&self.conn).await?;
        order_from_entity(order)
    }

    async fn set_item_packed(
        &self,
        item_id: Uuid,
        is_packed: bool,
        packed_at: Option<DateTime<Utc>>,
    ) -> AppResult<OrderItem> {
        let existing = OrderItems::find_by_id(item_id).one(&self.conn).await?;
        let existing = match existing {
            Some(i) => i,
            None => return Err(AppError::NotFound),
        };

        let mut active: OrderItemActive = existing.into();
        active.is_packed = Set(is_packed);
        active.packed_at = Set(packed_at.map(Into::into));
        let item = active.update(&self.conn).await?;

        let product = Products::find_by_id(item.product_id).one(&self.conn).await?;
        Ok(order_item_from_entity(item, product.as_ref()))
    }

    async fn list_order_logs(&self, order_id: Uuid) -> AppResult<Vec<OrderLog>> {
        let items = OrderLogs::find()
            .filter(LogCol::OrderId.eq(order_id))
            .order_by_asc(LogCol::CreatedAt)
            .all(&self.conn)
            .await?
            .into_iter()
            .map(order_log_from_entity)
            .collect();
        Ok(items)
    }
}

struct ReferenceData {
    categories: HashMap<Uuid, Category>,
    cuts: HashMap<Uuid, Cut>,
}

impl ReferenceData {
    fn attach(&self, model: ProductModel) -> Product {
        let category = self.categories.get(&model.category_id).cloned();
        let cut = model.cut_id.and_then(|id| self.cuts.get(&id).cloned());
        Product {
            id: model.id,
            category_id: model.category_id,
            cut_id: model.cut_id,
            name_en: model.name_en,
            name_ms: model.name_ms,
            description_en: model.description_en,
            description_ms: model.description_ms,
            price_usd: model.price_usd,
            price_myr: model.price_myr,
            stock_quantity: model.stock_quantity,
            image_url: model.image_url,
            is_active: model.is_active,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
            category,
            cut,
        }
    }
}

fn category_from_entity(model: CategoryModel) -> Category {
    Category {
        id: model.id,
        code: model.code,
        name_en: model.name_en,
        name_ms: model.name_ms,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn cut_from_entity(model: CutModel) -> Cut {
    Cut {
        id: model.id,
        code: model.code,
        name_en: model.name_en,
        name_ms: model.name_ms,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn customer_from_entity(model: CustomerModel) -> Customer {
    Customer {
        id: model.id,
        business_name: model.business_name,
        contact_person: model.contact_person,
        email: model.email,
        phone: model.phone,
    }
}

fn order_from_entity(model: OrderModel) -> AppResult<Order> {
    let status = model
        .status
        .parse::<OrderStatus>()
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;
    Ok(Order {
        id: model.id,
        order_number: model.order_number,
        status,
        currency: model.currency,
        subtotal: model.subtotal,
        total: model.total,
        customer_id: model.customer_id,
        notes: model.notes,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}

fn order_item_from_entity(model: OrderItemModel, product: Option<&ProductModel>) -> OrderItem {
    OrderItem {
        id: model.id,
        order_id: model.order_id,
        product_id: model.product_id,
        quantity: model.quantity,
        unit_price: model.unit_price,
        total_price: model.total_price,
        is_packed: model.is_packed,
        packed_at: model.packed_at.map(|dt| dt.with_timezone(&Utc)),
        created_at: model.created_at.with_timezone(&Utc),
        product: product.map(|p| ProductName {
            name_en: p.name_en.clone(),
            name_ms: p.name_ms.clone(),
        }),
    }
}

fn order_log_from_entity(model: OrderLogModel) -> OrderLog {
    OrderLog {
        id: model.id,
        order_id: model.order_id,
        status_from: model.status_from,
        status_to: model.status_to,
        changed_by: model.changed_by,
        notes: model.notes,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
