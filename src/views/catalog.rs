use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    i18n::LocaleContext,
    models::{Category, Product},
    pricing::{Currency, price_for},
};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductCard {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub cut: Option<String>,
    #[schema(value_type = String)]
    pub price: Decimal,
    pub price_display: String,
    pub stock_quantity: i32,
    pub image_url: Option<String>,
    pub add_to_cart_label: String,
}

impl ProductCard {
    pub fn new(ctx: &LocaleContext, product: &Product) -> Self {
        let price = price_for(ctx.currency(), product.price_usd, product.price_myr);
        Self {
            id: product.id,
            name: ctx.pick(&product.name_en, &product.name_ms).to_string(),
            description: ctx
                .pick_opt(
                    product.description_en.as_deref(),
                    product.description_ms.as_deref(),
                )
                .map(str::to_string),
            cut: product
                .cut
                .as_ref()
                .map(|cut| ctx.pick(&cut.name_en, &cut.name_ms).to_string()),
            price,
            price_display: ctx.format_money(price),
            stock_quantity: product.stock_quantity,
            image_url: product.image_url.clone(),
            add_to_cart_label: ctx.t("general.addToCart").to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CatalogTab {
    pub code: String,
    pub label: String,
    pub products: Vec<ProductCard>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CatalogView {
    pub title: String,
    pub currency: Currency,
    pub tabs: Vec<CatalogTab>,
}

/// One tab per category in the given order; products keep their incoming order.
pub fn build_catalog(
    ctx: &LocaleContext,
    categories: &[Category],
    products: &[Product],
) -> CatalogView {
    let tabs = categories
        .iter()
        .map(|category| CatalogTab {
            code: category.code.clone(),
            label: ctx.pick(&category.name_en, &category.name_ms).to_string(),
            products: products
                .iter()
                .filter(|p| p.category_id == category.id)
                .map(|p| ProductCard::new(ctx, p))
                .collect(),
        })
        .collect();

    CatalogView {
        title: ctx.t("nav.products").to_string(),
        currency: ctx.currency(),
        tabs,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CartLine {
    pub product_id: Uuid,
    pub name: String,
    pub quantity: u32,
    #[schema(value_type = String)]
    pub unit_price: Decimal,
    #[schema(value_type = String)]
    pub line_total: Decimal,
}

/// Basket accumulated while browsing. Lives only as long as the caller keeps it.
#[derive(Debug, Clone)]
pub struct Cart {
    ctx: LocaleContext,
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new(ctx: LocaleContext) -> Self {
        Self {
            ctx,
            lines: Vec::new(),
        }
    }

    /// Adding the same product again increases its quantity.
    ///
    /// The total unit count stays within `u32`; a quantity that would push it
    /// past that is rejected and leaves the cart unchanged.
    pub fn add(&mut self, product: &Product, quantity: u32) -> AppResult<()> {
        if self.len().checked_add(quantity).is_none() {
            return Err(AppError::BadRequest("cart quantity is too large".to_string()));
        }

        let unit_price = price_for(self.ctx.currency(), product.price_usd, product.price_myr);
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            line.quantity += quantity;
            line.line_total = line.unit_price * Decimal::from(line.quantity);
            return Ok(());
        }
        self.lines.push(CartLine {
            product_id: product.id,
            name: self.ctx.pick(&product.name_en, &product.name_ms).to_string(),
            quantity,
            unit_price,
            line_total: unit_price * Decimal::from(quantity),
        });
        Ok(())
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Total units across all lines.
    pub fn len(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total(&self) -> Decimal {
        self.lines.iter().map(|l| l.line_total).sum()
    }

    pub fn into_view(self) -> CartView {
        let total = self.total();
        let item_count = self.len();
        CartView {
            currency: self.ctx.currency(),
            total_display: self.ctx.format_money(total),
            badge: format!("{item_count} items in cart"),
            item_count,
            total,
            lines: self.lines,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CartView {
    pub currency: Currency,
    pub lines: Vec<CartLine>,
    pub item_count: u32,
    #[schema(value_type = String)]
    pub total: Decimal,
    pub total_display: String,
    pub badge: String,
}
