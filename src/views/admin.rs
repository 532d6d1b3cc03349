use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    dto::products::ProductDraft,
    i18n::LocaleContext,
    models::{Category, Cut, Product},
    pricing::Currency,
};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SelectOption {
    pub id: Uuid,
    pub code: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductFormLabels {
    pub product_name: String,
    pub category: String,
    pub cut: String,
    pub price_usd: String,
    pub price_myr: String,
    pub description: String,
    pub stock: String,
    pub submit: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminProductRow {
    pub id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub cut: Option<String>,
    /// Both prices, e.g. `$12.99 / RM55.21`.
    pub price_display: String,
    pub stock_quantity: i32,
    pub description: Option<String>,
    pub is_active: bool,
    pub draft: ProductDraft,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminView {
    pub title: String,
    pub add_product_title: String,
    pub manage_title: String,
    pub form: ProductFormLabels,
    pub categories: Vec<SelectOption>,
    pub cuts: Vec<SelectOption>,
    pub products: Vec<AdminProductRow>,
}

pub fn build_admin_view(
    ctx: &LocaleContext,
    categories: &[Category],
    cuts: &[Cut],
    products: &[Product],
) -> AdminView {
    let form = ProductFormLabels {
        product_name: ctx.t("admin.productName").to_string(),
        category: ctx.t("admin.category").to_string(),
        cut: ctx.t("admin.cut").to_string(),
        price_usd: ctx.t("admin.priceUSD").to_string(),
        price_myr: ctx.t("admin.priceMYR").to_string(),
        description: ctx.t("admin.description").to_string(),
        stock: ctx.t("admin.stock").to_string(),
        submit: ctx.t("general.add").to_string(),
    };

    let categories = categories
        .iter()
        .map(|c| SelectOption {
            id: c.id,
            code: c.code.clone(),
            label: ctx.pick(&c.name_en, &c.name_ms).to_string(),
        })
        .collect();
    let cuts = cuts
        .iter()
        .map(|c| SelectOption {
            id: c.id,
            code: c.code.clone(),
            label: ctx.pick(&c.name_en, &c.name_ms).to_string(),
        })
        .collect();

    let products = products
        .iter()
        .map(|p| AdminProductRow {
            id: p.id,
            name: ctx.pick(&p.name_en, &p.name_ms).to_string(),
            category: p
                .category
                .as_ref()
                .map(|c| ctx.pick(&c.name_en, &c.name_ms).to_string()),
            cut: p
                .cut
                .as_ref()
                .map(|c| ctx.pick(&c.name_en, &c.name_ms).to_string()),
            price_display: format!(
                "{} / {}",
                Currency::Usd.format(p.price_usd),
                Currency::Myr.format(p.price_myr)
            ),
            stock_quantity: p.stock_quantity,
            description: ctx
                .pick_opt(p.description_en.as_deref(), p.description_ms.as_deref())
                .map(str::to_string),
            is_active: p.is_active,
            draft: ProductDraft::from_product(p),
        })
        .collect();

    AdminView {
        title: ctx.t("general.admin").to_string(),
        add_product_title: ctx.t("admin.addProduct").to_string(),
        manage_title: format!("{} {}", ctx.t("general.manage"), ctx.t("general.products")),
        form,
        categories,
        cuts,
        products,
    }
}
