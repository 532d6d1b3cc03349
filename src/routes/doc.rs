use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        catalog::{CartLineRequest, CartQuoteRequest, CategoryList, CutList},
        orders::{OrderList, OrderLogList, UpdateOrderStatusRequest, UpdatePackingRequest},
        preferences::{LanguagePreference, SetLanguageRequest, TranslatedText, TranslationTable},
        products::{ProductDraft, ProductList},
    },
    i18n::Language,
    models::{
        Category, Customer, Cut, Order, OrderAction, OrderItem, OrderLog, OrderStatus,
        OrderWithItems, Product, ProductName,
    },
    pricing::Currency,
    response::{ApiResponse, Meta},
    routes::{admin, catalog, dashboard, health, i18n, orders, params, products},
    views::{AdminView, CartView, CatalogView, DashboardView, OrderBoard, StatusFilter},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        i18n::translations,
        i18n::translate_key,
        i18n::get_language,
        i18n::set_language,
        dashboard::dashboard,
        catalog::list_categories,
        catalog::list_cuts,
        catalog::catalog,
        catalog::quote_cart,
        products::list_products,
        products::get_product,
        admin::admin_products,
        admin::edit_product,
        admin::create_product,
        admin::update_product,
        admin::delete_product,
        orders::list_orders,
        orders::order_board,
        orders::get_order,
        orders::update_order_status,
        orders::list_order_logs,
        orders::update_item_packing
    ),
    components(
        schemas(
            Language,
            Currency,
            Category,
            Cut,
            Product,
            ProductName,
            Customer,
            Order,
            OrderItem,
            OrderLog,
            OrderStatus,
            OrderAction,
            OrderWithItems,
            StatusFilter,
            ProductDraft,
            ProductList,
            CategoryList,
            CutList,
            CartLineRequest,
            CartQuoteRequest,
            OrderList,
            OrderLogList,
            UpdateOrderStatusRequest,
            UpdatePackingRequest,
            LanguagePreference,
            SetLanguageRequest,
            TranslationTable,
            TranslatedText,
            params::LocaleQuery,
            params::ProductQuery,
            params::OrderListQuery,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<OrderWithItems>,
            ApiResponse<OrderList>,
            ApiResponse<CatalogView>,
            ApiResponse<CartView>,
            ApiResponse<AdminView>,
            ApiResponse<ProductDraft>,
            ApiResponse<OrderBoard>,
            ApiResponse<DashboardView>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "I18n", description = "Language preference and UI strings"),
        (name = "Dashboard", description = "Summary screen"),
        (name = "Catalog", description = "Browsing and cart pricing"),
        (name = "Products", description = "Product endpoints"),
        (name = "Admin", description = "Product maintenance"),
        (name = "Orders", description = "Order triage and packing"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
