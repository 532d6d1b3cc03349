use crate::{
    dto::catalog::{CartQuoteRequest, CategoryList, CutList},
    dto::products::ProductList,
    error::{AppError, AppResult},
    i18n::LocaleContext,
    repository::{CategoryRepository, ProductFilter, ProductRepository},
    response::{ApiResponse, Meta},
    views::{Cart, CartView, CatalogView, build_catalog},
};

pub async fn list_categories<R: CategoryRepository>(
    repo: &R,
) -> AppResult<ApiResponse<CategoryList>> {
    let items = repo
        .list_categories()
        .await
        .map_err(AppError::operation_failed("Failed to load categories"))?;
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Categories", CategoryList { items }, Some(meta)))
}

pub async fn list_cuts<R: CategoryRepository>(repo: &R) -> AppResult<ApiResponse<CutList>> {
    let items = repo
        .list_cuts()
        .await
        .map_err(AppError::operation_failed("Failed to load cuts"))?;
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Cuts", CutList { items }, Some(meta)))
}

/// Active products, optionally narrowed to one category code.
pub async fn list_products<R: ProductRepository>(
    repo: &R,
    category: Option<String>,
) -> AppResult<ApiResponse<ProductList>> {
    let filter = ProductFilter {
        active_only: true,
        category_code: category,
    };
    let items = repo
        .list_products(&filter)
        .await
        .map_err(AppError::operation_failed("Failed to load products"))?;
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn catalog<R>(repo: &R, ctx: &LocaleContext) -> AppResult<ApiResponse<CatalogView>>
where
    R: CategoryRepository + ProductRepository,
{
    let categories = repo
        .list_categories()
        .await
        .map_err(AppError::operation_failed("Failed to load categories"))?;
    let products = repo
        .list_products(&ProductFilter::active())
        .await
        .map_err(AppError::operation_failed("Failed to load products"))?;

    let view = build_catalog(ctx, &categories, &products);
    Ok(ApiResponse::success("Catalog", view, Some(Meta::empty())))
}

/// Price a basket in the active currency without storing anything.
pub async fn quote_cart<R: ProductRepository>(
    repo: &R,
    ctx: &LocaleContext,
    payload: CartQuoteRequest,
) -> AppResult<ApiResponse<CartView>> {
    let mut cart = Cart::new(*ctx);
    for line in payload.items {
        if line.quantity == 0 {
            return Err(AppError::BadRequest(
                "quantity must be greater than 0".to_string(),
            ));
        }
        let product = repo
            .get_product(line.product_id)
            .await
            .map_err(AppError::operation_failed("Failed to load products"))?
            .filter(|p| p.is_active)
            .ok_or_else(|| {
                AppError::BadRequest(format!("product {} is not available", line.product_id))
            })?;
        cart.add(&product, line.quantity)?;
    }

    tracing::debug!(lines = cart.lines().len(), units = cart.len(), "cart quoted");
    Ok(ApiResponse::success("Cart", cart.into_view(), Some(Meta::empty())))
}
