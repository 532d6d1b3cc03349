use uuid::Uuid;

use crate::{
    dto::products::ProductDraft,
    error::{AppError, AppResult},
    i18n::LocaleContext,
    middleware::auth::{AuthUser, ensure_admin},
    models::Product,
    repository::{CategoryRepository, ProductFilter, ProductRepository},
    response::{ApiResponse, Meta},
    views::{AdminView, build_admin_view},
};

/// Every product, active or not, with the form labels and reference options.
pub async fn admin_view<R>(
    repo: &R,
    user: &AuthUser,
    ctx: &LocaleContext,
) -> AppResult<ApiResponse<AdminView>>
where
    R: CategoryRepository + ProductRepository,
{
    ensure_admin(user)?;

    let categories = repo
        .list_categories()
        .await
        .map_err(AppError::operation_failed("Failed to load categories"))?;
    let cuts = repo
        .list_cuts()
        .await
        .map_err(AppError::operation_failed("Failed to load cuts"))?;
    let products = repo
        .list_products(&ProductFilter::default())
        .await
        .map_err(AppError::operation_failed("Failed to load products"))?;

    let meta = Meta::total(products.len());
    let view = build_admin_view(ctx, &categories, &cuts, &products);
    Ok(ApiResponse::success("Admin", view, Some(meta)))
}

/// Public lookup; inactive products are hidden as if they did not exist.
pub async fn get_product<R: ProductRepository>(
    repo: &R,
    id: Uuid,
) -> AppResult<ApiResponse<Product>> {
    let product = repo
        .get_product(id)
        .await
        .map_err(AppError::operation_failed("Failed to load products"))?
        .filter(|p| p.is_active)
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Ok", product, Some(Meta::empty())))
}

/// The edit form for one product, prefilled with its stored values.
pub async fn edit_draft<R: ProductRepository>(
    repo: &R,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<ProductDraft>> {
    ensure_admin(user)?;
    let product = repo
        .get_product(id)
        .await
        .map_err(AppError::operation_failed("Failed to load products"))?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success(
        "Ok",
        ProductDraft::from_product(&product),
        Some(Meta::empty()),
    ))
}

pub async fn create_product<R: ProductRepository>(
    repo: &R,
    user: &AuthUser,
    draft: ProductDraft,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    let new_product = draft.into_new_product()?;

    let product = repo
        .create_product(new_product)
        .await
        .map_err(AppError::operation_failed("Failed to add product"))?;

    tracing::info!(product_id = %product.id, user_id = %user.user_id, "product created");
    Ok(ApiResponse::success(
        "Product added successfully",
        product,
        Some(Meta::empty()),
    ))
}

pub async fn update_product<R: ProductRepository>(
    repo: &R,
    user: &AuthUser,
    id: Uuid,
    draft: ProductDraft,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    let changes = draft.into_new_product()?;

    let product = repo
        .update_product(id, changes)
        .await
        .map_err(AppError::operation_failed("Failed to update product"))?;

    tracing::info!(product_id = %product.id, user_id = %user.user_id, "product updated");
    Ok(ApiResponse::success(
        "Product updated successfully",
        product,
        Some(Meta::empty()),
    ))
}

pub async fn delete_product<R: ProductRepository>(
    repo: &R,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;

    repo.delete_product(id)
        .await
        .map_err(AppError::operation_failed("Failed to delete product"))?;

    tracing::info!(product_id = %id, user_id = %user.user_id, "product deleted");
    Ok(ApiResponse::message_only("Product deleted successfully"))
}
