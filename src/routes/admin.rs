use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::products::ProductDraft,
    error::AppResult,
    middleware::{auth::AuthUser, locale::RequestLocale},
    models::Product,
    response::ApiResponse,
    services::product_service,
    state::AppState,
    views::AdminView,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(admin_products).post(create_product))
        .route(
            "/products/{id}",
            get(edit_product).put(update_product).delete(delete_product),
        )
}

#[utoipa::path(
    get,
    path = "/api/admin/products",
    params(
        ("lang" = Option<String>, Query, description = "en or ms")
    ),
    responses(
        (status = 200, description = "Admin panel: form labels, options and every product", body = ApiResponse<AdminView>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn admin_products(
    State(state): State<AppState>,
    user: AuthUser,
    RequestLocale(ctx): RequestLocale,
) -> AppResult<Json<ApiResponse<AdminView>>> {
    let resp = product_service::admin_view(&state.store, &user, &ctx).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/products",
    request_body = ProductDraft,
    responses(
        (status = 201, description = "Product added successfully", body = ApiResponse<Product>),
        (status = 400, description = "Please fill in all required fields"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Failed to add product"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_product(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ProductDraft>,
) -> AppResult<(StatusCode, Json<ApiResponse<Product>>)> {
    let resp = product_service::create_product(&state.store, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/admin/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Edit form prefilled from the stored product", body = ApiResponse<ProductDraft>),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn edit_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ProductDraft>>> {
    let resp = product_service::edit_draft(&state.store, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = ProductDraft,
    responses(
        (status = 200, description = "Product updated successfully", body = ApiResponse<Product>),
        (status = 400, description = "Please fill in all required fields"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Failed to update product"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProductDraft>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::update_product(&state.store, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted successfully"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Failed to delete product"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = product_service::delete_product(&state.store, &user, id).await?;
    Ok(Json(resp))
}
