use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::catalog::{CartQuoteRequest, CategoryList, CutList},
    error::AppResult,
    middleware::locale::RequestLocale,
    response::ApiResponse,
    services::catalog_service,
    state::AppState,
    views::{CartView, CatalogView},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/cuts", get(list_cuts))
        .route("/catalog", get(catalog))
        .route("/catalog/cart/quote", post(quote_cart))
}

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "Categories ordered by code", body = ApiResponse<CategoryList>),
    ),
    tag = "Catalog"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CategoryList>>> {
    let resp = catalog_service::list_categories(&state.store).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/cuts",
    responses(
        (status = 200, description = "Cuts ordered by code", body = ApiResponse<CutList>),
    ),
    tag = "Catalog"
)]
pub async fn list_cuts(State(state): State<AppState>) -> AppResult<Json<ApiResponse<CutList>>> {
    let resp = catalog_service::list_cuts(&state.store).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/catalog",
    params(
        ("lang" = Option<String>, Query, description = "en or ms")
    ),
    responses(
        (status = 200, description = "Active products grouped into category tabs", body = ApiResponse<CatalogView>),
    ),
    tag = "Catalog"
)]
pub async fn catalog(
    State(state): State<AppState>,
    RequestLocale(ctx): RequestLocale,
) -> AppResult<Json<ApiResponse<CatalogView>>> {
    let resp = catalog_service::catalog(&state.store, &ctx).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/catalog/cart/quote",
    params(
        ("lang" = Option<String>, Query, description = "en or ms")
    ),
    request_body = CartQuoteRequest,
    responses(
        (status = 200, description = "Basket priced in the active currency", body = ApiResponse<CartView>),
        (status = 400, description = "Unknown product or zero quantity"),
    ),
    tag = "Catalog"
)]
pub async fn quote_cart(
    State(state): State<AppState>,
    RequestLocale(ctx): RequestLocale,
    Json(payload): Json<CartQuoteRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = catalog_service::quote_cart(&state.store, &ctx, payload).await?;
    Ok(Json(resp))
}
