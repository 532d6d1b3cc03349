use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch},
};
use uuid::Uuid;

use crate::{
    dto::orders::{OrderList, OrderLogList, UpdateOrderStatusRequest, UpdatePackingRequest},
    error::AppResult,
    middleware::{auth::AuthUser, locale::RequestLocale},
    models::{Order, OrderItem, OrderWithItems},
    response::ApiResponse,
    routes::params::OrderListQuery,
    services::order_service,
    state::AppState,
    views::OrderBoard,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders))
        .route("/board", get(order_board))
        .route("/{id}", get(get_order))
        .route("/{id}/status", patch(update_order_status))
        .route("/{id}/logs", get(list_order_logs))
        .route("/items/{item_id}/packing", patch(update_item_packing))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    params(
        ("status" = Option<String>, Query, description = "all, pending, packed, delivered or cancelled")
    ),
    responses(
        (status = 200, description = "Orders newest first, with customer and items", body = ApiResponse<OrderList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let filter = query.status.unwrap_or_default();
    let resp = order_service::list_orders(&state.store, &user, filter).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/orders/board",
    params(
        ("lang" = Option<String>, Query, description = "en or ms")
    ),
    responses(
        (status = 200, description = "Status tabs with order cards", body = ApiResponse<OrderBoard>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn order_board(
    State(state): State<AppState>,
    user: AuthUser,
    RequestLocale(ctx): RequestLocale,
) -> AppResult<Json<ApiResponse<OrderBoard>>> {
    let resp = order_service::order_board(&state.store, &user, &ctx).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order with customer and items", body = ApiResponse<OrderWithItems>),
        (status = 404, description = "Order not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<OrderWithItems>>> {
    let resp = order_service::get_order(&state.store, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/orders/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Order status updated successfully", body = ApiResponse<Order>),
        (status = 400, description = "Not a forward transition"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Failed to update order status"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = order_service::update_order_status(&state.store, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}/logs",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Status history, oldest first", body = ApiResponse<OrderLogList>),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn list_order_logs(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<OrderLogList>>> {
    let resp = order_service::list_order_logs(&state.store, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/orders/items/{item_id}/packing",
    params(
        ("item_id" = Uuid, Path, description = "Order item ID")
    ),
    request_body = UpdatePackingRequest,
    responses(
        (status = 200, description = "Item packing updated", body = ApiResponse<OrderItem>),
        (status = 404, description = "Item not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn update_item_packing(
    State(state): State<AppState>,
    user: AuthUser,
    Path(item_id): Path<Uuid>,
    Json(payload): Json<UpdatePackingRequest>,
) -> AppResult<Json<ApiResponse<OrderItem>>> {
    let resp = order_service::set_item_packing(&state.store, &user, item_id, payload).await?;
    Ok(Json(resp))
}
