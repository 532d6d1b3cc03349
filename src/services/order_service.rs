use chrono::Utc;
use uuid::Uuid;

use crate::{
    dto::orders::{OrderList, OrderLogList, UpdateOrderStatusRequest, UpdatePackingRequest},
    error::{AppError, AppResult},
    i18n::LocaleContext,
    middleware::auth::{AuthUser, ensure_staff},
    models::{Order, OrderItem, OrderWithItems},
    repository::OrderRepository,
    response::{ApiResponse, Meta},
    views::{OrderBoard, StatusFilter, build_order_board, filter_orders},
};

pub async fn list_orders<R: OrderRepository>(
    repo: &R,
    user: &AuthUser,
    filter: StatusFilter,
) -> AppResult<ApiResponse<OrderList>> {
    ensure_staff(user)?;

    let orders = repo
        .list_orders()
        .await
        .map_err(AppError::operation_failed("Failed to load orders"))?;
    let items = filter_orders(&orders, filter);

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Ok", OrderList { items }, Some(meta)))
}

pub async fn order_board<R: OrderRepository>(
    repo: &R,
    user: &AuthUser,
    ctx: &LocaleContext,
) -> AppResult<ApiResponse<OrderBoard>> {
    ensure_staff(user)?;

    let orders = repo
        .list_orders()
        .await
        .map_err(AppError::operation_failed("Failed to load orders"))?;

    let meta = Meta::total(orders.len());
    Ok(ApiResponse::success(
        "Ok",
        build_order_board(ctx, &orders),
        Some(meta),
    ))
}

pub async fn get_order<R: OrderRepository>(
    repo: &R,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<OrderWithItems>> {
    ensure_staff(user)?;

    let order = repo
        .get_order(id)
        .await
        .map_err(AppError::operation_failed("Failed to load orders"))?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Ok", order, Some(Meta::empty())))
}

/// Move an order one step forward. Anything else is refused before the store is touched.
pub async fn update_order_status<R: OrderRepository>(
    repo: &R,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    ensure_staff(user)?;

    let current = repo
        .get_order(id)
        .await
        .map_err(AppError::operation_failed("Failed to update order status"))?
        .ok_or(AppError::NotFound)?;
    let from = current.order.status;
    if !from.can_transition_to(payload.status) {
        return Err(AppError::BadRequest(format!(
            "cannot move order from {from} to {}",
            payload.status
        )));
    }

    let order = repo
        .update_order_status(id, payload.status)
        .await
        .map_err(AppError::operation_failed("Failed to update order status"))?;

    tracing::info!(
        order_id = %order.id,
        from = %from,
        to = %order.status,
        user_id = %user.user_id,
        "order status updated"
    );
    Ok(ApiResponse::success(
        "Order status updated successfully",
        order,
        Some(Meta::empty()),
    ))
}

/// Tick or untick a line on the packing checklist.
pub async fn set_item_packing<R: OrderRepository>(
    repo: &R,
    user: &AuthUser,
    item_id: Uuid,
    payload: UpdatePackingRequest,
) -> AppResult<ApiResponse<OrderItem>> {
    ensure_staff(user)?;

    let packed_at = payload.is_packed.then(Utc::now);
    let item = repo
        .set_item_packed(item_id, payload.is_packed, packed_at)
        .await
        .map_err(AppError::operation_failed("Failed to update item packing"))?;

    tracing::info!(item_id = %item.id, is_packed = item.is_packed, "item packing updated");
    Ok(ApiResponse::success(
        "Item packing updated",
        item,
        Some(Meta::empty()),
    ))
}

pub async fn list_order_logs<R: OrderRepository>(
    repo: &R,
    user: &AuthUser,
    order_id: Uuid,
) -> AppResult<ApiResponse<OrderLogList>> {
    ensure_staff(user)?;

    let items = repo
        .list_order_logs(order_id)
        .await
        .map_err(AppError::operation_failed("Failed to load order history"))?;

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Ok", OrderLogList { items }, Some(meta)))
}
