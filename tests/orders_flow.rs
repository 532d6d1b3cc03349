use farmconnect_api::{
    dto::orders::{UpdateOrderStatusRequest, UpdatePackingRequest},
    error::AppError,
    i18n::{Language, LocaleContext},
    middleware::auth::{AuthUser, Role},
    models::{NewProduct, OrderStatus, OrderWithItems},
    repository::{MemoryStore, OrderRepository, ProductRepository},
    services::order_service,
    views::StatusFilter,
};
use rust_decimal::Decimal;
use uuid::Uuid;

fn staff(role: Role) -> AuthUser {
    AuthUser {
        user_id: Uuid::new_v4(),
        role,
    }
}

async fn store_with_orders() -> anyhow::Result<(MemoryStore, Vec<OrderWithItems>)> {
    let store = MemoryStore::with_reference_data().await;
    let chicken = store
        .category_by_code("chicken")
        .await
        .ok_or_else(|| anyhow::anyhow!("missing chicken category"))?;
    let breast = store
        .create_product(NewProduct {
            category_id: chicken.id.to_string(),
            cut_id: None,
            name_en: "Chicken Breast".into(),
            name_ms: "Dada Ayam".into(),
            description_en: None,
            description_ms: None,
            price_usd: Decimal::new(1299, 2),
            price_myr: Decimal::new(5521, 2),
            stock_quantity: 50,
            image_url: None,
            is_active: true,
        })
        .await?;

    let customer = store.insert_customer("Sunrise Cafe", "cafe@example.com").await;
    let mut orders = Vec::new();
    for (number, status) in [
        ("ORD-001", OrderStatus::Pending),
        ("ORD-002", OrderStatus::Packed),
        ("ORD-003", OrderStatus::Delivered),
        ("ORD-004", OrderStatus::Pending),
    ] {
        let order = store
            .insert_order(
                customer.id,
                number,
                "USD",
                status,
                &[(breast.id, 2, breast.price_usd)],
            )
            .await;
        orders.push(order);
    }
    Ok((store, orders))
}

#[tokio::test]
async fn pending_order_moves_forward_and_is_logged() -> anyhow::Result<()> {
    let (store, orders) = store_with_orders().await?;
    let supplier = staff(Role::Supplier);
    let pending = orders[0].order.id;

    let resp = order_service::update_order_status(
        &store,
        &supplier,
        pending,
        UpdateOrderStatusRequest {
            status: OrderStatus::Packed,
        },
    )
    .await?;
    assert_eq!(resp.message, "Order status updated successfully");

    let resp = order_service::update_order_status(
        &store,
        &supplier,
        pending,
        UpdateOrderStatusRequest {
            status: OrderStatus::Delivered,
        },
    )
    .await?;
    let order = resp.data.ok_or_else(|| anyhow::anyhow!("missing order"))?;
    assert_eq!(order.status, OrderStatus::Delivered);

    let logs = store.list_order_logs(pending).await?;
    let steps: Vec<_> = logs
        .iter()
        .map(|l| (l.status_from.as_deref(), l.status_to.as_str()))
        .collect();
    assert_eq!(
        steps,
        [(Some("pending"), "packed"), (Some("packed"), "delivered")]
    );
    Ok(())
}

#[tokio::test]
async fn backward_and_skipping_transitions_are_refused() -> anyhow::Result<()> {
    let (store, orders) = store_with_orders().await?;
    let admin = staff(Role::Admin);

    let delivered = orders[2].order.id;
    let err = order_service::update_order_status(
        &store,
        &admin,
        delivered,
        UpdateOrderStatusRequest {
            status: OrderStatus::Pending,
        },
    )
    .await
    .err();
    assert!(matches!(err, Some(AppError::BadRequest(_))));

    let pending = orders[0].order.id;
    let err = order_service::update_order_status(
        &store,
        &admin,
        pending,
        UpdateOrderStatusRequest {
            status: OrderStatus::Delivered,
        },
    )
    .await
    .err();
    assert!(matches!(err, Some(AppError::BadRequest(_))));

    let unchanged = store.get_order(pending).await?;
    assert_eq!(
        unchanged.map(|o| o.order.status),
        Some(OrderStatus::Pending)
    );
    assert!(store.list_order_logs(pending).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn customers_cannot_touch_fulfilment() -> anyhow::Result<()> {
    let (store, orders) = store_with_orders().await?;
    let customer = staff(Role::Customer);

    let err = order_service::update_order_status(
        &store,
        &customer,
        orders[0].order.id,
        UpdateOrderStatusRequest {
            status: OrderStatus::Packed,
        },
    )
    .await
    .err();
    assert!(matches!(err, Some(AppError::Forbidden)));

    let err = order_service::list_orders(&store, &customer, StatusFilter::All)
        .await
        .err();
    assert!(matches!(err, Some(AppError::Forbidden)));
    Ok(())
}

#[tokio::test]
async fn packing_toggle_sets_and_clears_timestamp() -> anyhow::Result<()> {
    let (store, orders) = store_with_orders().await?;
    let supplier = staff(Role::Supplier);
    let item_id = orders[0].items[0].id;

    let packed = order_service::set_item_packing(
        &store,
        &supplier,
        item_id,
        UpdatePackingRequest { is_packed: true },
    )
    .await?
    .data
    .ok_or_else(|| anyhow::anyhow!("missing item"))?;
    assert!(packed.is_packed);
    assert!(packed.packed_at.is_some());

    let unpacked = order_service::set_item_packing(
        &store,
        &supplier,
        item_id,
        UpdatePackingRequest { is_packed: false },
    )
    .await?
    .data
    .ok_or_else(|| anyhow::anyhow!("missing item"))?;
    assert!(!unpacked.is_packed);
    assert!(unpacked.packed_at.is_none());
    Ok(())
}

#[tokio::test]
async fn list_filters_by_status_newest_first() -> anyhow::Result<()> {
    let (store, _) = store_with_orders().await?;
    let admin = staff(Role::Admin);

    let resp = order_service::list_orders(&store, &admin, StatusFilter::Pending).await?;
    let numbers: Vec<_> = resp
        .data
        .map(|list| list.items)
        .unwrap_or_default()
        .into_iter()
        .map(|o| o.order.order_number)
        .collect();
    assert_eq!(numbers, ["ORD-004", "ORD-001"]);
    assert_eq!(resp.meta.and_then(|m| m.total), Some(2));

    let board = order_service::order_board(&store, &admin, &LocaleContext::new(Language::Ms))
        .await?
        .data
        .ok_or_else(|| anyhow::anyhow!("missing board"))?;
    let counts: Vec<_> = board.tabs.iter().map(|t| t.count).collect();
    assert_eq!(counts, [4, 2, 1, 1]);
    assert_eq!(board.title, "Pesanan");
    Ok(())
}

#[tokio::test]
async fn failed_write_surfaces_generic_notice() -> anyhow::Result<()> {
    let (store, orders) = store_with_orders().await?;
    let admin = staff(Role::Admin);
    let pending = orders[0].order.id;

    store.set_fail_writes(true);
    let err = order_service::update_order_status(
        &store,
        &admin,
        pending,
        UpdateOrderStatusRequest {
            status: OrderStatus::Packed,
        },
    )
    .await
    .err();
    assert!(
        matches!(&err, Some(AppError::OperationFailed(msg)) if msg == "Failed to update order status")
    );

    store.set_fail_writes(false);
    let order = store.get_order(pending).await?;
    assert_eq!(order.map(|o| o.order.status), Some(OrderStatus::Pending));
    Ok(())
}

#[tokio::test]
async fn unknown_order_is_not_found() {
    let store = MemoryStore::new();
    let err = order_service::get_order(&store, &staff(Role::Admin), Uuid::new_v4())
        .await
        .err();
    assert!(matches!(err, Some(AppError::NotFound)));
}
