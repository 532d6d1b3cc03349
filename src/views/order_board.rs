use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    i18n::LocaleContext,
    models::{OrderAction, OrderStatus, OrderWithItems},
    pricing::Currency,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Packed,
    Delivered,
    Cancelled,
}

impl StatusFilter {
    /// Tabs shown on the status board, in display order.
    pub const BOARD_TABS: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Pending,
        StatusFilter::Packed,
        StatusFilter::Delivered,
    ];

    pub fn status(self) -> Option<OrderStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Pending => Some(OrderStatus::Pending),
            StatusFilter::Packed => Some(OrderStatus::Packed),
            StatusFilter::Delivered => Some(OrderStatus::Delivered),
            StatusFilter::Cancelled => Some(OrderStatus::Cancelled),
        }
    }

    pub fn matches(self, status: OrderStatus) -> bool {
        self.status().is_none_or(|wanted| wanted == status)
    }
}

/// Keep the orders matching `filter`, preserving their order.
pub fn filter_orders(orders: &[OrderWithItems], filter: StatusFilter) -> Vec<OrderWithItems> {
    orders
        .iter()
        .filter(|o| filter.matches(o.order.status))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChecklistItem {
    pub id: Uuid,
    pub name: String,
    pub quantity: i32,
    pub unit_price_display: String,
    pub is_packed: bool,
    pub packed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ActionButton {
    pub action: OrderAction,
    pub label: String,
    pub target: OrderStatus,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderCard {
    pub id: Uuid,
    pub order_number: String,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub status: OrderStatus,
    pub status_label: String,
    pub date: String,
    pub total_display: String,
    pub items: Vec<ChecklistItem>,
    /// Zero or one entry: the next forward step, if any.
    pub actions: Vec<ActionButton>,
}

/// Money on an order card is shown in the order's own currency.
pub fn build_order_card(ctx: &LocaleContext, order: &OrderWithItems) -> OrderCard {
    let currency = Currency::from_code(&order.order.currency);
    let status = order.order.status;

    let items = order
        .items
        .iter()
        .map(|item| ChecklistItem {
            id: item.id,
            name: item
                .product
                .as_ref()
                .map(|p| ctx.pick(&p.name_en, &p.name_ms).to_string())
                .unwrap_or_default(),
            quantity: item.quantity,
            unit_price_display: currency.format(item.unit_price),
            is_packed: item.is_packed,
            packed_at: item.packed_at,
        })
        .collect();

    let actions = status
        .available_action()
        .map(|action| ActionButton {
            action,
            label: ctx.t(action.label_key()).to_string(),
            target: action.target(),
        })
        .into_iter()
        .collect();

    OrderCard {
        id: order.order.id,
        order_number: order.order.order_number.clone(),
        customer_name: order.customer.as_ref().map(|c| c.business_name.clone()),
        customer_email: order.customer.as_ref().map(|c| c.email.clone()),
        status,
        status_label: ctx.t(status.label_key()).to_string(),
        date: order.order.created_at.format("%Y-%m-%d").to_string(),
        total_display: currency.format(order.order.total),
        items,
        actions,
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BoardTab {
    pub filter: StatusFilter,
    pub label: String,
    pub count: usize,
    pub orders: Vec<OrderCard>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderBoard {
    pub title: String,
    pub tabs: Vec<BoardTab>,
}

pub fn build_order_board(ctx: &LocaleContext, orders: &[OrderWithItems]) -> OrderBoard {
    let tabs = StatusFilter::BOARD_TABS
        .iter()
        .map(|&filter| {
            let cards: Vec<OrderCard> = filter_orders(orders, filter)
                .iter()
                .map(|o| build_order_card(ctx, o))
                .collect();
            let label = match filter.status() {
                Some(status) => ctx.t(status.label_key()).to_string(),
                None => "All Orders".to_string(),
            };
            BoardTab {
                filter,
                label,
                count: cards.len(),
                orders: cards,
            }
        })
        .collect();

    OrderBoard {
        title: ctx.t("nav.orders").to_string(),
        tabs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        i18n::Language,
        models::{Customer, Order, OrderItem, ProductName},
    };
    use rust_decimal::Decimal;

    fn order(number: &str, status: OrderStatus, currency: &str) -> OrderWithItems {
        let id = Uuid::new_v4();
        OrderWithItems {
            order: Order {
                id,
                order_number: number.into(),
                status,
                currency: currency.into(),
                subtotal: Decimal::new(2598, 2),
                total: Decimal::new(2598, 2),
                customer_id: Uuid::new_v4(),
                notes: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            customer: Some(Customer {
                id: Uuid::new_v4(),
                business_name: "Sunrise Cafe".into(),
                contact_person: None,
                email: "cafe@example.com".into(),
                phone: None,
            }),
            items: vec![OrderItem {
                id: Uuid::new_v4(),
                order_id: id,
                product_id: Uuid::new_v4(),
                quantity: 2,
                unit_price: Decimal::new(1299, 2),
                total_price: Decimal::new(2598, 2),
                is_packed: false,
                packed_at: None,
                created_at: Utc::now(),
                product: Some(ProductName {
                    name_en: "Chicken Breast".into(),
                    name_ms: "Dada Ayam".into(),
                }),
            }],
        }
    }

    fn sample() -> Vec<OrderWithItems> {
        vec![
            order("ORD-004", OrderStatus::Pending, "USD"),
            order("ORD-003", OrderStatus::Delivered, "MYR"),
            order("ORD-002", OrderStatus::Pending, "USD"),
            order("ORD-001", OrderStatus::Cancelled, "USD"),
        ]
    }

    #[test]
    fn filtering_returns_exact_subset_in_order() {
        let orders = sample();
        let pending = filter_orders(&orders, StatusFilter::Pending);
        let numbers: Vec<_> = pending.iter().map(|o| o.order.order_number.as_str()).collect();
        assert_eq!(numbers, ["ORD-004", "ORD-002"]);
        assert!(pending.iter().all(|o| o.order.status == OrderStatus::Pending));

        assert_eq!(filter_orders(&orders, StatusFilter::All), orders);
        assert!(filter_orders(&orders, StatusFilter::Packed).is_empty());
    }

    #[test]
    fn board_counts_each_tab() {
        let board = build_order_board(&LocaleContext::new(Language::En), &sample());
        let counts: Vec<_> = board.tabs.iter().map(|t| (t.label.as_str(), t.count)).collect();
        assert_eq!(
            counts,
            [("All Orders", 4), ("Pending", 2), ("Packed", 0), ("Delivered", 1)]
        );
    }

    #[test]
    fn cards_offer_only_the_next_forward_step() {
        let ctx = LocaleContext::new(Language::Ms);
        let pending = build_order_card(&ctx, &order("A", OrderStatus::Pending, "USD"));
        assert_eq!(pending.actions.len(), 1);
        assert_eq!(pending.actions[0].action, OrderAction::MarkPacked);
        assert_eq!(pending.actions[0].label, "Tandakan Sebagai Dibungkus");

        let packed = build_order_card(&ctx, &order("B", OrderStatus::Packed, "USD"));
        assert_eq!(packed.actions[0].action, OrderAction::MarkDelivered);
        assert_eq!(packed.actions[0].target, OrderStatus::Delivered);

        for status in [OrderStatus::Delivered, OrderStatus::Cancelled] {
            let card = build_order_card(&ctx, &order("C", status, "USD"));
            assert!(card.actions.is_empty());
        }
    }

    #[test]
    fn card_money_follows_order_currency() {
        let ctx = LocaleContext::new(Language::Ms);
        let card = build_order_card(&ctx, &order("A", OrderStatus::Pending, "USD"));
        assert_eq!(card.total_display, "$25.98");
        assert_eq!(card.items[0].unit_price_display, "$12.99");
        assert_eq!(card.items[0].name, "Dada Ayam");
        assert_eq!(card.status_label, "Menunggu");
        assert_eq!(card.customer_name.as_deref(), Some("Sunrise Cafe"));
    }
}
