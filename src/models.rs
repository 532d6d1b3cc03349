use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub code: String,
    pub name_en: String,
    pub name_ms: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Cut {
    pub id: Uuid,
    pub code: String,
    pub name_en: String,
    pub name_ms: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub category_id: Uuid,
    pub cut_id: Option<Uuid>,
    pub name_en: String,
    pub name_ms: String,
    pub description_en: Option<String>,
    pub description_ms: Option<String>,
    #[schema(value_type = String)]
    pub price_usd: Decimal,
    #[schema(value_type = String)]
    pub price_myr: Decimal,
    pub stock_quantity: i32,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Joined reference data; absent when the category row is missing.
    pub category: Option<Category>,
    pub cut: Option<Cut>,
}

/// Validated product fields ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub category_id: String,
    pub cut_id: Option<String>,
    pub name_en: String,
    pub name_ms: String,
    pub description_en: Option<String>,
    pub description_ms: Option<String>,
    pub price_usd: Decimal,
    pub price_myr: Decimal,
    pub stock_quantity: i32,
    pub image_url: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Customer {
    pub id: Uuid,
    pub business_name: String,
    pub contact_person: Option<String>,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Packed,
    Delivered,
    Cancelled,
}

/// Fulfilment actions a staff member can take on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum OrderAction {
    MarkPacked,
    MarkDelivered,
}

impl OrderAction {
    pub fn target(self) -> OrderStatus {
        match self {
            OrderAction::MarkPacked => OrderStatus::Packed,
            OrderAction::MarkDelivered => OrderStatus::Delivered,
        }
    }

    /// Translation key of the button label.
    pub fn label_key(self) -> &'static str {
        match self {
            OrderAction::MarkPacked => "order.markPacked",
            OrderAction::MarkDelivered => "order.markDelivered",
        }
    }
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Packed,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Packed => "packed",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// The single forward step; delivered and cancelled are terminal.
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Packed),
            OrderStatus::Packed => Some(OrderStatus::Delivered),
            OrderStatus::Delivered | OrderStatus::Cancelled => None,
        }
    }

    pub fn available_action(self) -> Option<OrderAction> {
        match self {
            OrderStatus::Pending => Some(OrderAction::MarkPacked),
            OrderStatus::Packed => Some(OrderAction::MarkDelivered),
            OrderStatus::Delivered | OrderStatus::Cancelled => None,
        }
    }

    pub fn can_transition_to(self, target: OrderStatus) -> bool {
        self.next() == Some(target)
    }

    pub fn label_key(self) -> &'static str {
        match self {
            OrderStatus::Pending => "order.pending",
            OrderStatus::Packed => "order.packed",
            OrderStatus::Delivered => "order.delivered",
            OrderStatus::Cancelled => "order.cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "packed" => Ok(OrderStatus::Packed),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(format!("unknown order status: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub order_number: String,
    pub status: OrderStatus,
    pub currency: String,
    #[schema(value_type = String)]
    pub subtotal: Decimal,
    #[schema(value_type = String)]
    pub total: Decimal,
    pub customer_id: Uuid,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductName {
    pub name_en: String,
    pub name_ms: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    #[schema(value_type = String)]
    pub unit_price: Decimal,
    #[schema(value_type = String)]
    pub total_price: Decimal,
    pub is_packed: bool,
    pub packed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub product: Option<ProductName>,
}

impl OrderItem {
    pub fn line_total(quantity: i32, unit_price: Decimal) -> Decimal {
        unit_price * Decimal::from(quantity)
    }
}

/// An order as the status board reads it: customer and items joined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderWithItems {
    pub order: Order,
    pub customer: Option<Customer>,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderLog {
    pub id: Uuid,
    pub order_id: Uuid,
    pub status_from: Option<String>,
    pub status_to: String,
    pub changed_by: Option<Uuid>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_forward_steps_are_allowed() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Packed));
        assert!(OrderStatus::Packed.can_transition_to(OrderStatus::Delivered));

        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Delivered));
        assert!(!OrderStatus::Packed.can_transition_to(OrderStatus::Pending));
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Packed));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Cancelled));
        for target in OrderStatus::ALL {
            assert!(!OrderStatus::Cancelled.can_transition_to(target));
        }
    }

    #[test]
    fn terminal_states_expose_no_action() {
        assert_eq!(
            OrderStatus::Pending.available_action(),
            Some(OrderAction::MarkPacked)
        );
        assert_eq!(
            OrderStatus::Packed.available_action(),
            Some(OrderAction::MarkDelivered)
        );
        assert_eq!(OrderStatus::Delivered.available_action(), None);
        assert_eq!(OrderStatus::Cancelled.available_action(), None);
    }

    #[test]
    fn status_round_trips_through_its_column_text() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }
        assert!("shipped".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn line_total_multiplies_quantity() {
        let unit = Decimal::new(1299, 2);
        assert_eq!(OrderItem::line_total(3, unit), Decimal::new(3897, 2));
    }
}
