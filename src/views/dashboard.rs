use serde::Serialize;
use utoipa::ToSchema;

use crate::{i18n::LocaleContext, models::OrderStatus, pricing::Currency};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StatCard {
    pub title: String,
    pub value: String,
    pub trend: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecentOrderRow {
    pub id: String,
    pub customer: String,
    pub items: String,
    pub total: String,
    pub status: OrderStatus,
    pub status_label: String,
    pub date: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardView {
    pub welcome: String,
    pub subtitle: String,
    pub stats: Vec<StatCard>,
    pub recent_orders: Vec<RecentOrderRow>,
}

/// Illustrative figures only; nothing here is aggregated from live orders.
pub fn build_dashboard(ctx: &LocaleContext) -> DashboardView {
    let usd = ctx.currency() == Currency::Usd;
    let money = |usd_text: &str, myr_text: &str| {
        if usd {
            usd_text.to_string()
        } else {
            myr_text.to_string()
        }
    };

    let stat = |key: &str, value: String, trend: &str| StatCard {
        title: ctx.t(key).to_string(),
        value,
        trend: trend.to_string(),
    };
    let stats = vec![
        stat("dashboard.totalOrders", "127".into(), "+12%"),
        stat("dashboard.totalProducts", "24".into(), "+3"),
        stat("dashboard.revenue", money("$15,847", "RM 67,234"), "+8.2%"),
        stat("dashboard.pendingOrders", "8".into(), "-2"),
    ];

    let row = |id: &str, customer: &str, items: &str, total, status: OrderStatus, date: &str| {
        RecentOrderRow {
            id: id.to_string(),
            customer: customer.to_string(),
            items: items.to_string(),
            total,
            status,
            status_label: ctx.t(status.label_key()).to_string(),
            date: date.to_string(),
        }
    };
    let recent_orders = vec![
        row(
            "ORD-001",
            "Sunrise Cafe",
            "Chicken Breast x5, Beef Ribs x2",
            money("$127.50", "RM 541.75"),
            OrderStatus::Pending,
            "2024-06-04",
        ),
        row(
            "ORD-002",
            "Mountain View Restaurant",
            "Mutton Leg x3, Chicken Thigh x8",
            money("$245.00", "RM 1,041.25"),
            OrderStatus::Packed,
            "2024-06-04",
        ),
        row(
            "ORD-003",
            "Urban Bistro",
            "Beef Belly x4, Mutton Shoulder x2",
            money("$189.75", "RM 806.44"),
            OrderStatus::Delivered,
            "2024-06-03",
        ),
    ];

    DashboardView {
        welcome: ctx.t("dashboard.welcome").to_string(),
        subtitle: ctx.t("dashboard.subtitle").to_string(),
        stats,
        recent_orders,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;

    #[test]
    fn english_dashboard_uses_dollars() {
        let view = build_dashboard(&LocaleContext::new(Language::En));
        assert_eq!(view.welcome, "Welcome to FarmConnect");
        assert_eq!(view.stats.len(), 4);
        assert_eq!(view.stats[2].title, "Revenue");
        assert_eq!(view.stats[2].value, "$15,847");
        assert_eq!(view.recent_orders[0].total, "$127.50");
        assert_eq!(view.recent_orders[1].status_label, "Packed");
    }

    #[test]
    fn malay_dashboard_uses_ringgit() {
        let view = build_dashboard(&LocaleContext::new(Language::Ms));
        assert_eq!(view.stats[0].title, "Jumlah Pesanan");
        assert_eq!(view.stats[2].value, "RM 67,234");
        assert_eq!(view.recent_orders[2].status_label, "Dihantar");
    }
}
