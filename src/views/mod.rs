//! Screen view models. Each builder is a pure function of repository data
//! and the request's [`LocaleContext`](crate::i18n::LocaleContext).

pub mod admin;
pub mod catalog;
pub mod dashboard;
pub mod order_board;

pub use admin::{AdminProductRow, AdminView, build_admin_view};
pub use catalog::{Cart, CartLine, CartView, CatalogTab, CatalogView, ProductCard, build_catalog};
pub use dashboard::{DashboardView, RecentOrderRow, StatCard, build_dashboard};
pub use order_board::{
    ActionButton, BoardTab, ChecklistItem, OrderBoard, OrderCard, StatusFilter, build_order_board,
    build_order_card, filter_orders,
};
