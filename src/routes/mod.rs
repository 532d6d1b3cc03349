use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod catalog;
pub mod dashboard;
pub mod doc;
pub mod health;
pub mod i18n;
pub mod orders;
pub mod params;
pub mod products;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .merge(i18n::router())
        .merge(catalog::router())
        .nest("/dashboard", dashboard::router())
        .nest("/products", products::router())
        .nest("/orders", orders::router())
        .nest("/admin", admin::router())
}
