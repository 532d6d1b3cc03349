use axum::{Json, Router, routing::get};

use crate::{
    middleware::locale::RequestLocale,
    response::ApiResponse,
    services::dashboard_service,
    state::AppState,
    views::DashboardView,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(dashboard))
}

#[utoipa::path(
    get,
    path = "/api/dashboard",
    params(
        ("lang" = Option<String>, Query, description = "en or ms")
    ),
    responses(
        (status = 200, description = "Summary cards and recent orders", body = ApiResponse<DashboardView>),
    ),
    tag = "Dashboard"
)]
pub async fn dashboard(RequestLocale(ctx): RequestLocale) -> Json<ApiResponse<DashboardView>> {
    Json(dashboard_service::dashboard(&ctx))
}
