use crate::{
    i18n::LocaleContext,
    response::{ApiResponse, Meta},
    views::{DashboardView, build_dashboard},
};

pub fn dashboard(ctx: &LocaleContext) -> ApiResponse<DashboardView> {
    ApiResponse::success("Dashboard", build_dashboard(ctx), Some(Meta::empty()))
}
