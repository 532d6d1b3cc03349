use serde::Deserialize;
use utoipa::ToSchema;

use crate::views::StatusFilter;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LocaleQuery {
    /// `en` or `ms`; overrides the stored preference for this request.
    pub lang: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ProductQuery {
    /// Category code such as `beef`.
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct OrderListQuery {
    pub status: Option<StatusFilter>,
}
