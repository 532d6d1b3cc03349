use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Category, Cut};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CartLineRequest {
    pub product_id: Uuid,
    pub quantity: u32,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CartQuoteRequest {
    pub items: Vec<CartLineRequest>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryList {
    pub items: Vec<Category>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CutList {
    pub items: Vec<Cut>,
}
