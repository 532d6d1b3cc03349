use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{OrderLog, OrderStatus, OrderWithItems};

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePackingRequest {
    pub is_packed: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<OrderWithItems>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderLogList {
    pub items: Vec<OrderLog>,
}
