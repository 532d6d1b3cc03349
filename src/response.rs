use serde::Serialize;
use utoipa::ToSchema;

/// Envelope metadata. Lists are returned whole, so only a count is carried.
#[derive(Debug, Serialize, ToSchema, Clone, Default, PartialEq, Eq)]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
}

impl Meta {
    pub fn total(count: usize) -> Self {
        Self { total: Some(count) }
    }

    pub fn empty() -> Self {
        Self { total: None }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }

    /// A mutation that has nothing to return beyond its notice.
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
            meta: None,
        }
    }
}
