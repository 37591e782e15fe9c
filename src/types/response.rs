//! Standard response envelope shared by every endpoint.

use serde::Serialize;

use super::PaginationMeta;

/// Uniform API response wrapper: `{status, message, data}`.
///
/// `data` is always serialized, as `null` when there is nothing to return
/// (logout, for example).
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: &'static str,
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Successful response carrying data
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: "success",
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Successful response with no data payload (`data: null`)
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            message: message.into(),
            data: None,
        }
    }
}

/// List response: the standard envelope plus pagination metadata.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    pub status: &'static str,
    pub message: String,
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T: Serialize> PaginatedResponse<T> {
    pub fn success(message: impl Into<String>, data: Vec<T>, pagination: PaginationMeta) -> Self {
        Self {
            status: "success",
            message: message.into(),
            data,
            pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let response = ApiResponse::success("Blog fetched successfully", 42);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["status"], "success");
        assert_eq!(json["message"], "Blog fetched successfully");
        assert_eq!(json["data"], 42);
    }

    #[test]
    fn test_message_envelope_serializes_null_data() {
        let response = ApiResponse::message("Logged out successfully");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["status"], "success");
        assert!(json["data"].is_null());
    }
}
