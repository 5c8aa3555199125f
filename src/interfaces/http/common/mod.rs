//! Shared HTTP plumbing: response envelope, error mapping, validated JSON

pub mod response;
pub mod validated_json;

pub use response::{domain_error, error_status, ApiError, ApiResponse, PaginatedResponse};
pub use validated_json::ValidatedJson;
