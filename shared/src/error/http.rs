//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::ProductNotFound => StatusCode::NOT_FOUND,

            // 400 Bad Request
            Self::ValidationFailed | Self::CategoryNotFound => StatusCode::BAD_REQUEST,

            // 500 Internal Server Error
            // A bad price can only come from the stored catalog, never from a request
            Self::ProductInvalidPrice
            | Self::CatalogRefreshFailed
            | Self::InternalError
            | Self::StorageError
            | Self::StorageCorrupted => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
