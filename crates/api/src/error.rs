//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::DomainError;

use crate::validate::FieldError;

const INTERNAL_MESSAGE: &str = "Internal Server Error";

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// One or more request fields failed validation.
    Validation(Vec<FieldError>),
    /// Domain logic error.
    Domain(DomainError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Validation(errors) => {
                let body = serde_json::json!({ "errors": errors });
                return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
            }
            ApiError::Domain(err) => domain_error_to_response(err),
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn domain_error_to_response(err: DomainError) -> (StatusCode, String) {
    match &err {
        DomainError::ProductNotFound(_)
        | DomainError::WarehouseNotFound(_)
        | DomainError::StockEntryNotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        DomainError::DuplicateAddress(_)
        | DomainError::InsufficientStock { .. }
        | DomainError::QuantityOverflow => (StatusCode::BAD_REQUEST, err.to_string()),
        DomainError::Store(_) => {
            tracing::error!(error = %err, "store failure");
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}

#[cfg(test)]
mod tests {
    use common::{ProductId, WarehouseId};
    use store::StoreError;

    use super::*;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn not_found_variants_map_to_404() {
        assert_eq!(
            status_of(DomainError::ProductNotFound(ProductId::new(1)).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(
                DomainError::StockEntryNotFound {
                    product_id: ProductId::new(1),
                    warehouse_id: WarehouseId::new(1),
                }
                .into()
            ),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn rule_violations_map_to_400() {
        assert_eq!(
            status_of(DomainError::DuplicateAddress("a".to_string()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(
                DomainError::InsufficientStock {
                    available: 1,
                    requested: 2
                }
                .into()
            ),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ApiError::Validation(vec![FieldError::body("name")])),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn store_failures_map_to_500() {
        let err = DomainError::Store(StoreError::Database(sqlx::Error::PoolTimedOut));
        assert_eq!(status_of(err.into()), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
