//! Catalog-specific error types.

use crate::domain::foundation::{CategoryId, DomainError, ErrorCode, ProductId};

/// Draft catalog errors.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Category was not found.
    CategoryNotFound(CategoryId),
    /// Product was not found.
    ProductNotFound(ProductId),
    /// The entity is past the editable stage.
    NotEditable(String),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Candidate index outside the staged pool.
    CandidateOutOfRange(String),
    /// Infrastructure error.
    Infrastructure(String),
}

impl CatalogError {
    pub fn category_not_found(id: CategoryId) -> Self {
        CatalogError::CategoryNotFound(id)
    }

    pub fn product_not_found(id: ProductId) -> Self {
        CatalogError::ProductNotFound(id)
    }

    pub fn not_editable(message: impl Into<String>) -> Self {
        CatalogError::NotEditable(message.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CatalogError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        CatalogError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CatalogError::CategoryNotFound(_) => ErrorCode::CategoryNotFound,
            CatalogError::ProductNotFound(_) => ErrorCode::ProductNotFound,
            CatalogError::NotEditable(_) => ErrorCode::InvalidStateTransition,
            CatalogError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            CatalogError::CandidateOutOfRange(_) => ErrorCode::OutOfRange,
            CatalogError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            CatalogError::CategoryNotFound(id) => format!("Category not found: {}", id),
            CatalogError::ProductNotFound(id) => format!("Product not found: {}", id),
            CatalogError::NotEditable(msg) => msg.clone(),
            CatalogError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            CatalogError::CandidateOutOfRange(msg) => msg.clone(),
            CatalogError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CatalogError {}

impl From<DomainError> for CatalogError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::CategoryNotFound | ErrorCode::ProductNotFound => {
                CatalogError::Infrastructure(err.to_string())
            }
            ErrorCode::InvalidStateTransition => CatalogError::NotEditable(err.message),
            ErrorCode::OutOfRange => CatalogError::CandidateOutOfRange(err.message),
            ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => {
                CatalogError::ValidationFailed {
                    field: err
                        .details
                        .get("field")
                        .cloned()
                        .unwrap_or_else(|| "unknown".to_string()),
                    message: err.message,
                }
            }
            _ => CatalogError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_editable_maps_to_invalid_transition_code() {
        let err = CatalogError::not_editable("Cannot edit a published product");
        assert_eq!(err.code(), ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn domain_out_of_range_converts_to_candidate_error() {
        let err: CatalogError =
            DomainError::new(ErrorCode::OutOfRange, "Candidate index 7 out of range").into();
        assert!(matches!(err, CatalogError::CandidateOutOfRange(_)));
    }
}
