//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::products::{ProductsServiceError, records::ProductUuid};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("invalid data")]
    InvalidData,

    #[error("order not found")]
    NotFound,

    #[error("product {0} not found")]
    ProductNotFound(ProductUuid),

    #[error("permission denied")]
    PermissionDenied,

    #[error("order is already in a terminal status")]
    TerminalStatus,

    #[error("unknown order status")]
    UnknownStatus,

    #[error("status transition not allowed")]
    IllegalTransition,

    #[error("order status changed concurrently")]
    StatusChanged,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(
                ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation,
            ) => Self::InvalidData,
            Some(ErrorKind::UniqueViolation | ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<ProductsServiceError> for OrdersServiceError {
    fn from(error: ProductsServiceError) -> Self {
        match error {
            ProductsServiceError::Sql(source) => Self::Sql(source),
            ProductsServiceError::AlreadyExists
            | ProductsServiceError::NotFound
            | ProductsServiceError::InvalidReference
            | ProductsServiceError::MissingRequiredData
            | ProductsServiceError::InvalidData => Self::InvalidData,
        }
    }
}
