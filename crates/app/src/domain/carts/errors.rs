//! Carts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::products::ProductsServiceError;

/// SQLSTATE `numeric_value_out_of_range`, raised when an increment passes `INTEGER`.
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("cart line not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        let database_error = error.as_database_error();

        if database_error.and_then(DatabaseError::code).as_deref()
            == Some(NUMERIC_VALUE_OUT_OF_RANGE)
        {
            return Self::InvalidData;
        }

        match database_error.map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::UniqueViolation | ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<ProductsServiceError> for CartsServiceError {
    fn from(error: ProductsServiceError) -> Self {
        match error {
            ProductsServiceError::Sql(source) => Self::Sql(source),
            ProductsServiceError::NotFound | ProductsServiceError::InvalidReference => {
                Self::InvalidReference
            }
            ProductsServiceError::AlreadyExists
            | ProductsServiceError::MissingRequiredData
            | ProductsServiceError::InvalidData => Self::InvalidData,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_not_found_becomes_invalid_reference() {
        let error = CartsServiceError::from(ProductsServiceError::NotFound);

        assert!(
            matches!(error, CartsServiceError::InvalidReference),
            "expected InvalidReference, got {error:?}"
        );
    }

    #[test]
    fn catalog_storage_errors_stay_storage_errors() {
        let error = CartsServiceError::from(ProductsServiceError::Sql(Error::PoolClosed));

        assert!(
            matches!(error, CartsServiceError::Sql(_)),
            "expected Sql, got {error:?}"
        );
    }
}
