//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use bazaar_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::UnknownStatus => {
            StatusError::bad_request().brief("Unknown order status")
        }
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::ProductNotFound(product) => {
            StatusError::not_found().brief(format!("Product {product} not found"))
        }
        OrdersServiceError::PermissionDenied => {
            StatusError::forbidden().brief("Order belongs to another user")
        }
        OrdersServiceError::TerminalStatus => {
            StatusError::conflict().brief("Order is already done or canceled")
        }
        OrdersServiceError::IllegalTransition => {
            StatusError::conflict().brief("Status transition not allowed")
        }
        OrdersServiceError::StatusChanged => {
            StatusError::conflict().brief("Order status changed, retry with a fresh read")
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
