//! Order Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
    pagination::{PaginationResponse, page_request},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    /// The caller's orders, newest first
    pub orders: Vec<OrderResponse>,

    /// Pagination metadata
    pub pagination: PaginationResponse,
}

/// Order Index Handler
///
/// Returns a page of the caller's own orders.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    page: QueryParam<u32, false>,
    page_size: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let request = page_request(page, page_size)?;

    let orders = state
        .app
        .orders
        .list_orders(user, request)
        .await
        .map_err(into_status_error)?;

    let orders = orders.map(OrderResponse::from);

    Ok(Json(OrdersResponse {
        pagination: PaginationResponse::from(&orders),
        orders: orders.items,
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use bazaar_app::{
        domain::orders::{MockOrdersService, OrderStatus, records::OrderUuid},
        pagination::{Page, PageRequest},
    };

    use crate::{
        orders::get::tests::make_order,
        test_helpers::{MockServices, TEST_USER_UUID},
    };

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        MockServices {
            orders,
            ..MockServices::default()
        }
        .service(Router::with_path("orders").get(handler))
    }

    #[tokio::test]
    async fn test_index_lists_only_callers_orders() -> TestResult {
        let newer = OrderUuid::new();
        let older = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .withf(|user, request| *user == TEST_USER_UUID && *request == PageRequest::default())
            .return_once(move |user, request| {
                Ok(Page::new(
                    vec![
                        make_order(newer, user, OrderStatus::Pending),
                        make_order(older, user, OrderStatus::Done),
                    ],
                    request,
                    2,
                ))
            });

        let response: OrdersResponse = TestClient::get("http://example.com/orders")
            .send(&make_service(orders))
            .await
            .take_json()
            .await?;

        let uuids: Vec<_> = response.orders.iter().map(|o| o.uuid).collect();

        assert_eq!(uuids, vec![newer.into_uuid(), older.into_uuid()]);
        assert!(
            response
                .orders
                .iter()
                .all(|o| o.user_uuid == TEST_USER_UUID.into_uuid()),
            "every order should belong to the caller"
        );
        assert_eq!(response.pagination.total, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_forwards_page_params() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .withf(|_, request| request.page == 3 && request.page_size == 5)
            .return_once(|_, request| Ok(Page::new(vec![], request, 11)));

        let response: OrdersResponse =
            TestClient::get("http://example.com/orders?page=3&page_size=5")
                .send(&make_service(orders))
                .await
                .take_json()
                .await?;

        assert!(response.orders.is_empty());
        assert_eq!(response.pagination.page, 3);
        assert_eq!(response.pagination.total_pages, 3);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_page_zero_returns_400() -> TestResult {
        let res = TestClient::get("http://example.com/orders?page=0")
            .send(&make_service(MockOrdersService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
