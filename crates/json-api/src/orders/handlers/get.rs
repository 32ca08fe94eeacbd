//! Get Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::orders::records::{Order, OrderLine};

use crate::{
    auth::require_owner_or_policy, extensions::*, orders::errors::into_status_error,
    products::get::ProductResponse, state::State,
};

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub uuid: Uuid,

    /// The user who placed the order
    pub user_uuid: Uuid,

    /// One of `pending`, `processing`, `done`, `canceled`
    pub status: String,

    /// Sum of the line prices in pence/cents
    pub total: u64,

    /// The lines in the order, in submission order
    pub lines: Vec<OrderLineResponse>,

    /// The date and time the order was placed
    pub created_at: String,

    /// The date and time the order was last updated
    pub updated_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        let total = order
            .lines
            .iter()
            .fold(0_u64, |total, line| total.saturating_add(line.price));

        OrderResponse {
            uuid: order.uuid.into(),
            user_uuid: order.user_uuid.into(),
            status: order.status.to_string(),
            total,
            lines: order.lines.into_iter().map(OrderLineResponse::from).collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Order Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderLineResponse {
    /// The unique identifier of the order line
    pub uuid: Uuid,

    /// The product that was ordered
    pub product_uuid: Uuid,

    /// Number of units ordered
    pub quantity: u32,

    /// Line total fixed at placement, in pence/cents
    pub price: u64,

    /// Current product detail; absent once the product is deleted
    pub product: Option<ProductResponse>,

    /// The date and time the line was created
    pub created_at: String,
}

impl From<OrderLine> for OrderLineResponse {
    fn from(line: OrderLine) -> Self {
        Self {
            uuid: line.uuid.into(),
            product_uuid: line.product_uuid.into(),
            quantity: line.quantity,
            price: line.price,
            product: line.product.map(ProductResponse::from),
            created_at: line.created_at.to_string(),
        }
    }
}

/// Get Order Handler
///
/// Returns an order owned by the caller, or any order when the caller holds
/// the `orders`/`read` policy.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Order belongs to another user"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let order = state
        .app
        .orders
        .get_order(order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    require_owner_or_policy(state, user, order.user_uuid, "orders", "read").await?;

    Ok(Json(order.into()))
}

#[cfg(test)]
pub(crate) mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use bazaar_app::{
        auth::MockEnforcer,
        domain::{
            orders::{
                MockOrdersService, OrderStatus, OrdersServiceError,
                records::{OrderLineUuid, OrderUuid},
            },
            products::records::ProductUuid,
            users::records::UserUuid,
        },
    };

    use crate::test_helpers::{MockServices, TEST_USER_UUID, enforcer_answering, make_product};

    use super::*;

    pub(crate) fn make_order(uuid: OrderUuid, user: UserUuid, status: OrderStatus) -> Order {
        let product = ProductUuid::new();

        Order {
            uuid,
            user_uuid: user,
            status,
            lines: vec![
                OrderLine {
                    uuid: OrderLineUuid::new(),
                    product_uuid: product,
                    quantity: 2,
                    price: 2000,
                    product: Some(make_product(product)),
                    created_at: Timestamp::UNIX_EPOCH,
                },
                OrderLine {
                    uuid: OrderLineUuid::new(),
                    product_uuid: ProductUuid::new(),
                    quantity: 1,
                    price: 500,
                    product: None,
                    created_at: Timestamp::UNIX_EPOCH,
                },
            ],
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn make_service(orders: MockOrdersService, enforcer: MockEnforcer) -> Service {
        MockServices {
            orders,
            enforcer,
            ..MockServices::default()
        }
        .service(Router::with_path("orders/{order}").get(handler))
    }

    #[tokio::test]
    async fn test_owner_gets_order_with_frozen_prices() -> TestResult {
        let uuid = OrderUuid::new();
        let order = make_order(uuid, TEST_USER_UUID, OrderStatus::Pending);

        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .withf(move |o| *o == uuid)
            .return_once(move |_| Ok(order));

        let mut res = TestClient::get(format!("http://example.com/orders/{uuid}"))
            .send(&make_service(orders, MockServices::default().enforcer))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: OrderResponse = res.take_json().await?;
        let prices: Vec<_> = body.lines.iter().map(|line| line.price).collect();
        let has_product: Vec<_> = body.lines.iter().map(|line| line.product.is_some()).collect();

        assert_eq!(body.status, "pending");
        assert_eq!(body.total, 2500);
        assert_eq!(prices, vec![2000, 500]);
        assert_eq!(has_product, vec![true, false]);

        Ok(())
    }

    #[tokio::test]
    async fn test_other_users_order_without_policy_returns_403() -> TestResult {
        let uuid = OrderUuid::new();
        let order = make_order(uuid, UserUuid::new(), OrderStatus::Pending);

        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .return_once(move |_| Ok(order));

        let res = TestClient::get(format!("http://example.com/orders/{uuid}"))
            .send(&make_service(
                orders,
                enforcer_answering("orders", "read", false),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_other_users_order_with_policy_returns_200() -> TestResult {
        let uuid = OrderUuid::new();
        let order = make_order(uuid, UserUuid::new(), OrderStatus::Done);

        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .return_once(move |_| Ok(order));

        let res = TestClient::get(format!("http://example.com/orders/{uuid}"))
            .send(&make_service(
                orders,
                enforcer_answering("orders", "read", true),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_order_returns_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .return_once(|_| Err(OrdersServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/orders/{}", Uuid::now_v7()))
            .send(&make_service(orders, MockServices::default().enforcer))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
