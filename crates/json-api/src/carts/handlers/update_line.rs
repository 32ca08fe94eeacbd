//! Update Cart Line Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::carts::data::CartLineUpdate;

use crate::{
    carts::{errors::into_status_error, get::CartLineResponse},
    extensions::*,
    state::State,
};

use super::require_own_cart;

/// Update Cart Line Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartLineRequest {
    pub product_uuid: Uuid,

    /// Replacement quantity, at least 1
    pub quantity: u32,
}

impl From<UpdateCartLineRequest> for CartLineUpdate {
    fn from(request: UpdateCartLineRequest) -> Self {
        CartLineUpdate {
            product_uuid: request.product_uuid.into(),
            quantity: request.quantity,
        }
    }
}

/// Update Cart Line Handler
#[endpoint(
    tags("carts"),
    summary = "Update Cart Line",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Quantity updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product is not in the cart"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid quantity"),
        (status_code = StatusCode::FORBIDDEN, description = "Cart belongs to another user"),
    ),
)]
#[tracing::instrument(
    name = "carts.update_line",
    skip(user, json, depot),
    fields(user_uuid = tracing::field::Empty, product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    json: JsonBody<UpdateCartLineRequest>,
    depot: &mut Depot,
) -> Result<Json<CartLineResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = require_own_cart(depot.user_uuid_or_401()?, user.into_inner())?;
    let update: CartLineUpdate = json.into_inner().into();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("product_uuid", tracing::field::display(update.product_uuid));

    let line = state
        .app
        .carts
        .update_line(user, update)
        .await
        .map_err(into_status_error)?;

    tracing::info!(quantity = line.quantity, "updated cart line");

    Ok(Json(line.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use bazaar_app::domain::{
        carts::{CartsServiceError, MockCartsService},
        products::records::ProductUuid,
        users::records::UserUuid,
    };

    use crate::{
        carts::get::tests::make_line,
        test_helpers::{MockServices, TEST_USER_UUID},
    };

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        MockServices {
            carts,
            ..MockServices::default()
        }
        .service(Router::with_path("carts/cart-line/{user}").put(handler))
    }

    #[tokio::test]
    async fn test_update_line_sets_quantity() -> TestResult {
        let product = ProductUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_update_line()
            .once()
            .withf(move |user, update| {
                *user == TEST_USER_UUID
                    && *update
                        == CartLineUpdate {
                            product_uuid: product,
                            quantity: 7,
                        }
            })
            .return_once(move |_, _| Ok(make_line(product, 7)));

        let mut res =
            TestClient::put(format!("http://example.com/carts/cart-line/{TEST_USER_UUID}"))
                .json(&json!({ "product_uuid": product.into_uuid(), "quantity": 7 }))
                .send(&make_service(carts))
                .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CartLineResponse = res.take_json().await?;

        assert_eq!(body.quantity, 7);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_line_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_update_line()
            .once()
            .return_once(|_, _| Err(CartsServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/carts/cart-line/{TEST_USER_UUID}"))
            .json(&json!({ "product_uuid": Uuid::now_v7(), "quantity": 1 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_zero_quantity_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_update_line()
            .once()
            .return_once(|_, _| Err(CartsServiceError::InvalidData));

        let res = TestClient::put(format!("http://example.com/carts/cart-line/{TEST_USER_UUID}"))
            .json(&json!({ "product_uuid": Uuid::now_v7(), "quantity": 0 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_someone_elses_line_returns_403() -> TestResult {
        let res = TestClient::put(format!(
            "http://example.com/carts/cart-line/{}",
            UserUuid::new()
        ))
        .json(&json!({ "product_uuid": Uuid::now_v7(), "quantity": 1 }))
        .send(&make_service(MockCartsService::new()))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
