//! Get Cart Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::carts::records::{Cart, CartLine};

use crate::{
    carts::errors::into_status_error, extensions::*, products::get::ProductResponse, state::State,
};

use super::require_own_cart;

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The user who owns the cart
    pub user_uuid: Uuid,

    /// The lines in the cart, newest first
    pub lines: Vec<CartLineResponse>,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        CartResponse {
            user_uuid: cart.user_uuid.into(),
            lines: cart.lines.into_iter().map(CartLineResponse::from).collect(),
        }
    }
}

/// Cart Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    /// The product in the line
    pub product_uuid: Uuid,

    /// Number of units
    pub quantity: u32,

    /// Current product detail, including its live price; absent once deleted
    pub product: Option<ProductResponse>,

    /// The date and time the line was created
    pub created_at: String,

    /// The date and time the line was last updated
    pub updated_at: String,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        Self {
            product_uuid: line.product_uuid.into(),
            quantity: line.quantity,
            product: line.product.map(ProductResponse::from),
            created_at: line.created_at.to_string(),
            updated_at: line.updated_at.to_string(),
        }
    }
}

/// Get Cart Handler
///
/// Returns the caller's cart.
#[endpoint(
    tags("carts"),
    summary = "Get Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart found"),
        (status_code = StatusCode::FORBIDDEN, description = "Cart belongs to another user"),
    ),
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = require_own_cart(depot.user_uuid_or_401()?, user.into_inner())?;

    let cart = state
        .app
        .carts
        .get_cart(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
pub(crate) mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use bazaar_app::domain::{
        carts::MockCartsService, products::records::ProductUuid, users::records::UserUuid,
    };

    use crate::test_helpers::{MockServices, TEST_USER_UUID, make_product};

    use super::*;

    pub(crate) fn make_line(product: ProductUuid, quantity: u32) -> CartLine {
        CartLine {
            product_uuid: product,
            quantity,
            product: Some(make_product(product)),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn make_service(carts: MockCartsService) -> Service {
        MockServices {
            carts,
            ..MockServices::default()
        }
        .service(Router::with_path("carts/{user}").get(handler))
    }

    #[tokio::test]
    async fn test_get_own_cart() -> TestResult {
        let product = ProductUuid::new();
        let mut gone = make_line(ProductUuid::new(), 1);

        gone.product = None;

        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(move |user| {
                Ok(Cart {
                    user_uuid: user,
                    lines: vec![make_line(product, 3), gone],
                })
            });

        let mut res = TestClient::get(format!("http://example.com/carts/{TEST_USER_UUID}"))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CartResponse = res.take_json().await?;
        let quantities: Vec<_> = body.lines.iter().map(|line| line.quantity).collect();

        assert_eq!(body.user_uuid, TEST_USER_UUID.into_uuid());
        assert_eq!(quantities, vec![3, 1]);
        assert!(
            body.lines.last().is_some_and(|line| line.product.is_none()),
            "deleted product should have no detail"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_get_someone_elses_cart_returns_403() -> TestResult {
        let other = UserUuid::new();

        let res = TestClient::get(format!("http://example.com/carts/{other}"))
            .send(&make_service(MockCartsService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
