//! App Router

use salvo::Router;

use crate::{auth, carts, orders, products, users};

/// Authenticated routes. Every request passes the bearer-token hoop first.
pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .post(orders::create::handler)
                .push(
                    Router::with_path("{order}")
                        .get(orders::get::handler)
                        .push(Router::with_path("{status}").put(orders::update_status::handler)),
                ),
        )
        .push(
            Router::with_path("carts")
                .push(Router::with_path("cart-line/{user}").put(carts::update_line::handler))
                .push(
                    Router::with_path("{user}")
                        .get(carts::get::handler)
                        .post(carts::add_line::handler)
                        .delete(carts::remove_line::handler),
                ),
        )
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .get(products::get::handler)
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
        .push(
            Router::with_path("users").get(users::index::handler).push(
                Router::with_path("{user}")
                    .get(users::get::handler)
                    .delete(users::delete::handler),
            ),
        )
}
