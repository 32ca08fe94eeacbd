//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, Enforcer, PgAuthService, PgEnforcer},
    database::{self, Db},
    domain::{
        carts::{CartsService, PgCartsService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
        users::{PgUsersService, UsersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

/// Every service the API needs, behind trait objects so tests can swap in mocks.
#[derive(Clone)]
pub struct AppContext {
    pub users: Arc<dyn UsersService>,
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub auth: Arc<dyn AuthService>,
    pub enforcer: Arc<dyn Enforcer>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool.clone());

        let products = Arc::new(PgProductsService::new(db.clone()));

        Ok(Self {
            users: Arc::new(PgUsersService::new(pool.clone())),
            carts: Arc::new(PgCartsService::new(db.clone(), products.clone())),
            orders: Arc::new(PgOrdersService::new(db, products.clone())),
            products,
            auth: Arc::new(PgAuthService::new(pool.clone())),
            enforcer: Arc::new(PgEnforcer::new(pool)),
        })
    }
}
