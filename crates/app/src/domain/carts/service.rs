//! Carts service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        carts::{
            data::{CartLineUpdate, NewCartLine},
            errors::CartsServiceError,
            records::{Cart, CartLine, CartLineRecord},
            store::{CartStore, PgCartStore},
        },
        products::{ProductCatalog, records::ProductUuid},
        users::records::UserUuid,
    },
};

#[derive(Clone)]
pub struct PgCartsService {
    store: Arc<dyn CartStore>,
    catalog: Arc<dyn ProductCatalog>,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db, catalog: Arc<dyn ProductCatalog>) -> Self {
        Self::from_parts(Arc::new(PgCartStore::new(db)), catalog)
    }

    #[must_use]
    pub fn from_parts(store: Arc<dyn CartStore>, catalog: Arc<dyn ProductCatalog>) -> Self {
        Self { store, catalog }
    }

    async fn enrich(&self, line: CartLineRecord) -> Result<CartLine, CartsServiceError> {
        let product = self.catalog.find_product(line.product_uuid).await?;

        Ok(CartLine::from_record(line, product))
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, user: UserUuid) -> Result<Cart, CartsServiceError> {
        let records = self.store.list_lines(user).await?;

        let mut lines = Vec::with_capacity(records.len());

        for record in records {
            lines.push(self.enrich(record).await?);
        }

        Ok(Cart {
            user_uuid: user,
            lines,
        })
    }

    async fn add_line(
        &self,
        user: UserUuid,
        line: NewCartLine,
    ) -> Result<CartLine, CartsServiceError> {
        if line.quantity == 0 {
            return Err(CartsServiceError::InvalidData);
        }

        let Some(product) = self.catalog.find_product(line.product_uuid).await? else {
            return Err(CartsServiceError::InvalidReference);
        };

        let record = self.store.upsert_line(user, line).await?;

        Ok(CartLine::from_record(record, Some(product)))
    }

    async fn update_line(
        &self,
        user: UserUuid,
        update: CartLineUpdate,
    ) -> Result<CartLine, CartsServiceError> {
        if update.quantity == 0 {
            return Err(CartsServiceError::InvalidData);
        }

        let record = self.store.update_line(user, update).await?;

        self.enrich(record).await
    }

    async fn remove_line(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<(), CartsServiceError> {
        let removed = self.store.delete_line(user, product).await?;

        if removed == 0 {
            tracing::debug!(user_uuid = %user, product_uuid = %product, "cart line already absent");
        }

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieves every line in the user's cart, newest first.
    async fn get_cart(&self, user: UserUuid) -> Result<Cart, CartsServiceError>;

    /// Adds a product to the cart, incrementing the quantity if it is already there.
    async fn add_line(
        &self,
        user: UserUuid,
        line: NewCartLine,
    ) -> Result<CartLine, CartsServiceError>;

    /// Sets the quantity of an existing cart line.
    async fn update_line(
        &self,
        user: UserUuid,
        update: CartLineUpdate,
    ) -> Result<CartLine, CartsServiceError>;

    /// Removes a product from the cart. Removing an absent line succeeds.
    async fn remove_line(&self, user: UserUuid, product: ProductUuid)
    -> Result<(), CartsServiceError>;
}
