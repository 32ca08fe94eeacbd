//! Products service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::products::{
        data::{NewProduct, ProductUpdate},
        errors::ProductsServiceError,
        records::{ProductRecord, ProductUuid},
        repository::PgProductsRepository,
    },
    pagination::{Page, PageRequest},
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        page: PageRequest,
    ) -> Result<Page<ProductRecord>, ProductsServiceError> {
        let page = page
            .validate()
            .map_err(|_| ProductsServiceError::InvalidData)?;

        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx, page).await?;
        let total = self.repository.count_products(&mut tx).await?;

        tx.commit().await?;

        Ok(Page::new(products, page, total))
    }

    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let product = NewProduct {
            name: checked_name(&product.name)?,
            price: checked_price(product.price)?,
            ..product
        };

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let update = ProductUpdate {
            name: checked_name(&update.name)?,
            price: checked_price(update.price)?,
            ..update
        };

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[async_trait]
impl ProductCatalog for PgProductsService {
    async fn find_product(
        &self,
        product: ProductUuid,
    ) -> Result<Option<ProductRecord>, ProductsServiceError> {
        match self.get_product(product).await {
            Ok(product) => Ok(Some(product)),
            Err(ProductsServiceError::NotFound) => Ok(None),
            Err(error) => Err(error),
        }
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves one page of products, newest first.
    async fn list_products(
        &self,
        page: PageRequest,
    ) -> Result<Page<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Replaces a product's name, description and price.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Soft-deletes a product with the given UUID.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;
}

/// Read-only product lookup used by carts and orders.
///
/// Deleted or unknown products resolve to `None`.
#[automock]
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn find_product(
        &self,
        product: ProductUuid,
    ) -> Result<Option<ProductRecord>, ProductsServiceError>;
}

fn checked_name(name: &str) -> Result<String, ProductsServiceError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ProductsServiceError::MissingRequiredData);
    }

    Ok(name.to_string())
}

fn checked_price(price: u64) -> Result<u64, ProductsServiceError> {
    if i64::try_from(price).is_err() {
        return Err(ProductsServiceError::InvalidData);
    }

    Ok(price)
}
