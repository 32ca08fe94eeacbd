//! Test Helpers

use crate::{
    domain::{
        products::{
            ProductsService, ProductsServiceError,
            data::NewProduct,
            records::{ProductRecord, ProductUuid},
        },
        users::{
            UsersService, UsersServiceError,
            data::NewUser,
            records::UserUuid,
        },
    },
    test::TestContext,
};

impl TestContext {
    pub(crate) fn pool(&self) -> sqlx::PgPool {
        self.db.pool().clone()
    }

    pub(crate) async fn create_user(&self, email: &str) -> Result<UserUuid, UsersServiceError> {
        let user = self
            .users
            .create_user(NewUser {
                uuid: UserUuid::new(),
                email: email.to_string(),
                name: "Test User".to_string(),
            })
            .await?;

        Ok(user.uuid)
    }

    pub(crate) async fn create_product(
        &self,
        name: &str,
        price: u64,
    ) -> Result<ProductRecord, ProductsServiceError> {
        self.products
            .create_product(NewProduct {
                uuid: ProductUuid::new(),
                name: name.to_string(),
                description: String::new(),
                price,
            })
            .await
    }
}
