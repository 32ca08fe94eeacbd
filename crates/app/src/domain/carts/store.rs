//! Cart line storage.

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query, query_as};

use crate::{
    database::Db,
    domain::{
        carts::{
            data::{CartLineUpdate, NewCartLine},
            errors::CartsServiceError,
            records::CartLineRecord,
        },
        products::records::ProductUuid,
        users::records::UserUuid,
    },
};

const LIST_CART_LINES_SQL: &str = include_str!("sql/list_cart_lines.sql");
const UPSERT_CART_LINE_SQL: &str = include_str!("sql/upsert_cart_line.sql");
const UPDATE_CART_LINE_SQL: &str = include_str!("sql/update_cart_line.sql");
const DELETE_CART_LINE_SQL: &str = include_str!("sql/delete_cart_line.sql");

/// Per-user cart line persistence.
///
/// Every operation is a single statement, so concurrent writers to the same
/// line serialise on the row lock.
#[automock]
#[async_trait]
pub trait CartStore: Send + Sync {
    async fn list_lines(&self, user: UserUuid) -> Result<Vec<CartLineRecord>, CartsServiceError>;

    /// Inserts the line, or adds to the quantity of an existing one.
    async fn upsert_line(
        &self,
        user: UserUuid,
        line: NewCartLine,
    ) -> Result<CartLineRecord, CartsServiceError>;

    async fn update_line(
        &self,
        user: UserUuid,
        update: CartLineUpdate,
    ) -> Result<CartLineRecord, CartsServiceError>;

    /// Returns the number of rows removed.
    async fn delete_line(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<u64, CartsServiceError>;
}

#[derive(Debug, Clone)]
pub struct PgCartStore {
    db: Db,
}

impl PgCartStore {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartStore for PgCartStore {
    async fn list_lines(&self, user: UserUuid) -> Result<Vec<CartLineRecord>, CartsServiceError> {
        let lines = query_as::<Postgres, CartLineRecord>(LIST_CART_LINES_SQL)
            .bind(user.into_uuid())
            .fetch_all(self.db.pool())
            .await?;

        Ok(lines)
    }

    async fn upsert_line(
        &self,
        user: UserUuid,
        line: NewCartLine,
    ) -> Result<CartLineRecord, CartsServiceError> {
        let line = query_as::<Postgres, CartLineRecord>(UPSERT_CART_LINE_SQL)
            .bind(user.into_uuid())
            .bind(line.product_uuid.into_uuid())
            .bind(to_i32(line.quantity)?)
            .fetch_one(self.db.pool())
            .await?;

        Ok(line)
    }

    async fn update_line(
        &self,
        user: UserUuid,
        update: CartLineUpdate,
    ) -> Result<CartLineRecord, CartsServiceError> {
        let line = query_as::<Postgres, CartLineRecord>(UPDATE_CART_LINE_SQL)
            .bind(user.into_uuid())
            .bind(update.product_uuid.into_uuid())
            .bind(to_i32(update.quantity)?)
            .fetch_one(self.db.pool())
            .await?;

        Ok(line)
    }

    async fn delete_line(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<u64, CartsServiceError> {
        let rows_affected = query(DELETE_CART_LINE_SQL)
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .execute(self.db.pool())
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartLineRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity: i32 = row.try_get("quantity")?;

        Ok(Self {
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            quantity: u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
                index: "quantity".to_string(),
                source: Box::new(e),
            })?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

fn to_i32(quantity: u32) -> Result<i32, CartsServiceError> {
    i32::try_from(quantity).map_err(|_| CartsServiceError::InvalidData)
}
