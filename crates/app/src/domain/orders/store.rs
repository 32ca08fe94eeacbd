//! Order storage.

use std::collections::HashMap;

use async_trait::async_trait;
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        orders::{
            data::{NewOrder, PricedOrderLine},
            errors::OrdersServiceError,
            records::{Order, OrderLine, OrderLineUuid, OrderUuid},
            status::OrderStatus,
        },
        products::records::ProductUuid,
        users::records::UserUuid,
    },
    pagination::{Page, PageRequest},
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_LINE_SQL: &str = include_str!("sql/create_order_line.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LIST_ORDER_LINES_SQL: &str = include_str!("sql/list_order_lines.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const COUNT_ORDERS_SQL: &str = include_str!("sql/count_orders.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");

/// Order persistence.
///
/// Lines come back in submission order with `product` unset.
#[automock]
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Writes the order header and all of its lines atomically.
    async fn create_order(&self, order: NewOrder) -> Result<Order, OrdersServiceError>;

    async fn get_order(&self, order: OrderUuid) -> Result<Order, OrdersServiceError>;

    /// One page of the user's orders, newest first.
    async fn list_orders(
        &self,
        user: UserUuid,
        page: PageRequest,
    ) -> Result<Page<Order>, OrdersServiceError>;

    /// Moves the order from `from` to `to`.
    ///
    /// Fails with [`OrdersServiceError::StatusChanged`] if the stored status is
    /// no longer `from`.
    async fn update_status(
        &self,
        order: OrderUuid,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<Order, OrdersServiceError>;
}

#[derive(Debug, Clone)]
pub struct PgOrderStore {
    db: Db,
}

impl PgOrderStore {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    async fn attach_lines(
        tx: &mut Transaction<'_, Postgres>,
        headers: Vec<OrderHeader>,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let uuids: Vec<Uuid> = headers.iter().map(|header| header.uuid.into_uuid()).collect();

        let rows = query_as::<Postgres, OrderLineRow>(LIST_ORDER_LINES_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await?;

        let mut lines: HashMap<OrderUuid, Vec<OrderLine>> = HashMap::new();

        for row in rows {
            lines.entry(row.order_uuid).or_default().push(row.line);
        }

        Ok(headers
            .into_iter()
            .map(|header| {
                let lines = lines.remove(&header.uuid).unwrap_or_default();
                header.into_order(lines)
            })
            .collect())
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn create_order(&self, order: NewOrder) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let header = query_as::<Postgres, OrderHeader>(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.user_uuid.into_uuid())
            .bind(order.status.as_str())
            .fetch_one(&mut *tx)
            .await?;

        let mut lines = Vec::with_capacity(order.lines.len());

        for (position, line) in order.lines.into_iter().enumerate() {
            lines.push(create_line(&mut tx, header.uuid, position, line).await?);
        }

        tx.commit().await?;

        Ok(header.into_order(lines))
    }

    async fn get_order(&self, order: OrderUuid) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let header = query_as::<Postgres, OrderHeader>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut *tx)
            .await?;

        let orders = Self::attach_lines(&mut tx, vec![header]).await?;

        tx.commit().await?;

        orders.into_iter().next().ok_or(OrdersServiceError::NotFound)
    }

    async fn list_orders(
        &self,
        user: UserUuid,
        page: PageRequest,
    ) -> Result<Page<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let headers = query_as::<Postgres, OrderHeader>(LIST_ORDERS_SQL)
            .bind(user.into_uuid())
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut *tx)
            .await?;

        let total: i64 = query_scalar(COUNT_ORDERS_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut *tx)
            .await?;

        let orders = Self::attach_lines(&mut tx, headers).await?;

        tx.commit().await?;

        let total = u64::try_from(total).map_err(|_| OrdersServiceError::InvalidData)?;

        Ok(Page::new(orders, page, total))
    }

    async fn update_status(
        &self,
        order: OrderUuid,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let header = query_as::<Postgres, OrderHeader>(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(from.as_str())
            .bind(to.as_str())
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(OrdersServiceError::StatusChanged)?;

        let orders = Self::attach_lines(&mut tx, vec![header]).await?;

        tx.commit().await?;

        orders.into_iter().next().ok_or(OrdersServiceError::NotFound)
    }
}

async fn create_line(
    tx: &mut Transaction<'_, Postgres>,
    order: OrderUuid,
    position: usize,
    line: PricedOrderLine,
) -> Result<OrderLine, OrdersServiceError> {
    let position = i32::try_from(position).map_err(|_| OrdersServiceError::InvalidData)?;
    let quantity = i32::try_from(line.quantity).map_err(|_| OrdersServiceError::InvalidData)?;
    let price = i64::try_from(line.price).map_err(|_| OrdersServiceError::InvalidData)?;

    let row = query_as::<Postgres, OrderLineRow>(CREATE_ORDER_LINE_SQL)
        .bind(line.uuid.into_uuid())
        .bind(order.into_uuid())
        .bind(line.product_uuid.into_uuid())
        .bind(position)
        .bind(quantity)
        .bind(price)
        .fetch_one(&mut **tx)
        .await?;

    Ok(row.line)
}

struct OrderHeader {
    uuid: OrderUuid,
    user_uuid: UserUuid,
    status: OrderStatus,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl OrderHeader {
    fn into_order(self, lines: Vec<OrderLine>) -> Order {
        Order {
            uuid: self.uuid,
            user_uuid: self.user_uuid,
            status: self.status,
            lines,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

struct OrderLineRow {
    order_uuid: OrderUuid,
    line: OrderLine,
}

impl<'r> FromRow<'r, PgRow> for OrderHeader {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            status: status.parse().map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderLineRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity: i32 = row.try_get("quantity")?;
        let price: i64 = row.try_get("price")?;

        Ok(Self {
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            line: OrderLine {
                uuid: OrderLineUuid::from_uuid(row.try_get("uuid")?),
                product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
                quantity: u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
                    index: "quantity".to_string(),
                    source: Box::new(e),
                })?,
                price: u64::try_from(price).map_err(|e| sqlx::Error::ColumnDecode {
                    index: "price".to_string(),
                    source: Box::new(e),
                })?,
                product: None,
                created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            },
        })
    }
}
