//! In-memory order store and catalog for service tests.

use std::collections::HashMap;

use async_trait::async_trait;
use jiff::Timestamp;
use tokio::sync::Mutex;

use crate::{
    domain::{
        orders::{
            data::NewOrder,
            errors::OrdersServiceError,
            records::{Order, OrderLine, OrderUuid},
            status::OrderStatus,
            store::OrderStore,
        },
        products::{
            ProductCatalog, ProductsServiceError,
            records::{ProductRecord, ProductUuid},
        },
        users::records::UserUuid,
    },
    pagination::{Page, PageRequest},
};

#[derive(Debug, Default)]
pub(crate) struct InMemoryCatalog {
    products: Mutex<HashMap<ProductUuid, ProductRecord>>,
}

impl InMemoryCatalog {
    pub(crate) async fn add(&self, name: &str, price: u64) -> ProductUuid {
        let uuid = ProductUuid::new();

        self.products.lock().await.insert(
            uuid,
            ProductRecord {
                uuid,
                name: name.to_string(),
                description: String::new(),
                price,
                created_at: Timestamp::now(),
                updated_at: Timestamp::now(),
                deleted_at: None,
            },
        );

        uuid
    }

    pub(crate) async fn set_price(&self, product: ProductUuid, price: u64) {
        if let Some(record) = self.products.lock().await.get_mut(&product) {
            record.price = price;
        }
    }

    pub(crate) async fn remove(&self, product: ProductUuid) {
        self.products.lock().await.remove(&product);
    }
}

#[async_trait]
impl ProductCatalog for InMemoryCatalog {
    async fn find_product(
        &self,
        product: ProductUuid,
    ) -> Result<Option<ProductRecord>, ProductsServiceError> {
        Ok(self.products.lock().await.get(&product).cloned())
    }
}

#[derive(Debug, Default)]
pub(crate) struct InMemoryOrderStore {
    orders: Mutex<Vec<Order>>,
}

impl InMemoryOrderStore {
    pub(crate) async fn len(&self) -> usize {
        self.orders.lock().await.len()
    }

    /// Overwrites a stored status, standing in for a concurrent writer.
    pub(crate) async fn force_status(&self, order: OrderUuid, status: OrderStatus) {
        if let Some(stored) = self
            .orders
            .lock()
            .await
            .iter_mut()
            .find(|stored| stored.uuid == order)
        {
            stored.status = status;
        }
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn create_order(&self, order: NewOrder) -> Result<Order, OrdersServiceError> {
        let now = Timestamp::now();

        let order = Order {
            uuid: order.uuid,
            user_uuid: order.user_uuid,
            status: order.status,
            lines: order
                .lines
                .into_iter()
                .map(|line| OrderLine {
                    uuid: line.uuid,
                    product_uuid: line.product_uuid,
                    quantity: line.quantity,
                    price: line.price,
                    product: None,
                    created_at: now,
                })
                .collect(),
            created_at: now,
            updated_at: now,
        };

        self.orders.lock().await.push(order.clone());

        Ok(order)
    }

    async fn get_order(&self, order: OrderUuid) -> Result<Order, OrdersServiceError> {
        self.orders
            .lock()
            .await
            .iter()
            .find(|stored| stored.uuid == order)
            .cloned()
            .ok_or(OrdersServiceError::NotFound)
    }

    async fn list_orders(
        &self,
        user: UserUuid,
        page: PageRequest,
    ) -> Result<Page<Order>, OrdersServiceError> {
        let orders = self.orders.lock().await;

        let mut owned: Vec<Order> = orders
            .iter()
            .filter(|order| order.user_uuid == user)
            .cloned()
            .collect();

        owned.sort_by(|a, b| (b.created_at, b.uuid).cmp(&(a.created_at, a.uuid)));

        let total = owned.len() as u64;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);

        let items = owned.into_iter().skip(offset).take(limit).collect();

        Ok(Page::new(items, page, total))
    }

    async fn update_status(
        &self,
        order: OrderUuid,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        let mut orders = self.orders.lock().await;

        let stored = orders
            .iter_mut()
            .find(|stored| stored.uuid == order)
            .ok_or(OrdersServiceError::NotFound)?;

        if stored.status != from {
            return Err(OrdersServiceError::StatusChanged);
        }

        stored.status = to;
        stored.updated_at = Timestamp::now();

        Ok(stored.clone())
    }
}
