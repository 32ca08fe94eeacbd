//! Orders service.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        orders::{
            data::{NewOrder, NewOrderLine},
            errors::OrdersServiceError,
            lifecycle::plan_transition,
            pricing::{price_line, validate_lines},
            records::{Order, OrderUuid, StatusChange},
            status::OrderStatus,
            store::{OrderStore, PgOrderStore},
        },
        products::{
            ProductCatalog,
            records::{ProductRecord, ProductUuid},
        },
        users::records::UserUuid,
    },
    pagination::{Page, PageRequest},
};

#[derive(Clone)]
pub struct PgOrdersService {
    store: Arc<dyn OrderStore>,
    catalog: Arc<dyn ProductCatalog>,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, catalog: Arc<dyn ProductCatalog>) -> Self {
        Self::from_parts(Arc::new(PgOrderStore::new(db)), catalog)
    }

    #[must_use]
    pub fn from_parts(store: Arc<dyn OrderStore>, catalog: Arc<dyn ProductCatalog>) -> Self {
        Self { store, catalog }
    }

    async fn resolve_products(
        &self,
        products: Vec<ProductUuid>,
    ) -> Result<HashMap<ProductUuid, Option<ProductRecord>>, OrdersServiceError> {
        let mut resolved = HashMap::new();

        for product in products {
            if resolved.contains_key(&product) {
                continue;
            }

            let record = self.catalog.find_product(product).await?;
            resolved.insert(product, record);
        }

        Ok(resolved)
    }

    async fn enrich(&self, orders: Vec<Order>) -> Result<Vec<Order>, OrdersServiceError> {
        let products = self
            .resolve_products(
                orders
                    .iter()
                    .flat_map(|order| order.lines.iter().map(|line| line.product_uuid))
                    .collect(),
            )
            .await?;

        Ok(orders
            .into_iter()
            .map(|order| attach_products(order, &products))
            .collect())
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn place_order(
        &self,
        user: UserUuid,
        lines: Vec<NewOrderLine>,
    ) -> Result<Order, OrdersServiceError> {
        validate_lines(&lines)?;

        let products = self
            .resolve_products(lines.iter().map(|line| line.product_uuid).collect())
            .await?;

        let priced = lines
            .iter()
            .map(|line| {
                let product = products
                    .get(&line.product_uuid)
                    .and_then(Option::as_ref)
                    .ok_or(OrdersServiceError::ProductNotFound(line.product_uuid))?;

                price_line(line, product)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let order = self
            .store
            .create_order(NewOrder {
                uuid: OrderUuid::new(),
                user_uuid: user,
                status: OrderStatus::Pending,
                lines: priced,
            })
            .await?;

        Ok(attach_products(order, &products))
    }

    async fn get_order(&self, order: OrderUuid) -> Result<Order, OrdersServiceError> {
        let order = self.store.get_order(order).await?;

        let mut enriched = self.enrich(vec![order]).await?;

        enriched.pop().ok_or(OrdersServiceError::NotFound)
    }

    async fn list_orders(
        &self,
        user: UserUuid,
        page: PageRequest,
    ) -> Result<Page<Order>, OrdersServiceError> {
        let page = page
            .validate()
            .map_err(|_| OrdersServiceError::InvalidData)?;

        let mut orders = self.store.list_orders(user, page).await?;

        orders.items = self.enrich(orders.items).await?;

        Ok(orders)
    }

    async fn update_status(
        &self,
        order: OrderUuid,
        requester: UserUuid,
        status: &str,
    ) -> Result<StatusChange, OrdersServiceError> {
        let current = self.store.get_order(order).await?;

        let transition = plan_transition(&current, requester, status)?;

        let updated = self
            .store
            .update_status(order, transition.from, transition.to)
            .await?;

        let order = self
            .enrich(vec![updated])
            .await?
            .pop()
            .ok_or(OrdersServiceError::NotFound)?;

        Ok(StatusChange {
            order,
            previous: transition.from,
        })
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Prices the submitted lines against the catalog and stores a `pending` order.
    async fn place_order(
        &self,
        user: UserUuid,
        lines: Vec<NewOrderLine>,
    ) -> Result<Order, OrdersServiceError>;

    /// Retrieves an order with live product detail attached to its lines.
    async fn get_order(&self, order: OrderUuid) -> Result<Order, OrdersServiceError>;

    /// Retrieves one page of the user's orders, newest first.
    async fn list_orders(
        &self,
        user: UserUuid,
        page: PageRequest,
    ) -> Result<Page<Order>, OrdersServiceError>;

    /// Moves an order owned by `requester` to the named status.
    async fn update_status(
        &self,
        order: OrderUuid,
        requester: UserUuid,
        status: &str,
    ) -> Result<StatusChange, OrdersServiceError>;
}

fn attach_products(
    mut order: Order,
    products: &HashMap<ProductUuid, Option<ProductRecord>>,
) -> Order {
    for line in &mut order.lines {
        line.product = products.get(&line.product_uuid).cloned().flatten();
    }

    order
}
