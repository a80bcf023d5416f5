//! SeaORM implementation of OrderRepository (read side; writes live in
//! the order service, which owns the transactional flow)

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};

use crate::domain::{DomainError, OrderFilter, OrderRepository, OrderWithDetails};
use crate::models::order::{Column, Entity as OrderEntity, Model};
use crate::models::order_detail;

/// SeaORM-based implementation of OrderRepository
pub struct SeaOrmOrderRepository {
    db: DatabaseConnection,
}

impl SeaOrmOrderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn filter_condition(filter: &OrderFilter) -> Condition {
    let mut cond = Condition::all();

    if let Some(customer_id) = filter.customer_id {
        cond = cond.add(Column::CustomerId.eq(customer_id));
    }

    // YYYY-MM-DD strings compare lexicographically in date order
    if let Some(from) = &filter.from_date
        && !from.is_empty()
    {
        cond = cond.add(Column::OrderDate.gte(from.clone()));
    }

    if let Some(to) = &filter.to_date
        && !to.is_empty()
    {
        cond = cond.add(Column::OrderDate.lte(to.clone()));
    }

    cond
}

#[async_trait]
impl OrderRepository for SeaOrmOrderRepository {
    async fn find_all(&self, filter: OrderFilter) -> Result<Vec<Model>, DomainError> {
        let orders = OrderEntity::find()
            .filter(filter_condition(&filter))
            .order_by_desc(Column::OrderDate)
            .all(&self.db)
            .await?;
        Ok(orders)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Model>, DomainError> {
        let order = OrderEntity::find_by_id(id).one(&self.db).await?;
        Ok(order)
    }

    async fn get(&self, id: i32) -> Result<Model, DomainError> {
        self.find_by_id(id).await?.ok_or(DomainError::NotFound)
    }

    async fn find_with_details(&self, id: i32) -> Result<Option<OrderWithDetails>, DomainError> {
        let order = match OrderEntity::find_by_id(id).one(&self.db).await? {
            Some(order) => order,
            None => return Ok(None),
        };

        let details = order
            .find_related(order_detail::Entity)
            .all(&self.db)
            .await?;

        Ok(Some(OrderWithDetails { order, details }))
    }

    async fn count(&self, filter: OrderFilter) -> Result<u64, DomainError> {
        let count = OrderEntity::find()
            .filter(filter_condition(&filter))
            .count(&self.db)
            .await?;
        Ok(count)
    }
}
