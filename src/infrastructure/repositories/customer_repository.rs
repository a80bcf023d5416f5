//! SeaORM implementation of CustomerRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::{CustomerRepository, CustomerUpdate, DomainError};
use crate::models::customer::{ActiveModel, Column, Entity as CustomerEntity, Model};

/// SeaORM-based implementation of CustomerRepository
pub struct SeaOrmCustomerRepository {
    db: DatabaseConnection,
}

impl SeaOrmCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    async fn find_all(&self) -> Result<Vec<Model>, DomainError> {
        let customers = CustomerEntity::find()
            .order_by_asc(Column::Email)
            .all(&self.db)
            .await?;
        Ok(customers)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Model>, DomainError> {
        let customer = CustomerEntity::find_by_id(id).one(&self.db).await?;
        Ok(customer)
    }

    async fn get(&self, id: i32) -> Result<Model, DomainError> {
        self.find_by_id(id).await?.ok_or(DomainError::NotFound)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Model>, DomainError> {
        let customer = CustomerEntity::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(customer)
    }

    async fn update(&self, id: i32, changes: CustomerUpdate) -> Result<Model, DomainError> {
        let existing = CustomerEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(password) = changes.password {
            active.password = Set(password);
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let result = active.update(&self.db).await?;
        Ok(result)
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = CustomerEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let count = CustomerEntity::find().count(&self.db).await?;
        Ok(count)
    }
}
