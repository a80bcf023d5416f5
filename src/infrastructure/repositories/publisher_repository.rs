//! SeaORM implementation of PublisherRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
};

use crate::domain::{DomainError, NewPublisher, PublisherRepository, PublisherUpdate};
use crate::models::publisher::{ActiveModel, Column, Entity as PublisherEntity, Model};

/// SeaORM-based implementation of PublisherRepository
pub struct SeaOrmPublisherRepository {
    db: DatabaseConnection,
}

impl SeaOrmPublisherRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PublisherRepository for SeaOrmPublisherRepository {
    async fn find_all(&self) -> Result<Vec<Model>, DomainError> {
        let publishers = PublisherEntity::find()
            .order_by_asc(Column::PublisherName)
            .all(&self.db)
            .await?;
        Ok(publishers)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Model>, DomainError> {
        let publisher = PublisherEntity::find_by_id(id).one(&self.db).await?;
        Ok(publisher)
    }

    async fn get(&self, id: i32) -> Result<Model, DomainError> {
        self.find_by_id(id).await?.ok_or(DomainError::NotFound)
    }

    async fn create(&self, publisher: NewPublisher) -> Result<Model, DomainError> {
        let active = ActiveModel {
            publisher_name: Set(publisher.publisher_name),
            contact_name: Set(publisher.contact_name),
            phone_number: Set(publisher.phone_number),
            ..Default::default()
        };

        let result = active.insert(&self.db).await?;
        Ok(result)
    }

    async fn update(&self, id: i32, changes: PublisherUpdate) -> Result<Model, DomainError> {
        let existing = PublisherEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        if let Some(publisher_name) = changes.publisher_name {
            active.publisher_name = Set(publisher_name);
        }
        if let Some(contact_name) = changes.contact_name {
            active.contact_name = Set(contact_name);
        }
        if let Some(phone_number) = changes.phone_number {
            active.phone_number = Set(phone_number);
        }

        let result = active.update(&self.db).await?;
        Ok(result)
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = PublisherEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let count = PublisherEntity::find().count(&self.db).await?;
        Ok(count)
    }
}
