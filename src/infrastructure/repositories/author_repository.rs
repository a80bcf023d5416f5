//! SeaORM implementation of AuthorRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait, QueryOrder, Set,
};

use crate::domain::{AuthorRepository, AuthorUpdate, DomainError, NewAuthor};
use crate::models::author::{ActiveModel, Column, Entity as AuthorEntity, Model};
use crate::models::book;

/// SeaORM-based implementation of AuthorRepository
pub struct SeaOrmAuthorRepository {
    db: DatabaseConnection,
}

impl SeaOrmAuthorRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuthorRepository for SeaOrmAuthorRepository {
    async fn find_all(&self) -> Result<Vec<Model>, DomainError> {
        let authors = AuthorEntity::find()
            .order_by_asc(Column::LastName)
            .all(&self.db)
            .await?;
        Ok(authors)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Model>, DomainError> {
        let author = AuthorEntity::find_by_id(id).one(&self.db).await?;
        Ok(author)
    }

    async fn get(&self, id: i32) -> Result<Model, DomainError> {
        self.find_by_id(id).await?.ok_or(DomainError::NotFound)
    }

    async fn find_with_book_counts(&self) -> Result<Vec<(Model, u64)>, DomainError> {
        let authors = self.find_all().await?;

        let mut result = Vec::with_capacity(authors.len());
        for author in authors {
            let books = author.find_related(book::Entity).count(&self.db).await?;
            result.push((author, books));
        }
        Ok(result)
    }

    async fn create(&self, author: NewAuthor) -> Result<Model, DomainError> {
        let active = ActiveModel {
            first_name: Set(author.first_name),
            last_name: Set(author.last_name),
            bio: Set(author.bio),
            ..Default::default()
        };

        let result = active.insert(&self.db).await?;
        Ok(result)
    }

    async fn update(&self, id: i32, changes: AuthorUpdate) -> Result<Model, DomainError> {
        let existing = AuthorEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        if let Some(first_name) = changes.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = changes.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(bio) = changes.bio {
            active.bio = Set(bio);
        }

        let result = active.update(&self.db).await?;
        Ok(result)
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = AuthorEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let count = AuthorEntity::find().count(&self.db).await?;
        Ok(count)
    }
}
