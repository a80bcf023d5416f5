//! SeaORM implementation of GenreRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::domain::{DomainError, GenreRepository, GenreUpdate, NewGenre};
use crate::models::book;
use crate::models::genre::{ActiveModel, Column, Entity as GenreEntity, Model};

/// SeaORM-based implementation of GenreRepository
pub struct SeaOrmGenreRepository {
    db: DatabaseConnection,
}

impl SeaOrmGenreRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GenreRepository for SeaOrmGenreRepository {
    async fn find_all(&self) -> Result<Vec<Model>, DomainError> {
        let genres = GenreEntity::find()
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await?;
        Ok(genres)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Model>, DomainError> {
        let genre = GenreEntity::find_by_id(id).one(&self.db).await?;
        Ok(genre)
    }

    async fn get(&self, id: i32) -> Result<Model, DomainError> {
        self.find_by_id(id).await?.ok_or(DomainError::NotFound)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Model>, DomainError> {
        let genre = GenreEntity::find()
            .filter(Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(genre)
    }

    async fn find_with_book_counts(&self) -> Result<Vec<(Model, u64)>, DomainError> {
        let genres = self.find_all().await?;

        let mut result = Vec::with_capacity(genres.len());
        for genre in genres {
            let books = genre.find_related(book::Entity).count(&self.db).await?;
            result.push((genre, books));
        }
        Ok(result)
    }

    async fn create(&self, genre: NewGenre) -> Result<Model, DomainError> {
        let active = ActiveModel {
            name: Set(genre.name),
            description: Set(genre.description),
            ..Default::default()
        };

        let result = active.insert(&self.db).await?;
        Ok(result)
    }

    async fn update(&self, id: i32, changes: GenreUpdate) -> Result<Model, DomainError> {
        let existing = GenreEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }

        let result = active.update(&self.db).await?;
        Ok(result)
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = GenreEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let count = GenreEntity::find().count(&self.db).await?;
        Ok(count)
    }
}
