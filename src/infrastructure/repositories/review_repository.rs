//! SeaORM implementation of ReviewRepository (creation lives in the
//! review service, which validates the rating range)

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::domain::{DomainError, ReviewFilter, ReviewRepository, ReviewUpdate};
use crate::models::review::{ActiveModel, Column, Entity as ReviewEntity, Model};

/// SeaORM-based implementation of ReviewRepository
pub struct SeaOrmReviewRepository {
    db: DatabaseConnection,
}

impl SeaOrmReviewRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn filter_condition(filter: &ReviewFilter) -> Condition {
    let mut cond = Condition::all();

    if let Some(book_id) = filter.book_id {
        cond = cond.add(Column::BookId.eq(book_id));
    }

    if let Some(customer_id) = filter.customer_id {
        cond = cond.add(Column::CustomerId.eq(customer_id));
    }

    if let Some(min_rating) = filter.min_rating {
        cond = cond.add(Column::Rating.gte(min_rating));
    }

    cond
}

#[async_trait]
impl ReviewRepository for SeaOrmReviewRepository {
    async fn find_all(&self, filter: ReviewFilter) -> Result<Vec<Model>, DomainError> {
        let reviews = ReviewEntity::find()
            .filter(filter_condition(&filter))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(reviews)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Model>, DomainError> {
        let review = ReviewEntity::find_by_id(id).one(&self.db).await?;
        Ok(review)
    }

    async fn get(&self, id: i32) -> Result<Model, DomainError> {
        self.find_by_id(id).await?.ok_or(DomainError::NotFound)
    }

    async fn update(&self, id: i32, changes: ReviewUpdate) -> Result<Model, DomainError> {
        let existing = ReviewEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        if let Some(rating) = changes.rating
            && !(1..=5).contains(&rating)
        {
            return Err(DomainError::Validation(format!(
                "rating must be between 1 and 5, got {}",
                rating
            )));
        }

        let mut active: ActiveModel = existing.into();
        if let Some(rating) = changes.rating {
            active.rating = Set(rating);
        }
        if let Some(comment) = changes.comment {
            active.comment = Set(comment);
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let result = active.update(&self.db).await?;
        Ok(result)
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = ReviewEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }

    async fn delete_many(&self, filter: ReviewFilter) -> Result<u64, DomainError> {
        let result = ReviewEntity::delete_many()
            .filter(filter_condition(&filter))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }

    async fn count(&self, filter: ReviewFilter) -> Result<u64, DomainError> {
        let count = ReviewEntity::find()
            .filter(filter_condition(&filter))
            .count(&self.db)
            .await?;
        Ok(count)
    }
}
