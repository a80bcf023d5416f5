//! Review Service - Review creation with validation and rating aggregates

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

use crate::domain::DomainError;
use crate::models::book::Entity as Book;
use crate::models::customer::Entity as Customer;
use crate::models::review;

/// Input for posting a review
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ReviewInput {
    pub book_id: i32,
    pub customer_id: i32,
    pub rating: i32,
    pub comment: Option<String>,
}

/// Rating aggregate for one book
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RatingStats {
    pub count: u64,
    pub average: Option<f64>,
    pub min: Option<i32>,
    pub max: Option<i32>,
}

/// Post a review. The rating must be within 1-5 and both the book and the
/// customer must exist.
pub async fn add_review(
    db: &DatabaseConnection,
    input: ReviewInput,
) -> Result<review::Model, DomainError> {
    if !(1..=5).contains(&input.rating) {
        return Err(DomainError::Validation(format!(
            "rating must be between 1 and 5, got {}",
            input.rating
        )));
    }

    Book::find_by_id(input.book_id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)?;
    Customer::find_by_id(input.customer_id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)?;

    let now = chrono::Utc::now().to_rfc3339();
    let new_review = review::ActiveModel {
        book_id: Set(input.book_id),
        customer_id: Set(input.customer_id),
        rating: Set(input.rating),
        comment: Set(input.comment),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    let saved = new_review.insert(db).await?;
    tracing::info!(
        review_id = saved.review_id,
        book_id = saved.book_id,
        "Review posted"
    );
    Ok(saved)
}

/// Rating aggregate (count/avg/min/max) for one book
pub async fn rating_stats(
    db: &DatabaseConnection,
    book_id: i32,
) -> Result<RatingStats, DomainError> {
    let reviews = review::Entity::find()
        .filter(review::Column::BookId.eq(book_id))
        .all(db)
        .await?;

    let count = reviews.len() as u64;
    let min = reviews.iter().map(|r| r.rating).min();
    let max = reviews.iter().map(|r| r.rating).max();
    let average = if count == 0 {
        None
    } else {
        let sum: i64 = reviews.iter().map(|r| r.rating as i64).sum();
        Some(sum as f64 / count as f64)
    };

    Ok(RatingStats {
        count,
        average,
        min,
        max,
    })
}
