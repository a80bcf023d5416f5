//! Order Service - Transactional order placement and sales aggregates
//!
//! The `total_amount` of an order is always the sum of its line totals;
//! both are written inside one transaction so a failed line rolls the
//! whole order back.

use std::collections::HashMap;

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, Set, TransactionTrait,
};

use crate::domain::{DomainError, OrderWithDetails};
use crate::models::book::Entity as Book;
use crate::models::customer::Entity as Customer;
use crate::models::genre::Entity as Genre;
use crate::models::{order, order_detail};

/// One requested line of a new order. The unit price is snapshotted from
/// the book at placement time.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct OrderLine {
    pub book_id: i32,
    pub quantity: i32,
}

/// Revenue aggregated per genre (group-by shape over order details)
#[derive(Debug, Clone, serde::Serialize)]
pub struct GenreRevenue {
    pub genre: String,
    pub units: i64,
    pub revenue: Decimal,
}

/// Place an order for a customer: validates the lines, snapshots unit
/// prices, and writes the order plus its details atomically.
pub async fn place_order(
    db: &DatabaseConnection,
    customer_id: i32,
    lines: Vec<OrderLine>,
) -> Result<OrderWithDetails, DomainError> {
    if lines.is_empty() {
        return Err(DomainError::Validation(
            "an order needs at least one line".to_string(),
        ));
    }

    for line in &lines {
        if line.quantity <= 0 {
            return Err(DomainError::Validation(format!(
                "quantity must be positive, got {} for book {}",
                line.quantity, line.book_id
            )));
        }
    }

    tracing::info!(customer_id, lines = lines.len(), "Placing order");

    let result = db
        .transaction::<_, OrderWithDetails, DomainError>(|txn| {
            Box::pin(async move {
                Customer::find_by_id(customer_id)
                    .one(txn)
                    .await?
                    .ok_or(DomainError::NotFound)?;

                // Snapshot unit prices and compute the total up front
                let mut priced_lines = Vec::with_capacity(lines.len());
                let mut total = Decimal::ZERO;
                for line in &lines {
                    let book = Book::find_by_id(line.book_id)
                        .one(txn)
                        .await?
                        .ok_or(DomainError::NotFound)?;
                    total += book.price * Decimal::from(line.quantity);
                    priced_lines.push((line.clone(), book.price));
                }

                let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
                let new_order = order::ActiveModel {
                    customer_id: Set(customer_id),
                    order_date: Set(today),
                    total_amount: Set(total),
                    ..Default::default()
                };
                let saved_order = new_order.insert(txn).await?;

                let mut details = Vec::with_capacity(priced_lines.len());
                for (line, unit_price) in priced_lines {
                    let detail = order_detail::ActiveModel {
                        order_id: Set(saved_order.order_id),
                        book_id: Set(line.book_id),
                        quantity: Set(line.quantity),
                        price_per_item: Set(unit_price),
                        ..Default::default()
                    };
                    details.push(detail.insert(txn).await?);
                }

                Ok(OrderWithDetails {
                    order: saved_order,
                    details,
                })
            })
        })
        .await?;

    Ok(result)
}

/// Cancel an order: removes its details and the order itself atomically.
pub async fn cancel_order(db: &DatabaseConnection, order_id: i32) -> Result<(), DomainError> {
    db.transaction::<_, (), DomainError>(|txn| {
        Box::pin(async move {
            let existing = order::Entity::find_by_id(order_id)
                .one(txn)
                .await?
                .ok_or(DomainError::NotFound)?;

            order_detail::Entity::delete_many()
                .filter(order_detail::Column::OrderId.eq(order_id))
                .exec(txn)
                .await?;

            existing.delete(txn).await?;
            Ok(())
        })
    })
    .await?;

    tracing::info!(order_id, "Order cancelled");
    Ok(())
}

/// Count all orders
pub async fn count_orders(db: &DatabaseConnection) -> Result<i64, DomainError> {
    let count = order::Entity::find().count(db).await?;
    Ok(count as i64)
}

/// Total revenue over all orders
pub async fn total_revenue(db: &DatabaseConnection) -> Result<Decimal, DomainError> {
    let orders = order::Entity::find().all(db).await?;
    let total: Decimal = orders.iter().map(|o| o.total_amount).sum();
    Ok(total)
}

/// Average order value, zero when there are no orders
pub async fn average_order_value(db: &DatabaseConnection) -> Result<Decimal, DomainError> {
    let orders = order::Entity::find().all(db).await?;
    if orders.is_empty() {
        return Ok(Decimal::ZERO);
    }
    let total: Decimal = orders.iter().map(|o| o.total_amount).sum();
    Ok(total / Decimal::from(orders.len() as u64))
}

/// Revenue and units sold per genre, descending by revenue
pub async fn revenue_by_genre(db: &DatabaseConnection) -> Result<Vec<GenreRevenue>, DomainError> {
    let details_with_books = order_detail::Entity::find()
        .find_also_related(Book)
        .all(db)
        .await?;

    // Map genre_id -> name once, then fold the lines
    let mut genre_names: HashMap<i32, String> = HashMap::new();
    for genre in Genre::find().all(db).await? {
        genre_names.insert(genre.genre_id, genre.name);
    }

    let mut per_genre: HashMap<i32, (i64, Decimal)> = HashMap::new();
    for (detail, book) in details_with_books {
        if let Some(book) = book {
            let entry = per_genre.entry(book.genre_id).or_default();
            entry.0 += detail.quantity as i64;
            entry.1 += detail.line_total();
        }
    }

    let mut result: Vec<GenreRevenue> = per_genre
        .into_iter()
        .map(|(genre_id, (units, revenue))| GenreRevenue {
            genre: genre_names
                .get(&genre_id)
                .cloned()
                .unwrap_or_else(|| "Unknown".to_string()),
            units,
            revenue,
        })
        .collect();

    result.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    Ok(result)
}
