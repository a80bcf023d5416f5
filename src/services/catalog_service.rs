//! Catalog Service - Search and catalog-wide aggregates on top of the
//! book repository

use sea_orm::DatabaseConnection;

use crate::domain::{BookFilter, BookRepository, DomainError, PaginatedBooks, PriceStats};
use crate::infrastructure::SeaOrmBookRepository;

/// Search the catalog. Thin wrapper that applies a sane default page size
/// so unbounded scans stay out of calling code.
pub async fn search_books(
    db: &DatabaseConnection,
    mut filter: BookFilter,
) -> Result<PaginatedBooks, DomainError> {
    if filter.limit.is_none() {
        filter.limit = Some(50);
    }
    tracing::info!(
        query = filter.query.as_deref().unwrap_or(""),
        "Catalog search"
    );
    SeaOrmBookRepository::new(db.clone()).find_all(filter).await
}

/// Price aggregate over the whole catalog (or the matching slice)
pub async fn price_overview(
    db: &DatabaseConnection,
    filter: BookFilter,
) -> Result<PriceStats, DomainError> {
    SeaOrmBookRepository::new(db.clone()).price_stats(filter).await
}
