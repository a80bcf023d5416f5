//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::DomainError;
use crate::models::BookDetails;
use crate::models::{author, customer, genre, order, order_detail, publisher, review};

/// Filter criteria for book queries
#[derive(Debug, Default, Clone)]
pub struct BookFilter {
    pub title: Option<String>,
    pub author_id: Option<i32>,
    pub genre_id: Option<i32>,
    pub publisher_id: Option<i32>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    /// Free-text match against title, isbn and description
    pub query: Option<String>,
    pub sort: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

/// Paginated result with total count
#[derive(Debug)]
pub struct PaginatedBooks {
    pub books: Vec<BookDetails>,
    pub total: u64,
}

/// Input for creating a book
#[derive(Debug, Clone, serde::Deserialize)]
pub struct NewBook {
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub publish_date: String,
    pub isbn: String,
    pub author_id: i32,
    pub genre_id: i32,
    pub publisher_id: i32,
}

/// Partial update for a book. `None` leaves the field untouched;
/// `Some(None)` on a nullable field clears it.
#[derive(Debug, Default, Clone, serde::Deserialize)]
pub struct BookUpdate {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub price: Option<Decimal>,
    pub publish_date: Option<String>,
    pub isbn: Option<String>,
    pub author_id: Option<i32>,
    pub genre_id: Option<i32>,
    pub publisher_id: Option<i32>,
}

/// Aggregate over book prices (count/min/max/sum/avg of the matching rows)
#[derive(Debug, Clone, PartialEq)]
pub struct PriceStats {
    pub count: u64,
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
    pub sum: Decimal,
    pub avg: Option<Decimal>,
}

/// Repository trait for Book entity
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Find all books matching the filter criteria with pagination support
    async fn find_all(&self, filter: BookFilter) -> Result<PaginatedBooks, DomainError>;

    /// Find a single book by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<BookDetails>, DomainError>;

    /// Find a single book by ID, failing with `NotFound` if absent
    async fn get(&self, id: i32) -> Result<BookDetails, DomainError>;

    /// Find a single book by its unique isbn
    async fn find_by_isbn(&self, isbn: &str) -> Result<Option<BookDetails>, DomainError>;

    /// First book matching the filter, honoring its sort order
    async fn find_first(&self, filter: BookFilter) -> Result<Option<BookDetails>, DomainError>;

    /// Create a new book
    async fn create(&self, book: NewBook) -> Result<BookDetails, DomainError>;

    /// Bulk insert, returning the number of inserted rows
    async fn create_many(&self, books: Vec<NewBook>) -> Result<u64, DomainError>;

    /// Bulk insert returning the inserted rows
    async fn create_many_and_return(
        &self,
        books: Vec<NewBook>,
    ) -> Result<Vec<BookDetails>, DomainError>;

    /// Update an existing book
    async fn update(&self, id: i32, changes: BookUpdate) -> Result<BookDetails, DomainError>;

    /// Apply the same changes to every book matching the filter
    async fn update_many(&self, filter: BookFilter, changes: BookUpdate)
    -> Result<u64, DomainError>;

    /// Insert, or update the existing row carrying the same isbn
    async fn upsert_by_isbn(&self, book: NewBook) -> Result<BookDetails, DomainError>;

    /// Delete a book by ID
    async fn delete(&self, id: i32) -> Result<(), DomainError>;

    /// Delete every book matching the filter, returning the number removed
    async fn delete_many(&self, filter: BookFilter) -> Result<u64, DomainError>;

    /// Count books matching the filter
    async fn count(&self, filter: BookFilter) -> Result<u64, DomainError>;

    /// Price aggregate over the books matching the filter
    async fn price_stats(&self, filter: BookFilter) -> Result<PriceStats, DomainError>;
}

/// Input for creating an author
#[derive(Debug, Clone, serde::Deserialize)]
pub struct NewAuthor {
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
}

/// Partial update for an author
#[derive(Debug, Default, Clone, serde::Deserialize)]
pub struct AuthorUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<Option<String>>,
}

/// Repository trait for Author entity
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// Find all authors
    async fn find_all(&self) -> Result<Vec<author::Model>, DomainError>;

    /// Find an author by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<author::Model>, DomainError>;

    /// Find an author by ID, failing with `NotFound` if absent
    async fn get(&self, id: i32) -> Result<author::Model, DomainError>;

    /// All authors paired with their book count
    async fn find_with_book_counts(&self) -> Result<Vec<(author::Model, u64)>, DomainError>;

    /// Create a new author
    async fn create(&self, author: NewAuthor) -> Result<author::Model, DomainError>;

    /// Update an existing author
    async fn update(&self, id: i32, changes: AuthorUpdate) -> Result<author::Model, DomainError>;

    /// Delete an author by ID
    async fn delete(&self, id: i32) -> Result<(), DomainError>;

    /// Count all authors
    async fn count(&self) -> Result<u64, DomainError>;
}

/// Input for creating a genre
#[derive(Debug, Clone, serde::Deserialize)]
pub struct NewGenre {
    pub name: String,
    pub description: Option<String>,
}

/// Partial update for a genre
#[derive(Debug, Default, Clone, serde::Deserialize)]
pub struct GenreUpdate {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

/// Repository trait for Genre entity
#[async_trait]
pub trait GenreRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<genre::Model>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<genre::Model>, DomainError>;

    async fn get(&self, id: i32) -> Result<genre::Model, DomainError>;

    /// Find a genre by its unique name
    async fn find_by_name(&self, name: &str) -> Result<Option<genre::Model>, DomainError>;

    /// All genres paired with their book count
    async fn find_with_book_counts(&self) -> Result<Vec<(genre::Model, u64)>, DomainError>;

    async fn create(&self, genre: NewGenre) -> Result<genre::Model, DomainError>;

    async fn update(&self, id: i32, changes: GenreUpdate) -> Result<genre::Model, DomainError>;

    async fn delete(&self, id: i32) -> Result<(), DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;
}

/// Input for creating a publisher
#[derive(Debug, Clone, serde::Deserialize)]
pub struct NewPublisher {
    pub publisher_name: String,
    pub contact_name: Option<String>,
    pub phone_number: String,
}

/// Partial update for a publisher
#[derive(Debug, Default, Clone, serde::Deserialize)]
pub struct PublisherUpdate {
    pub publisher_name: Option<String>,
    pub contact_name: Option<Option<String>>,
    pub phone_number: Option<String>,
}

/// Repository trait for Publisher entity
#[async_trait]
pub trait PublisherRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<publisher::Model>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<publisher::Model>, DomainError>;

    async fn get(&self, id: i32) -> Result<publisher::Model, DomainError>;

    async fn create(&self, publisher: NewPublisher) -> Result<publisher::Model, DomainError>;

    async fn update(
        &self,
        id: i32,
        changes: PublisherUpdate,
    ) -> Result<publisher::Model, DomainError>;

    async fn delete(&self, id: i32) -> Result<(), DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;
}

/// Partial update for a customer. The password, when present, must already
/// be hashed; hashing lives in the customer service.
#[derive(Debug, Default, Clone)]
pub struct CustomerUpdate {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Repository trait for Customer entity. Registration goes through the
/// customer service, which owns password hashing.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<customer::Model>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<customer::Model>, DomainError>;

    async fn get(&self, id: i32) -> Result<customer::Model, DomainError>;

    /// Find a customer by their unique email
    async fn find_by_email(&self, email: &str) -> Result<Option<customer::Model>, DomainError>;

    async fn update(&self, id: i32, changes: CustomerUpdate)
    -> Result<customer::Model, DomainError>;

    async fn delete(&self, id: i32) -> Result<(), DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;
}

/// Filter parameters for listing orders
#[derive(Debug, Default, Clone)]
pub struct OrderFilter {
    pub customer_id: Option<i32>,
    /// Inclusive YYYY-MM-DD bounds
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

/// An order together with its line items
#[derive(Debug, Clone, serde::Serialize)]
pub struct OrderWithDetails {
    pub order: order::Model,
    pub details: Vec<order_detail::Model>,
}

/// Repository trait for Order entity. Writes go through the order service,
/// which owns the transactional create/cancel flow.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn find_all(&self, filter: OrderFilter) -> Result<Vec<order::Model>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<order::Model>, DomainError>;

    async fn get(&self, id: i32) -> Result<order::Model, DomainError>;

    /// Order plus its line items
    async fn find_with_details(&self, id: i32) -> Result<Option<OrderWithDetails>, DomainError>;

    async fn count(&self, filter: OrderFilter) -> Result<u64, DomainError>;
}

/// Filter parameters for listing reviews
#[derive(Debug, Default, Clone)]
pub struct ReviewFilter {
    pub book_id: Option<i32>,
    pub customer_id: Option<i32>,
    pub min_rating: Option<i32>,
}

/// Partial update for a review
#[derive(Debug, Default, Clone, serde::Deserialize)]
pub struct ReviewUpdate {
    pub rating: Option<i32>,
    pub comment: Option<Option<String>>,
}

/// Repository trait for Review entity. Creation goes through the review
/// service, which validates the rating range and the referenced rows.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn find_all(&self, filter: ReviewFilter) -> Result<Vec<review::Model>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<review::Model>, DomainError>;

    async fn get(&self, id: i32) -> Result<review::Model, DomainError>;

    async fn update(&self, id: i32, changes: ReviewUpdate) -> Result<review::Model, DomainError>;

    async fn delete(&self, id: i32) -> Result<(), DomainError>;

    /// Delete every review matching the filter, returning the number removed
    async fn delete_many(&self, filter: ReviewFilter) -> Result<u64, DomainError>;

    async fn count(&self, filter: ReviewFilter) -> Result<u64, DomainError>;
}
