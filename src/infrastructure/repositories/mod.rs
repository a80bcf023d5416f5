//! Repository implementations using SeaORM

pub mod author_repository;
pub mod book_repository;
pub mod customer_repository;
pub mod genre_repository;
pub mod order_repository;
pub mod publisher_repository;
pub mod review_repository;

pub use author_repository::SeaOrmAuthorRepository;
pub use book_repository::SeaOrmBookRepository;
pub use customer_repository::SeaOrmCustomerRepository;
pub use genre_repository::SeaOrmGenreRepository;
pub use order_repository::SeaOrmOrderRepository;
pub use publisher_repository::SeaOrmPublisherRepository;
pub use review_repository::SeaOrmReviewRepository;
