//! Repository CRUD paths against in-memory SQLite

use bookstore::db;
use bookstore::domain::{
    AuthorRepository, AuthorUpdate, BookFilter, BookRepository, BookUpdate, CustomerRepository,
    DomainError, GenreRepository, NewAuthor, NewBook, NewGenre, NewPublisher, OrderFilter,
    OrderRepository, PublisherRepository, ReviewFilter, ReviewRepository, ReviewUpdate,
};
use bookstore::infrastructure::{
    SeaOrmAuthorRepository, SeaOrmBookRepository, SeaOrmCustomerRepository, SeaOrmGenreRepository,
    SeaOrmOrderRepository, SeaOrmPublisherRepository, SeaOrmReviewRepository,
};
use bookstore::seed;
use bookstore::services::catalog_service;
use bookstore::services::customer_service;
use bookstore::services::review_service::{self, ReviewInput};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

async fn setup_test_db() -> DatabaseConnection {
    // In-memory SQLite for testing
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

/// Create one author, genre and publisher, returning their ids.
async fn create_reference_rows(db: &DatabaseConnection) -> (i32, i32, i32) {
    let author = SeaOrmAuthorRepository::new(db.clone())
        .create(NewAuthor {
            first_name: "Frank".to_string(),
            last_name: "Herbert".to_string(),
            bio: None,
        })
        .await
        .expect("author");

    let genre = SeaOrmGenreRepository::new(db.clone())
        .create(NewGenre {
            name: "Science Fiction".to_string(),
            description: None,
        })
        .await
        .expect("genre");

    let publisher = SeaOrmPublisherRepository::new(db.clone())
        .create(NewPublisher {
            publisher_name: "Ace Books".to_string(),
            contact_name: None,
            phone_number: "+1-212-555-0100".to_string(),
        })
        .await
        .expect("publisher");

    (author.author_id, genre.genre_id, publisher.publisher_id)
}

fn new_book(title: &str, isbn: &str, cents: i64, ids: (i32, i32, i32)) -> NewBook {
    NewBook {
        title: title.to_string(),
        description: None,
        price: Decimal::new(cents, 2),
        publish_date: "1965-08-01".to_string(),
        isbn: isbn.to_string(),
        author_id: ids.0,
        genre_id: ids.1,
        publisher_id: ids.2,
    }
}

#[tokio::test]
async fn create_and_fetch_book_with_related_names() {
    let db = setup_test_db().await;
    let ids = create_reference_rows(&db).await;
    let books = SeaOrmBookRepository::new(db.clone());

    let created = books
        .create(new_book("Dune", "9780441172719", 1299, ids))
        .await
        .unwrap();
    assert_eq!(created.title, "Dune");
    assert_eq!(created.author.as_deref(), Some("Frank Herbert"));
    assert_eq!(created.genre.as_deref(), Some("Science Fiction"));
    assert_eq!(created.publisher.as_deref(), Some("Ace Books"));

    let fetched = books.find_by_id(created.book_id).await.unwrap().unwrap();
    assert_eq!(fetched.price, Decimal::new(1299, 2));

    let by_isbn = books.find_by_isbn("9780441172719").await.unwrap().unwrap();
    assert_eq!(by_isbn.book_id, created.book_id);

    assert!(books.find_by_id(9999).await.unwrap().is_none());
    assert!(matches!(
        books.get(9999).await,
        Err(DomainError::NotFound)
    ));
}

#[tokio::test]
async fn whole_valued_prices_survive_the_round_trip() {
    let db = setup_test_db().await;
    let ids = create_reference_rows(&db).await;
    let books = SeaOrmBookRepository::new(db.clone());

    // 10.00 has no fractional part; the column must not degrade it to an
    // integer that later reads reject.
    let created = books
        .create(new_book("Dune", "isbn-1", 1000, ids))
        .await
        .unwrap();

    let fetched = books.find_by_id(created.book_id).await.unwrap().unwrap();
    assert_eq!(fetched.price.round_dp(2), Decimal::new(1000, 2));

    let page = books.find_all(BookFilter::default()).await.unwrap();
    assert_eq!(page.books.len(), 1);

    let stats = books.price_stats(BookFilter::default()).await.unwrap();
    assert_eq!(stats.sum.round_dp(2), Decimal::new(1000, 2));
}

#[tokio::test]
async fn duplicate_isbn_is_a_unique_violation() {
    let db = setup_test_db().await;
    let ids = create_reference_rows(&db).await;
    let books = SeaOrmBookRepository::new(db.clone());

    books
        .create(new_book("Dune", "9780441172719", 1299, ids))
        .await
        .unwrap();
    let err = books
        .create(new_book("Dune again", "9780441172719", 999, ids))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::UniqueViolation(_)), "{err}");
}

#[tokio::test]
async fn find_all_filters_and_paginates() {
    let db = setup_test_db().await;
    let ids = create_reference_rows(&db).await;
    let books = SeaOrmBookRepository::new(db.clone());

    let inserted = books
        .create_many(vec![
            new_book("Dune", "isbn-1", 1299, ids),
            new_book("Dune Messiah", "isbn-2", 1099, ids),
            new_book("Children of Dune", "isbn-3", 999, ids),
        ])
        .await
        .unwrap();
    assert_eq!(inserted, 3);

    let page = books
        .find_all(BookFilter {
            title: Some("Dune".to_string()),
            sort: Some("price_asc".to_string()),
            page: Some(0),
            limit: Some(2),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.books.len(), 2);
    assert_eq!(page.books[0].title, "Children of Dune");

    let cheap = books
        .count(BookFilter {
            max_price: Some(Decimal::new(1099, 2)),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(cheap, 2);

    let first = books
        .find_first(BookFilter {
            sort: Some("price_desc".to_string()),
            ..Default::default()
        })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.title, "Dune");
}

#[tokio::test]
async fn update_paths() {
    let db = setup_test_db().await;
    let ids = create_reference_rows(&db).await;
    let books = SeaOrmBookRepository::new(db.clone());

    let created = books
        .create(NewBook {
            description: Some("A desert planet".to_string()),
            ..new_book("Dune", "isbn-1", 1299, ids)
        })
        .await
        .unwrap();

    // Partial update: change the price, clear the description
    let updated = books
        .update(
            created.book_id,
            BookUpdate {
                price: Some(Decimal::new(1499, 2)),
                description: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.price, Decimal::new(1499, 2));
    assert_eq!(updated.description, None);
    assert_eq!(updated.title, "Dune");

    assert!(matches!(
        books.update(9999, BookUpdate::default()).await,
        Err(DomainError::NotFound)
    ));

    // Bulk update across the genre
    books.create(new_book("Messiah", "isbn-2", 999, ids)).await.unwrap();
    let touched = books
        .update_many(
            BookFilter {
                genre_id: Some(ids.1),
                ..Default::default()
            },
            BookUpdate {
                price: Some(Decimal::new(500, 2)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(touched, 2);

    // Empty patch is a no-op, not invalid SQL
    let touched = books
        .update_many(BookFilter::default(), BookUpdate::default())
        .await
        .unwrap();
    assert_eq!(touched, 0);

    // Bulk isbn assignment is rejected
    let err = books
        .update_many(
            BookFilter::default(),
            BookUpdate {
                isbn: Some("isbn-x".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[tokio::test]
async fn upsert_by_isbn_inserts_then_updates() {
    let db = setup_test_db().await;
    let ids = create_reference_rows(&db).await;
    let books = SeaOrmBookRepository::new(db.clone());

    let first = books
        .upsert_by_isbn(new_book("Dune", "isbn-1", 1299, ids))
        .await
        .unwrap();
    assert_eq!(first.title, "Dune");

    let second = books
        .upsert_by_isbn(new_book("Dune (revised)", "isbn-1", 1599, ids))
        .await
        .unwrap();
    assert_eq!(second.book_id, first.book_id);
    assert_eq!(second.title, "Dune (revised)");
    assert_eq!(second.price, Decimal::new(1599, 2));

    assert_eq!(books.count(BookFilter::default()).await.unwrap(), 1);
}

#[tokio::test]
async fn create_many_and_return_yields_rows_and_delete_many_removes_them() {
    let db = setup_test_db().await;
    let ids = create_reference_rows(&db).await;
    let books = SeaOrmBookRepository::new(db.clone());

    let rows = books
        .create_many_and_return(vec![
            new_book("Dune", "isbn-1", 1299, ids),
            new_book("Messiah", "isbn-2", 999, ids),
        ])
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|b| b.book_id > 0));
    assert_eq!(rows[0].author.as_deref(), Some("Frank Herbert"));

    let removed = books
        .delete_many(BookFilter {
            title: Some("Dune".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(removed, 1);
    assert_eq!(books.count(BookFilter::default()).await.unwrap(), 1);

    books.delete(rows[1].book_id).await.unwrap();
    assert!(matches!(
        books.delete(rows[1].book_id).await,
        Err(DomainError::NotFound)
    ));
}

#[tokio::test]
async fn price_stats_over_filter() {
    let db = setup_test_db().await;
    let ids = create_reference_rows(&db).await;
    let books = SeaOrmBookRepository::new(db.clone());

    let empty = books.price_stats(BookFilter::default()).await.unwrap();
    assert_eq!(empty.count, 0);
    assert_eq!(empty.sum, Decimal::ZERO);
    assert!(empty.avg.is_none());

    books
        .create_many(vec![
            new_book("A", "isbn-1", 1000, ids),
            new_book("B", "isbn-2", 2000, ids),
            new_book("C", "isbn-3", 3000, ids),
        ])
        .await
        .unwrap();

    let stats = books.price_stats(BookFilter::default()).await.unwrap();
    assert_eq!(stats.count, 3);
    assert_eq!(stats.min, Some(Decimal::new(1000, 2)));
    assert_eq!(stats.max, Some(Decimal::new(3000, 2)));
    assert_eq!(stats.sum.round_dp(2), Decimal::new(6000, 2));
    assert_eq!(stats.avg.map(|a| a.round_dp(2)), Some(Decimal::new(2000, 2)));
}

#[tokio::test]
async fn reference_entities_expose_book_counts() {
    let db = setup_test_db().await;
    let ids = create_reference_rows(&db).await;
    let books = SeaOrmBookRepository::new(db.clone());
    let authors = SeaOrmAuthorRepository::new(db.clone());
    let genres = SeaOrmGenreRepository::new(db.clone());

    books
        .create_many(vec![
            new_book("A", "isbn-1", 1000, ids),
            new_book("B", "isbn-2", 2000, ids),
        ])
        .await
        .unwrap();

    let with_counts = authors.find_with_book_counts().await.unwrap();
    assert_eq!(with_counts.len(), 1);
    assert_eq!(with_counts[0].1, 2);

    let with_counts = genres.find_with_book_counts().await.unwrap();
    assert_eq!(with_counts[0].1, 2);

    let updated = authors
        .update(
            ids.0,
            AuthorUpdate {
                bio: Some(Some("Author of Dune".to_string())),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.bio.as_deref(), Some("Author of Dune"));
    assert_eq!(updated.first_name, "Frank");

    let by_name = genres.find_by_name("Science Fiction").await.unwrap();
    assert!(by_name.is_some());
    assert!(genres.find_by_name("Poetry").await.unwrap().is_none());
}

#[tokio::test]
async fn seeded_catalog_is_idempotent_and_searchable() {
    let db = setup_test_db().await;
    seed::seed_demo_data(&db).await.unwrap();
    // Re-seeding must not duplicate or fail on the unique columns
    seed::seed_demo_data(&db).await.unwrap();

    let page = catalog_service::search_books(
        &db,
        BookFilter {
            query: Some("Dune".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.books[0].author.as_deref(), Some("Frank Herbert"));
    assert_eq!(page.books[0].genre.as_deref(), Some("Science Fiction"));

    let stats = catalog_service::price_overview(&db, BookFilter::default())
        .await
        .unwrap();
    assert_eq!(stats.count, 3);
    assert_eq!(stats.min, Some(Decimal::new(999, 2)));
    assert_eq!(stats.max, Some(Decimal::new(1550, 2)));

    // The demo order, its lines and the review come along, exactly once
    let orders = SeaOrmOrderRepository::new(db.clone());
    assert_eq!(orders.count(OrderFilter::default()).await.unwrap(), 1);
    let listed = orders.find_all(OrderFilter::default()).await.unwrap();
    let with_details = orders
        .find_with_details(listed[0].order_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(with_details.details.len(), 2);
    let line_sum: Decimal = with_details.details.iter().map(|d| d.line_total()).sum();
    assert_eq!(with_details.order.total_amount.round_dp(2), line_sum.round_dp(2));

    let reviews = SeaOrmReviewRepository::new(db.clone());
    assert_eq!(reviews.count(ReviewFilter::default()).await.unwrap(), 1);
}

#[tokio::test]
async fn customer_accounts() {
    let db = setup_test_db().await;

    let customer = customer_service::register(&db, "reader@example.com", "s3cret")
        .await
        .unwrap();
    assert_ne!(customer.password, "s3cret");

    let err = customer_service::register(&db, "reader@example.com", "other")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::UniqueViolation(_)), "{err}");

    let err = customer_service::register(&db, "not-an-email", "pw12")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    let authed = customer_service::authenticate(&db, "reader@example.com", "s3cret")
        .await
        .unwrap();
    assert_eq!(authed.customer_id, customer.customer_id);

    assert!(matches!(
        customer_service::authenticate(&db, "reader@example.com", "wrong").await,
        Err(DomainError::Validation(_))
    ));
    assert!(matches!(
        customer_service::authenticate(&db, "nobody@example.com", "s3cret").await,
        Err(DomainError::NotFound)
    ));

    customer_service::change_password(&db, customer.customer_id, "s3cret", "n3w-pass")
        .await
        .unwrap();
    customer_service::authenticate(&db, "reader@example.com", "n3w-pass")
        .await
        .unwrap();
}

#[tokio::test]
async fn customer_lookup_and_review_guardrails() {
    let db = setup_test_db().await;
    let ids = create_reference_rows(&db).await;
    let books = SeaOrmBookRepository::new(db.clone());
    let customers = SeaOrmCustomerRepository::new(db.clone());
    let reviews = SeaOrmReviewRepository::new(db.clone());

    let book = books
        .create(new_book("Dune", "isbn-1", 1299, ids))
        .await
        .unwrap();
    let customer = customer_service::register(&db, "reader@example.com", "s3cret")
        .await
        .unwrap();

    let found = customers
        .find_by_email("reader@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.customer_id, customer.customer_id);
    assert!(customers.find_by_email("nobody@example.com").await.unwrap().is_none());

    let review = review_service::add_review(
        &db,
        ReviewInput {
            book_id: book.book_id,
            customer_id: customer.customer_id,
            rating: 4,
            comment: Some("Slow start, great finish".to_string()),
        },
    )
    .await
    .unwrap();

    // Out-of-range rating is rejected on update as well
    let err = reviews
        .update(
            review.review_id,
            ReviewUpdate {
                rating: Some(6),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    let updated = reviews
        .update(
            review.review_id,
            ReviewUpdate {
                rating: Some(5),
                comment: Some(None),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.rating, 5);
    assert_eq!(updated.comment, None);
}

#[tokio::test]
async fn rating_stats_per_book() {
    let db = setup_test_db().await;
    let ids = create_reference_rows(&db).await;
    let books = SeaOrmBookRepository::new(db.clone());

    let rated = books
        .create(new_book("Dune", "isbn-1", 1299, ids))
        .await
        .unwrap();
    let unrated = books
        .create(new_book("Messiah", "isbn-2", 999, ids))
        .await
        .unwrap();

    // No reviews yet
    let empty = review_service::rating_stats(&db, unrated.book_id)
        .await
        .unwrap();
    assert_eq!(empty.count, 0);
    assert_eq!(empty.average, None);
    assert_eq!(empty.min, None);
    assert_eq!(empty.max, None);

    let alice = customer_service::register(&db, "alice@example.com", "s3cret")
        .await
        .unwrap();
    let bob = customer_service::register(&db, "bob@example.com", "s3cret")
        .await
        .unwrap();
    for (customer_id, rating) in [(alice.customer_id, 5), (bob.customer_id, 2)] {
        review_service::add_review(
            &db,
            ReviewInput {
                book_id: rated.book_id,
                customer_id,
                rating,
                comment: None,
            },
        )
        .await
        .unwrap();
    }

    let stats = review_service::rating_stats(&db, rated.book_id).await.unwrap();
    assert_eq!(stats.count, 2);
    assert_eq!(stats.average, Some(3.5));
    assert_eq!(stats.min, Some(2));
    assert_eq!(stats.max, Some(5));

    // The other book stays untouched
    let still_empty = review_service::rating_stats(&db, unrated.book_id)
        .await
        .unwrap();
    assert_eq!(still_empty.count, 0);
}
