use rust_decimal::Decimal;
use sea_orm::*;

use crate::auth::hash_password;
use crate::models::{author, book, customer, genre, order, order_detail, publisher, review};

/// Insert, ignoring rows already present (idempotent re-seed).
async fn insert_ignoring_conflict<A>(
    db: &DatabaseConnection,
    insert: Insert<A>,
    conflict_column: impl sea_query::IntoIden,
) -> Result<(), DbErr>
where
    A: ActiveModelTrait,
{
    let result = insert
        .on_conflict(
            sea_query::OnConflict::column(conflict_column)
                .do_nothing()
                .to_owned(),
        )
        .exec(db)
        .await;

    match result {
        Ok(_) | Err(DbErr::RecordNotInserted) => Ok(()),
        Err(e) => Err(e),
    }
}

pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    let now = chrono::Utc::now().to_rfc3339();

    // 1. Authors (only on a fresh database, they carry no unique column)
    if author::Entity::find().count(db).await? == 0 {
        let authors = vec![
            ("Frank", "Herbert", Some("Author of the Dune saga")),
            ("Ursula K.", "Le Guin", None),
            ("Umberto", "Eco", Some("Italian novelist and semiotician")),
        ];

        for (first_name, last_name, bio) in authors {
            let author = author::ActiveModel {
                first_name: Set(first_name.to_owned()),
                last_name: Set(last_name.to_owned()),
                bio: Set(bio.map(str::to_owned)),
                ..Default::default()
            };
            author.insert(db).await?;
        }
    }

    // 2. Genres (name is unique, re-seeding must not fail)
    let genres = vec![
        ("Science Fiction", Some("Speculative futures")),
        ("Fantasy", None),
        ("Historical Fiction", None),
    ];

    for (name, description) in genres {
        let genre = genre::ActiveModel {
            name: Set(name.to_owned()),
            description: Set(description.map(str::to_owned)),
            ..Default::default()
        };
        insert_ignoring_conflict(db, genre::Entity::insert(genre), genre::Column::Name).await?;
    }

    // 3. Publisher
    if publisher::Entity::find().count(db).await? == 0 {
        let publisher = publisher::ActiveModel {
            publisher_name: Set("Ace Books".to_owned()),
            contact_name: Set(Some("Rights department".to_owned())),
            phone_number: Set("+1-212-555-0100".to_owned()),
            ..Default::default()
        };
        publisher.insert(db).await?;
    }

    // 4. Books (isbn is unique, same strategy as genres)
    let books = vec![
        ("Dune", "9780441172719", "12.99", "1965-08-01", 1, 1, 1),
        (
            "The Left Hand of Darkness",
            "9780441478125",
            "9.99",
            "1969-03-01",
            2,
            1,
            1,
        ),
        (
            "The Name of the Rose",
            "9780156001311",
            "15.50",
            "1980-09-01",
            3,
            3,
            1,
        ),
    ];

    for (title, isbn, price, publish_date, author_id, genre_id, publisher_id) in books {
        let book = book::ActiveModel {
            title: Set(title.to_owned()),
            description: Set(None),
            price: Set(price.parse::<Decimal>().unwrap_or_default()),
            publish_date: Set(publish_date.to_owned()),
            isbn: Set(isbn.to_owned()),
            author_id: Set(author_id),
            genre_id: Set(genre_id),
            publisher_id: Set(publisher_id),
            ..Default::default()
        };
        insert_ignoring_conflict(db, book::Entity::insert(book), book::Column::Isbn).await?;
    }

    // 5. Demo customer
    let password = hash_password("reader").unwrap_or_default();
    let demo_customer = customer::ActiveModel {
        email: Set("reader@example.com".to_owned()),
        password: Set(password),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    insert_ignoring_conflict(
        db,
        customer::Entity::insert(demo_customer),
        customer::Column::Email,
    )
    .await?;

    let reader = customer::Entity::find()
        .filter(customer::Column::Email.eq("reader@example.com"))
        .one(db)
        .await?
        .ok_or_else(|| DbErr::Custom("seed customer missing".to_owned()))?;
    let dune = book::Entity::find()
        .filter(book::Column::Isbn.eq("9780441172719"))
        .one(db)
        .await?
        .ok_or_else(|| DbErr::Custom("seed book missing".to_owned()))?;
    let rose = book::Entity::find()
        .filter(book::Column::Isbn.eq("9780156001311"))
        .one(db)
        .await?
        .ok_or_else(|| DbErr::Custom("seed book missing".to_owned()))?;

    // 6. One demo order with its lines (only on a fresh database,
    //    orders carry no unique column)
    if order::Entity::find().count(db).await? == 0 {
        let lines = [(&dune, 2), (&rose, 1)];
        let total: Decimal = lines
            .iter()
            .map(|(b, qty)| b.price * Decimal::from(*qty))
            .sum();

        let demo_order = order::ActiveModel {
            customer_id: Set(reader.customer_id),
            order_date: Set(chrono::Utc::now().format("%Y-%m-%d").to_string()),
            total_amount: Set(total),
            ..Default::default()
        }
        .insert(db)
        .await?;

        for (b, quantity) in lines {
            order_detail::ActiveModel {
                order_id: Set(demo_order.order_id),
                book_id: Set(b.book_id),
                quantity: Set(quantity),
                price_per_item: Set(b.price),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }
    }

    // 7. A review from the demo customer
    if review::Entity::find().count(db).await? == 0 {
        let stamp = chrono::Utc::now().to_rfc3339();
        review::ActiveModel {
            book_id: Set(dune.book_id),
            customer_id: Set(reader.customer_id),
            rating: Set(5),
            comment: Set(Some("A masterpiece of world-building".to_owned())),
            created_at: Set(stamp.clone()),
            updated_at: Set(stamp),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    tracing::info!("Demo data seeded");
    Ok(())
}
