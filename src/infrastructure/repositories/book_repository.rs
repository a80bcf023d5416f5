//! SeaORM implementation of BookRepository

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Select, Set, TransactionTrait,
};

use crate::domain::{
    BookFilter, BookRepository, BookUpdate, DomainError, NewBook, PaginatedBooks, PriceStats,
};
use crate::models::book::{ActiveModel, BookDetails, Column, Entity as BookEntity};
use crate::models::{author, genre, publisher};

/// SeaORM-based implementation of BookRepository
pub struct SeaOrmBookRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Attach author/genre/publisher names to a page of books with three
    /// batched lookups instead of one query per row.
    async fn enrich(&self, books: Vec<crate::models::book::Model>) -> Result<Vec<BookDetails>, DomainError> {
        let author_ids: Vec<i32> = books.iter().map(|b| b.author_id).collect();
        let genre_ids: Vec<i32> = books.iter().map(|b| b.genre_id).collect();
        let publisher_ids: Vec<i32> = books.iter().map(|b| b.publisher_id).collect();

        let mut authors: HashMap<i32, String> = HashMap::new();
        let mut genres: HashMap<i32, String> = HashMap::new();
        let mut publishers: HashMap<i32, String> = HashMap::new();

        if !books.is_empty() {
            for a in author::Entity::find()
                .filter(author::Column::AuthorId.is_in(author_ids))
                .all(&self.db)
                .await?
            {
                authors.insert(a.author_id, a.full_name());
            }
            for g in genre::Entity::find()
                .filter(genre::Column::GenreId.is_in(genre_ids))
                .all(&self.db)
                .await?
            {
                genres.insert(g.genre_id, g.name);
            }
            for p in publisher::Entity::find()
                .filter(publisher::Column::PublisherId.is_in(publisher_ids))
                .all(&self.db)
                .await?
            {
                publishers.insert(p.publisher_id, p.publisher_name);
            }
        }

        Ok(books
            .into_iter()
            .map(|model| {
                let author_name = authors.get(&model.author_id).cloned();
                let genre_name = genres.get(&model.genre_id).cloned();
                let publisher_name = publishers.get(&model.publisher_id).cloned();
                let mut dto = BookDetails::from(model);
                dto.author = author_name;
                dto.genre = genre_name;
                dto.publisher = publisher_name;
                dto
            })
            .collect())
    }

    async fn enrich_one(
        &self,
        model: crate::models::book::Model,
    ) -> Result<BookDetails, DomainError> {
        let author = model.find_related(author::Entity).one(&self.db).await?;
        let genre = model.find_related(genre::Entity).one(&self.db).await?;
        let publisher = model.find_related(publisher::Entity).one(&self.db).await?;

        let mut dto = BookDetails::from(model);
        dto.author = author.map(|a| a.full_name());
        dto.genre = genre.map(|g| g.name);
        dto.publisher = publisher.map(|p| p.publisher_name);
        Ok(dto)
    }
}

/// Translate a BookFilter into a SeaORM condition usable for selects,
/// bulk updates and bulk deletes alike.
fn filter_condition(filter: &BookFilter) -> Condition {
    let mut cond = Condition::all();

    if let Some(title) = &filter.title
        && !title.is_empty()
    {
        cond = cond.add(Column::Title.contains(title));
    }

    if let Some(author_id) = filter.author_id {
        cond = cond.add(Column::AuthorId.eq(author_id));
    }

    if let Some(genre_id) = filter.genre_id {
        cond = cond.add(Column::GenreId.eq(genre_id));
    }

    if let Some(publisher_id) = filter.publisher_id {
        cond = cond.add(Column::PublisherId.eq(publisher_id));
    }

    if let Some(min) = filter.min_price {
        cond = cond.add(Column::Price.gte(min));
    }

    if let Some(max) = filter.max_price {
        cond = cond.add(Column::Price.lte(max));
    }

    if let Some(q) = &filter.query
        && !q.is_empty()
    {
        let any = Condition::any()
            .add(Column::Title.contains(q))
            .add(Column::Isbn.contains(q))
            .add(Column::Description.contains(q));
        cond = cond.add(any);
    }

    cond
}

fn apply_sort(query: Select<BookEntity>, sort: Option<&str>) -> Select<BookEntity> {
    match sort {
        Some("title_asc") => query.order_by_asc(Column::Title),
        Some("title_desc") => query.order_by_desc(Column::Title),
        Some("price_asc") => query.order_by_asc(Column::Price),
        Some("price_desc") => query.order_by_desc(Column::Price),
        Some("recent") => query.order_by_desc(Column::PublishDate),
        _ => query.order_by_asc(Column::BookId),
    }
}

fn active_model_from(book: NewBook) -> ActiveModel {
    ActiveModel {
        title: Set(book.title),
        description: Set(book.description),
        price: Set(book.price),
        publish_date: Set(book.publish_date),
        isbn: Set(book.isbn),
        author_id: Set(book.author_id),
        genre_id: Set(book.genre_id),
        publisher_id: Set(book.publisher_id),
        ..Default::default()
    }
}

#[async_trait]
impl BookRepository for SeaOrmBookRepository {
    async fn find_all(&self, filter: BookFilter) -> Result<PaginatedBooks, DomainError> {
        let query = apply_sort(
            BookEntity::find().filter(filter_condition(&filter)),
            filter.sort.as_deref(),
        );

        // Fetch with pagination and total count
        let (books, total) = if let Some(limit) = filter.limit {
            let page = filter.page.unwrap_or(0);
            let paginator = query.paginate(&self.db, limit);
            let total = paginator.num_items().await?;
            let items = paginator.fetch_page(page).await?;
            (items, total)
        } else {
            let items = query.all(&self.db).await?;
            let total = items.len() as u64;
            (items, total)
        };

        let books = self.enrich(books).await?;
        Ok(PaginatedBooks { books, total })
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<BookDetails>, DomainError> {
        match BookEntity::find_by_id(id).one(&self.db).await? {
            Some(model) => Ok(Some(self.enrich_one(model).await?)),
            None => Ok(None),
        }
    }

    async fn get(&self, id: i32) -> Result<BookDetails, DomainError> {
        self.find_by_id(id).await?.ok_or(DomainError::NotFound)
    }

    async fn find_by_isbn(&self, isbn: &str) -> Result<Option<BookDetails>, DomainError> {
        match BookEntity::find()
            .filter(Column::Isbn.eq(isbn))
            .one(&self.db)
            .await?
        {
            Some(model) => Ok(Some(self.enrich_one(model).await?)),
            None => Ok(None),
        }
    }

    async fn find_first(&self, filter: BookFilter) -> Result<Option<BookDetails>, DomainError> {
        let query = apply_sort(
            BookEntity::find().filter(filter_condition(&filter)),
            filter.sort.as_deref(),
        );
        match query.one(&self.db).await? {
            Some(model) => Ok(Some(self.enrich_one(model).await?)),
            None => Ok(None),
        }
    }

    async fn create(&self, book: NewBook) -> Result<BookDetails, DomainError> {
        let result = active_model_from(book).insert(&self.db).await?;
        self.enrich_one(result).await
    }

    async fn create_many(&self, books: Vec<NewBook>) -> Result<u64, DomainError> {
        if books.is_empty() {
            return Ok(0);
        }
        let models = books.into_iter().map(active_model_from);
        let inserted = BookEntity::insert_many(models)
            .exec_without_returning(&self.db)
            .await?;
        Ok(inserted)
    }

    async fn create_many_and_return(
        &self,
        books: Vec<NewBook>,
    ) -> Result<Vec<BookDetails>, DomainError> {
        // Row-by-row inside one transaction: SeaORM's insert_many only
        // reports the last insert id, and we owe the caller the rows.
        let txn = self.db.begin().await?;
        let mut inserted = Vec::with_capacity(books.len());
        for book in books {
            let model = active_model_from(book).insert(&txn).await?;
            inserted.push(model);
        }
        txn.commit().await?;

        self.enrich(inserted).await
    }

    async fn update(&self, id: i32, changes: BookUpdate) -> Result<BookDetails, DomainError> {
        let existing = BookEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }
        if let Some(price) = changes.price {
            active.price = Set(price);
        }
        if let Some(publish_date) = changes.publish_date {
            active.publish_date = Set(publish_date);
        }
        if let Some(isbn) = changes.isbn {
            active.isbn = Set(isbn);
        }
        if let Some(author_id) = changes.author_id {
            active.author_id = Set(author_id);
        }
        if let Some(genre_id) = changes.genre_id {
            active.genre_id = Set(genre_id);
        }
        if let Some(publisher_id) = changes.publisher_id {
            active.publisher_id = Set(publisher_id);
        }

        let result = active.update(&self.db).await?;
        self.enrich_one(result).await
    }

    async fn update_many(
        &self,
        filter: BookFilter,
        changes: BookUpdate,
    ) -> Result<u64, DomainError> {
        let mut update = BookEntity::update_many().filter(filter_condition(&filter));
        let mut touched = false;

        if let Some(title) = changes.title {
            update = update.col_expr(Column::Title, Expr::value(title));
            touched = true;
        }
        if let Some(description) = changes.description {
            update = update.col_expr(Column::Description, Expr::value(description));
            touched = true;
        }
        if let Some(price) = changes.price {
            update = update.col_expr(Column::Price, Expr::value(price));
            touched = true;
        }
        if let Some(publish_date) = changes.publish_date {
            update = update.col_expr(Column::PublishDate, Expr::value(publish_date));
            touched = true;
        }
        if let Some(author_id) = changes.author_id {
            update = update.col_expr(Column::AuthorId, Expr::value(author_id));
            touched = true;
        }
        if let Some(genre_id) = changes.genre_id {
            update = update.col_expr(Column::GenreId, Expr::value(genre_id));
            touched = true;
        }
        if let Some(publisher_id) = changes.publisher_id {
            update = update.col_expr(Column::PublisherId, Expr::value(publisher_id));
            touched = true;
        }
        // An isbn is unique per row, bulk-assigning one would only ever
        // succeed for a single-row filter; reject it outright.
        if changes.isbn.is_some() {
            return Err(DomainError::Validation(
                "isbn cannot be set in a bulk update".to_string(),
            ));
        }

        if !touched {
            return Ok(0);
        }

        let result = update.exec(&self.db).await?;
        Ok(result.rows_affected)
    }

    async fn upsert_by_isbn(&self, book: NewBook) -> Result<BookDetails, DomainError> {
        let isbn = book.isbn.clone();

        let conflict = OnConflict::column(Column::Isbn)
            .update_columns([
                Column::Title,
                Column::Description,
                Column::Price,
                Column::PublishDate,
                Column::AuthorId,
                Column::GenreId,
                Column::PublisherId,
            ])
            .to_owned();

        BookEntity::insert(active_model_from(book))
            .on_conflict(conflict)
            .exec(&self.db)
            .await?;

        self.find_by_isbn(&isbn)
            .await?
            .ok_or_else(|| DomainError::Internal("upserted book vanished".to_string()))
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = BookEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }

    async fn delete_many(&self, filter: BookFilter) -> Result<u64, DomainError> {
        let result = BookEntity::delete_many()
            .filter(filter_condition(&filter))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }

    async fn count(&self, filter: BookFilter) -> Result<u64, DomainError> {
        let count = BookEntity::find()
            .filter(filter_condition(&filter))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    async fn price_stats(&self, filter: BookFilter) -> Result<PriceStats, DomainError> {
        let books = BookEntity::find()
            .filter(filter_condition(&filter))
            .all(&self.db)
            .await?;

        let count = books.len() as u64;
        let sum: rust_decimal::Decimal = books.iter().map(|b| b.price).sum();
        let min = books.iter().map(|b| b.price).min();
        let max = books.iter().map(|b| b.price).max();
        let avg = if count == 0 {
            None
        } else {
            Some(sum / rust_decimal::Decimal::from(count))
        };

        Ok(PriceStats {
            count,
            min,
            max,
            sum,
            avg,
        })
    }
}
