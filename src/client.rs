//! Bookstore client facade
//!
//! Wraps the SeaORM connection and exposes the cross-cutting surface:
//! connect/close, transactions (optionally with an isolation level),
//! parameterized raw SQL, and accessors for the per-entity repositories.

use std::future::Future;
use std::pin::Pin;

use sea_orm::{
    AccessMode, ConnectionTrait, DatabaseConnection, DatabaseTransaction, FromQueryResult,
    IsolationLevel, JsonValue, Statement, TransactionTrait, Value,
};

use crate::db;
use crate::domain::DomainError;
use crate::infrastructure::{
    SeaOrmAuthorRepository, SeaOrmBookRepository, SeaOrmCustomerRepository, SeaOrmGenreRepository,
    SeaOrmOrderRepository, SeaOrmPublisherRepository, SeaOrmReviewRepository,
};

/// Options for an explicit transaction. SQLite ignores isolation levels;
/// they are honored on backends that support them.
#[derive(Debug, Default, Clone)]
pub struct TransactionOptions {
    pub isolation_level: Option<IsolationLevel>,
    pub access_mode: Option<AccessMode>,
}

#[derive(Clone)]
pub struct BookstoreClient {
    conn: DatabaseConnection,
}

impl BookstoreClient {
    /// Connect to the store and run migrations.
    pub async fn connect(database_url: &str) -> Result<Self, DomainError> {
        tracing::info!("Connecting to {}", database_url);
        let conn = db::init_db(database_url).await?;
        Ok(Self { conn })
    }

    /// Connect using environment-driven configuration, seeding demo data
    /// when `SEED_DEMO_DATA` asks for it.
    pub async fn connect_from_env() -> Result<Self, DomainError> {
        let config = crate::config::Config::from_env();
        let client = Self::connect(&config.database_url).await?;
        if config.seed_demo_data {
            crate::seed::seed_demo_data(client.connection()).await?;
        }
        Ok(client)
    }

    /// Wrap an already-initialized connection (tests, shared pools).
    pub fn from_connection(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Close the underlying pool. Further use of clones of this client
    /// will fail.
    pub async fn close(self) -> Result<(), DomainError> {
        tracing::info!("Closing database connection");
        self.conn.close().await?;
        Ok(())
    }

    pub fn books(&self) -> SeaOrmBookRepository {
        SeaOrmBookRepository::new(self.conn.clone())
    }

    pub fn authors(&self) -> SeaOrmAuthorRepository {
        SeaOrmAuthorRepository::new(self.conn.clone())
    }

    pub fn genres(&self) -> SeaOrmGenreRepository {
        SeaOrmGenreRepository::new(self.conn.clone())
    }

    pub fn publishers(&self) -> SeaOrmPublisherRepository {
        SeaOrmPublisherRepository::new(self.conn.clone())
    }

    pub fn customers(&self) -> SeaOrmCustomerRepository {
        SeaOrmCustomerRepository::new(self.conn.clone())
    }

    pub fn orders(&self) -> SeaOrmOrderRepository {
        SeaOrmOrderRepository::new(self.conn.clone())
    }

    pub fn reviews(&self) -> SeaOrmReviewRepository {
        SeaOrmReviewRepository::new(self.conn.clone())
    }

    /// Run the callback inside a transaction, committing on Ok and rolling
    /// back on Err.
    pub async fn transaction<F, T>(&self, callback: F) -> Result<T, DomainError>
    where
        F: for<'c> FnOnce(
                &'c DatabaseTransaction,
            )
                -> Pin<Box<dyn Future<Output = Result<T, DomainError>> + Send + 'c>>
            + Send,
        T: Send,
    {
        let result = self.conn.transaction(callback).await?;
        Ok(result)
    }

    /// Like [`transaction`](Self::transaction), with explicit isolation
    /// level and access mode.
    pub async fn transaction_with_config<F, T>(
        &self,
        callback: F,
        options: TransactionOptions,
    ) -> Result<T, DomainError>
    where
        F: for<'c> FnOnce(
                &'c DatabaseTransaction,
            )
                -> Pin<Box<dyn Future<Output = Result<T, DomainError>> + Send + 'c>>
            + Send,
        T: Send,
    {
        let result = self
            .conn
            .transaction_with_config(callback, options.isolation_level, options.access_mode)
            .await?;
        Ok(result)
    }

    /// Run a parameterized SELECT, returning each row as a JSON object.
    pub async fn query_raw(
        &self,
        sql: &str,
        values: Vec<Value>,
    ) -> Result<Vec<JsonValue>, DomainError> {
        tracing::debug!(sql, "raw query");
        let stmt = Statement::from_sql_and_values(self.conn.get_database_backend(), sql, values);
        let rows = JsonValue::find_by_statement(stmt).all(&self.conn).await?;
        Ok(rows)
    }

    /// Run a parameterized statement, returning the number of affected rows.
    pub async fn execute_raw(&self, sql: &str, values: Vec<Value>) -> Result<u64, DomainError> {
        tracing::debug!(sql, "raw execute");
        let stmt = Statement::from_sql_and_values(self.conn.get_database_backend(), sql, values);
        let result = self.conn.execute(stmt).await?;
        Ok(result.rows_affected())
    }
}
