pub mod auth;
pub mod client;
pub mod config;
pub mod db;
pub mod domain;
pub mod infrastructure;
pub mod models;
pub mod schema;
pub mod seed;
pub mod services;

pub use client::{BookstoreClient, TransactionOptions};
pub use config::Config;
pub use domain::DomainError;

/// Initialize stderr tracing with an env-filter override. Intended for
/// binaries and examples embedding the crate; tests and libraries should
/// install their own subscriber.
pub fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookstore=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
