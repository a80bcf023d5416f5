//! Customer Service - Registration and authentication
//!
//! Passwords are argon2-hashed before they touch the database; the unique
//! email constraint surfaces as `DomainError::UniqueViolation`.

use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::auth::{hash_password, verify_password};
use crate::domain::DomainError;
use crate::models::customer;

/// Register a new customer account.
pub async fn register(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
) -> Result<customer::Model, DomainError> {
    if email.trim().is_empty() || !email.contains('@') {
        return Err(DomainError::Validation(format!(
            "not a valid email address: {:?}",
            email
        )));
    }
    if password.len() < 4 {
        return Err(DomainError::Validation(
            "password too short".to_string(),
        ));
    }

    let now = chrono::Utc::now().to_rfc3339();
    let new_customer = customer::ActiveModel {
        email: Set(email.to_owned()),
        password: Set(hash_password(password)?),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    let saved = new_customer.insert(db).await?;
    tracing::info!(customer_id = saved.customer_id, "Customer registered");
    Ok(saved)
}

/// Verify credentials, returning the customer on success.
pub async fn authenticate(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
) -> Result<customer::Model, DomainError> {
    let customer = customer::Entity::find()
        .filter(customer::Column::Email.eq(email))
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)?;

    if verify_password(password, &customer.password)? {
        Ok(customer)
    } else {
        Err(DomainError::Validation("invalid credentials".to_string()))
    }
}

/// Change a customer's password after checking the current one.
pub async fn change_password(
    db: &DatabaseConnection,
    customer_id: i32,
    current: &str,
    new_password: &str,
) -> Result<(), DomainError> {
    let customer = customer::Entity::find_by_id(customer_id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)?;

    if !verify_password(current, &customer.password)? {
        return Err(DomainError::Validation("invalid credentials".to_string()));
    }
    if new_password.len() < 4 {
        return Err(DomainError::Validation("password too short".to_string()));
    }

    let mut active: customer::ActiveModel = customer.into();
    active.password = Set(hash_password(new_password)?);
    active.updated_at = Set(chrono::Utc::now().to_rfc3339());
    active.update(db).await?;

    Ok(())
}
