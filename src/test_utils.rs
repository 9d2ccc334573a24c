//! Shared test utilities for the bike rental shop.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

#![allow(clippy::unwrap_used)]

use crate::{
    core::{bike, bike::BikeCategory, customer, employee, rental},
    entities,
    errors::Result,
};
use chrono::NaiveDateTime;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Parses a `YYYY-MM-DD HH:MM` literal, panicking on typos in the test itself.
#[must_use]
pub fn timestamp(value: &str) -> NaiveDateTime {
    rental::parse_timestamp(value).unwrap()
}

/// Registers a test customer under `email`.
///
/// # Defaults
/// * `name`: "Test Customer"
/// * `phone`: "555-0100"
pub async fn create_test_customer(
    db: &DatabaseConnection,
    email: &str,
) -> Result<entities::customer::Model> {
    customer::register_customer(
        db,
        "Test Customer".to_string(),
        email.to_string(),
        "555-0100".to_string(),
    )
    .await
}

/// Adds a test employee named "Test Employee" working the front desk.
pub async fn create_test_employee(db: &DatabaseConnection) -> Result<entities::employee::Model> {
    employee::add_employee(db, "Test Employee".to_string(), "Front Desk".to_string()).await
}

/// Allocates a test bike of the given category with model "Test Model".
pub async fn create_test_bike(
    db: &DatabaseConnection,
    category: BikeCategory,
) -> Result<entities::bike::Model> {
    bike::allocate_bike(db, category, "Test Model".to_string()).await
}

/// A database holding one customer, one employee and one Adult bike (id 101).
pub struct TestShop {
    /// Database connection
    pub db: DatabaseConnection,
    /// Customer registered as `test@example.com`
    pub customer: entities::customer::Model,
    /// Front desk employee
    pub employee: entities::employee::Model,
    /// Adult bike at $10/h
    pub bike: entities::bike::Model,
}

/// Sets up a complete test environment with a customer, an employee and a bike.
pub async fn setup_shop() -> Result<TestShop> {
    let db = setup_test_db().await?;
    let customer = create_test_customer(&db, "test@example.com").await?;
    let employee = create_test_employee(&db).await?;
    let bike = create_test_bike(&db, BikeCategory::Adult).await?;
    Ok(TestShop {
        db,
        customer,
        employee,
        bike,
    })
}

/// Books the shop's bike for the shop's customer between two `YYYY-MM-DD HH:MM` times.
pub async fn book_test_rental(
    shop: &TestShop,
    start: &str,
    end: &str,
) -> Result<entities::rental::Model> {
    rental::book_rental(
        &shop.db,
        &shop.customer.email,
        start,
        end,
        shop.employee.id,
        &shop.bike.id.to_string(),
    )
    .await
}
