//! Customer business logic - Registration, contact edits and per-customer reports.
//!
//! Customers are always addressed by email from the menu, so every lookup here starts
//! from the email and fails with `Error::CustomerNotFound` when nobody is registered
//! under it.

use crate::{
    core::payment,
    entities::{Customer, Rental, RentalBike, customer, rental, rental_bike},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use std::str::FromStr;
use tracing::info;

/// Customer column that can be edited from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerField {
    /// Full name
    Name,
    /// Email address
    Email,
    /// Phone number
    Phone,
}

impl FromStr for CustomerField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NAME" => Ok(Self::Name),
            "EMAIL" => Ok(Self::Email),
            "PHONE" => Ok(Self::Phone),
            other => Err(Error::invalid_input(format!(
                "'{other}' is not a customer field (expected Name, Email or Phone)"
            ))),
        }
    }
}

/// A customer together with their rentals and the bikes on each rental.
#[derive(Debug, Clone)]
pub struct CustomerHistory {
    /// The customer
    pub customer: customer::Model,
    /// Rentals, newest first
    pub rentals: Vec<rental::Model>,
    /// Bike links of those rentals
    pub rental_bikes: Vec<rental_bike::Model>,
}

/// A customer together with their payments.
#[derive(Debug, Clone)]
pub struct CustomerPayments {
    /// The customer
    pub customer: customer::Model,
    /// Payments, newest first
    pub payments: Vec<crate::entities::payment::Model>,
}

/// Registers a new customer.
///
/// # Errors
/// Returns an error if:
/// - The name or email is empty or whitespace-only
/// - The email is already registered (constraint violation)
/// - The database insert fails
pub async fn register_customer(
    db: &DatabaseConnection,
    name: String,
    email: String,
    phone: String,
) -> Result<customer::Model> {
    if name.trim().is_empty() {
        return Err(Error::invalid_input("Customer name cannot be empty"));
    }
    if email.trim().is_empty() {
        return Err(Error::invalid_input("Customer email cannot be empty"));
    }

    let customer = customer::ActiveModel {
        name: Set(name.trim().to_string()),
        email: Set(email.trim().to_string()),
        phone: Set(phone.trim().to_string()),
        ..Default::default()
    };
    let result = customer.insert(db).await?;
    info!("Registered customer {} <{}>", result.id, result.email);
    Ok(result)
}

/// Finds a customer by email.
pub async fn get_customer_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<customer::Model>> {
    Customer::find()
        .filter(customer::Column::Email.eq(email.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

async fn require_customer(db: &DatabaseConnection, email: &str) -> Result<customer::Model> {
    get_customer_by_email(db, email)
        .await?
        .ok_or_else(|| Error::CustomerNotFound {
            email: email.trim().to_string(),
        })
}

/// Changes one field of the customer registered under `current_email`.
///
/// # Errors
/// Returns an error if:
/// - The new name or email is blank
/// - No customer has `current_email`
/// - The new email belongs to another customer (constraint violation)
pub async fn update_customer_field(
    db: &DatabaseConnection,
    current_email: &str,
    field: CustomerField,
    value: String,
) -> Result<customer::Model> {
    let value = value.trim().to_string();
    if value.is_empty() && field != CustomerField::Phone {
        return Err(Error::invalid_input("Customer name and email cannot be empty"));
    }

    let existing = require_customer(db, current_email).await?;
    let mut customer: customer::ActiveModel = existing.into();
    match field {
        CustomerField::Name => customer.name = Set(value),
        CustomerField::Email => customer.email = Set(value),
        CustomerField::Phone => customer.phone = Set(value),
    }

    let result = customer.update(db).await?;
    info!("Updated {field:?} of customer {}", result.id);
    Ok(result)
}

/// Returns the customer's rentals (newest first) and the bikes on each of them.
///
/// # Errors
/// Returns `Error::CustomerNotFound` if no customer has this email.
pub async fn rental_history(db: &DatabaseConnection, email: &str) -> Result<CustomerHistory> {
    let customer = require_customer(db, email).await?;

    let rentals = Rental::find()
        .filter(rental::Column::CustomerId.eq(customer.id))
        .order_by_desc(rental::Column::StartDate)
        .all(db)
        .await?;

    let rental_bikes = RentalBike::find()
        .filter(rental_bike::Column::RentalId.is_in(rentals.iter().map(|r| r.id)))
        .order_by_asc(rental_bike::Column::RentalId)
        .order_by_asc(rental_bike::Column::BikeId)
        .all(db)
        .await?;

    Ok(CustomerHistory {
        customer,
        rentals,
        rental_bikes,
    })
}

/// Returns the customer's rental with the latest start, if any.
///
/// # Errors
/// Returns `Error::CustomerNotFound` if no customer has this email.
pub async fn most_recent_rental(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<rental::Model>> {
    let customer = require_customer(db, email).await?;

    Rental::find()
        .filter(rental::Column::CustomerId.eq(customer.id))
        .order_by_desc(rental::Column::StartDate)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Returns the customer and every payment they made.
///
/// # Errors
/// Returns `Error::CustomerNotFound` if no customer has this email.
pub async fn customer_payments(db: &DatabaseConnection, email: &str) -> Result<CustomerPayments> {
    let customer = require_customer(db, email).await?;
    let payments = payment::payments_for_customer(db, customer.id).await?;
    Ok(CustomerPayments { customer, payments })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[test]
    fn test_customer_field_parse() {
        assert_eq!("name".parse::<CustomerField>().unwrap(), CustomerField::Name);
        assert_eq!(" EMAIL ".parse::<CustomerField>().unwrap(), CustomerField::Email);
        assert_eq!("Phone".parse::<CustomerField>().unwrap(), CustomerField::Phone);
        assert!(matches!(
            "address".parse::<CustomerField>(),
            Err(Error::InvalidInput { message: _ })
        ));
    }

    #[tokio::test]
    async fn test_register_customer_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result =
            register_customer(&db, " ".to_string(), "a@b.c".to_string(), String::new()).await;
        assert!(matches!(result, Err(Error::InvalidInput { message: _ })));

        let result =
            register_customer(&db, "Ann".to_string(), String::new(), String::new()).await;
        assert!(matches!(result, Err(Error::InvalidInput { message: _ })));

        Ok(())
    }

    #[tokio::test]
    async fn test_register_customer_integration() -> Result<()> {
        let db = setup_test_db().await?;

        let customer = register_customer(
            &db,
            " Ann Lee ".to_string(),
            "ann@example.com".to_string(),
            "555-0100".to_string(),
        )
        .await?;
        assert_eq!(customer.name, "Ann Lee");

        let found = get_customer_by_email(&db, "ann@example.com").await?;
        assert_eq!(found, Some(customer));

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_email_is_constraint_violation() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_customer(&db, "dup@example.com").await?;

        let result = create_test_customer(&db, "dup@example.com").await;
        assert!(matches!(
            result,
            Err(Error::ConstraintViolation { message: _ })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_customer_field() -> Result<()> {
        let db = setup_test_db().await?;
        let customer = create_test_customer(&db, "old@example.com").await?;

        let updated = update_customer_field(
            &db,
            "old@example.com",
            CustomerField::Email,
            "new@example.com".to_string(),
        )
        .await?;
        assert_eq!(updated.id, customer.id);
        assert_eq!(updated.email, "new@example.com");
        assert_eq!(updated.name, customer.name);

        let updated = update_customer_field(
            &db,
            "new@example.com",
            CustomerField::Phone,
            "555-0199".to_string(),
        )
        .await?;
        assert_eq!(updated.phone, "555-0199");

        let result = update_customer_field(
            &db,
            "old@example.com",
            CustomerField::Name,
            "Nobody".to_string(),
        )
        .await;
        assert!(matches!(result, Err(Error::CustomerNotFound { email: _ })));

        Ok(())
    }

    #[tokio::test]
    async fn test_rental_history_and_most_recent() -> Result<()> {
        let shop = setup_shop().await?;
        let older = book_test_rental(&shop, "2024-01-01 10:00", "2024-01-01 11:00").await?;
        let newer = book_test_rental(&shop, "2024-02-01 10:00", "2024-02-01 11:00").await?;

        let history = rental_history(&shop.db, &shop.customer.email).await?;
        assert_eq!(history.customer, shop.customer);
        assert_eq!(history.rentals, vec![newer.clone(), older.clone()]);
        assert_eq!(history.rental_bikes.len(), 2);
        assert!(history
            .rental_bikes
            .iter()
            .all(|link| link.bike_id == shop.bike.id));

        let latest = most_recent_rental(&shop.db, &shop.customer.email).await?;
        assert_eq!(latest, Some(newer));

        Ok(())
    }

    #[tokio::test]
    async fn test_reports_for_customer_without_rentals() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_customer(&db, "quiet@example.com").await?;

        let history = rental_history(&db, "quiet@example.com").await?;
        assert!(history.rentals.is_empty());
        assert!(history.rental_bikes.is_empty());
        assert_eq!(most_recent_rental(&db, "quiet@example.com").await?, None);
        assert!(customer_payments(&db, "quiet@example.com").await?.payments.is_empty());

        let result = customer_payments(&db, "ghost@example.com").await;
        assert!(matches!(result, Err(Error::CustomerNotFound { email: _ })));

        Ok(())
    }
}
