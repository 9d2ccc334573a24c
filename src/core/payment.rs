//! Payment business logic - Settling rentals.
//!
//! A payment always charges the rental's stored total cost to the rental's customer; the
//! operator only chooses the method and who took the money.

use crate::{
    entities::{Employee, Payment, Rental, payment, rental},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::info;

/// Records a payment for a rental and attaches it to the rental.
///
/// The payment insert and the rental update share one transaction, and the rental is
/// pointed at the id returned by the insert.
///
/// # Errors
/// Returns an error if:
/// - The payment method is empty or whitespace-only
/// - No rental has this id
/// - The rental already has a payment
/// - No employee has this id
/// - A database operation fails
pub async fn record_payment(
    db: &DatabaseConnection,
    rental_id: i64,
    method: String,
    employee_id: i64,
) -> Result<payment::Model> {
    if method.trim().is_empty() {
        return Err(Error::invalid_input("Payment method cannot be empty"));
    }

    let txn = db.begin().await?;

    let rental = Rental::find_by_id(rental_id)
        .one(&txn)
        .await?
        .ok_or(Error::RentalNotFound { id: rental_id })?;

    if let Some(payment_id) = rental.payment_id {
        return Err(Error::RentalAlreadyPaid {
            id: rental_id,
            payment_id,
        });
    }

    Employee::find_by_id(employee_id)
        .one(&txn)
        .await?
        .ok_or(Error::EmployeeNotFound { id: employee_id })?;

    let new_payment = payment::ActiveModel {
        method: Set(method.trim().to_string()),
        transaction_date: Set(chrono::Utc::now().naive_utc()),
        amount: Set(rental.total_cost),
        customer_id: Set(rental.customer_id),
        employee_id: Set(employee_id),
        ..Default::default()
    };
    let payment = new_payment.insert(&txn).await?;

    let mut paid_rental: rental::ActiveModel = rental.into();
    paid_rental.payment_id = Set(Some(payment.id));
    paid_rental.update(&txn).await?;

    txn.commit().await?;

    info!(
        "Recorded payment {} of ${:.2} for rental {rental_id}",
        payment.id, payment.amount
    );
    Ok(payment)
}

/// Returns the payment attached to a rental, or None if it is unpaid.
///
/// # Errors
/// Returns `Error::RentalNotFound` if no rental has this id.
pub async fn payment_for_rental(
    db: &DatabaseConnection,
    rental_id: i64,
) -> Result<Option<payment::Model>> {
    let rental = crate::core::rental::get_rental_by_id(db, rental_id)
        .await?
        .ok_or(Error::RentalNotFound { id: rental_id })?;

    match rental.payment_id {
        Some(payment_id) => Payment::find_by_id(payment_id)
            .one(db)
            .await
            .map_err(Into::into),
        None => Ok(None),
    }
}

/// Lists a customer's payments, newest first.
pub async fn payments_for_customer(
    db: &DatabaseConnection,
    customer_id: i64,
) -> Result<Vec<payment::Model>> {
    Payment::find()
        .filter(payment::Column::CustomerId.eq(customer_id))
        .order_by_desc(payment::Column::TransactionDate)
        .all(db)
        .await
        .map_err(Into::into)
}
