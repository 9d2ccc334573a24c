//! Rental business logic - Booking bikes and computing what the customer owes.
//!
//! A booking resolves the customer by email, checks the employee and every bike, derives
//! billable hours and total cost, and writes the rental with its bike links in a single
//! database transaction. The links reference the id returned by the rental insert.

use crate::{
    entities::{Bike, Customer, Employee, Rental, RentalBike, bike, customer, rental, rental_bike},
    errors::{Error, Result},
};
use chrono::NaiveDateTime;
use sea_orm::{Set, TransactionTrait, prelude::*};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Format accepted for every operator-entered timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

const SECONDS_PER_HOUR: u64 = 3600;

/// Billing figures derived for a booking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RentalQuote {
    /// Duration rounded up to whole hours
    pub billable_hours: i32,
    /// Billable hours times the summed hourly rates
    pub total_cost: f64,
}

/// Parses a `YYYY-MM-DD HH:MM` timestamp.
///
/// # Errors
/// Returns `Error::InvalidInput` for any other format.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT).map_err(|e| {
        Error::invalid_input(format!(
            "'{}' is not a timestamp of the form YYYY-MM-DD HH:MM ({e})",
            value.trim()
        ))
    })
}

/// Parses a comma-separated list of bike ids such as `"101, 102,305"`.
///
/// # Errors
/// Returns `Error::InvalidInput` if the list is empty, an entry is blank or not an
/// integer, or an id appears twice.
pub fn parse_bike_ids(value: &str) -> Result<Vec<i64>> {
    let mut seen = BTreeSet::new();
    let mut ids = Vec::new();

    for part in value.split(',') {
        let part = part.trim();
        if part.is_empty() {
            return Err(Error::invalid_input(format!(
                "Bike id list '{}' contains an empty entry",
                value.trim()
            )));
        }
        let id: i64 = part
            .parse()
            .map_err(|_| Error::invalid_input(format!("'{part}' is not a bike id")))?;
        if !seen.insert(id) {
            return Err(Error::invalid_input(format!("Bike {id} is listed twice")));
        }
        ids.push(id);
    }

    Ok(ids)
}

/// Rounds the length of `[start, end)` up to whole hours.
///
/// # Errors
/// Returns `Error::InvalidRange` if `end` is not after `start` or the duration does not
/// fit the billable hours column.
pub fn billable_hours(start: NaiveDateTime, end: NaiveDateTime) -> Result<i32> {
    let seconds = u64::try_from((end - start).num_seconds())
        .ok()
        .filter(|seconds| *seconds > 0)
        .ok_or(Error::InvalidRange { start, end })?;

    i32::try_from(seconds.div_ceil(SECONDS_PER_HOUR)).map_err(|_| Error::InvalidRange { start, end })
}

/// Computes billable hours and total cost for a set of hourly rates.
///
/// # Errors
/// Returns `Error::InvalidRange` if `end` is not after `start`.
pub fn quote(start: NaiveDateTime, end: NaiveDateTime, hourly_rates: &[f64]) -> Result<RentalQuote> {
    let billable_hours = billable_hours(start, end)?;
    let total_rate: f64 = hourly_rates.iter().sum();
    Ok(RentalQuote {
        billable_hours,
        total_cost: f64::from(billable_hours) * total_rate,
    })
}

/// Books a rental from operator-entered text.
///
/// `start` and `end` must be `YYYY-MM-DD HH:MM`; `bike_ids` is a comma-separated list.
/// See [`create_rental`] for the booking itself.
///
/// # Errors
/// Returns `Error::InvalidInput` for unparseable text, otherwise any error of
/// [`create_rental`].
pub async fn book_rental(
    db: &DatabaseConnection,
    customer_email: &str,
    start: &str,
    end: &str,
    employee_id: i64,
    bike_ids: &str,
) -> Result<rental::Model> {
    let start = parse_timestamp(start)?;
    let end = parse_timestamp(end)?;
    let bike_ids = parse_bike_ids(bike_ids)?;

    create_rental(db, customer_email, start, end, employee_id, &bike_ids).await
}

/// Creates a rental and one link per bike as a single atomic unit.
///
/// Either the rental row and all of its links are committed, or nothing is: every early
/// return drops the open transaction, which rolls it back.
///
/// # Errors
/// Returns an error if:
/// - `end` is not after `start`
/// - The bike list is empty
/// - No customer has this email
/// - No employee has this id
/// - Any bike id does not exist
/// - A database operation fails
pub async fn create_rental(
    db: &DatabaseConnection,
    customer_email: &str,
    start: NaiveDateTime,
    end: NaiveDateTime,
    employee_id: i64,
    bike_ids: &[i64],
) -> Result<rental::Model> {
    if end <= start {
        return Err(Error::InvalidRange { start, end });
    }
    if bike_ids.is_empty() {
        return Err(Error::invalid_input("A rental needs at least one bike"));
    }

    let txn = db.begin().await?;

    let customer = Customer::find()
        .filter(customer::Column::Email.eq(customer_email.trim()))
        .one(&txn)
        .await?
        .ok_or_else(|| Error::CustomerNotFound {
            email: customer_email.trim().to_string(),
        })?;

    let employee = Employee::find_by_id(employee_id)
        .one(&txn)
        .await?
        .ok_or(Error::EmployeeNotFound { id: employee_id })?;

    let bikes = Bike::find()
        .filter(bike::Column::Id.is_in(bike_ids.iter().copied()))
        .all(&txn)
        .await?;

    let missing: Vec<i64> = bike_ids
        .iter()
        .copied()
        .filter(|id| !bikes.iter().any(|bike| bike.id == *id))
        .collect();
    if !missing.is_empty() {
        return Err(Error::BikesNotFound { ids: missing });
    }

    let rates: Vec<f64> = bikes.iter().map(|bike| bike.hourly_rate).collect();
    let RentalQuote {
        billable_hours,
        total_cost,
    } = quote(start, end, &rates)?;
    debug!("Quoted {billable_hours}h at ${total_cost:.2} for bikes {bike_ids:?}");

    let new_rental = rental::ActiveModel {
        customer_id: Set(customer.id),
        start_date: Set(start),
        end_date: Set(end),
        billable_hours: Set(billable_hours),
        total_cost: Set(total_cost),
        employee_id: Set(employee.id),
        payment_id: Set(None),
        ..Default::default()
    };
    let rental = new_rental.insert(&txn).await?;

    let links = bike_ids.iter().map(|bike_id| rental_bike::ActiveModel {
        rental_id: Set(rental.id),
        bike_id: Set(*bike_id),
    });
    RentalBike::insert_many(links)
        .exec_without_returning(&txn)
        .await?;

    txn.commit().await?;

    info!(
        "Booked rental {} for {} ({} bikes, {}h, ${:.2})",
        rental.id,
        customer.email,
        bike_ids.len(),
        rental.billable_hours,
        rental.total_cost
    );
    Ok(rental)
}

/// Finds a rental by its id.
pub async fn get_rental_by_id(
    db: &DatabaseConnection,
    rental_id: i64,
) -> Result<Option<rental::Model>> {
    Rental::find_by_id(rental_id).one(db).await.map_err(Into::into)
}

/// Lists the bike links of a rental.
pub async fn get_rental_bikes(
    db: &DatabaseConnection,
    rental_id: i64,
) -> Result<Vec<rental_bike::Model>> {
    RentalBike::find()
        .filter(rental_bike::Column::RentalId.eq(rental_id))
        .all(db)
        .await
        .map_err(Into::into)
}
