//! Bike business logic - Fleet management and bike id allocation.
//!
//! Bike ids encode their category: `id / 100` is the category prefix and `id % 100` the
//! sequence number within the category (1..=99). New ids reuse the first hole left by a
//! removed bike before extending the category's range.

use crate::{
    entities::{Bike, Rental, RentalBike, bike, rental, rental_bike},
    errors::{Error, Result},
};
use chrono::NaiveDateTime;
use sea_orm::{QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*};
use std::{collections::BTreeSet, fmt, str::FromStr};
use tracing::{debug, info};

/// Highest sequence number a category can hold.
pub const MAX_SEQUENCE: i64 = 99;

/// The closed set of bike categories the shop rents out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BikeCategory {
    /// Standard adult bike
    Adult,
    /// Child-sized bike
    Child,
    /// Pedal-assist electric bike
    Electric,
    /// Road bike
    Road,
    /// Two-seater
    Tandem,
    /// Racing bike
    Racing,
    /// Anything else the shop keeps; not billed
    Other,
}

impl BikeCategory {
    /// All categories in prefix order.
    pub const ALL: [Self; 7] = [
        Self::Adult,
        Self::Child,
        Self::Electric,
        Self::Road,
        Self::Tandem,
        Self::Racing,
        Self::Other,
    ];

    /// Leading digit of every bike id in this category.
    #[must_use]
    pub const fn prefix(self) -> i64 {
        match self {
            Self::Adult => 1,
            Self::Child => 2,
            Self::Electric => 3,
            Self::Road => 4,
            Self::Tandem => 5,
            Self::Racing => 6,
            Self::Other => 9,
        }
    }

    /// Fixed hourly rate in dollars.
    #[must_use]
    pub const fn hourly_rate(self) -> f64 {
        match self {
            Self::Adult => 10.0,
            Self::Child => 8.0,
            Self::Road => 12.0,
            Self::Electric | Self::Tandem | Self::Racing => 18.0,
            Self::Other => 0.0,
        }
    }

    /// Name as stored in the bikes table.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Adult => "Adult",
            Self::Child => "Child",
            Self::Electric => "Electric",
            Self::Road => "Road",
            Self::Tandem => "Tandem",
            Self::Racing => "Racing",
            Self::Other => "Other",
        }
    }

    /// Smallest and largest id a bike of this category may have.
    #[must_use]
    pub const fn id_range(self) -> (i64, i64) {
        let base = self.prefix() * 100;
        (base, base + MAX_SEQUENCE)
    }
}

impl fmt::Display for BikeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BikeCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::InvalidCategory {
                name: name.to_string(),
            })
    }
}

/// Picks the next id for a category from the ids it already uses.
///
/// The new id is `v + 1` for the smallest existing `v` whose successor is free. When the
/// category is empty this falls back to `prefix * 100 + max_sequence + 1`, i.e. the first
/// id of the category. Holes below the lowest existing id are only reused once the range
/// has reached sequence number [`MAX_SEQUENCE`].
///
/// # Errors
/// Returns `Error::CategoryFull` when all sequence numbers 1..=[`MAX_SEQUENCE`] are taken.
pub fn next_bike_id(category: BikeCategory, existing: &[i64]) -> Result<i64> {
    let (low, high) = category.id_range();
    let taken: BTreeSet<i64> = existing
        .iter()
        .copied()
        .filter(|id| (low..=high).contains(id))
        .collect();

    let gap = taken
        .iter()
        .map(|id| id + 1)
        .filter(|candidate| *candidate <= high)
        .find(|candidate| !taken.contains(candidate));
    if let Some(id) = gap {
        return Ok(id);
    }

    let max_sequence = taken.iter().next_back().map_or(0, |id| id - low);
    let fallback = low + max_sequence + 1;
    if fallback <= high {
        return Ok(fallback);
    }

    ((low + 1)..=high)
        .find(|candidate| !taken.contains(candidate))
        .ok_or_else(|| Error::CategoryFull {
            category: category.to_string(),
        })
}

/// Adds a bike of the given category, allocating its id and fixing its hourly rate.
///
/// The category ids are read and the new row inserted inside one transaction, so the
/// computed id is checked against the same snapshot it is written to. The store's primary
/// key still rejects a colliding id as a constraint violation.
///
/// # Errors
/// Returns an error if:
/// - The model name is empty or whitespace-only
/// - The category has no free ids left
/// - The database insert fails
pub async fn allocate_bike(
    db: &DatabaseConnection,
    category: BikeCategory,
    model: String,
) -> Result<bike::Model> {
    if model.trim().is_empty() {
        return Err(Error::invalid_input("Bike model cannot be empty"));
    }

    let txn = db.begin().await?;

    let (low, high) = category.id_range();
    let existing: Vec<i64> = Bike::find()
        .select_only()
        .column(bike::Column::Id)
        .filter(bike::Column::Id.between(low, high))
        .order_by_asc(bike::Column::Id)
        .into_tuple()
        .all(&txn)
        .await?;

    let id = next_bike_id(category, &existing)?;
    debug!(
        "Allocated id {id} for {category} ({} existing)",
        existing.len()
    );

    let new_bike = bike::ActiveModel {
        id: Set(id),
        category: Set(category.to_string()),
        model: Set(model.trim().to_string()),
        hourly_rate: Set(category.hourly_rate()),
    };
    let result = new_bike.insert(&txn).await?;

    txn.commit().await?;

    info!(
        "Added {} bike {} at ${:.2}/h",
        result.category, result.id, result.hourly_rate
    );
    Ok(result)
}

/// Finds a bike by its id.
pub async fn get_bike_by_id(db: &DatabaseConnection, bike_id: i64) -> Result<Option<bike::Model>> {
    Bike::find_by_id(bike_id).one(db).await.map_err(Into::into)
}

/// Removes a bike from the fleet.
///
/// Its id becomes a hole that the next allocation in the same category may reuse. A bike
/// that is still referenced by rentals or maintenance records cannot be removed.
///
/// # Errors
/// Returns `Error::BikeNotFound` if no bike has this id, or a constraint violation if the
/// bike is still referenced.
pub async fn remove_bike(db: &DatabaseConnection, bike_id: i64) -> Result<()> {
    let result = Bike::delete_by_id(bike_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::BikeNotFound { id: bike_id });
    }
    info!("Removed bike {bike_id}");
    Ok(())
}

/// Lists bikes that are free for the whole of `[start, end)`.
///
/// A bike is busy when any rental it belongs to ends after `start` and starts before `end`;
/// back-to-back rentals therefore do not conflict. Pass a category to narrow the list.
///
/// # Errors
/// Returns `Error::InvalidRange` if `end` is not after `start`.
pub async fn available_bikes(
    db: &DatabaseConnection,
    start: NaiveDateTime,
    end: NaiveDateTime,
    category: Option<BikeCategory>,
) -> Result<Vec<bike::Model>> {
    if end <= start {
        return Err(Error::InvalidRange { start, end });
    }

    let busy: Vec<i64> = RentalBike::find()
        .select_only()
        .column(rental_bike::Column::BikeId)
        .inner_join(Rental)
        .filter(rental::Column::EndDate.gt(start))
        .filter(rental::Column::StartDate.lt(end))
        .distinct()
        .into_tuple()
        .all(db)
        .await?;

    let mut query = Bike::find()
        .filter(bike::Column::Id.is_not_in(busy))
        .order_by_asc(bike::Column::Id);
    if let Some(category) = category {
        query = query.filter(bike::Column::Category.eq(category.as_str()));
    }

    query.all(db).await.map_err(Into::into)
}

/// Lists every rental a bike has been part of, oldest first.
pub async fn rental_history(db: &DatabaseConnection, bike_id: i64) -> Result<Vec<rental::Model>> {
    Rental::find()
        .inner_join(RentalBike)
        .filter(rental_bike::Column::BikeId.eq(bike_id))
        .order_by_asc(rental::Column::StartDate)
        .all(db)
        .await
        .map_err(Into::into)
}
