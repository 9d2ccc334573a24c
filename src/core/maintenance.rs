//! Maintenance business logic - Scheduling, cancelling and finishing bike service.
//!
//! A maintenance record is open until it gets an end date. Cancelling removes the open
//! records of a bike; finishing closes them and records who did the work.

use crate::{
    core::bike,
    entities::{Employee, Maintenance, maintenance},
    errors::{Error, Result},
};
use chrono::NaiveDateTime;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::info;

/// Schedules maintenance for a bike starting at `start`.
///
/// # Errors
/// Returns an error if:
/// - The maintenance type is empty or whitespace-only
/// - No bike has this id
/// - The database insert fails
pub async fn schedule_maintenance(
    db: &DatabaseConnection,
    bike_id: i64,
    start: NaiveDateTime,
    maintenance_type: String,
) -> Result<maintenance::Model> {
    if maintenance_type.trim().is_empty() {
        return Err(Error::invalid_input("Maintenance type cannot be empty"));
    }

    bike::get_bike_by_id(db, bike_id)
        .await?
        .ok_or(Error::BikeNotFound { id: bike_id })?;

    let record = maintenance::ActiveModel {
        bike_id: Set(bike_id),
        start_date: Set(start),
        end_date: Set(None),
        maintenance_type: Set(maintenance_type.trim().to_string()),
        employee_id: Set(None),
        ..Default::default()
    };
    let result = record.insert(db).await?;
    info!(
        "Scheduled {} for bike {bike_id} at {start}",
        result.maintenance_type
    );
    Ok(result)
}

/// Deletes every open maintenance record of a bike and returns how many were removed.
///
/// A bike with nothing open yields 0.
///
/// # Errors
/// Returns an error if the database delete fails.
pub async fn cancel_scheduled_maintenance(db: &DatabaseConnection, bike_id: i64) -> Result<u64> {
    let result = Maintenance::delete_many()
        .filter(maintenance::Column::BikeId.eq(bike_id))
        .filter(maintenance::Column::EndDate.is_null())
        .exec(db)
        .await?;

    info!(
        "Cancelled {} maintenance record(s) for bike {bike_id}",
        result.rows_affected
    );
    Ok(result.rows_affected)
}

/// Closes every open maintenance record of a bike at `end`, crediting `employee_id`.
///
/// # Errors
/// Returns an error if:
/// - The bike has no open maintenance
/// - `end` is not after the start of an open record
/// - No employee has this id
/// - A database operation fails
pub async fn finish_maintenance(
    db: &DatabaseConnection,
    bike_id: i64,
    end: NaiveDateTime,
    employee_id: i64,
) -> Result<Vec<maintenance::Model>> {
    let txn = db.begin().await?;

    let open = Maintenance::find()
        .filter(maintenance::Column::BikeId.eq(bike_id))
        .filter(maintenance::Column::EndDate.is_null())
        .order_by_asc(maintenance::Column::StartDate)
        .all(&txn)
        .await?;

    if open.is_empty() {
        return Err(Error::MaintenanceNotFound { bike_id });
    }
    if let Some(latest) = open
        .iter()
        .map(|record| record.start_date)
        .filter(|start| end <= *start)
        .max()
    {
        return Err(Error::InvalidRange { start: latest, end });
    }

    Employee::find_by_id(employee_id)
        .one(&txn)
        .await?
        .ok_or(Error::EmployeeNotFound { id: employee_id })?;

    let mut finished = Vec::with_capacity(open.len());
    for record in open {
        let mut record: maintenance::ActiveModel = record.into();
        record.end_date = Set(Some(end));
        record.employee_id = Set(Some(employee_id));
        finished.push(record.update(&txn).await?);
    }

    txn.commit().await?;

    info!("Finished maintenance on bike {bike_id}");
    Ok(finished)
}

/// Lists every maintenance record of a bike, oldest first.
pub async fn maintenance_history(
    db: &DatabaseConnection,
    bike_id: i64,
) -> Result<Vec<maintenance::Model>> {
    Maintenance::find()
        .filter(maintenance::Column::BikeId.eq(bike_id))
        .order_by_asc(maintenance::Column::StartDate)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_schedule_maintenance_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result =
            schedule_maintenance(&db, 101, timestamp("2024-01-01 09:00"), String::new()).await;
        assert!(matches!(result, Err(Error::InvalidInput { message: _ })));

        Ok(())
    }

    #[tokio::test]
    async fn test_schedule_for_missing_bike() -> Result<()> {
        let db = setup_test_db().await?;

        let result = schedule_maintenance(
            &db,
            999,
            timestamp("2024-01-01 09:00"),
            "Tune-up".to_string(),
        )
        .await;
        assert!(matches!(result, Err(Error::BikeNotFound { id: 999 })));

        Ok(())
    }

    #[tokio::test]
    async fn test_schedule_and_finish() -> Result<()> {
        let shop = setup_shop().await?;

        let scheduled = schedule_maintenance(
            &shop.db,
            shop.bike.id,
            timestamp("2024-01-01 09:00"),
            "Tune-up".to_string(),
        )
        .await?;
        assert_eq!(scheduled.end_date, None);

        let result = finish_maintenance(
            &shop.db,
            shop.bike.id,
            timestamp("2024-01-01 08:00"),
            shop.employee.id,
        )
        .await;
        assert!(matches!(result, Err(Error::InvalidRange { .. })));

        let finished = finish_maintenance(
            &shop.db,
            shop.bike.id,
            timestamp("2024-01-01 11:00"),
            shop.employee.id,
        )
        .await?;
        assert_eq!(finished.len(), 1);
        assert_eq!(finished[0].id, scheduled.id);
        assert_eq!(finished[0].end_date, Some(timestamp("2024-01-01 11:00")));
        assert_eq!(finished[0].employee_id, Some(shop.employee.id));

        let result = finish_maintenance(
            &shop.db,
            shop.bike.id,
            timestamp("2024-01-01 12:00"),
            shop.employee.id,
        )
        .await;
        assert!(matches!(
            result,
            Err(Error::MaintenanceNotFound { bike_id: _ })
        ));

        let history = maintenance_history(&shop.db, shop.bike.id).await?;
        assert_eq!(history, finished);

        Ok(())
    }

    #[tokio::test]
    async fn test_cancel_only_removes_open_records() -> Result<()> {
        let shop = setup_shop().await?;

        schedule_maintenance(
            &shop.db,
            shop.bike.id,
            timestamp("2024-01-01 09:00"),
            "Brakes".to_string(),
        )
        .await?;
        finish_maintenance(
            &shop.db,
            shop.bike.id,
            timestamp("2024-01-01 10:00"),
            shop.employee.id,
        )
        .await?;
        schedule_maintenance(
            &shop.db,
            shop.bike.id,
            timestamp("2024-02-01 09:00"),
            "Tyres".to_string(),
        )
        .await?;

        assert_eq!(cancel_scheduled_maintenance(&shop.db, shop.bike.id).await?, 1);

        let history = maintenance_history(&shop.db, shop.bike.id).await?;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].maintenance_type, "Brakes");

        assert_eq!(cancel_scheduled_maintenance(&shop.db, shop.bike.id).await?, 0);
        assert_eq!(maintenance_history(&shop.db, shop.bike.id).await?.len(), 1);

        Ok(())
    }
}
