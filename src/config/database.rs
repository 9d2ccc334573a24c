//! Database configuration module for the bike rental shop.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema (including foreign keys and the unique customer email) always matches the
//! Rust structs. Creation is skipped for tables that already exist, which makes startup
//! against an existing shop database safe.

use crate::entities::{Bike, Customer, Employee, Maintenance, Payment, Rental, RentalBike};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use tracing::debug;

/// Default store used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://bikerentalshop.sqlite?mode=rwc";

/// Gets the database URL from environment variable or returns the default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the `SQLite` database named by `DATABASE_URL`.
///
/// Falls back to [`DEFAULT_DATABASE_URL`] if no environment variable is set.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    debug!("Connecting to {database_url}");
    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates all shop tables that do not exist yet.
///
/// Referenced tables are created before the tables that point at them.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    create_table(db, &schema, Customer).await?;
    create_table(db, &schema, Employee).await?;
    create_table(db, &schema, Bike).await?;
    create_table(db, &schema, Payment).await?;
    create_table(db, &schema, Rental).await?;
    create_table(db, &schema, RentalBike).await?;
    create_table(db, &schema, Maintenance).await?;

    Ok(())
}

async fn create_table<E>(db: &DatabaseConnection, schema: &Schema, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        BikeModel, CustomerModel, EmployeeModel, MaintenanceModel, PaymentModel, RentalBikeModel,
        RentalModel,
    };
    use sea_orm::QuerySelect;

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<CustomerModel> = Customer::find().limit(1).all(&db).await?;
        let _: Vec<EmployeeModel> = Employee::find().limit(1).all(&db).await?;
        let _: Vec<BikeModel> = Bike::find().limit(1).all(&db).await?;
        let _: Vec<PaymentModel> = Payment::find().limit(1).all(&db).await?;
        let _: Vec<RentalModel> = Rental::find().limit(1).all(&db).await?;
        let _: Vec<RentalBikeModel> = RentalBike::find().limit(1).all(&db).await?;
        let _: Vec<MaintenanceModel> = Maintenance::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_twice() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }
}
