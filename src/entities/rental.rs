//! Rental entity - A booking of one or more bikes for a time range.
//!
//! `billable_hours` and `total_cost` are derived once at booking time and stored;
//! payments read `total_cost` back instead of recomputing it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Rental database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rentals")]
pub struct Model {
    /// Unique identifier for the rental
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Customer who rented the bikes
    pub customer_id: i64,
    /// When the rental starts
    pub start_date: DateTime,
    /// When the rental ends
    pub end_date: DateTime,
    /// Duration rounded up to whole hours
    pub billable_hours: i32,
    /// `billable_hours` times the summed hourly rates of the bikes
    pub total_cost: f64,
    /// Employee who booked the rental
    pub employee_id: i64,
    /// Payment settling this rental, None until paid
    pub payment_id: Option<i64>,
}

/// Defines relationships between Rental and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each rental belongs to one customer
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id"
    )]
    Customer,
    /// Each rental was booked by one employee
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeId",
        to = "super::employee::Column::Id"
    )]
    Employee,
    /// The payment settling this rental
    #[sea_orm(
        belongs_to = "super::payment::Entity",
        from = "Column::PaymentId",
        to = "super::payment::Column::Id"
    )]
    Payment,
    /// One rental has many bike links
    #[sea_orm(has_many = "super::rental_bike::Entity")]
    RentalBikes,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payment.def()
    }
}

impl Related<super::rental_bike::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RentalBikes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
