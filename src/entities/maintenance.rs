//! Maintenance entity - Service work scheduled or done on a bike.
//! A record is open while `end_date` is None.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Maintenance database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "maintenance")]
pub struct Model {
    /// Unique identifier for the maintenance record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Bike being serviced
    pub bike_id: i64,
    /// When the work starts
    pub start_date: DateTime,
    /// When the work was finished, None while open
    pub end_date: Option<DateTime>,
    /// Kind of work (e.g., "Tune-up", "Brake pads")
    pub maintenance_type: String,
    /// Employee who finished the work
    pub employee_id: Option<i64>,
}

/// Defines relationships between Maintenance and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each record belongs to one bike
    #[sea_orm(
        belongs_to = "super::bike::Entity",
        from = "Column::BikeId",
        to = "super::bike::Column::Id"
    )]
    Bike,
    /// Employee who finished the work
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeId",
        to = "super::employee::Column::Id"
    )]
    Employee,
}

impl Related<super::bike::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bike.def()
    }
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
