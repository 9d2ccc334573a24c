//! Employee entity - Staff who book rentals, take payments and service bikes.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Employee database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    /// Unique identifier for the employee
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Full name
    pub name: String,
    /// Job title (e.g., "Mechanic", "Front Desk")
    pub position: String,
}

/// Defines relationships between Employee and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Rentals booked by this employee
    #[sea_orm(has_many = "super::rental::Entity")]
    Rentals,
    /// Payments taken by this employee
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
    /// Maintenance finished by this employee
    #[sea_orm(has_many = "super::maintenance::Entity")]
    Maintenance,
}

impl Related<super::rental::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rentals.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl Related<super::maintenance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Maintenance.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
