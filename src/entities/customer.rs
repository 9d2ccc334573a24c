//! Customer entity - People who rent bikes.
//!
//! The email is the business key: every lookup from the menu goes through it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Customer database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    /// Unique identifier for the customer
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Full name
    pub name: String,
    /// Unique email address used for lookups
    #[sea_orm(unique)]
    pub email: String,
    /// Contact phone number
    pub phone: String,
}

/// Defines relationships between Customer and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One customer has many rentals
    #[sea_orm(has_many = "super::rental::Entity")]
    Rentals,
    /// One customer has many payments
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
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

impl ActiveModelBehavior for ActiveModel {}
