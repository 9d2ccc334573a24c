//! Bike entity - The rental fleet.
//!
//! Bike ids are not auto-incremented: they are allocated per category so that
//! `id / 100` is the category prefix and `id % 100` the sequence number within it.
//! See [`crate::core::bike::allocate_bike`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Bike database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bikes")]
pub struct Model {
    /// Category-prefixed identifier (e.g., 301 for the first Electric bike)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    /// Category name as stored (e.g., "Electric")
    pub category: String,
    /// Free-text model name
    pub model: String,
    /// Hourly rate in dollars, fixed by category when the bike is added
    pub hourly_rate: f64,
}

/// Defines relationships between Bike and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Links to the rentals this bike was part of
    #[sea_orm(has_many = "super::rental_bike::Entity")]
    RentalBikes,
    /// Maintenance records for this bike
    #[sea_orm(has_many = "super::maintenance::Entity")]
    Maintenance,
}

impl Related<super::rental_bike::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RentalBikes.def()
    }
}

impl Related<super::maintenance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Maintenance.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
