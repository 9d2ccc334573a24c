//! Rental bike entity - Join rows between rentals and the bikes they include.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Rental/bike link database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rental_bikes")]
pub struct Model {
    /// Rental this link belongs to
    #[sea_orm(primary_key, auto_increment = false)]
    pub rental_id: i64,
    /// Bike included in the rental
    #[sea_orm(primary_key, auto_increment = false)]
    pub bike_id: i64,
}

/// Defines relationships between `RentalBike` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each link belongs to one rental
    #[sea_orm(
        belongs_to = "super::rental::Entity",
        from = "Column::RentalId",
        to = "super::rental::Column::Id"
    )]
    Rental,
    /// Each link points at one bike
    #[sea_orm(
        belongs_to = "super::bike::Entity",
        from = "Column::BikeId",
        to = "super::bike::Column::Id"
    )]
    Bike,
}

impl Related<super::rental::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rental.def()
    }
}

impl Related<super::bike::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bike.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
