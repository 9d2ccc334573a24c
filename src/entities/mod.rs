//! Entity module - Contains all SeaORM entity definitions for the shop database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod bike;
pub mod customer;
pub mod employee;
pub mod maintenance;
pub mod payment;
pub mod rental;
pub mod rental_bike;

// Re-export specific types to avoid conflicts
pub use bike::{Column as BikeColumn, Entity as Bike, Model as BikeModel};
pub use customer::{Column as CustomerColumn, Entity as Customer, Model as CustomerModel};
pub use employee::{Column as EmployeeColumn, Entity as Employee, Model as EmployeeModel};
pub use maintenance::{
    Column as MaintenanceColumn, Entity as Maintenance, Model as MaintenanceModel,
};
pub use payment::{Column as PaymentColumn, Entity as Payment, Model as PaymentModel};
pub use rental::{Column as RentalColumn, Entity as Rental, Model as RentalModel};
pub use rental_bike::{
    Column as RentalBikeColumn, Entity as RentalBike, Model as RentalBikeModel,
};
