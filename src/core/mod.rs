//! Core business logic - framework-agnostic shop operations.
//!
//! Every operation takes a `DatabaseConnection` and returns entity models or structured
//! results, leaving presentation to the menu layer.

/// Fleet management and bike id allocation
pub mod bike;
/// Customer registration, edits and per-customer reports
pub mod customer;
/// Staff records
pub mod employee;
/// Bike service scheduling
pub mod maintenance;
/// Settling rentals
pub mod payment;
/// Rental booking and billing
pub mod rental;
/// Startup seeding from config.toml
pub mod seed;
