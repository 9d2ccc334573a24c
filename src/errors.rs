//! Error types for the bike rental shop.
//!
//! Every failure is a variant of [`Error`]. Callers that only need to know the broad class
//! of failure (for reporting or re-prompting) use [`Error::kind`].

use chrono::NaiveDateTime;
use sea_orm::{DbErr, SqlErr};
use std::fmt;
use thiserror::Error;

/// Broad failure classes reported to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A customer, employee, bike, rental or maintenance lookup found nothing.
    NotFound,
    /// A time range whose end is not after its start.
    InvalidRange,
    /// A uniqueness or foreign-key rule would be broken.
    ConstraintViolation,
    /// Connectivity, syntax or any other store-level failure.
    StoreFailure,
    /// Operator input that could not be parsed or is blank.
    InvalidInput,
    /// Configuration could not be read or parsed.
    Config,
    /// Terminal I/O failed.
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NotFound => "Not found",
            Self::InvalidRange => "Invalid range",
            Self::ConstraintViolation => "Constraint violation",
            Self::StoreFailure => "Store failure",
            Self::InvalidInput => "Invalid input",
            Self::Config => "Configuration error",
            Self::Io => "I/O error",
        };
        f.write_str(label)
    }
}

/// Unified error type for all shop operations.
#[derive(Debug, Error)]
pub enum Error {
    /// No customer is registered under this email
    #[error("Customer with email '{email}' not found")]
    CustomerNotFound {
        /// Email that was looked up
        email: String,
    },

    /// No employee has this id
    #[error("Employee {id} not found")]
    EmployeeNotFound {
        /// Employee id that was looked up
        id: i64,
    },

    /// No bike has this id
    #[error("Bike {id} not found")]
    BikeNotFound {
        /// Bike id that was looked up
        id: i64,
    },

    /// Some bikes of a booking do not exist
    #[error("Bikes not found: {}", join_ids(.ids))]
    BikesNotFound {
        /// Every requested id that is missing from the store
        ids: Vec<i64>,
    },

    /// No rental has this id
    #[error("Rental {id} not found")]
    RentalNotFound {
        /// Rental id that was looked up
        id: i64,
    },

    /// The bike has no open maintenance record
    #[error("No open maintenance for bike {bike_id}")]
    MaintenanceNotFound {
        /// Bike whose maintenance was looked up
        bike_id: i64,
    },

    /// End of a time range is not after its start
    #[error("Invalid time range: end {end} is not after start {start}")]
    InvalidRange {
        /// Start of the range
        start: NaiveDateTime,
        /// End of the range
        end: NaiveDateTime,
    },

    /// Category text does not name a known bike category
    #[error("Unknown bike category '{name}'")]
    InvalidCategory {
        /// Text that failed to parse
        name: String,
    },

    /// All 99 sequence numbers of a category are taken
    #[error("Category {category} has no free bike ids left")]
    CategoryFull {
        /// Name of the full category
        category: String,
    },

    /// The rental already has a payment attached
    #[error("Rental {id} is already paid (payment {payment_id})")]
    RentalAlreadyPaid {
        /// Rental id
        id: i64,
        /// Payment already attached to it
        payment_id: i64,
    },

    /// Uniqueness or foreign-key violation reported by the store
    #[error("Constraint violation: {message}")]
    ConstraintViolation {
        /// Message from the store
        message: String,
    },

    /// Operator input that could not be used
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// What was wrong with the input
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Any other database error
    #[error("Database error: {0}")]
    Database(DbErr),

    /// Terminal I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns the broad class of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::CustomerNotFound { .. }
            | Self::EmployeeNotFound { .. }
            | Self::BikeNotFound { .. }
            | Self::BikesNotFound { .. }
            | Self::RentalNotFound { .. }
            | Self::MaintenanceNotFound { .. } => ErrorKind::NotFound,
            Self::InvalidRange { .. } => ErrorKind::InvalidRange,
            Self::CategoryFull { .. }
            | Self::RentalAlreadyPaid { .. }
            | Self::ConstraintViolation { .. } => ErrorKind::ConstraintViolation,
            Self::Database(_) => ErrorKind::StoreFailure,
            Self::InvalidCategory { .. } | Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::Config { .. } => ErrorKind::Config,
            Self::Io(_) => ErrorKind::Io,
        }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

impl From<DbErr> for Error {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(
                SqlErr::UniqueConstraintViolation(message)
                | SqlErr::ForeignKeyConstraintViolation(message),
            ) => Self::ConstraintViolation { message },
            _ => Self::Database(err),
        }
    }
}

fn join_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(
            Error::CustomerNotFound {
                email: "a@b.c".to_string()
            }
            .kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            Error::CategoryFull {
                category: "Adult".to_string()
            }
            .kind(),
            ErrorKind::ConstraintViolation
        );
        assert_eq!(
            Error::from(DbErr::Custom("boom".to_string())).kind(),
            ErrorKind::StoreFailure
        );
        assert_eq!(Error::invalid_input("x").kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_bikes_not_found_message_lists_ids() {
        let err = Error::BikesNotFound { ids: vec![101, 305] };
        assert_eq!(err.to_string(), "Bikes not found: 101, 305");
    }
}
