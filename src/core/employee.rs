//! Employee business logic - Staff records.

use crate::{
    entities::{Employee, employee},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};
use tracing::info;

/// Adds an employee.
///
/// # Errors
/// Returns an error if the name or position is blank or the insert fails.
pub async fn add_employee(
    db: &DatabaseConnection,
    name: String,
    position: String,
) -> Result<employee::Model> {
    if name.trim().is_empty() {
        return Err(Error::invalid_input("Employee name cannot be empty"));
    }
    if position.trim().is_empty() {
        return Err(Error::invalid_input("Employee position cannot be empty"));
    }

    let employee = employee::ActiveModel {
        name: Set(name.trim().to_string()),
        position: Set(position.trim().to_string()),
        ..Default::default()
    };
    let result = employee.insert(db).await?;
    info!("Added employee {} ({})", result.id, result.position);
    Ok(result)
}

/// Finds an employee by id.
pub async fn get_employee_by_id(
    db: &DatabaseConnection,
    employee_id: i64,
) -> Result<Option<employee::Model>> {
    Employee::find_by_id(employee_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Changes an employee's position.
///
/// # Errors
/// Returns `Error::EmployeeNotFound` if no employee has this id, or
/// `Error::InvalidInput` if the position is blank.
pub async fn update_employee_position(
    db: &DatabaseConnection,
    employee_id: i64,
    position: String,
) -> Result<employee::Model> {
    if position.trim().is_empty() {
        return Err(Error::invalid_input("Employee position cannot be empty"));
    }

    let existing = get_employee_by_id(db, employee_id)
        .await?
        .ok_or(Error::EmployeeNotFound { id: employee_id })?;

    let mut employee: employee::ActiveModel = existing.into();
    employee.position = Set(position.trim().to_string());
    employee.update(db).await.map_err(Into::into)
}

/// Removes an employee.
///
/// Employees referenced by rentals, payments or maintenance cannot be removed.
///
/// # Errors
/// Returns `Error::EmployeeNotFound` if no employee has this id, or a constraint
/// violation if the employee is still referenced.
pub async fn remove_employee(db: &DatabaseConnection, employee_id: i64) -> Result<()> {
    let result = Employee::delete_by_id(employee_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::EmployeeNotFound { id: employee_id });
    }
    info!("Removed employee {employee_id}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_add_employee_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = add_employee(&db, String::new(), "Mechanic".to_string()).await;
        assert!(matches!(result, Err(Error::InvalidInput { message: _ })));

        let result = add_employee(&db, "Sam".to_string(), " ".to_string()).await;
        assert!(matches!(result, Err(Error::InvalidInput { message: _ })));

        Ok(())
    }

    #[tokio::test]
    async fn test_employee_lifecycle() -> Result<()> {
        let db = setup_test_db().await?;

        let employee = add_employee(&db, "Sam".to_string(), "Mechanic".to_string()).await?;
        let promoted =
            update_employee_position(&db, employee.id, "Manager".to_string()).await?;
        assert_eq!(promoted.position, "Manager");
        assert_eq!(promoted.name, "Sam");

        remove_employee(&db, employee.id).await?;
        assert_eq!(get_employee_by_id(&db, employee.id).await?, None);

        let result = remove_employee(&db, employee.id).await;
        assert!(matches!(result, Err(Error::EmployeeNotFound { id: _ })));

        let result = update_employee_position(&db, employee.id, "Clerk".to_string()).await;
        assert!(matches!(result, Err(Error::EmployeeNotFound { id: _ })));

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_employee_with_rentals_is_constraint_violation() -> Result<()> {
        let shop = setup_shop().await?;
        book_test_rental(&shop, "2024-01-01 10:00", "2024-01-01 11:00").await?;

        let result = remove_employee(&shop.db, shop.employee.id).await;
        assert!(matches!(
            result,
            Err(Error::ConstraintViolation { message: _ })
        ));

        Ok(())
    }
}
