//! The numbered operation catalog shown in the menu.
//!
//! Each entry names the parameters the operator is prompted for, in order, and
//! [`execute`] turns the collected answers into a call into the core layer.

use crate::{
    cli::{Output, table::Table},
    core::{
        bike::{self, BikeCategory},
        customer::{self, CustomerField},
        employee, maintenance, payment,
        rental::{self, parse_timestamp},
    },
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;

const START_PROMPT: &str = "Start Date/Time (YYYY-MM-DD HH:MM)";
const END_PROMPT: &str = "End Date/Time (YYYY-MM-DD HH:MM)";

/// Every operation the menu offers, numbered as displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    /// 1
    RegisterCustomer,
    /// 2
    AddBike,
    /// 3
    AddEmployee,
    /// 4
    BookRental,
    /// 5
    RecordPayment,
    /// 6
    EditCustomer,
    /// 7
    EditEmployeeRole,
    /// 8
    CustomerRentalHistory,
    /// 9
    AvailableBikesByCategory,
    /// 10
    MostRecentRental,
    /// 11
    CustomerPayments,
    /// 12
    RemoveBike,
    /// 13
    RemoveEmployee,
    /// 14
    AvailableBikes,
    /// 15
    MaintenanceHistory,
    /// 16
    RentalPayment,
    /// 17
    BikeRentalHistory,
    /// 18
    ScheduleMaintenance,
    /// 19
    CancelMaintenance,
    /// 20
    FinishMaintenance,
}

impl MenuOption {
    /// All options in menu order.
    pub const ALL: [Self; 20] = [
        Self::RegisterCustomer,
        Self::AddBike,
        Self::AddEmployee,
        Self::BookRental,
        Self::RecordPayment,
        Self::EditCustomer,
        Self::EditEmployeeRole,
        Self::CustomerRentalHistory,
        Self::AvailableBikesByCategory,
        Self::MostRecentRental,
        Self::CustomerPayments,
        Self::RemoveBike,
        Self::RemoveEmployee,
        Self::AvailableBikes,
        Self::MaintenanceHistory,
        Self::RentalPayment,
        Self::BikeRentalHistory,
        Self::ScheduleMaintenance,
        Self::CancelMaintenance,
        Self::FinishMaintenance,
    ];

    /// Number the operator types to pick this option.
    #[must_use]
    pub fn number(self) -> usize {
        Self::ALL
            .iter()
            .position(|option| *option == self)
            .map_or(0, |index| index + 1)
    }

    /// Looks up the option for a typed menu number.
    #[must_use]
    pub fn from_choice(choice: &str) -> Option<Self> {
        let number: usize = choice.trim().parse().ok()?;
        Self::ALL.get(number.checked_sub(1)?).copied()
    }

    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::RegisterCustomer => "Register New Customer",
            Self::AddBike => "Add New Bike",
            Self::AddEmployee => "Add New Employee",
            Self::BookRental => "Add New Rental and Link Bikes",
            Self::RecordPayment => "Add Payment for a Rental by Rental ID",
            Self::EditCustomer => "Edit Customer Info from Email (name, email, or phone)",
            Self::EditEmployeeRole => "Edit Employee Role by Employee ID",
            Self::CustomerRentalHistory => "Find Customer Rental History by Email",
            Self::AvailableBikesByCategory => "Find Available Bikes of a Type for a Date/Time Range",
            Self::MostRecentRental => "Find Customer's Most Recent Rental by Email",
            Self::CustomerPayments => "Find Customer Payments by Email",
            Self::RemoveBike => "Remove Bike by ID",
            Self::RemoveEmployee => "Remove Employee by ID",
            Self::AvailableBikes => "View All Available Bikes for a Date/Time Range",
            Self::MaintenanceHistory => "View Maintenance History for a Bike by Bike ID",
            Self::RentalPayment => "View Payment for a Rental by Rental ID",
            Self::BikeRentalHistory => "View Rental History of a Bike by ID",
            Self::ScheduleMaintenance => "Schedule Bike Maintenance",
            Self::CancelMaintenance => "Cancel Scheduled Maintenance by Bike ID",
            Self::FinishMaintenance => "Finish Bike Maintenance",
        }
    }

    /// Parameter prompts, in the order they are collected.
    #[must_use]
    pub const fn params(self) -> &'static [&'static str] {
        match self {
            Self::RegisterCustomer => &["Name", "Email", "Phone Number"],
            Self::AddBike => &[
                "Type (Adult, Child, Electric, Road, Tandem, Racing, Other)",
                "Model",
            ],
            Self::AddEmployee => &["Name", "Position"],
            Self::BookRental => &[
                "Customer Email",
                "Start Date (YYYY-MM-DD HH:MM)",
                "End Date (YYYY-MM-DD HH:MM)",
                "Employee ID",
                "Bike IDs (Comma Separated)",
            ],
            Self::RecordPayment => &["Rental ID", "Payment Method", "Employee ID"],
            Self::EditCustomer => &[
                "Field (Name, Email, or Phone)",
                "New Field Value",
                "Current Email of Customer on File",
            ],
            Self::EditEmployeeRole => &["New Position", "Employee ID"],
            Self::CustomerRentalHistory | Self::MostRecentRental | Self::CustomerPayments => {
                &["Email Address"]
            }
            Self::AvailableBikesByCategory => &["Bike Type", START_PROMPT, END_PROMPT],
            Self::AvailableBikes => &[START_PROMPT, END_PROMPT],
            Self::RemoveBike
            | Self::MaintenanceHistory
            | Self::BikeRentalHistory
            | Self::CancelMaintenance => &["Bike ID"],
            Self::RemoveEmployee => &["Employee ID"],
            Self::RentalPayment => &["Rental ID"],
            Self::ScheduleMaintenance => &["Bike ID", START_PROMPT, "Type of Maintenance"],
            Self::FinishMaintenance => &[END_PROMPT, "Employee ID", "Bike ID"],
        }
    }
}

fn arg(args: &[String], index: usize) -> &str {
    args.get(index).map_or("", String::as_str)
}

fn parse_id(args: &[String], index: usize, what: &str) -> Result<i64> {
    let value = arg(args, index).trim();
    value
        .parse()
        .map_err(|_| Error::invalid_input(format!("'{value}' is not a valid {what}")))
}

fn table_of<T: crate::cli::table::TableRow>(rows: &[T]) -> Output {
    Output::Table(Table::from_rows(rows))
}

/// Runs one catalog entry with the operator's answers, in [`MenuOption::params`] order.
///
/// # Errors
/// Returns whatever the underlying core operation returns, or `Error::InvalidInput`
/// when an answer cannot be parsed.
pub async fn execute(
    db: &DatabaseConnection,
    option: MenuOption,
    args: &[String],
) -> Result<Vec<Output>> {
    let outputs = match option {
        MenuOption::RegisterCustomer => {
            let customer = customer::register_customer(
                db,
                arg(args, 0).to_string(),
                arg(args, 1).to_string(),
                arg(args, 2).to_string(),
            )
            .await?;
            vec![Output::Message(format!(
                "Customer registered with ID {}",
                customer.id
            ))]
        }
        MenuOption::AddBike => {
            let category: BikeCategory = arg(args, 0).parse()?;
            let bike = bike::allocate_bike(db, category, arg(args, 1).to_string()).await?;
            vec![
                Output::Message(format!(
                    "Bike {} added ({} at ${:.2}/h)",
                    bike.id, bike.category, bike.hourly_rate
                )),
                table_of(&[bike]),
            ]
        }
        MenuOption::AddEmployee => {
            let employee =
                employee::add_employee(db, arg(args, 0).to_string(), arg(args, 1).to_string())
                    .await?;
            vec![Output::Message(format!(
                "Employee added with ID {}",
                employee.id
            ))]
        }
        MenuOption::BookRental => {
            let employee_id = parse_id(args, 3, "employee ID")?;
            let rental = rental::book_rental(
                db,
                arg(args, 0),
                arg(args, 1),
                arg(args, 2),
                employee_id,
                arg(args, 4),
            )
            .await?;
            vec![
                Output::Message(format!(
                    "Rental {} booked: {} billable hours, total ${:.2}",
                    rental.id, rental.billable_hours, rental.total_cost
                )),
                table_of(&[rental]),
            ]
        }
        MenuOption::RecordPayment => {
            let rental_id = parse_id(args, 0, "rental ID")?;
            let employee_id = parse_id(args, 2, "employee ID")?;
            let payment =
                payment::record_payment(db, rental_id, arg(args, 1).to_string(), employee_id)
                    .await?;
            vec![
                Output::Message(format!(
                    "Payment {} of ${:.2} recorded for rental {rental_id}",
                    payment.id, payment.amount
                )),
                table_of(&[payment]),
            ]
        }
        MenuOption::EditCustomer => {
            let field: CustomerField = arg(args, 0).parse()?;
            let customer = customer::update_customer_field(
                db,
                arg(args, 2),
                field,
                arg(args, 1).to_string(),
            )
            .await?;
            vec![table_of(&[customer])]
        }
        MenuOption::EditEmployeeRole => {
            let employee_id = parse_id(args, 1, "employee ID")?;
            let employee =
                employee::update_employee_position(db, employee_id, arg(args, 0).to_string())
                    .await?;
            vec![table_of(&[employee])]
        }
        MenuOption::CustomerRentalHistory => {
            let history = customer::rental_history(db, arg(args, 0)).await?;
            vec![
                table_of(&[history.customer]),
                table_of(&history.rentals),
                table_of(&history.rental_bikes),
            ]
        }
        MenuOption::AvailableBikesByCategory => {
            let category: BikeCategory = arg(args, 0).parse()?;
            let start = parse_timestamp(arg(args, 1))?;
            let end = parse_timestamp(arg(args, 2))?;
            let bikes = bike::available_bikes(db, start, end, Some(category)).await?;
            vec![table_of(&bikes)]
        }
        MenuOption::MostRecentRental => {
            let rental = customer::most_recent_rental(db, arg(args, 0)).await?;
            vec![table_of(rental.as_slice())]
        }
        MenuOption::CustomerPayments => {
            let report = customer::customer_payments(db, arg(args, 0)).await?;
            vec![table_of(&[report.customer]), table_of(&report.payments)]
        }
        MenuOption::RemoveBike => {
            let bike_id = parse_id(args, 0, "bike ID")?;
            bike::remove_bike(db, bike_id).await?;
            vec![Output::Message(format!("Bike {bike_id} removed"))]
        }
        MenuOption::RemoveEmployee => {
            let employee_id = parse_id(args, 0, "employee ID")?;
            employee::remove_employee(db, employee_id).await?;
            vec![Output::Message(format!("Employee {employee_id} removed"))]
        }
        MenuOption::AvailableBikes => {
            let start = parse_timestamp(arg(args, 0))?;
            let end = parse_timestamp(arg(args, 1))?;
            let bikes = bike::available_bikes(db, start, end, None).await?;
            vec![table_of(&bikes)]
        }
        MenuOption::MaintenanceHistory => {
            let bike_id = parse_id(args, 0, "bike ID")?;
            let records = maintenance::maintenance_history(db, bike_id).await?;
            vec![table_of(&records)]
        }
        MenuOption::RentalPayment => {
            let rental_id = parse_id(args, 0, "rental ID")?;
            let payment = payment::payment_for_rental(db, rental_id).await?;
            vec![table_of(payment.as_slice())]
        }
        MenuOption::BikeRentalHistory => {
            let bike_id = parse_id(args, 0, "bike ID")?;
            let rentals = bike::rental_history(db, bike_id).await?;
            vec![table_of(&rentals)]
        }
        MenuOption::ScheduleMaintenance => {
            let bike_id = parse_id(args, 0, "bike ID")?;
            let start = parse_timestamp(arg(args, 1))?;
            let record =
                maintenance::schedule_maintenance(db, bike_id, start, arg(args, 2).to_string())
                    .await?;
            vec![Output::Message(format!(
                "Maintenance {} scheduled for bike {bike_id}",
                record.id
            ))]
        }
        MenuOption::CancelMaintenance => {
            let bike_id = parse_id(args, 0, "bike ID")?;
            let removed = maintenance::cancel_scheduled_maintenance(db, bike_id).await?;
            vec![Output::Message(format!(
                "{removed} scheduled maintenance record(s) cancelled for bike {bike_id}"
            ))]
        }
        MenuOption::FinishMaintenance => {
            let end = parse_timestamp(arg(args, 0))?;
            let employee_id = parse_id(args, 1, "employee ID")?;
            let bike_id = parse_id(args, 2, "bike ID")?;
            let records = maintenance::finish_maintenance(db, bike_id, end, employee_id).await?;
            vec![table_of(&records)]
        }
    };

    Ok(outputs)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    fn answers(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_menu_numbers() {
        assert_eq!(MenuOption::from_choice("1"), Some(MenuOption::RegisterCustomer));
        assert_eq!(MenuOption::from_choice(" 20 "), Some(MenuOption::FinishMaintenance));
        assert_eq!(MenuOption::from_choice("0"), None);
        assert_eq!(MenuOption::from_choice("21"), None);
        assert_eq!(MenuOption::from_choice("two"), None);

        for (index, option) in MenuOption::ALL.iter().enumerate() {
            assert_eq!(option.number(), index + 1);
            assert!(!option.params().is_empty());
        }
    }

    #[tokio::test]
    async fn test_execute_add_bike_and_book() -> Result<()> {
        let shop = setup_shop().await?;

        let outputs = execute(
            &shop.db,
            MenuOption::AddBike,
            &answers(&["electric", "E-Cruiser"]),
        )
        .await?;
        assert_eq!(
            outputs[0],
            Output::Message("Bike 301 added (Electric at $18.00/h)".to_string())
        );

        let outputs = execute(
            &shop.db,
            MenuOption::BookRental,
            &answers(&[
                "test@example.com",
                "2024-01-01 10:00",
                "2024-01-01 13:30",
                &shop.employee.id.to_string(),
                "101, 301",
            ]),
        )
        .await?;
        assert_eq!(
            outputs[0],
            Output::Message("Rental 1 booked: 4 billable hours, total $112.00".to_string())
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_execute_rejects_bad_ids() -> Result<()> {
        let db = setup_test_db().await?;

        let result = execute(&db, MenuOption::RemoveBike, &answers(&["one-oh-one"])).await;
        assert!(matches!(result, Err(Error::InvalidInput { message: _ })));

        let result = execute(&db, MenuOption::AddBike, &answers(&["Unicycle", "Solo"])).await;
        assert!(matches!(result, Err(Error::InvalidCategory { name: _ })));

        Ok(())
    }

    #[tokio::test]
    async fn test_execute_history_has_three_tables() -> Result<()> {
        let shop = setup_shop().await?;
        book_test_rental(&shop, "2024-01-01 10:00", "2024-01-01 11:00").await?;

        let outputs = execute(
            &shop.db,
            MenuOption::CustomerRentalHistory,
            &answers(&["test@example.com"]),
        )
        .await?;
        assert_eq!(outputs.len(), 3);
        assert!(outputs
            .iter()
            .all(|output| matches!(output, Output::Table(table) if !table.is_empty())));

        Ok(())
    }
}
