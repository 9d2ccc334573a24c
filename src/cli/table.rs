//! Plain-text result tables.
//!
//! Every column is padded to its widest cell plus two spaces, with dashed separators
//! spanning the full table width.

use crate::entities::{bike, customer, employee, maintenance, payment, rental, rental_bike};

const COLUMN_PADDING: usize = 2;

/// Entity rows that can be shown as table rows.
pub trait TableRow {
    /// Column headers, in display order
    fn headers() -> &'static [&'static str];
    /// Cell values, in the same order as [`TableRow::headers`]
    fn cells(&self) -> Vec<String>;
}

/// A rendered-on-demand text table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates an empty table with the given headers.
    #[must_use]
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(ToString::to_string).collect(),
            rows: Vec::new(),
        }
    }

    /// Builds a table from entity models.
    #[must_use]
    pub fn from_rows<T: TableRow>(rows: &[T]) -> Self {
        let mut table = Self::new(T::headers());
        for row in rows {
            table.push(row.cells());
        }
        table
    }

    /// Appends a row.
    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }
        widths
    }

    /// Renders the header, a separator and the rows; `banner` adds a leading separator
    /// and a `RESULTS:` line.
    #[must_use]
    pub fn render(&self, banner: bool) -> String {
        let widths = self.widths();
        let total_width: usize = widths.iter().map(|w| w + COLUMN_PADDING).sum();
        let separator = "-".repeat(total_width);

        let mut lines = Vec::with_capacity(self.rows.len() + 4);
        if banner {
            lines.push(separator.clone());
            lines.push("RESULTS:".to_string());
        }
        lines.push(format_line(&self.headers, &widths));
        lines.push(separator);
        lines.extend(self.rows.iter().map(|row| format_line(row, &widths)));

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<pad$}", pad = width + COLUMN_PADDING))
        .collect()
}

fn money(amount: f64) -> String {
    format!("{amount:.2}")
}

fn optional<T: ToString>(value: Option<&T>) -> String {
    value.map_or_else(String::new, ToString::to_string)
}

impl TableRow for customer::Model {
    fn headers() -> &'static [&'static str] {
        &["id", "name", "email", "phone"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.email.clone(),
            self.phone.clone(),
        ]
    }
}

impl TableRow for employee::Model {
    fn headers() -> &'static [&'static str] {
        &["id", "name", "position"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.id.to_string(), self.name.clone(), self.position.clone()]
    }
}

impl TableRow for bike::Model {
    fn headers() -> &'static [&'static str] {
        &["id", "category", "model", "hourly_rate"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.category.clone(),
            self.model.clone(),
            money(self.hourly_rate),
        ]
    }
}

impl TableRow for rental::Model {
    fn headers() -> &'static [&'static str] {
        &[
            "id",
            "customer_id",
            "start_date",
            "end_date",
            "billable_hours",
            "total_cost",
            "employee_id",
            "payment_id",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.customer_id.to_string(),
            self.start_date.format(crate::core::rental::TIMESTAMP_FORMAT).to_string(),
            self.end_date.format(crate::core::rental::TIMESTAMP_FORMAT).to_string(),
            self.billable_hours.to_string(),
            money(self.total_cost),
            self.employee_id.to_string(),
            optional(self.payment_id.as_ref()),
        ]
    }
}

impl TableRow for rental_bike::Model {
    fn headers() -> &'static [&'static str] {
        &["rental_id", "bike_id"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.rental_id.to_string(), self.bike_id.to_string()]
    }
}

impl TableRow for payment::Model {
    fn headers() -> &'static [&'static str] {
        &[
            "id",
            "method",
            "transaction_date",
            "amount",
            "customer_id",
            "employee_id",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.method.clone(),
            self.transaction_date.format("%Y-%m-%d %H:%M:%S").to_string(),
            money(self.amount),
            self.customer_id.to_string(),
            self.employee_id.to_string(),
        ]
    }
}

impl TableRow for maintenance::Model {
    fn headers() -> &'static [&'static str] {
        &[
            "id",
            "bike_id",
            "start_date",
            "end_date",
            "maintenance_type",
            "employee_id",
        ]
    }

    fn cells(&self) -> Vec<String> {
        let format = crate::core::rental::TIMESTAMP_FORMAT;
        vec![
            self.id.to_string(),
            self.bike_id.to_string(),
            self.start_date.format(format).to_string(),
            self.end_date
                .map(|end| end.format(format).to_string())
                .unwrap_or_default(),
            self.maintenance_type.clone(),
            optional(self.employee_id.as_ref()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_pads_to_widest_cell() {
        let mut table = Table::new(&["id", "name"]);
        table.push(vec!["1".to_string(), "Ann".to_string()]);
        table.push(vec!["102".to_string(), "Bo".to_string()]);

        let expected = [
            "-----------",
            "RESULTS:",
            "id   name  ",
            "-----------",
            "1    Ann   ",
            "102  Bo    ",
        ];
        let rendered = table.render(true);
        assert_eq!(rendered.lines().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_render_without_banner() {
        let table = Table::new(&["rental_id", "bike_id"]);
        assert!(table.is_empty());

        let rendered = table.render(false);
        let separator = "-".repeat(20);
        assert_eq!(rendered, format!("rental_id  bike_id  \n{separator}\n"));
    }

    #[test]
    fn test_bike_rows() {
        let bikes = vec![bike::Model {
            id: 301,
            category: "Electric".to_string(),
            model: "X".to_string(),
            hourly_rate: 18.0,
        }];
        let rendered = Table::from_rows(&bikes).render(false);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(
            lines[0],
            format!("{:<5}{:<10}{:<7}{:<13}", "id", "category", "model", "hourly_rate")
        );
        assert_eq!(
            lines[2],
            format!("{:<5}{:<10}{:<7}{:<13}", "301", "Electric", "X", "18.00")
        );
    }
}
