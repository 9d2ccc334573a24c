//! Terminal interface - the numbered operator menu.
//!
//! The menu prints the catalog, prompts for each parameter of the chosen operation,
//! runs it through the core layer and prints the outcome. Operation errors are reported
//! and the loop continues; only terminal I/O errors end it early.

/// Menu entries and their dispatch into the core layer
pub mod catalog;
/// Plain-text result tables
pub mod table;

use crate::errors::Result;
use catalog::MenuOption;
use sea_orm::DatabaseConnection;
use std::io::{BufRead, Write};
use table::Table;
use tracing::{info, warn};

const RULE: &str = "-------------------------------------------";

/// One piece of an operation's result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// A status line
    Message(String),
    /// Tabular rows
    Table(Table),
}

/// Interactive menu over any line-based input and output.
pub struct Menu<'a, R, W> {
    db: &'a DatabaseConnection,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    /// Creates a menu reading answers from `input` and writing to `output`.
    pub const fn new(db: &'a DatabaseConnection, input: R, output: W) -> Self {
        Self { db, input, output }
    }

    /// Runs the menu until the operator picks 0 or input ends.
    ///
    /// # Errors
    /// Returns an error only if reading input or writing output fails.
    pub async fn run(&mut self, database_label: &str) -> Result<()> {
        writeln!(self.output, "\n--- Bike Rental Shop ---")?;
        writeln!(self.output, "Connected to database: {database_label}")?;

        'menu: loop {
            self.print_menu()?;

            let Some(choice) = self.prompt("Enter option number: ")? else {
                break;
            };
            if choice == "0" {
                break;
            }
            let Some(option) = MenuOption::from_choice(&choice) else {
                writeln!(
                    self.output,
                    "Invalid option. Please enter a number from the menu."
                )?;
                continue;
            };

            let mut args = Vec::with_capacity(option.params().len());
            for label in option.params() {
                let Some(value) = self.prompt(&format!("Enter value for '{label}': "))? else {
                    break 'menu;
                };
                args.push(value);
            }

            writeln!(self.output, "\n-> Executing: {}", option.label())?;
            match catalog::execute(self.db, option, &args).await {
                Ok(outputs) => self.print_outputs(&outputs)?,
                Err(e) => {
                    warn!(kind = %e.kind(), "{} failed: {e}", option.label());
                    writeln!(self.output, "❌ {}: {e}", e.kind())?;
                }
            }
        }

        writeln!(self.output, "Interface closed. Goodbye.")?;
        info!("Menu closed");
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output, "\n{RULE}")?;
        writeln!(self.output, "Please choose an operation:")?;
        for option in MenuOption::ALL {
            writeln!(self.output, "[{}] {}", option.number(), option.label())?;
        }
        writeln!(self.output, "[0] EXIT / QUIT")?;
        writeln!(self.output, "{RULE}")?;
        Ok(())
    }

    /// Prints `text`, reads one line and returns it trimmed, or None at end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn print_outputs(&mut self, outputs: &[Output]) -> Result<()> {
        let mut tables = 0;
        for output in outputs {
            match output {
                Output::Message(message) => writeln!(self.output, "✅ {message}")?,
                Output::Table(table) if table.is_empty() => {
                    writeln!(self.output, "Query successful, but returned no rows.")?;
                }
                Output::Table(table) => {
                    if tables > 0 {
                        writeln!(self.output)?;
                    }
                    write!(self.output, "{}", table.render(tables == 0))?;
                    tables += 1;
                }
            }
        }
        Ok(())
    }
}
