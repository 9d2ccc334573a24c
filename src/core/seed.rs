//! Startup seeding of staff and fleet from the shop configuration.
//!
//! Each section is applied only while its table is still empty, so running the shop
//! again against the same database never duplicates seed data.

use crate::{
    config::shop::ShopConfig,
    core::{bike, employee},
    entities::{Bike, Employee},
    errors::Result,
};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use tracing::{debug, info};

/// What a seeding run inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Employees inserted
    pub employees: usize,
    /// Bikes allocated
    pub bikes: usize,
}

/// Inserts the configured employees and bikes into empty tables.
///
/// # Errors
/// Returns an error if a configured bike category is unknown or a database operation
/// fails.
pub async fn seed_from_config(db: &DatabaseConnection, config: &ShopConfig) -> Result<SeedSummary> {
    let mut summary = SeedSummary::default();

    if config.employees.is_empty() || Employee::find().count(db).await? > 0 {
        debug!("Skipping employee seed");
    } else {
        for entry in &config.employees {
            employee::add_employee(db, entry.name.clone(), entry.position.clone()).await?;
            summary.employees += 1;
        }
    }

    if config.bikes.is_empty() || Bike::find().count(db).await? > 0 {
        debug!("Skipping bike seed");
    } else {
        for entry in &config.bikes {
            let category = entry.category.parse()?;
            bike::allocate_bike(db, category, entry.model.clone()).await?;
            summary.bikes += 1;
        }
    }

    info!(
        "Seeded {} employees and {} bikes",
        summary.employees, summary.bikes
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::errors::Error;
    use crate::test_utils::setup_test_db;

    fn config() -> ShopConfig {
        toml::from_str(
            r#"
            [[employees]]
            name = "Sam"
            position = "Mechanic"

            [[bikes]]
            category = "Electric"
            model = "E-Cruiser"

            [[bikes]]
            category = "electric"
            model = "E-Cruiser"

            [[bikes]]
            category = "Child"
            model = "Tiny"
            "#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_seed_is_applied_once() -> Result<()> {
        let db = setup_test_db().await?;

        let summary = seed_from_config(&db, &config()).await?;
        assert_eq!(
            summary,
            SeedSummary {
                employees: 1,
                bikes: 3
            }
        );

        let mut ids: Vec<i64> = Bike::find().all(&db).await?.iter().map(|b| b.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![201, 301, 302]);

        let again = seed_from_config(&db, &config()).await?;
        assert_eq!(again, SeedSummary::default());
        assert_eq!(Bike::find().count(&db).await?, 3);
        assert_eq!(Employee::find().count(&db).await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_rejects_unknown_category() -> Result<()> {
        let db = setup_test_db().await?;
        let config: ShopConfig =
            toml::from_str("[[bikes]]\ncategory = \"Unicycle\"\nmodel = \"Solo\"").unwrap();

        let result = seed_from_config(&db, &config).await;
        assert!(matches!(result, Err(Error::InvalidCategory { name: _ })));

        Ok(())
    }
}
