use std::str::FromStr;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{FromRow, Pool, Row, Sqlite};

use crate::error::{AgriError, AgriResult};

pub type DbPool = Pool<Sqlite>;

pub async fn init_pool(database_url: &str) -> AgriResult<DbPool> {
    let opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    // An in-memory database lives only as long as its connection, so keep exactly one open.
    let in_memory = database_url.contains(":memory:");
    let (max_connections, idle, lifetime) = if in_memory {
        (1, None, None)
    } else {
        (
            5,
            Some(Duration::from_secs(120)),
            Some(Duration::from_secs(300)),
        )
    };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(30))
        .idle_timeout(idle)
        .max_lifetime(lifetime)
        .connect_with(opts)
        .await?;
    Ok(pool)
}

pub async fn init_database(pool: &DbPool) -> AgriResult<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database schema is up to date");
    Ok(())
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    #[serde(skip_serializing)]
    pub password: String,
    #[sqlx(default)]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Crop {
    pub crop_id: i64,
    pub crop_type: String,
    pub cultivated_area: f64,
    pub planting_date: NaiveDate,
    pub harvest_date: Option<NaiveDate>,
    pub growth_state: String,
    pub treatment_needs: Option<String>,
    pub user_id: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Harvest {
    pub harvest_id: i64,
    pub harvest_date: NaiveDate,
    pub quantity: f64,
    pub area: f64,
    pub crop_id: i64,
    pub user_id: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Silo {
    pub silo_id: i64,
    pub name: String,
    pub capacity: f64,
    pub content: f64,
    pub harvest_id: i64,
    pub user_id: i64,
}

impl Silo {
    /// Percentage of capacity in use; zero-capacity silos report 0.
    pub fn fill_percent(&self) -> f64 {
        if self.capacity > 0.0 {
            self.content / self.capacity * 100.0
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PointOfSale {
    pub pos_id: i64,
    pub name: String,
    pub address: String,
    pub user_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Sale {
    pub sale_id: i64,
    pub sale_date: NaiveDate,
    pub quantity_sold: f64,
    pub price: Decimal,
    pub pos_id: i64,
    pub user_id: i64,
}

// SQLite has no decimal type; the price column is stored as text.
impl<'r> FromRow<'r, SqliteRow> for Sale {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let raw_price: String = row.try_get("price")?;
        let price = Decimal::from_str(&raw_price).map_err(|e| sqlx::Error::ColumnDecode {
            index: "price".to_string(),
            source: Box::new(e),
        })?;

        Ok(Sale {
            sale_id: row.try_get("sale_id")?,
            sale_date: row.try_get("sale_date")?,
            quantity_sold: row.try_get("quantity_sold")?,
            price,
            pos_id: row.try_get("pos_id")?,
            user_id: row.try_get("user_id")?,
        })
    }
}

/// Exclusive bound; DECIMAL(10,2) tops out at 99999999.99.
const PRICE_LIMIT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

/// Normalizes a price to the stored DECIMAL(10,2) text form: always two decimals,
/// at most eight integer digits.
pub fn price_to_db(price: Decimal) -> AgriResult<String> {
    let mut rounded = price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.abs() >= PRICE_LIMIT {
        return Err(AgriError::Validation(format!(
            "price {} exceeds 10 digits with 2 decimals",
            price
        )));
    }
    rounded.rescale(2);
    Ok(rounded.to_string())
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Vehicle {
    pub vehicle_id: i64,
    pub plate: String,
    pub load_capacity: f64,
    pub harvest_id: i64,
    pub user_id: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Assignment {
    pub assignment_id: i64,
    pub assignment_date: NaiveDate,
    pub product_quantity: f64,
    pub vehicle_id: i64,
    pub pos_id: i64,
    pub user_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_rounds_to_cents() {
        assert_eq!(price_to_db(Decimal::new(12345, 3)).unwrap(), "12.35");
        assert_eq!(price_to_db(Decimal::new(19999, 3)).unwrap(), "20.00");
    }

    #[test]
    fn test_price_always_has_two_decimals() {
        assert_eq!(price_to_db(Decimal::new(5, 0)).unwrap(), "5.00");
        assert_eq!(price_to_db(Decimal::new(185, 1)).unwrap(), "18.50");
        assert_eq!(price_to_db(Decimal::new(9999999999, 2)).unwrap(), "99999999.99");
    }

    #[test]
    fn test_price_beyond_decimal_10_2_is_rejected() {
        assert!(matches!(
            price_to_db(Decimal::new(100_000_000, 0)),
            Err(AgriError::Validation(_))
        ));
        // Rounds up past the limit.
        assert!(price_to_db(Decimal::new(99999999995, 3)).is_err());
        assert!(price_to_db(Decimal::new(123456789012345678, 3)).is_err());
    }

    #[test]
    fn test_silo_fill_percent() {
        let silo = Silo {
            silo_id: 1,
            name: "North".to_string(),
            capacity: 200.0,
            content: 50.0,
            harvest_id: 1,
            user_id: 1,
        };
        assert_eq!(silo.fill_percent(), 25.0);

        let empty = Silo { capacity: 0.0, ..silo };
        assert_eq!(empty.fill_percent(), 0.0);
    }
}
