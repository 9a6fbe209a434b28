//! Database initialization, migrations, and default catalog seeding.
//!
//! SYSTEM CONTEXT
//! ==============
//! Startup uses this module to open the shared SQLite pool, enforce schema
//! migrations, and make sure the food and reason catalogs are populated
//! before the scale or the API can record transactions.

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use tracing::info;

/// Foods seeded into an empty catalog: id, name, price, image, CO₂ emission.
const DEFAULT_FOODS: [(i64, &str, f64, &str, f64); 3] = [
    (1, "Frango", 20.00, "frango.jpg", 6.5),
    (2, "Carne", 35.00, "carne.jpg", 60.0),
    (3, "Arroz", 7.00, "arroz.jpg", 2.5),
];

/// Waste reasons seeded into an empty catalog.
const DEFAULT_REASONS: [(i64, &str); 3] = [(1, "Validade"), (2, "Sobra"), (3, "Resto")];

/// How long a connection waits on another writer's lock before failing.
pub const DB_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open the SQLite pool (creating the file if needed) and run migrations.
///
/// File databases run in WAL mode so report reads do not block writers;
/// writers queue on the lock for up to [`DB_BUSY_TIMEOUT`].
///
/// # Errors
///
/// Returns an error if the URL is malformed, the connection fails, or a
/// migration fails.
pub async fn init_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(DB_BUSY_TIMEOUT);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;

    Ok(pool)
}

/// Apply pending schema migrations.
///
/// # Errors
///
/// Returns an error if a migration fails.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::migrate!("src/db/migrations").run(pool).await?;
    Ok(())
}

/// Insert the default foods and reasons into tables that are still empty.
/// Tables that already hold rows are left untouched.
///
/// # Errors
///
/// Returns an error if a count or insert fails.
pub async fn seed_defaults(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let (food_count,) = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM foods")
        .fetch_one(pool)
        .await?;
    if food_count == 0 {
        let mut tx = pool.begin().await?;
        for (food_id, food_name, price, image, co2_emission) in DEFAULT_FOODS {
            sqlx::query("INSERT INTO foods (food_id, food_name, price, image, co2_emission) VALUES (?, ?, ?, ?, ?)")
                .bind(food_id)
                .bind(food_name)
                .bind(price)
                .bind(image)
                .bind(co2_emission)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        info!(count = DEFAULT_FOODS.len(), "seeded default foods");
    }

    let (reason_count,) = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM reasons")
        .fetch_one(pool)
        .await?;
    if reason_count == 0 {
        let mut tx = pool.begin().await?;
        for (reason_id, name) in DEFAULT_REASONS {
            sqlx::query("INSERT INTO reasons (reason_id, name) VALUES (?, ?)")
                .bind(reason_id)
                .bind(name)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        info!(count = DEFAULT_REASONS.len(), "seeded default reasons");
    }

    Ok(())
}
