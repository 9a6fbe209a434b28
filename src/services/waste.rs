//! Waste service — transactions, catalog lookups, and report queries.
//!
//! DESIGN
//! ======
//! A transaction records one weighing: which food was thrown away, why,
//! how much it weighed, and when. Value is always derived as
//! `weight * food.price` at query time, never stored.
//!
//! Dates are stored as UTC wall-clock timestamps. Range filters are
//! inclusive at both ends.
//!
//! ERROR HANDLING
//! ==============
//! Recording a transaction runs in one SQL transaction: if the reason does
//! not exist, a food created on the fly for that submission is rolled back
//! with it. The transaction begins `IMMEDIATE` so concurrent submissions
//! queue on the write lock instead of failing on a read-to-write upgrade.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

/// How many foods the CO₂ report returns.
pub const CO2_REPORT_LIMIT: i64 = 5;

/// Message attached to an empty filtered summary.
pub const NO_RECORDS_MESSAGE: &str = "no records found for the given date range and reason";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum WasteError {
    #[error("reason not found")]
    ReasonNotFound(i64),
    #[error("food name already in use: {0}")]
    FoodNameTaken(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("start date cannot be after end date")]
    InvalidRange,
    #[error("invalid date: {0}")]
    InvalidDate(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Body of a scale submission.
///
/// Field names follow the kiosk client: `foodId`, `foodPrice`, `motivoId`.
#[derive(Debug, Clone, Deserialize)]
pub struct Submission {
    #[serde(rename = "foodId")]
    pub food_id: i64,
    #[serde(rename = "foodPrice")]
    pub food_price: f64,
    #[serde(rename = "motivoId", alias = "reasonId")]
    pub reason_id: i64,
    /// Name used if the food does not exist yet.
    #[serde(rename = "foodName", default)]
    pub food_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodRow {
    pub food_id: i64,
    pub food_name: String,
    pub price: f64,
    pub co2_emission: f64,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    pub transaction_id: i64,
    pub food_id: i64,
    pub reason_id: i64,
    pub weight: f64,
    pub date: PrimitiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub total_weight: f64,
    pub total_value: f64,
    pub total_transactions: i64,
}

/// Summary over a filtered window, with a note when nothing matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredSummary {
    #[serde(flatten)]
    pub summary: Summary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Total cost wasted for one (food, reason) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphPoint {
    pub food_name: String,
    /// Reason name.
    pub label: String,
    pub total_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Co2Point {
    pub food_name: String,
    pub total_co2_emission: f64,
}

// =============================================================================
// TRANSACTIONS
// =============================================================================

/// Current UTC time without offset, matching stored dates.
#[must_use]
pub fn now_utc() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc();
    PrimitiveDateTime::new(now.date(), now.time())
}

/// Record a weighing for `submission` at `date`.
///
/// Creates the food when it is unknown, using the submitted price and name
/// (`food-{id}` when no name is given). The reason must already exist.
///
/// # Errors
///
/// Returns `ReasonNotFound` if the reason is unknown, `FoodNameTaken` if a
/// new food's name belongs to another food, or a database error.
pub async fn record_transaction(
    pool: &SqlitePool,
    submission: &Submission,
    weight: f64,
    date: PrimitiveDateTime,
) -> Result<TransactionRow, WasteError> {
    let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;

    let food = sqlx::query_as::<_, (i64,)>("SELECT food_id FROM foods WHERE food_id = ?")
        .bind(submission.food_id)
        .fetch_optional(&mut *tx)
        .await?;
    if food.is_none() {
        let name = submission
            .food_name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| format!("food-{}", submission.food_id));
        let taken = sqlx::query_as::<_, (i64,)>("SELECT food_id FROM foods WHERE food_name = ?")
            .bind(&name)
            .fetch_optional(&mut *tx)
            .await?;
        if taken.is_some() {
            return Err(WasteError::FoodNameTaken(name));
        }
        sqlx::query("INSERT INTO foods (food_id, food_name, price) VALUES (?, ?, ?)")
            .bind(submission.food_id)
            .bind(name)
            .bind(submission.food_price)
            .execute(&mut *tx)
            .await?;
    }

    let reason = sqlx::query_as::<_, (i64,)>("SELECT reason_id FROM reasons WHERE reason_id = ?")
        .bind(submission.reason_id)
        .fetch_optional(&mut *tx)
        .await?;
    if reason.is_none() {
        return Err(WasteError::ReasonNotFound(submission.reason_id));
    }

    let (transaction_id,) = sqlx::query_as::<_, (i64,)>(
        "INSERT INTO transactions (food_id, reason_id, weight, date)
         VALUES (?, ?, ?, ?)
         RETURNING transaction_id",
    )
    .bind(submission.food_id)
    .bind(submission.reason_id)
    .bind(weight)
    .bind(date)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(TransactionRow { transaction_id, food_id: submission.food_id, reason_id: submission.reason_id, weight, date })
}

// =============================================================================
// REPORTS
// =============================================================================

/// Totals over every recorded transaction.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn summary(pool: &SqlitePool) -> Result<Summary, WasteError> {
    let (total_weight, total_value, total_transactions) = sqlx::query_as::<_, (f64, f64, i64)>(
        "SELECT CAST(COALESCE(SUM(t.weight), 0) AS REAL),
                CAST(COALESCE(SUM(t.weight * f.price), 0) AS REAL),
                COUNT(t.transaction_id)
         FROM transactions t
         LEFT JOIN foods f ON f.food_id = t.food_id",
    )
    .fetch_one(pool)
    .await?;

    Ok(Summary { total_weight, total_value, total_transactions })
}

/// Wasted cost per (food, reason), most expensive first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn graph_data(pool: &SqlitePool) -> Result<Vec<GraphPoint>, WasteError> {
    let rows = sqlx::query_as::<_, (String, String, f64)>(
        "SELECT f.food_name, r.name, CAST(SUM(t.weight * f.price) AS REAL) AS total_cost
         FROM transactions t
         JOIN foods f ON f.food_id = t.food_id
         JOIN reasons r ON r.reason_id = t.reason_id
         GROUP BY f.food_name, r.name
         ORDER BY total_cost DESC, f.food_name ASC, r.name ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(food_name, label, total_cost)| GraphPoint { food_name, label, total_cost })
        .collect())
}

/// Foods with the highest accumulated CO₂ emission across their
/// transactions, highest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn top_co2_emitters(pool: &SqlitePool, limit: i64) -> Result<Vec<Co2Point>, WasteError> {
    let rows = sqlx::query_as::<_, (String, f64)>(
        "SELECT f.food_name, CAST(SUM(f.co2_emission) AS REAL) AS total_co2_emission
         FROM transactions t
         JOIN foods f ON f.food_id = t.food_id
         GROUP BY f.food_name
         ORDER BY total_co2_emission DESC, f.food_name ASC
         LIMIT ?",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(food_name, total_co2_emission)| Co2Point { food_name, total_co2_emission })
        .collect())
}

/// Reason names mapped to their ids.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn reasons(pool: &SqlitePool) -> Result<BTreeMap<String, i64>, WasteError> {
    let rows = sqlx::query_as::<_, (i64, String)>("SELECT reason_id, name FROM reasons ORDER BY reason_id")
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(|(id, name)| (name, id)).collect())
}

/// The full food catalog, ordered by id.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn foods(pool: &SqlitePool) -> Result<Vec<FoodRow>, WasteError> {
    let rows = sqlx::query_as::<_, (i64, String, f64, f64, Option<String>)>(
        "SELECT food_id, food_name, price, co2_emission, image FROM foods ORDER BY food_id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(food_id, food_name, price, co2_emission, image)| FoodRow {
            food_id,
            food_name,
            price,
            co2_emission,
            image,
        })
        .collect())
}

/// Totals over transactions dated within `[start, end]`, optionally
/// restricted to one reason.
///
/// # Errors
///
/// Returns `InvalidRange` if `start` is after `end`, or a database error.
pub async fn filter_by_date_and_reason(
    pool: &SqlitePool,
    start: PrimitiveDateTime,
    end: PrimitiveDateTime,
    reason_id: Option<i64>,
) -> Result<FilteredSummary, WasteError> {
    if start > end {
        return Err(WasteError::InvalidRange);
    }

    let (total_weight, total_value, total_transactions) = sqlx::query_as::<_, (f64, f64, i64)>(
        "SELECT CAST(COALESCE(SUM(t.weight), 0) AS REAL),
                CAST(COALESCE(SUM(t.weight * f.price), 0) AS REAL),
                COUNT(t.transaction_id)
         FROM transactions t
         LEFT JOIN foods f ON f.food_id = t.food_id
         WHERE t.date >= ? AND t.date <= ?
           AND (? IS NULL OR t.reason_id = ?)",
    )
    .bind(start)
    .bind(end)
    .bind(reason_id)
    .bind(reason_id)
    .fetch_one(pool)
    .await?;

    let message = (total_transactions == 0).then(|| NO_RECORDS_MESSAGE.to_owned());
    Ok(FilteredSummary { summary: Summary { total_weight, total_value, total_transactions }, message })
}

// =============================================================================
// DATE PARSING
// =============================================================================

/// Parse a query-string date into UTC wall-clock time.
///
/// Accepts RFC 3339 with an offset (converted to UTC), a naive
/// `YYYY-MM-DDTHH:MM[:SS[.fff]]` timestamp (`T` or space separated), or a
/// bare `YYYY-MM-DD` (midnight).
///
/// # Errors
///
/// Returns `InvalidDate` if none of the formats match.
pub fn parse_query_datetime(raw: &str) -> Result<PrimitiveDateTime, WasteError> {
    let raw = raw.trim();

    if let Ok(dt) = OffsetDateTime::parse(raw, &Rfc3339) {
        let utc = dt.to_offset(UtcOffset::UTC);
        return Ok(PrimitiveDateTime::new(utc.date(), utc.time()));
    }

    let normalized = raw.replacen(' ', "T", 1);
    let naive_formats = [
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]"),
    ];
    for format in naive_formats {
        if let Ok(dt) = PrimitiveDateTime::parse(&normalized, format) {
            return Ok(dt);
        }
    }

    if let Ok(date) = Date::parse(raw, format_description!("[year]-[month]-[day]")) {
        return Ok(PrimitiveDateTime::new(date, Time::MIDNIGHT));
    }

    Err(WasteError::InvalidDate(raw.to_owned()))
}

#[cfg(test)]
#[path = "waste_test.rs"]
mod tests;
