//! Round result persistence: dedup-on-write inserts and range queries.
//!
//! The `round_results` table is append-only from this crate's point of
//! view: rows are never updated or deleted here. Deduplication is
//! enforced by the table's uniqueness constraint on `occurred_at`, so
//! an insert and its duplicate check are one atomic statement; the
//! pattern stays correct even if a second collector instance is ever
//! pointed at the same database.

use catalogo_types::{Color, RoundResult};
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::DbError;

/// Outcome of an idempotent insert attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The result was persisted; carries the store-assigned id.
    Inserted(i64),
    /// A result with the same `occurred_at` already exists; the call
    /// was a no-op. This is expected and benign, not an error.
    Duplicate,
}

/// Ordering of a range query by `occurred_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Oldest first (required by the statistics engine).
    Ascending,
    /// Newest first (used by the results listing).
    Descending,
}

/// Operations on the `round_results` table.
pub struct ResultStore<'a> {
    pool: &'a PgPool,
}

impl<'a> ResultStore<'a> {
    /// Create a new result store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Attempt to persist a classified result, deduplicating on
    /// `occurred_at`.
    ///
    /// `INSERT ... ON CONFLICT DO NOTHING RETURNING id` collapses the
    /// check and the insert into one atomic statement: a returned row
    /// means the result is newly persisted, no row means an identical
    /// instant was already recorded. Safe to call repeatedly with the
    /// same input; the store converges to one copy.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the insert fails for any reason
    /// other than the uniqueness conflict.
    pub async fn insert_if_absent(
        &self,
        number: i32,
        color: Color,
        occurred_at: DateTime<Utc>,
    ) -> Result<InsertOutcome, DbError> {
        let row: Option<(i64,)> = sqlx::query_as(
            r"INSERT INTO round_results (number, color, occurred_at)
              VALUES ($1, $2, $3)
              ON CONFLICT (occurred_at) DO NOTHING
              RETURNING id",
        )
        .bind(number)
        .bind(color.as_str())
        .bind(occurred_at)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map_or(InsertOutcome::Duplicate, |(id,)| {
            InsertOutcome::Inserted(id)
        }))
    }

    /// Query all results whose `occurred_at` falls within the closed
    /// interval `[start, end]`, ordered by `occurred_at`.
    ///
    /// The result is materialized, not a live cursor.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn query_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        order: SortOrder,
    ) -> Result<Vec<RoundResult>, DbError> {
        let sql = match order {
            SortOrder::Ascending => {
                r"SELECT id, number, color, occurred_at
                  FROM round_results
                  WHERE occurred_at BETWEEN $1 AND $2
                  ORDER BY occurred_at ASC"
            }
            SortOrder::Descending => {
                r"SELECT id, number, color, occurred_at
                  FROM round_results
                  WHERE occurred_at BETWEEN $1 AND $2
                  ORDER BY occurred_at DESC"
            }
        };

        let rows: Vec<ResultRow> = sqlx::query_as(sql)
            .bind(start)
            .bind(end)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(RoundResult::from).collect())
    }
}

/// A row from the `round_results` table.
///
/// Uses runtime types rather than compile-time checked types to avoid
/// requiring a live database during builds. The color is stored as
/// text and parsed back leniently on read.
#[derive(Debug, Clone, sqlx::FromRow)]
struct ResultRow {
    /// Auto-incremented result id.
    id: i64,
    /// The raw roll value.
    number: i32,
    /// Color name (`red`, `black`, `white`, `unknown`).
    color: String,
    /// When the round occurred (UTC in the database).
    occurred_at: DateTime<Utc>,
}

impl From<ResultRow> for RoundResult {
    fn from(row: ResultRow) -> Self {
        Self {
            id: row.id,
            number: row.number,
            color: Color::from_name(&row.color),
            occurred_at: row.occurred_at,
        }
    }
}
