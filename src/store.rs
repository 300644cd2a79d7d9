use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::fields::MeasurementField;
use crate::time::DayRange;

// Field columns are interpolated into SQL text via the registry's static
// names; raw request text never reaches query construction.

#[derive(sqlx::FromRow)]
pub(crate) struct MeasurementPointRow {
    pub(crate) ts: DateTime<Utc>,
    pub(crate) value: f64,
}

#[derive(sqlx::FromRow)]
pub(crate) struct FieldSummaryRow {
    pub(crate) count: i64,
    pub(crate) avg: f64,
    pub(crate) min: f64,
    pub(crate) max: f64,
    pub(crate) std_dev: f64,
}

/// Number of rows matching the range filter, independent of any paging.
pub(crate) async fn count_in_range(pool: &PgPool, range: &DayRange) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*)::bigint
        FROM measurements
        WHERE ($1::timestamptz IS NULL OR ts >= $1)
          AND ($2::timestamptz IS NULL OR ts < $2)
        "#,
    )
    .bind(range.start)
    .bind(range.end_exclusive)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// One page of `(ts, value)` pairs for a single field, oldest first. Ties on
/// `ts` break by row id so consecutive pages never overlap.
pub(crate) async fn fetch_series_page(
    pool: &PgPool,
    field: MeasurementField,
    range: &DayRange,
    limit: i64,
    offset: i64,
) -> Result<Vec<MeasurementPointRow>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT ts, {column}::double precision AS value
        FROM measurements
        WHERE ($1::timestamptz IS NULL OR ts >= $1)
          AND ($2::timestamptz IS NULL OR ts < $2)
        ORDER BY ts ASC, id ASC
        LIMIT $3 OFFSET $4
        "#,
        column = field.as_str()
    );
    sqlx::query_as(&sql)
        .bind(range.start)
        .bind(range.end_exclusive)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
}

/// One-shot aggregate over the filtered rows. The COALESCEs only matter for
/// the zero-row case, which callers turn into "no data" before the zeros can
/// be mistaken for real statistics.
pub(crate) async fn summarize_in_range(
    pool: &PgPool,
    field: MeasurementField,
    range: &DayRange,
) -> Result<FieldSummaryRow, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT
          COUNT(*)::bigint AS count,
          COALESCE(AVG({column}), 0)::double precision AS avg,
          COALESCE(MIN({column}), 0)::double precision AS min,
          COALESCE(MAX({column}), 0)::double precision AS max,
          COALESCE(STDDEV_POP({column}), 0)::double precision AS std_dev
        FROM measurements
        WHERE ($1::timestamptz IS NULL OR ts >= $1)
          AND ($2::timestamptz IS NULL OR ts < $2)
        "#,
        column = field.as_str()
    );
    sqlx::query_as(&sql)
        .bind(range.start)
        .bind(range.end_exclusive)
        .fetch_one(pool)
        .await
}
