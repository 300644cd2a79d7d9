use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

use crate::fields::MeasurementField;

pub fn connect_lazy(database_url: &str) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(8))
        .connect_lazy(database_url)
        .with_context(|| format!("Failed to create lazy database pool for {database_url}"))
}

/// Creates the measurements table and its timestamp index if they are
/// missing. Idempotent; the column list is driven by the field registry so a
/// newly registered field appears here without further changes.
pub async fn ensure_schema(db: &PgPool) -> Result<(), sqlx::Error> {
    let field_columns: Vec<String> = MeasurementField::ALL
        .iter()
        .map(|field| format!("{} DOUBLE PRECISION NOT NULL", field.as_str()))
        .collect();
    let create_table = format!(
        r#"
        CREATE TABLE IF NOT EXISTS measurements (
            id BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
            ts TIMESTAMPTZ NOT NULL,
            {}
        )
        "#,
        field_columns.join(",\n            ")
    );
    sqlx::query(&create_table).execute(db).await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS measurements_ts_idx ON measurements (ts, id)")
        .execute(db)
        .await?;
    Ok(())
}
