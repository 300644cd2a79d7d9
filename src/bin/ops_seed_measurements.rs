use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use clap::Parser;
use measurements_server::db;
use measurements_server::fields::MeasurementField;
use measurements_server::stats;
use rand::Rng;
use sqlx::PgPool;

#[derive(Parser, Debug)]
#[command(
    about = "Ops tool: seed the measurements table with demo daily rows and print per-field summaries."
)]
struct Args {
    #[arg(long)]
    database_url: Option<String>,
    /// Number of daily rows to generate.
    #[arg(long, default_value_t = 200)]
    days: u32,
    /// First day to seed (YYYY-MM-DD). Defaults to today minus --days.
    #[arg(long)]
    start_date: Option<String>,
    /// Keep existing rows instead of clearing the table first.
    #[arg(long, default_value_t = false)]
    append: bool,
}

fn field_scale(field: MeasurementField) -> f64 {
    match field {
        MeasurementField::Field1 => 100.0,
        MeasurementField::Field2 => 50.0,
        MeasurementField::Field3 => 200.0,
    }
}

fn parse_day_arg(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid --start-date (expected YYYY-MM-DD): {raw}"))
}

fn insert_sql() -> String {
    let columns: Vec<&str> = MeasurementField::ALL
        .iter()
        .map(|field| field.as_str())
        .collect();
    let placeholders: Vec<String> = (0..MeasurementField::ALL.len())
        .map(|index| format!("${}", index + 2))
        .collect();
    format!(
        "INSERT INTO measurements (ts, {}) VALUES ($1, {})",
        columns.join(", "),
        placeholders.join(", ")
    )
}

async fn count_measurements(pool: &PgPool) -> Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*)::bigint FROM measurements")
        .fetch_one(pool)
        .await
        .context("failed to count measurements")?;
    Ok(count)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let database_url = args
        .database_url
        .or_else(|| std::env::var("MEASUREMENTS_DATABASE_URL").ok())
        .context("--database-url not provided and MEASUREMENTS_DATABASE_URL is unset")?;

    let pool = db::connect_lazy(&database_url)?;
    db::ensure_schema(&pool)
        .await
        .context("failed to ensure measurements schema")?;

    if !args.append {
        sqlx::query("TRUNCATE measurements")
            .execute(&pool)
            .await
            .context("failed to clear measurements")?;
        println!("Cleared existing measurements.");
    }

    let days = args.days.max(1);
    let start_day = match args.start_date.as_deref() {
        Some(raw) => parse_day_arg(raw)?,
        None => Utc::now().date_naive() - Duration::days(i64::from(days)),
    };

    let sql = insert_sql();
    let mut rng = rand::thread_rng();
    let mut generated: Vec<Vec<f64>> =
        vec![Vec::with_capacity(days as usize); MeasurementField::ALL.len()];
    let mut inserted: u64 = 0;

    for offset in 0..days {
        let day = start_day + Duration::days(i64::from(offset));
        // Noon UTC keeps each row inside its intended day under the default
        // query timezone.
        let ts = Utc.from_utc_datetime(&(day.and_time(NaiveTime::MIN) + Duration::hours(12)));

        let mut insert = sqlx::query(&sql).bind(ts);
        for (index, field) in MeasurementField::ALL.into_iter().enumerate() {
            let value: f64 = rng.gen::<f64>() * field_scale(field);
            generated[index].push(value);
            insert = insert.bind(value);
        }
        let result = insert
            .execute(&pool)
            .await
            .with_context(|| format!("failed to insert measurement for {day}"))?;
        inserted += result.rows_affected();
    }

    let last_day = start_day + Duration::days(i64::from(days) - 1);
    println!("Inserted {inserted} rows covering {start_day} through {last_day}.");
    println!("Measurements total: {}", count_measurements(&pool).await?);

    for (field, values) in MeasurementField::ALL.into_iter().zip(&generated) {
        match stats::summarize(values) {
            Some(summary) => println!(
                "{field}: count={} avg={:.2} min={:.2} max={:.2} stddev={:.2}",
                summary.count, summary.avg, summary.min, summary.max, summary.std_dev
            ),
            None => println!("{field}: no rows generated"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_sql_aligns_placeholders_with_registry() {
        assert_eq!(
            insert_sql(),
            "INSERT INTO measurements (ts, field1, field2, field3) VALUES ($1, $2, $3, $4)"
        );
    }

    #[test]
    fn start_date_argument_parses_trimmed_days() {
        assert_eq!(
            parse_day_arg(" 2024-05-01 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
        );
        assert!(parse_day_arg("May 1, 2024").is_err());
    }
}
