use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;

use crate::error::map_db_error;
use crate::fields::MeasurementField;
use crate::pagination::Page;
use crate::state::AppState;
use crate::store;
use crate::time::{self, DayRange};

#[derive(Debug, Clone, serde::Deserialize, utoipa::IntoParams)]
pub(crate) struct SeriesQuery {
    /// Measurement field to return.
    field: Option<String>,
    /// Inclusive start day (YYYY-MM-DD) in the configured query timezone.
    start_date: Option<String>,
    /// Inclusive end day (YYYY-MM-DD) in the configured query timezone.
    end_date: Option<String>,
    /// 1-based page number; non-numeric input falls back to 1.
    page: Option<String>,
    /// Page size; non-numeric input falls back to 50, clamped to [1, 200].
    limit: Option<String>,
}

#[derive(Debug, Clone, serde::Deserialize, utoipa::IntoParams)]
pub(crate) struct FieldMetricsQuery {
    /// Measurement field to summarize.
    field: Option<String>,
    /// Inclusive start day (YYYY-MM-DD) in the configured query timezone.
    start_date: Option<String>,
    /// Inclusive end day (YYYY-MM-DD) in the configured query timezone.
    end_date: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize, utoipa::ToSchema)]
pub(crate) struct SeriesPoint {
    timestamp: String,
    value: f64,
}

impl From<store::MeasurementPointRow> for SeriesPoint {
    fn from(row: store::MeasurementPointRow) -> Self {
        Self {
            timestamp: row.ts.to_rfc3339(),
            value: row.value,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, utoipa::ToSchema)]
pub(crate) struct SeriesResponse {
    page: i64,
    limit: i64,
    total: i64,
    data: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, serde::Serialize, utoipa::ToSchema)]
pub(crate) struct FieldMetricsResponse {
    field: MeasurementField,
    count: i64,
    avg: f64,
    min: f64,
    max: f64,
    #[serde(rename = "stdDev")]
    std_dev: f64,
}

fn resolve_field(raw: Option<&str>) -> Result<MeasurementField, (StatusCode, String)> {
    raw.and_then(MeasurementField::parse).ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            format!(
                "Invalid or missing 'field'. Use {}",
                MeasurementField::allowed_list()
            ),
        )
    })
}

/// Absent or blank bounds are "no bound": input is trimmed first, so a
/// whitespace-only value counts as absent rather than malformed. A present
/// but malformed bound is a rejection naming the offending parameter, raised
/// before any datastore work.
fn parse_day_param(
    raw: Option<&str>,
    name: &str,
) -> Result<Option<NaiveDate>, (StatusCode, String)> {
    let Some(value) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(None);
    };
    match time::parse_day(value) {
        Some(date) => Ok(Some(date)),
        None => Err((
            StatusCode::BAD_REQUEST,
            format!("Invalid {name} format. Use YYYY-MM-DD"),
        )),
    }
}

#[utoipa::path(
    get,
    path = "/api/measurements",
    tag = "measurements",
    params(SeriesQuery),
    responses(
        (status = 200, description = "One page of the series, oldest first", body = SeriesResponse),
        (status = 400, description = "Invalid field or date parameter"),
        (status = 500, description = "Internal server error")
    )
)]
pub(crate) async fn get_measurements(
    State(state): State<AppState>,
    Query(query): Query<SeriesQuery>,
) -> Result<Json<SeriesResponse>, (StatusCode, String)> {
    let field = resolve_field(query.field.as_deref())?;
    let start_day = parse_day_param(query.start_date.as_deref(), "start_date")?;
    let end_day = parse_day_param(query.end_date.as_deref(), "end_date")?;
    let page = Page::resolve(query.page.as_deref(), query.limit.as_deref());
    let range = DayRange::resolve(&state.config.query_tz, start_day, end_day);

    // Two plain reads with no shared snapshot; rows inserted between them can
    // skew total relative to the page contents.
    let total = store::count_in_range(&state.db, &range)
        .await
        .map_err(map_db_error)?;
    let rows = store::fetch_series_page(&state.db, field, &range, page.limit, page.offset())
        .await
        .map_err(map_db_error)?;

    Ok(Json(SeriesResponse {
        page: page.page,
        limit: page.limit,
        total,
        data: rows.into_iter().map(SeriesPoint::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/measurements/metrics",
    tag = "measurements",
    params(FieldMetricsQuery),
    responses(
        (status = 200, description = "Summary statistics for the field", body = FieldMetricsResponse),
        (status = 400, description = "Invalid field or date parameter"),
        (status = 404, description = "No data in the range"),
        (status = 500, description = "Internal server error")
    )
)]
pub(crate) async fn get_measurement_metrics(
    State(state): State<AppState>,
    Query(query): Query<FieldMetricsQuery>,
) -> Result<Json<FieldMetricsResponse>, (StatusCode, String)> {
    let field = resolve_field(query.field.as_deref())?;
    let start_day = parse_day_param(query.start_date.as_deref(), "start_date")?;
    let end_day = parse_day_param(query.end_date.as_deref(), "end_date")?;
    let range = DayRange::resolve(&state.config.query_tz, start_day, end_day);

    let row = store::summarize_in_range(&state.db, field, &range)
        .await
        .map_err(map_db_error)?;
    if row.count == 0 {
        return Err((
            StatusCode::NOT_FOUND,
            "No data found for the specified range".to_string(),
        ));
    }

    Ok(Json(FieldMetricsResponse {
        field,
        count: row.count,
        avg: row.avg,
        min: row.min,
        max: row.max,
        std_dev: row.std_dev,
    }))
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/measurements", get(get_measurements))
        .route("/measurements/metrics", get(get_measurement_metrics))
}
