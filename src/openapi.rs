use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "measurements-server",
        description = "Paginated series slices and summary statistics over periodic measurements"
    ),
    paths(
        crate::routes::health::healthz_handler,
        crate::routes::measurements::get_measurements,
        crate::routes::measurements::get_measurement_metrics,
    ),
    components(schemas(
        crate::routes::health::HealthResponse,
        crate::routes::measurements::SeriesResponse,
        crate::routes::measurements::SeriesPoint,
        crate::routes::measurements::FieldMetricsResponse,
        crate::fields::MeasurementField,
    )),
    tags(
        (name = "measurements", description = "Measurement series and aggregate summaries")
    )
)]
pub struct ApiDoc;

pub fn openapi_json() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

async fn serve_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(openapi_json())
}

pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(serve_openapi))
}
