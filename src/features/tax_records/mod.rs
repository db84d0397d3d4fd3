pub mod model;

use crate::services::ServiceError;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use model::{JsonError, JsonMunicipalityTax, JsonSuccess, JsonTaxRecord, JsonYearTax};
use tracing::error;

pub fn tax_records_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_all_handler))
        .route("/year/{year}", get(year_handler))
        .route("/municipality/{municipality}", get(municipality_handler))
        .route("/district/{district}", get(district_handler))
        .route("/canton", get(canton_handler))
        .route("/canton/", get(canton_handler))
        .route("/entry/{municipality}/{year}/{tax}", post(create_handler))
        .route(
            "/update_tax/{municipality}/{year}/{tax}",
            put(update_tax_handler),
        )
        .route(
            "/update_year/{municipality}/{year_old}/{year_new}",
            put(update_year_handler),
        )
        .route("/delete/{municipality}/{year}/{tax}", delete(delete_handler))
}

// creating an entry that already exists answers 405, not 409
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ServiceError::NotFound(detail) => (StatusCode::NOT_FOUND, detail),
            ServiceError::Conflict(detail) => (StatusCode::METHOD_NOT_ALLOWED, detail),
            ServiceError::Repository(e) => {
                error!(error = %e, "tax records storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(JsonError { detail })).into_response()
    }
}

async fn list_all_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<JsonTaxRecord>>, ServiceError> {
    let records = state.tax_service.list_all().await?;
    Ok(Json(records.into_iter().map(JsonTaxRecord::from).collect()))
}

async fn year_handler(
    State(state): State<AppState>,
    Path(year): Path<i64>,
) -> Result<Json<Vec<JsonMunicipalityTax>>, ServiceError> {
    let records = state.tax_service.get_by_year(year).await?;
    Ok(Json(
        records.into_iter().map(JsonMunicipalityTax::from).collect(),
    ))
}

async fn municipality_handler(
    State(state): State<AppState>,
    Path(municipality): Path<String>,
) -> Result<Json<Vec<JsonYearTax>>, ServiceError> {
    let records = state.tax_service.get_by_municipality(&municipality).await?;
    Ok(Json(records.into_iter().map(JsonYearTax::from).collect()))
}

async fn district_handler(
    State(state): State<AppState>,
    Path(district): Path<String>,
) -> Result<Json<Vec<JsonYearTax>>, ServiceError> {
    let records = state.tax_service.get_by_district(&district).await?;
    Ok(Json(records.into_iter().map(JsonYearTax::from).collect()))
}

async fn canton_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<JsonYearTax>>, ServiceError> {
    let records = state.tax_service.get_canton().await?;
    Ok(Json(records.into_iter().map(JsonYearTax::from).collect()))
}

async fn create_handler(
    State(state): State<AppState>,
    Path((municipality, year, tax)): Path<(String, i64, i64)>,
) -> Result<Json<JsonSuccess>, ServiceError> {
    let success = state.tax_service.create(&municipality, year, tax).await?;
    Ok(Json(JsonSuccess { success }))
}

async fn update_tax_handler(
    State(state): State<AppState>,
    Path((municipality, year, tax)): Path<(String, i64, i64)>,
) -> Result<Json<JsonSuccess>, ServiceError> {
    let success = state
        .tax_service
        .update_tax(&municipality, year, tax)
        .await?;
    Ok(Json(JsonSuccess { success }))
}

async fn update_year_handler(
    State(state): State<AppState>,
    Path((municipality, year_old, year_new)): Path<(String, i64, i64)>,
) -> Result<Json<JsonSuccess>, ServiceError> {
    let success = state
        .tax_service
        .update_year(&municipality, year_old, year_new)
        .await?;
    Ok(Json(JsonSuccess { success }))
}

async fn delete_handler(
    State(state): State<AppState>,
    Path((municipality, year, tax)): Path<(String, i64, i64)>,
) -> Result<Json<JsonSuccess>, ServiceError> {
    let success = state.tax_service.delete(&municipality, year, tax).await?;
    Ok(Json(JsonSuccess { success }))
}
