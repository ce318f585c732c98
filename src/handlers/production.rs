// src/handlers/production.rs

use axum::{extract::Query, extract::State, Json};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        geo::Region,
        production::{Crop, ProductionFilter, ProductionRecord},
    },
};

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProductionQuery {
    pub crop_id: Option<i32>,
    pub state_id: Option<i32>,
    #[validate(range(min = 1900, max = 2100, message = "Ano fora do intervalo histórico."))]
    pub year: Option<i32>,
    pub region: Option<Region>,
}

impl From<ProductionQuery> for ProductionFilter {
    fn from(query: ProductionQuery) -> Self {
        ProductionFilter {
            crop_id: query.crop_id,
            state_id: query.state_id,
            year: query.year,
            region: query.region,
        }
    }
}

// GET /api/crops
#[utoipa::path(
    get,
    path = "/api/crops",
    tag = "Produção",
    responses(
        (status = 200, description = "Catálogo de culturas", body = Vec<Crop>)
    )
)]
pub async fn list_crops(State(app_state): State<AppState>) -> Result<Json<Vec<Crop>>, AppError> {
    let crops = app_state.production_repo.get_crops().await?;
    Ok(Json(crops))
}

// GET /api/crop-production?cropId=&stateId=&year=&region=
#[utoipa::path(
    get,
    path = "/api/crop-production",
    tag = "Produção",
    params(ProductionQuery),
    responses(
        (status = 200, description = "Registros de produção com município, estado e cultura embutidos", body = Vec<ProductionRecord>)
    )
)]
pub async fn list_crop_production(
    State(app_state): State<AppState>,
    Query(query): Query<ProductionQuery>,
) -> Result<Json<Vec<ProductionRecord>>, AppError> {
    query.validate().map_err(AppError::ValidationError)?;

    let records = app_state
        .production_repo
        .get_production(&query.into())
        .await?;
    Ok(Json(records))
}
