// src/handlers/map.rs

use axum::{extract::Query, extract::State, Json};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{geo::Region, production::ProductionFilter},
    services::map_scale::{self, LegendBucket, MapMarker, ScaleMode},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MarkerQuery {
    pub crop_id: Option<i32>,
    pub state_id: Option<i32>,
    pub year: Option<i32>,
    pub region: Option<Region>,
    // buckets (padrão) ou heat
    #[serde(default)]
    pub mode: ScaleMode,
}

// GET /api/map/legend
#[utoipa::path(
    get,
    path = "/api/map/legend",
    tag = "Mapa",
    responses(
        (status = 200, description = "As 7 faixas fixas de hectares com cor e raio", body = Vec<LegendBucket>)
    )
)]
pub async fn get_legend() -> Json<Vec<LegendBucket>> {
    Json(map_scale::hectare_ranges())
}

// GET /api/map/markers?cropId=&stateId=&year=&region=&mode=
#[utoipa::path(
    get,
    path = "/api/map/markers",
    tag = "Mapa",
    params(MarkerQuery),
    responses(
        (status = 200, description = "Marcadores prontos para desenhar, com cor e raio calculados", body = Vec<MapMarker>)
    )
)]
pub async fn list_markers(
    State(app_state): State<AppState>,
    Query(query): Query<MarkerQuery>,
) -> Result<Json<Vec<MapMarker>>, AppError> {
    let filter = ProductionFilter {
        crop_id: query.crop_id,
        state_id: query.state_id,
        year: query.year,
        region: query.region,
    };
    let records = app_state.production_repo.get_production(&filter).await?;
    Ok(Json(map_scale::build_markers(&records, query.mode)))
}
