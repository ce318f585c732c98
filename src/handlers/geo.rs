// src/handlers/geo.rs

use axum::{extract::Query, extract::State, Json};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    config::AppState,
    models::geo::{Municipality, State as Uf},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MunicipalityQuery {
    pub state_id: Option<i32>,
}

// GET /api/states
#[utoipa::path(
    get,
    path = "/api/states",
    tag = "Geografia",
    responses(
        (status = 200, description = "As 27 UFs com suas regiões", body = Vec<Uf>)
    )
)]
pub async fn list_states(State(app_state): State<AppState>) -> Result<Json<Vec<Uf>>, AppError> {
    let states = app_state.geo_repo.get_states().await?;
    Ok(Json(states))
}

// GET /api/municipalities?stateId=
#[utoipa::path(
    get,
    path = "/api/municipalities",
    tag = "Geografia",
    params(MunicipalityQuery),
    responses(
        (status = 200, description = "Municípios, opcionalmente filtrados por UF", body = Vec<Municipality>)
    )
)]
pub async fn list_municipalities(
    State(app_state): State<AppState>,
    Query(query): Query<MunicipalityQuery>,
) -> Result<Json<Vec<Municipality>>, AppError> {
    let municipalities = match query.state_id {
        Some(state_id) => app_state.geo_repo.get_municipalities_by_state(state_id).await?,
        None => app_state.geo_repo.get_municipalities().await?,
    };
    Ok(Json(municipalities))
}
