// src/handlers/company.rs

use axum::{extract::Query, extract::State, Json};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    config::AppState,
    models::company::{Company, LocationRecord},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct LocationQuery {
    pub company_id: Option<i32>,
}

// GET /api/companies
#[utoipa::path(
    get,
    path = "/api/companies",
    tag = "Empresas",
    responses(
        (status = 200, description = "Empresas cadastradas", body = Vec<Company>)
    )
)]
pub async fn list_companies(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Company>>, AppError> {
    let companies = app_state.company_repo.get_companies().await?;
    Ok(Json(companies))
}

// GET /api/company-locations?companyId=
#[utoipa::path(
    get,
    path = "/api/company-locations",
    tag = "Empresas",
    params(LocationQuery),
    responses(
        (status = 200, description = "Unidades com empresa e município embutidos", body = Vec<LocationRecord>)
    )
)]
pub async fn list_company_locations(
    State(app_state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<Vec<LocationRecord>>, AppError> {
    let locations = app_state.company_repo.get_locations(query.company_id).await?;
    Ok(Json(locations))
}
