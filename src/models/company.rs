// src/models/company.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::geo::Municipality;

// --- Empresas exibidas como camada própria no mapa ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: i32,
    pub name: String,
    pub color: String,
    pub is_active: bool,
}

// --- Unidades/filiais de uma empresa ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyLocation {
    pub id: i32,
    pub company_id: i32,
    pub municipality_id: i32,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub name: Option<String>,
}

// Unidade com empresa e município embutidos.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LocationRecord {
    #[serde(flatten)]
    pub location: CompanyLocation,
    pub company: Company,
    pub municipality: Municipality,
}
