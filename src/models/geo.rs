// src/models/geo.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// --- Macrorregiões do Brasil ---
// Armazenada como enum no Postgres (tipo `region`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "region")]
pub enum Region {
    #[sqlx(rename = "Norte")]
    Norte,
    #[sqlx(rename = "Nordeste")]
    Nordeste,
    #[sqlx(rename = "Centro-Oeste")]
    #[serde(rename = "Centro-Oeste")]
    CentroOeste,
    #[sqlx(rename = "Sudeste")]
    Sudeste,
    #[sqlx(rename = "Sul")]
    Sul,
}

// --- Estados (UFs) ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct State {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub region: Region,
}

// --- Municípios ---
// Latitude/longitude são NUMERIC no banco; o serde padrão do Decimal preserva
// a representação em string ("-22.9099").
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Municipality {
    pub id: i32,
    pub name: String,
    pub state_id: i32,
    pub ibge_code: Option<String>,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
}

// Município com o estado embutido, como o mapa consome.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MunicipalityWithState {
    #[serde(flatten)]
    pub municipality: Municipality,
    pub state: State,
}

// Dados para criar um município (o id vem do banco).
#[derive(Debug, Clone)]
pub struct NewMunicipality {
    pub name: String,
    pub state_id: i32,
    pub ibge_code: Option<String>,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
}
