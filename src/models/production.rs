// src/models/production.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::geo::{MunicipalityWithState, Region};

// --- Culturas ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Crop {
    pub id: i32,
    pub name: String,
    pub category: String,
    // Cor hexadecimal de 7 caracteres ("#7CB342"), usada pela legenda do mapa
    pub color: String,
}

#[derive(Debug, Clone)]
pub struct NewCrop {
    pub name: String,
    pub category: String,
    pub color: String,
}

// --- Produção agrícola por município/cultura/ano ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CropProduction {
    pub id: i32,
    pub municipality_id: i32,
    pub crop_id: i32,
    pub year: i32,
    pub hectares: Decimal,
    pub production: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCropProduction {
    pub municipality_id: i32,
    pub crop_id: i32,
    pub year: i32,
    pub hectares: Decimal,
    pub production: Option<Decimal>,
}

// Registro de produção já com município (+ estado) e cultura embutidos,
// o formato denormalizado que a API devolve.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductionRecord {
    #[serde(flatten)]
    pub production: CropProduction,
    pub municipality: MunicipalityWithState,
    pub crop: Crop,
}

// Filtros de igualdade combinados com AND; ausência = sem restrição.
#[derive(Debug, Clone, Default)]
pub struct ProductionFilter {
    pub crop_id: Option<i32>,
    pub state_id: Option<i32>,
    pub year: Option<i32>,
    pub region: Option<Region>,
}
