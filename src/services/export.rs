// src/services/export.rs
//
// Pipeline de exportação: registros de produção juntados viram a planilha
// tabular (ou o JSON equivalente) com as 8 colunas fixas.

use anyhow::Context;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    common::error::AppError,
    db::ProductionRepository,
    models::{geo::Region, production::ProductionRecord},
};

pub const EXPORT_FILENAME: &str = "crop_production_data.xlsx";
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const SHEET_NAME: &str = "Production Data";
const EXPORT_HEADERS: [&str; 8] = [
    "Municipality", "State", "Region", "Crop", "Category", "Year", "Hectares", "Production",
];

#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Excel,
    Json,
}

// Linha achatada da exportação. Os nomes das chaves são parte do contrato.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ExportRow {
    #[serde(rename = "Municipality")]
    pub municipality: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Region")]
    pub region: Region,
    #[serde(rename = "Crop")]
    pub crop: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Hectares")]
    pub hectares: Decimal,
    #[serde(rename = "Production")]
    pub production: Option<Decimal>,
}

pub fn flatten(records: &[ProductionRecord]) -> Vec<ExportRow> {
    records
        .iter()
        .map(|record| ExportRow {
            municipality: record.municipality.municipality.name.clone(),
            state: record.municipality.state.name.clone(),
            region: record.municipality.state.region,
            crop: record.crop.name.clone(),
            category: record.crop.category.clone(),
            year: record.production.year,
            hectares: record.production.hectares,
            production: record.production.production,
        })
        .collect()
}

pub fn to_xlsx(rows: &[ExportRow]) -> Result<Vec<u8>, AppError> {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(SHEET_NAME)
        .context("nome de aba inválido")?;

    for (col, header) in EXPORT_HEADERS.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .context("falha ao escrever cabeçalho")?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        let region = serde_json::to_value(row.region)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();
        worksheet
            .write_string(r, 0, &row.municipality)
            .and_then(|ws| ws.write_string(r, 1, &row.state))
            .and_then(|ws| ws.write_string(r, 2, &region))
            .and_then(|ws| ws.write_string(r, 3, &row.crop))
            .and_then(|ws| ws.write_string(r, 4, &row.category))
            .and_then(|ws| ws.write_number(r, 5, row.year as f64))
            .and_then(|ws| ws.write_number(r, 6, row.hectares.to_f64().unwrap_or(0.0)))
            .context("falha ao escrever linha")?;
        if let Some(production) = row.production {
            worksheet
                .write_number(r, 7, production.to_f64().unwrap_or(0.0))
                .context("falha ao escrever linha")?;
        }
    }

    let bytes = workbook
        .save_to_buffer()
        .context("falha ao serializar a planilha")?;
    Ok(bytes)
}

#[derive(Clone)]
pub struct ExportService {
    production_repo: ProductionRepository,
}

impl ExportService {
    pub fn new(production_repo: ProductionRepository) -> Self {
        Self { production_repo }
    }

    pub async fn export_rows(&self) -> Result<Vec<ExportRow>, AppError> {
        let records = self
            .production_repo
            .get_production(&Default::default())
            .await?;
        Ok(flatten(&records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::geo::{Municipality, MunicipalityWithState, State};
    use crate::models::production::{Crop, CropProduction};
    use chrono::Utc;

    fn sample_record() -> ProductionRecord {
        ProductionRecord {
            production: CropProduction {
                id: 1,
                municipality_id: 10,
                crop_id: 3,
                year: 2023,
                hectares: Decimal::new(10000, 2), // 100.00
                production: Some(Decimal::new(130050, 2)),
                created_at: Utc::now(),
            },
            municipality: MunicipalityWithState {
                municipality: Municipality {
                    id: 10,
                    name: "Campinas".to_string(),
                    state_id: 25,
                    ibge_code: None,
                    latitude: None,
                    longitude: None,
                },
                state: State {
                    id: 25,
                    code: "SP".to_string(),
                    name: "São Paulo".to_string(),
                    region: Region::Sudeste,
                },
            },
            crop: Crop {
                id: 3,
                name: "Banana".to_string(),
                category: "Permanente".to_string(),
                color: "#7CB342".to_string(),
            },
        }
    }

    #[test]
    fn cada_linha_exportada_tem_as_8_chaves_do_contrato() {
        let rows = flatten(&[sample_record()]);
        let value = serde_json::to_value(&rows[0]).unwrap();
        let object = value.as_object().unwrap();

        for key in EXPORT_HEADERS {
            assert!(object.contains_key(key), "chave ausente: {key}");
        }
        assert_eq!(object.len(), EXPORT_HEADERS.len());
    }

    #[test]
    fn hectares_preservam_a_escala_de_duas_casas() {
        let rows = flatten(&[sample_record()]);
        let value = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(value["Hectares"], "100.00");
        assert_eq!(value["Region"], "Sudeste");
    }

    #[test]
    fn planilha_exportada_comeca_com_o_cabecalho_fixo() {
        use calamine::{Data, Reader, Xlsx};
        use std::io::Cursor;

        let bytes = to_xlsx(&flatten(&[sample_record()])).unwrap();
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).unwrap();
        let range = workbook.worksheet_range(SHEET_NAME).unwrap();

        let header: Vec<String> = range
            .rows()
            .next()
            .unwrap()
            .iter()
            .map(|cell| match cell {
                Data::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect();
        assert_eq!(header, EXPORT_HEADERS);
    }
}
