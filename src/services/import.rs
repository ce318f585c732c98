// src/services/import.rs
//
// Pipeline de importação: planilha .xlsx -> registros de produção, criando
// municípios e culturas que ainda não existem. Cabeçalhos em inglês ou
// português são aceitos.

use calamine::{Data, Reader, Xlsx};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use std::io::Cursor;
use std::str::FromStr;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    db::{GeoRepository, ProductionRepository},
    models::{
        geo::NewMunicipality,
        production::{NewCrop, NewCropProduction},
    },
};

const DEFAULT_CROP_CATEGORY: &str = "Temporária";
const DEFAULT_CROP_COLOR: &str = "#7CB342";

// Linha crua da planilha: tudo opcional, validado campo a campo depois.
#[derive(Debug, Default, Clone)]
pub struct ImportRow {
    pub municipality: Option<String>,
    pub state: Option<String>,
    pub crop: Option<String>,
    pub year: Option<i32>,
    pub hectares: Option<Decimal>,
    pub production: Option<Decimal>,
    pub ibge_code: Option<String>,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub category: Option<String>,
    pub color: Option<String>,
}

fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

// Linha que passou na checagem de presença dos campos obrigatórios.
#[derive(Debug, Validate)]
pub struct CandidateRow {
    pub municipality: String,
    pub state: String,
    pub crop: String,
    #[validate(range(min = 1900, max = 2100, message = "Ano fora do intervalo histórico."))]
    pub year: i32,
    #[validate(custom(function = "validate_not_negative"))]
    pub hectares: Decimal,
    pub production: Option<Decimal>,
    pub ibge_code: Option<String>,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub category: Option<String>,
    pub color: Option<String>,
}

impl ImportRow {
    // Checagem de presença: Municipality, State, Crop, Year e Hectares são
    // obrigatórios; sem eles a linha não vira candidata.
    pub fn into_candidate(self) -> Option<CandidateRow> {
        Some(CandidateRow {
            municipality: self.municipality?,
            state: self.state?,
            crop: self.crop?,
            year: self.year?,
            hectares: self.hectares?,
            production: self.production,
            ibge_code: self.ibge_code,
            latitude: self.latitude,
            longitude: self.longitude,
            category: self.category,
            color: self.color,
        })
    }
}

// Contabiliza por que cada linha ficou de fora, em vez de descartar em silêncio.
#[derive(Debug, Default, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub processed: usize,
    pub skipped: usize,
    pub missing_fields: usize,
    pub unknown_state: usize,
    pub invalid_values: usize,
}

fn cell_to_string(cell: Option<&Data>) -> Option<String> {
    let text = match cell? {
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        _ => return None,
    };
    if text.is_empty() { None } else { Some(text) }
}

fn cell_to_i32(cell: Option<&Data>) -> Option<i32> {
    match cell? {
        Data::Int(i) => i32::try_from(*i).ok(),
        Data::Float(f) => Some(*f as i32),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn cell_to_decimal(cell: Option<&Data>) -> Option<Decimal> {
    match cell? {
        Data::Int(i) => Some(Decimal::from(*i)),
        Data::Float(f) => Decimal::from_f64(*f),
        Data::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

// Lê a primeira aba e mapeia os cabeçalhos bilíngues para ImportRow.
pub fn parse_workbook(bytes: &[u8]) -> Result<Vec<ImportRow>, AppError> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook: Xlsx<_> = Xlsx::new(cursor).map_err(|_| AppError::InvalidSpreadsheet)?;

    let sheet_names = workbook.sheet_names();
    let sheet = sheet_names
        .first()
        .cloned()
        .ok_or(AppError::InvalidSpreadsheet)?;
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|_| AppError::InvalidSpreadsheet)?;

    let mut rows_iter = range.rows();
    let Some(header_row) = rows_iter.next() else {
        return Ok(Vec::new());
    };

    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell_to_string(Some(cell)).unwrap_or_default().to_lowercase())
        .collect();
    let column = |aliases: &[&str]| {
        headers
            .iter()
            .position(|header| aliases.contains(&header.as_str()))
    };

    let municipality_col = column(&["municipality", "municipio", "município"]);
    let state_col = column(&["state", "estado"]);
    let crop_col = column(&["crop", "cultura"]);
    let year_col = column(&["year", "ano"]);
    let hectares_col = column(&["hectares"]);
    let production_col = column(&["production", "producao", "produção"]);
    let ibge_col = column(&["ibgecode", "codigoibge", "código ibge"]);
    let latitude_col = column(&["latitude"]);
    let longitude_col = column(&["longitude"]);
    let category_col = column(&["category", "categoria"]);
    let color_col = column(&["color", "cor"]);

    let rows = rows_iter
        .map(|row| {
            let cell = |col: Option<usize>| col.and_then(|i| row.get(i));
            ImportRow {
                municipality: cell_to_string(cell(municipality_col)),
                state: cell_to_string(cell(state_col)),
                crop: cell_to_string(cell(crop_col)),
                year: cell_to_i32(cell(year_col)),
                hectares: cell_to_decimal(cell(hectares_col)),
                production: cell_to_decimal(cell(production_col)),
                ibge_code: cell_to_string(cell(ibge_col)),
                latitude: cell_to_decimal(cell(latitude_col)),
                longitude: cell_to_decimal(cell(longitude_col)),
                category: cell_to_string(cell(category_col)),
                color: cell_to_string(cell(color_col)),
            }
        })
        .collect();

    Ok(rows)
}

#[derive(Clone)]
pub struct ImportService {
    geo_repo: GeoRepository,
    production_repo: ProductionRepository,
}

impl ImportService {
    pub fn new(geo_repo: GeoRepository, production_repo: ProductionRepository) -> Self {
        Self {
            geo_repo,
            production_repo,
        }
    }

    pub async fn import(&self, bytes: &[u8]) -> Result<ImportSummary, AppError> {
        let rows = parse_workbook(bytes)?;

        let mut summary = ImportSummary::default();

        // Primeiro a peneira local: presença dos campos obrigatórios e faixas
        // de valores. Uma planilha sem nenhuma linha aproveitável nem toca o banco.
        let mut candidates: Vec<CandidateRow> = Vec::new();
        for raw in rows {
            let Some(candidate) = raw.into_candidate() else {
                summary.missing_fields += 1;
                continue;
            };
            if candidate.validate().is_err() {
                summary.invalid_values += 1;
                continue;
            }
            candidates.push(candidate);
        }

        let mut pending: Vec<NewCropProduction> = Vec::new();
        if !candidates.is_empty() {
            let states = self.geo_repo.get_states().await?;

            // Caches locais evitam um find-or-create por linha repetida da planilha
            let mut municipality_cache: HashMap<(i32, String), i32> = HashMap::new();
            let mut crop_cache: HashMap<String, i32> = self
                .production_repo
                .get_crops()
                .await?
                .into_iter()
                .map(|c| (c.name.clone(), c.id))
                .collect();

            for candidate in candidates {
                // Estado casa por nome exato ou pela sigla de 2 letras
                let Some(state) = states
                    .iter()
                    .find(|s| s.name == candidate.state || s.code == candidate.state)
                else {
                    summary.unknown_state += 1;
                    continue;
                };

                let municipality_key = (state.id, candidate.municipality.clone());
                let municipality_id = match municipality_cache.get(&municipality_key) {
                    Some(id) => *id,
                    None => {
                        let municipality = self
                            .geo_repo
                            .find_or_create_municipality(&NewMunicipality {
                                name: candidate.municipality.clone(),
                                state_id: state.id,
                                ibge_code: candidate.ibge_code.clone(),
                                latitude: candidate.latitude,
                                longitude: candidate.longitude,
                            })
                            .await?;
                        municipality_cache.insert(municipality_key, municipality.id);
                        municipality.id
                    }
                };

                let crop_id = match crop_cache.get(&candidate.crop) {
                    Some(id) => *id,
                    None => {
                        let crop = self
                            .production_repo
                            .find_or_create_crop(&NewCrop {
                                name: candidate.crop.clone(),
                                category: candidate
                                    .category
                                    .clone()
                                    .unwrap_or_else(|| DEFAULT_CROP_CATEGORY.to_string()),
                                color: candidate
                                    .color
                                    .clone()
                                    .unwrap_or_else(|| DEFAULT_CROP_COLOR.to_string()),
                            })
                            .await?;
                        crop_cache.insert(crop.name.clone(), crop.id);
                        crop.id
                    }
                };

                pending.push(NewCropProduction {
                    municipality_id,
                    crop_id,
                    year: candidate.year,
                    hectares: candidate.hectares,
                    production: candidate.production,
                });
            }

            self.production_repo.bulk_insert(&pending).await?;
        }

        summary.processed = pending.len();
        summary.skipped = summary.missing_fields + summary.unknown_state + summary.invalid_values;
        if summary.skipped > 0 {
            tracing::warn!(
                "Import: {} linhas ignoradas ({} campos faltando, {} estado desconhecido, {} valores inválidos).",
                summary.skipped,
                summary.missing_fields,
                summary.unknown_state,
                summary.invalid_values
            );
        }
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    fn sheet_bytes(headers: &[&str], rows: &[Vec<Data>]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        for (col, header) in headers.iter().enumerate() {
            worksheet.write_string(0, col as u16, *header).unwrap();
        }
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                match cell {
                    Data::String(s) => {
                        worksheet.write_string((r + 1) as u32, c as u16, s).unwrap();
                    }
                    Data::Float(f) => {
                        worksheet.write_number((r + 1) as u32, c as u16, *f).unwrap();
                    }
                    _ => {}
                };
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    fn text(s: &str) -> Data {
        Data::String(s.to_string())
    }

    #[test]
    fn cabecalhos_em_ingles_sao_reconhecidos() {
        let bytes = sheet_bytes(
            &["Municipality", "State", "Crop", "Year", "Hectares", "Production"],
            &[vec![
                text("Campinas"),
                text("SP"),
                text("Banana"),
                Data::Float(2023.0),
                Data::Float(100.0),
                Data::Float(1300.5),
            ]],
        );

        let rows = parse_workbook(&bytes).unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.municipality.as_deref(), Some("Campinas"));
        assert_eq!(row.state.as_deref(), Some("SP"));
        assert_eq!(row.crop.as_deref(), Some("Banana"));
        assert_eq!(row.year, Some(2023));
        assert_eq!(row.hectares, Decimal::from_f64(100.0));
        assert_eq!(row.production, Decimal::from_f64(1300.5));
    }

    #[test]
    fn cabecalhos_em_portugues_sao_equivalentes() {
        let bytes = sheet_bytes(
            &["Municipio", "Estado", "Cultura", "Ano", "Hectares", "Producao"],
            &[vec![
                text("Franca"),
                text("São Paulo"),
                text("Café"),
                Data::Float(2022.0),
                Data::Float(540.25),
                Data::Float(648.3),
            ]],
        );

        let rows = parse_workbook(&bytes).unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.municipality.as_deref(), Some("Franca"));
        assert_eq!(row.state.as_deref(), Some("São Paulo"));
        assert_eq!(row.crop.as_deref(), Some("Café"));
        assert_eq!(row.year, Some(2022));
    }

    #[test]
    fn linha_sem_campo_obrigatorio_nao_vira_candidata() {
        let row = ImportRow {
            municipality: Some("Campinas".to_string()),
            state: None, // faltando
            crop: Some("Banana".to_string()),
            year: Some(2023),
            hectares: Decimal::from_f64(10.0),
            ..Default::default()
        };
        assert!(row.into_candidate().is_none());
    }

    #[test]
    fn ano_fora_do_intervalo_reprova_na_validacao() {
        let row = ImportRow {
            municipality: Some("Campinas".to_string()),
            state: Some("SP".to_string()),
            crop: Some("Banana".to_string()),
            year: Some(1500),
            hectares: Decimal::from_f64(10.0),
            ..Default::default()
        };
        let candidate = row.into_candidate().unwrap();
        assert!(candidate.validate().is_err());
    }

    #[test]
    fn hectares_negativos_reprovam_na_validacao() {
        let row = ImportRow {
            municipality: Some("Campinas".to_string()),
            state: Some("SP".to_string()),
            crop: Some("Banana".to_string()),
            year: Some(2023),
            hectares: Decimal::from_f64(-5.0),
            ..Default::default()
        };
        let candidate = row.into_candidate().unwrap();
        assert!(candidate.validate().is_err());
    }

    #[test]
    fn bytes_que_nao_sao_xlsx_dao_erro_de_planilha() {
        let result = parse_workbook(b"definitivamente nao e um zip");
        assert!(matches!(result, Err(AppError::InvalidSpreadsheet)));
    }

    #[test]
    fn planilha_so_com_cabecalho_gera_zero_linhas() {
        let bytes = sheet_bytes(
            &["Municipality", "State", "Crop", "Year", "Hectares"],
            &[],
        );
        let rows = parse_workbook(&bytes).unwrap();
        assert!(rows.is_empty());
    }
}
