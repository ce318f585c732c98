// src/services/seed.rs

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::{
    common::error::AppError,
    db::{CompanyRepository, GeoRepository, ProductionRepository},
    models::{
        geo::{NewMunicipality, Region, State},
        production::{NewCrop, NewCropProduction},
    },
};

// Catálogo fixo das 27 UFs brasileiras.
const BRAZILIAN_STATES: [(&str, &str, Region); 27] = [
    ("AC", "Acre", Region::Norte),
    ("AL", "Alagoas", Region::Nordeste),
    ("AP", "Amapá", Region::Norte),
    ("AM", "Amazonas", Region::Norte),
    ("BA", "Bahia", Region::Nordeste),
    ("CE", "Ceará", Region::Nordeste),
    ("DF", "Distrito Federal", Region::CentroOeste),
    ("ES", "Espírito Santo", Region::Sudeste),
    ("GO", "Goiás", Region::CentroOeste),
    ("MA", "Maranhão", Region::Nordeste),
    ("MT", "Mato Grosso", Region::CentroOeste),
    ("MS", "Mato Grosso do Sul", Region::CentroOeste),
    ("MG", "Minas Gerais", Region::Sudeste),
    ("PA", "Pará", Region::Norte),
    ("PB", "Paraíba", Region::Nordeste),
    ("PR", "Paraná", Region::Sul),
    ("PE", "Pernambuco", Region::Nordeste),
    ("PI", "Piauí", Region::Nordeste),
    ("RJ", "Rio de Janeiro", Region::Sudeste),
    ("RN", "Rio Grande do Norte", Region::Nordeste),
    ("RS", "Rio Grande do Sul", Region::Sul),
    ("RO", "Rondônia", Region::Norte),
    ("RR", "Roraima", Region::Norte),
    ("SC", "Santa Catarina", Region::Sul),
    ("SP", "São Paulo", Region::Sudeste),
    ("SE", "Sergipe", Region::Nordeste),
    ("TO", "Tocantins", Region::Norte),
];

const DEFAULT_CROPS: [(&str, &str, &str); 8] = [
    ("Banana", "Permanente", "#7CB342"),
    ("Café", "Permanente", "#8B4513"),
    ("Laranja", "Permanente", "#FF6600"),
    ("Soja", "Temporária", "#228B22"),
    ("Milho", "Temporária", "#FFD700"),
    ("Cana-de-açúcar", "Temporária", "#90EE90"),
    ("Algodão", "Temporária", "#F5F5DC"),
    ("Feijão", "Temporária", "#8B4513"),
];

const DEFAULT_COMPANIES: [(&str, &str); 2] = [
    ("PONTO", "#3B82F6"),
    ("Empresa #1", "#EF4444"),
];

// Municípios paulistas usados nos dados de demonstração.
const DEMO_MUNICIPALITIES: [(&str, &str, &str); 10] = [
    ("Campinas", "-22.9099", "-47.0626"),
    ("Ribeirão Preto", "-21.1767", "-47.8208"),
    ("Piracicaba", "-22.7253", "-47.6486"),
    ("Araraquara", "-21.7948", "-48.1759"),
    ("Limeira", "-22.5647", "-47.4017"),
    ("Americana", "-22.7390", "-47.3310"),
    ("Bauru", "-22.3147", "-49.0614"),
    ("Presidente Prudente", "-22.1256", "-51.3889"),
    ("Marília", "-22.2136", "-49.9456"),
    ("Franca", "-20.5386", "-47.4006"),
];

// Guarda de idempotência do catálogo: qualquer estado já gravado indica que a
// carga inicial aconteceu e a repetição viraria 54 estados em vez de 27.
fn catalog_already_seeded(states: &[State]) -> bool {
    !states.is_empty()
}

#[derive(Clone)]
pub struct SeedService {
    geo_repo: GeoRepository,
    production_repo: ProductionRepository,
    company_repo: CompanyRepository,
}

impl SeedService {
    pub fn new(
        geo_repo: GeoRepository,
        production_repo: ProductionRepository,
        company_repo: CompanyRepository,
    ) -> Self {
        Self {
            geo_repo,
            production_repo,
            company_repo,
        }
    }

    // População única dos dados de referência. Se já houver qualquer estado,
    // a chamada inteira é um no-op: rodar duas vezes deixa 27 estados, não 54.
    pub async fn initialize_default_data(&self) -> Result<(), AppError> {
        let existing_states = self.geo_repo.get_states().await?;
        if catalog_already_seeded(&existing_states) {
            tracing::info!("Dados de referência já inicializados, nada a fazer.");
            return Ok(());
        }

        for (code, name, region) in BRAZILIAN_STATES {
            self.geo_repo.insert_state(code, name, region).await?;
        }

        for (name, category, color) in DEFAULT_CROPS {
            self.production_repo
                .insert_crop(&NewCrop {
                    name: name.to_string(),
                    category: category.to_string(),
                    color: color.to_string(),
                })
                .await?;
        }

        for (name, color) in DEFAULT_COMPANIES {
            self.company_repo.insert_company(name, color, true).await?;
        }

        tracing::info!(
            "Catálogo inicial criado: {} estados, {} culturas, {} empresas.",
            BRAZILIAN_STATES.len(),
            DEFAULT_CROPS.len(),
            DEFAULT_COMPANIES.len()
        );
        Ok(())
    }

    // Dados de demonstração (São Paulo, safra 2023). Só roda quando pedido
    // via SEED_DEMO_DATA e pula se já houver produção gravada.
    pub async fn create_demo_data(&self) -> Result<(), AppError> {
        let existing = self
            .production_repo
            .get_production(&Default::default())
            .await?;
        if !existing.is_empty() {
            tracing::info!("Já existem registros de produção, demo ignorada.");
            return Ok(());
        }

        let states = self.geo_repo.get_states().await?;
        let Some(sp) = states.iter().find(|s| s.code == "SP") else {
            tracing::warn!("Estado SP não encontrado, demo ignorada.");
            return Ok(());
        };

        let mut municipality_ids = Vec::with_capacity(DEMO_MUNICIPALITIES.len());
        for (name, lat, lng) in DEMO_MUNICIPALITIES {
            let created = self
                .geo_repo
                .find_or_create_municipality(&NewMunicipality {
                    name: name.to_string(),
                    state_id: sp.id,
                    ibge_code: None,
                    latitude: Decimal::from_str(lat).ok(),
                    longitude: Decimal::from_str(lng).ok(),
                })
                .await?;
            municipality_ids.push(created.id);
        }

        let crops = self.production_repo.get_crops().await?;
        let crop_id = |name: &str| crops.iter().find(|c| c.name == name).map(|c| c.id);
        let (Some(banana), Some(cafe), Some(laranja)) =
            (crop_id("Banana"), crop_id("Café"), crop_id("Laranja"))
        else {
            tracing::warn!("Culturas padrão não encontradas, demo ignorada.");
            return Ok(());
        };

        // (índice do município, cultura, hectares, produção)
        let samples: [(usize, i32, &str, &str); 15] = [
            (0, banana, "1250.50", "15600.75"),
            (1, banana, "2180.25", "28340.50"),
            (2, banana, "980.75", "12750.25"),
            (3, banana, "1560.00", "20280.00"),
            (4, banana, "850.30", "11055.40"),
            (0, cafe, "3420.75", "4104.90"),
            (1, cafe, "5670.50", "6804.60"),
            (2, cafe, "2890.25", "3468.30"),
            (5, cafe, "1890.00", "2268.00"),
            (6, cafe, "4250.80", "5100.96"),
            (2, laranja, "8950.25", "179005.00"),
            (3, laranja, "12500.75", "250015.00"),
            (4, laranja, "6780.50", "135610.00"),
            (7, laranja, "4890.00", "97800.00"),
            (8, laranja, "7650.25", "153005.00"),
        ];

        let rows: Vec<NewCropProduction> = samples
            .iter()
            .filter_map(|(idx, crop_id, hectares, production)| {
                Some(NewCropProduction {
                    municipality_id: *municipality_ids.get(*idx)?,
                    crop_id: *crop_id,
                    year: 2023,
                    hectares: Decimal::from_str(hectares).ok()?,
                    production: Decimal::from_str(production).ok(),
                })
            })
            .collect();
        self.production_repo.bulk_insert(&rows).await?;

        let companies = self.company_repo.get_companies().await?;
        let ponto = companies.iter().find(|c| c.name == "PONTO");
        let empresa1 = companies.iter().find(|c| c.name == "Empresa #1");
        if let (Some(ponto), Some(empresa1)) = (ponto, empresa1) {
            let locations = [
                (ponto.id, 0, "Unidade Campinas"),
                (ponto.id, 1, "Unidade Ribeirão Preto"),
                (empresa1.id, 2, "Filial Piracicaba"),
                (empresa1.id, 3, "Filial Araraquara"),
            ];
            for (company_id, idx, name) in locations {
                let (_, lat, lng) = DEMO_MUNICIPALITIES[idx];
                self.company_repo
                    .insert_location(
                        company_id,
                        municipality_ids[idx],
                        Decimal::from_str(lat).ok(),
                        Decimal::from_str(lng).ok(),
                        Some(name),
                    )
                    .await?;
            }
        }

        tracing::info!(
            "Dados de demonstração criados: {} municípios, {} registros de produção.",
            municipality_ids.len(),
            rows.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogo_cobre_as_27_ufs_sem_repeticao() {
        assert_eq!(BRAZILIAN_STATES.len(), 27);
        let mut codes: Vec<&str> = BRAZILIAN_STATES.iter().map(|(code, _, _)| *code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 27);
    }

    #[test]
    fn catalogo_nao_e_recarregado_com_qualquer_estado_presente() {
        assert!(!catalog_already_seeded(&[]));

        // Basta um estado gravado para a segunda chamada virar no-op
        let states = vec![State {
            id: 1,
            code: "SP".to_string(),
            name: "São Paulo".to_string(),
            region: Region::Sudeste,
        }];
        assert!(catalog_already_seeded(&states));
    }

    #[test]
    fn culturas_padrao_tem_cor_hexadecimal_de_7_caracteres() {
        assert_eq!(DEFAULT_CROPS.len(), 8);
        for (_, _, color) in DEFAULT_CROPS {
            assert_eq!(color.len(), 7);
            assert!(color.starts_with('#'));
        }
    }
}
