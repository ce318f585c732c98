// src/services/map_scale.rs
//
// Escalas de cor e raio dos marcadores do mapa. Tudo aqui é função pura:
// o estilo é calculado por requisição a partir dos dados recebidos, sem
// nenhum estado compartilhado entre mapas.

use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::production::ProductionRecord;

// Os 7 degraus fixos de hectares da legenda.
const HECTARE_BREAKS: [f64; 6] = [
    72_000.0, 360_000.0, 800_000.0, 1_300_000.0, 2_500_000.0, 5_550_000.0,
];

// Verde claro -> verde escuro, um tom por degrau.
const BUCKET_COLORS: [&str; 7] = [
    "#e5e7eb", "#bbf7d0", "#86efac", "#4ade80", "#22c55e", "#16a34a", "#15803d",
];

const BUCKET_RADII: [f64; 7] = [8.0, 10.0, 12.0, 14.0, 16.0, 18.0, 20.0];

const BUCKET_LABELS: [&str; 7] = [
    "0,000 - 72,000",
    "72,001 - 360,000",
    "360,001 - 800,000",
    "800,001 - 1,300,000",
    "1,300,001 - 2,500,000",
    "2,500,001 - 5,550,000",
    "5,550,001+",
];

// Cor fixa quando max == min (conjunto degenerado, sem gradiente possível).
const HEAT_FALLBACK_COLOR: &str = "#FF0000";

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LegendBucket {
    pub min: f64,
    pub max: Option<f64>,
    pub label: String,
    pub color: String,
    pub radius: f64,
}

// Modo de pintura dos marcadores: degraus fixos ou gradiente contínuo.
#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ScaleMode {
    #[default]
    Buckets,
    Heat,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MapMarker {
    pub municipality_id: i32,
    pub municipality: String,
    pub state: String,
    pub crop: String,
    pub year: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub hectares: f64,
    pub color: String,
    pub radius: f64,
}

fn bucket_index(hectares: f64) -> usize {
    HECTARE_BREAKS
        .iter()
        .position(|&limit| hectares <= limit)
        .unwrap_or(HECTARE_BREAKS.len())
}

pub fn color_for_hectares(hectares: f64) -> &'static str {
    BUCKET_COLORS[bucket_index(hectares)]
}

pub fn radius_for_hectares(hectares: f64) -> f64 {
    BUCKET_RADII[bucket_index(hectares)]
}

pub fn hectare_ranges() -> Vec<LegendBucket> {
    let mut buckets = Vec::with_capacity(BUCKET_LABELS.len());
    let mut lower = 0.0;
    for i in 0..BUCKET_LABELS.len() {
        let upper = HECTARE_BREAKS.get(i).copied();
        buckets.push(LegendBucket {
            min: lower,
            max: upper,
            label: BUCKET_LABELS[i].to_string(),
            color: BUCKET_COLORS[i].to_string(),
            radius: BUCKET_RADII[i],
        });
        lower = upper.map(|u| u + 1.0).unwrap_or(lower);
    }
    buckets
}

fn normalized(value: f64, min: f64, max: f64) -> f64 {
    (value - min) / (max - min)
}

pub fn heat_hue(value: f64, min: f64, max: f64) -> f64 {
    // Do verde (120) para o vermelho (0), linear no valor normalizado
    (1.0 - normalized(value, min, max)) * 120.0
}

pub fn heat_map_color(value: f64, min: f64, max: f64) -> String {
    if max == min {
        return HEAT_FALLBACK_COLOR.to_string();
    }
    format!("hsl({}, 70%, 50%)", heat_hue(value, min, max))
}

pub fn heat_radius(value: f64, min: f64, max: f64) -> f64 {
    if max == min {
        return 25.0;
    }
    (5.0 + normalized(value, min, max) * 20.0).clamp(5.0, 25.0)
}

// Reduz os registros filtrados aos marcadores prontos para desenhar: só
// municípios com coordenadas entram.
pub fn build_markers(records: &[ProductionRecord], mode: ScaleMode) -> Vec<MapMarker> {
    let positioned: Vec<(&ProductionRecord, f64, f64, f64)> = records
        .iter()
        .filter_map(|record| {
            let municipality = &record.municipality.municipality;
            let lat = municipality.latitude.as_ref()?.to_f64()?;
            let lng = municipality.longitude.as_ref()?.to_f64()?;
            let hectares = record.production.hectares.to_f64()?;
            Some((record, lat, lng, hectares))
        })
        .collect();

    let (min, max) = positioned.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(min, max), (_, _, _, h)| (min.min(*h), max.max(*h)),
    );

    positioned
        .into_iter()
        .map(|(record, latitude, longitude, hectares)| {
            let (color, radius) = match mode {
                ScaleMode::Buckets => (
                    color_for_hectares(hectares).to_string(),
                    radius_for_hectares(hectares),
                ),
                ScaleMode::Heat => (
                    heat_map_color(hectares, min, max),
                    heat_radius(hectares, min, max),
                ),
            };
            MapMarker {
                municipality_id: record.municipality.municipality.id,
                municipality: record.municipality.municipality.name.clone(),
                state: record.municipality.state.code.clone(),
                crop: record.crop.name.clone(),
                year: record.production.year,
                latitude,
                longitude,
                hectares,
                color,
                radius,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cada_valor_cai_em_exatamente_uma_das_sete_cores() {
        let samples = [
            0.0, 72_000.0, 72_001.0, 360_000.0, 800_000.0, 1_300_000.0, 2_500_000.0, 5_550_000.0,
            5_550_001.0, 99_000_000.0,
        ];
        for h in samples {
            let color = color_for_hectares(h);
            assert!(BUCKET_COLORS.contains(&color));
        }
    }

    #[test]
    fn cores_avancam_junto_com_os_degraus() {
        // A intensidade (índice do degrau) nunca diminui quando os hectares crescem
        let mut previous = bucket_index(0.0);
        for h in [
            50_000.0, 100_000.0, 500_000.0, 1_000_000.0, 2_000_000.0, 4_000_000.0, 9_000_000.0,
        ] {
            let index = bucket_index(h);
            assert!(index >= previous);
            previous = index;
        }
        assert_eq!(bucket_index(9_000_000.0), 6);
    }

    #[test]
    fn gradiente_vai_de_120_no_minimo_a_0_no_maximo() {
        assert_eq!(heat_hue(10.0, 10.0, 500.0), 120.0);
        assert_eq!(heat_hue(500.0, 10.0, 500.0), 0.0);

        let hue = heat_hue(250.0, 10.0, 500.0);
        assert!(hue > 0.0 && hue < 120.0);
    }

    #[test]
    fn conjunto_degenerado_usa_cor_fixa() {
        assert_eq!(heat_map_color(42.0, 7.0, 7.0), "#FF0000");
        assert_eq!(heat_map_color(7.0, 7.0, 7.0), "#FF0000");
    }

    #[test]
    fn raio_do_gradiente_fica_entre_5_e_25() {
        assert_eq!(heat_radius(0.0, 0.0, 100.0), 5.0);
        assert_eq!(heat_radius(100.0, 0.0, 100.0), 25.0);
        let mid = heat_radius(50.0, 0.0, 100.0);
        assert!(mid > 5.0 && mid < 25.0);
    }

    #[test]
    fn legenda_tem_sete_faixas_continuas() {
        let buckets = hectare_ranges();
        assert_eq!(buckets.len(), 7);
        assert_eq!(buckets[0].min, 0.0);
        assert_eq!(buckets[0].max, Some(72_000.0));
        assert_eq!(buckets[6].max, None);
        assert_eq!(buckets[6].label, "5,550,001+");
    }
}
