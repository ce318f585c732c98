// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Geografia ---
        handlers::geo::list_states,
        handlers::geo::list_municipalities,

        // --- Produção ---
        handlers::production::list_crops,
        handlers::production::list_crop_production,

        // --- Empresas ---
        handlers::company::list_companies,
        handlers::company::list_company_locations,

        // --- Mapa ---
        handlers::map::get_legend,
        handlers::map::list_markers,

        // --- Transferência ---
        handlers::transfer::upload_excel,
        handlers::transfer::export_data,

        // --- Auth ---
        handlers::auth::get_current_user,
    ),
    components(
        schemas(
            // --- Geografia ---
            models::geo::Region,
            models::geo::State,
            models::geo::Municipality,
            models::geo::MunicipalityWithState,

            // --- Produção ---
            models::production::Crop,
            models::production::CropProduction,
            models::production::ProductionRecord,

            // --- Empresas ---
            models::company::Company,
            models::company::CompanyLocation,
            models::company::LocationRecord,

            // --- Mapa ---
            services::map_scale::LegendBucket,
            services::map_scale::ScaleMode,
            services::map_scale::MapMarker,

            // --- Transferência ---
            services::import::ImportSummary,
            services::export::ExportFormat,
            services::export::ExportRow,
            handlers::transfer::UploadResponse,

            // --- Auth ---
            models::auth::User,
        )
    ),
    tags(
        (name = "Geografia", description = "Estados e municípios"),
        (name = "Produção", description = "Culturas e produção agrícola por município/ano"),
        (name = "Empresas", description = "Empresas e suas unidades no mapa"),
        (name = "Mapa", description = "Legenda e marcadores com escala de cor"),
        (name = "Transferência", description = "Import/export de planilhas Excel"),
        (name = "Auth", description = "Perfil do usuário autenticado")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
