// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{CompanyRepository, GeoRepository, ProductionRepository, UserRepository},
    services::{AuthService, ExportService, ImportService, SeedService},
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub seed_demo_data: bool,
    pub geo_repo: GeoRepository,
    pub production_repo: ProductionRepository,
    pub company_repo: CompanyRepository,
    pub auth_service: AuthService,
    pub seed_service: SeedService,
    pub import_service: ImportService,
    pub export_service: ExportService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");
        let seed_demo_data = env::var("SEED_DEMO_DATA")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let geo_repo = GeoRepository::new(db_pool.clone());
        let production_repo = ProductionRepository::new(db_pool.clone());
        let company_repo = CompanyRepository::new(db_pool.clone());
        let user_repo = UserRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo, jwt_secret);
        let seed_service = SeedService::new(
            geo_repo.clone(),
            production_repo.clone(),
            company_repo.clone(),
        );
        let import_service = ImportService::new(geo_repo.clone(), production_repo.clone());
        let export_service = ExportService::new(production_repo.clone());

        Ok(Self {
            db_pool,
            seed_demo_data,
            geo_repo,
            production_repo,
            company_repo,
            auth_service,
            seed_service,
            import_service,
            export_service,
        })
    }
}
