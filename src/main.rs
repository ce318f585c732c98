// src/main.rs

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Popula os dados de referência (27 UFs, culturas e empresas padrão).
    // A chamada é idempotente: com qualquer estado já gravado, vira no-op.
    app_state
        .seed_service
        .initialize_default_data()
        .await
        .expect("Falha ao inicializar os dados de referência.");

    if app_state.seed_demo_data {
        app_state
            .seed_service
            .create_demo_data()
            .await
            .expect("Falha ao criar os dados de demonstração.");
    }

    // Rotas públicas de leitura (o mapa consome sem login)
    let public_routes = Router::new()
        .route("/api/states", get(handlers::geo::list_states))
        .route("/api/municipalities", get(handlers::geo::list_municipalities))
        .route("/api/crops", get(handlers::production::list_crops))
        .route(
            "/api/crop-production",
            get(handlers::production::list_crop_production),
        )
        .route("/api/companies", get(handlers::company::list_companies))
        .route(
            "/api/company-locations",
            get(handlers::company::list_company_locations),
        )
        .route("/api/map/legend", get(handlers::map::get_legend))
        .route("/api/map/markers", get(handlers::map::list_markers));

    // Rotas protegidas pelo middleware de autenticação
    let protected_routes = Router::new()
        .route("/api/auth/user", get(handlers::auth::get_current_user))
        .route(
            "/api/upload-excel",
            post(handlers::transfer::upload_excel)
                .layer(DefaultBodyLimit::max(handlers::transfer::MAX_UPLOAD_BYTES)),
        )
        .route("/api/export-data", get(handlers::transfer::export_data))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .merge(public_routes)
        .merge(protected_routes)
        .merge(
            SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
        )
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
