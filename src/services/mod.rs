pub mod auth;
pub use auth::AuthService;
pub mod export;
pub use export::ExportService;
pub mod import;
pub use import::ImportService;
pub mod map_scale;
pub mod seed;
pub use seed::SeedService;
