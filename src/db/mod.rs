pub mod company_repo;
pub use company_repo::CompanyRepository;
pub mod geo_repo;
pub use geo_repo::GeoRepository;
pub mod production_repo;
pub use production_repo::ProductionRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
