// src/db/company_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::{
        company::{Company, CompanyLocation, LocationRecord},
        geo::Municipality,
    },
};

// Linha achatada do JOIN unidade + empresa + município.
#[derive(sqlx::FromRow)]
struct LocationRow {
    id: i32,
    company_id: i32,
    municipality_id: i32,
    latitude: Option<Decimal>,
    longitude: Option<Decimal>,
    name: Option<String>,
    company_name: String,
    company_color: String,
    company_is_active: bool,
    municipality_name: String,
    state_id: i32,
    municipality_ibge_code: Option<String>,
    municipality_latitude: Option<Decimal>,
    municipality_longitude: Option<Decimal>,
}

impl From<LocationRow> for LocationRecord {
    fn from(row: LocationRow) -> Self {
        LocationRecord {
            location: CompanyLocation {
                id: row.id,
                company_id: row.company_id,
                municipality_id: row.municipality_id,
                latitude: row.latitude,
                longitude: row.longitude,
                name: row.name,
            },
            company: Company {
                id: row.company_id,
                name: row.company_name,
                color: row.company_color,
                is_active: row.company_is_active,
            },
            municipality: Municipality {
                id: row.municipality_id,
                name: row.municipality_name,
                state_id: row.state_id,
                ibge_code: row.municipality_ibge_code,
                latitude: row.municipality_latitude,
                longitude: row.municipality_longitude,
            },
        }
    }
}

#[derive(Clone)]
pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_companies(&self) -> Result<Vec<Company>, AppError> {
        let companies = sqlx::query_as::<_, Company>("SELECT * FROM companies ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(companies)
    }

    pub async fn insert_company(
        &self,
        name: &str,
        color: &str,
        is_active: bool,
    ) -> Result<Company, AppError> {
        let company = sqlx::query_as::<_, Company>(
            "INSERT INTO companies (name, color, is_active) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(name)
        .bind(color)
        .bind(is_active)
        .fetch_one(&self.pool)
        .await?;
        Ok(company)
    }

    // Unidades com empresa e município embutidos; filtro opcional por empresa.
    pub async fn get_locations(
        &self,
        company_id: Option<i32>,
    ) -> Result<Vec<LocationRecord>, AppError> {
        let base = r#"
            SELECT l.id, l.company_id, l.municipality_id, l.latitude, l.longitude, l.name,
                   co.name AS company_name, co.color AS company_color, co.is_active AS company_is_active,
                   m.name AS municipality_name, m.state_id, m.ibge_code AS municipality_ibge_code,
                   m.latitude AS municipality_latitude, m.longitude AS municipality_longitude
            FROM company_locations l
            JOIN companies co ON co.id = l.company_id
            JOIN municipalities m ON m.id = l.municipality_id
        "#;

        let rows = match company_id {
            Some(company_id) => {
                let sql = format!("{base} WHERE l.company_id = $1");
                sqlx::query_as::<_, LocationRow>(&sql)
                    .bind(company_id)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_as::<_, LocationRow>(base)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(rows.into_iter().map(LocationRecord::from).collect())
    }

    pub async fn insert_location(
        &self,
        company_id: i32,
        municipality_id: i32,
        latitude: Option<Decimal>,
        longitude: Option<Decimal>,
        name: Option<&str>,
    ) -> Result<CompanyLocation, AppError> {
        let location = sqlx::query_as::<_, CompanyLocation>(
            r#"
            INSERT INTO company_locations (company_id, municipality_id, latitude, longitude, name)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(municipality_id)
        .bind(latitude)
        .bind(longitude)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(location)
    }
}
