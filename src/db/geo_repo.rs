// src/db/geo_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::geo::{Municipality, NewMunicipality, Region, State},
};

// Repositório de estados e municípios.
#[derive(Clone)]
pub struct GeoRepository {
    pool: PgPool,
}

impl GeoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_states(&self) -> Result<Vec<State>, AppError> {
        let states = sqlx::query_as::<_, State>("SELECT * FROM states ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(states)
    }

    pub async fn insert_state(
        &self,
        code: &str,
        name: &str,
        region: Region,
    ) -> Result<State, AppError> {
        let state = sqlx::query_as::<_, State>(
            "INSERT INTO states (code, name, region) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(code)
        .bind(name)
        .bind(region)
        .fetch_one(&self.pool)
        .await?;
        Ok(state)
    }

    pub async fn get_municipalities(&self) -> Result<Vec<Municipality>, AppError> {
        let municipalities =
            sqlx::query_as::<_, Municipality>("SELECT * FROM municipalities ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(municipalities)
    }

    pub async fn get_municipalities_by_state(
        &self,
        state_id: i32,
    ) -> Result<Vec<Municipality>, AppError> {
        let municipalities = sqlx::query_as::<_, Municipality>(
            "SELECT * FROM municipalities WHERE state_id = $1 ORDER BY name ASC",
        )
        .bind(state_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(municipalities)
    }

    // "Insert ou pega o existente", atômico graças ao UNIQUE (state_id, name).
    // Dois imports simultâneos da mesma planilha não criam municípios duplicados.
    pub async fn find_or_create_municipality(
        &self,
        municipality: &NewMunicipality,
    ) -> Result<Municipality, AppError> {
        let found = sqlx::query_as::<_, Municipality>(
            r#"
            INSERT INTO municipalities (name, state_id, ibge_code, latitude, longitude)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (state_id, name)
            DO UPDATE SET name = EXCLUDED.name
            RETURNING *
            "#,
        )
        .bind(&municipality.name)
        .bind(municipality.state_id)
        .bind(&municipality.ibge_code)
        .bind(municipality.latitude)
        .bind(municipality.longitude)
        .fetch_one(&self.pool)
        .await?;
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    const AGRO_SCHEMA: &str = include_str!("../../migrations/20250114093500_agro_schema.sql");

    // O upsert acima só trata o conflito em (state_id, name); nenhuma outra
    // coluna de municipalities pode carregar unicidade própria, senão um
    // código IBGE repetido na planilha abortaria o import inteiro.
    #[test]
    fn municipio_so_tem_unicidade_em_estado_e_nome() {
        let municipalities = AGRO_SCHEMA
            .split("CREATE TABLE")
            .find(|block| block.contains("municipalities"))
            .unwrap();

        assert!(municipalities.contains("UNIQUE (state_id, name)"));
        let ibge_line = municipalities
            .lines()
            .find(|line| line.contains("ibge_code"))
            .unwrap();
        assert!(!ibge_line.contains("UNIQUE"));
    }
}
