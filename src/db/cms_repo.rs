// src/db/cms_repo.rs

use sqlx::PgPool;

use crate::{common::error::AppError, models::cms::CmsConfig};

// Linha única (id = TRUE): leitura pública, sobrescrita integral no save.
#[derive(Clone)]
pub struct CmsRepository {
    pool: PgPool,
}

impl CmsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self) -> Result<Option<CmsConfig>, AppError> {
        let maybe = sqlx::query_as::<_, CmsConfig>(
            "SELECT dados, updated_at FROM cms_config WHERE id = TRUE",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe)
    }

    pub async fn upsert(&self, dados: &serde_json::Value) -> Result<CmsConfig, AppError> {
        let config = sqlx::query_as::<_, CmsConfig>(
            r#"
            INSERT INTO cms_config (id, dados)
            VALUES (TRUE, $1)
            ON CONFLICT (id)
                DO UPDATE SET dados = EXCLUDED.dados, updated_at = now()
            RETURNING dados, updated_at
            "#,
        )
        .bind(dados)
        .fetch_one(&self.pool)
        .await?;

        Ok(config)
    }
}
