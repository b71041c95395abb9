// src/db/caixa_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::caixa::CaixaDia};

// Persistência do snapshot do dia: uma linha JSONB por usuário,
// sobrescrita a cada save (last-write-wins, sem histórico).
#[derive(Clone)]
pub struct CaixaRepository {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct SnapshotRow {
    dados: serde_json::Value,
}

impl CaixaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn load(&self, user_id: Uuid) -> Result<Option<CaixaDia>, AppError> {
        let row = sqlx::query_as::<_, SnapshotRow>(
            "SELECT dados FROM caixa_snapshots WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let dia = serde_json::from_value(row.dados)
                    .map_err(|e| anyhow::anyhow!("Snapshot de caixa corrompido: {}", e))?;
                Ok(Some(dia))
            }
            None => Ok(None),
        }
    }

    pub async fn save(&self, user_id: Uuid, dia: &CaixaDia) -> Result<(), AppError> {
        let dados = serde_json::to_value(dia)
            .map_err(|e| anyhow::anyhow!("Falha ao serializar o snapshot: {}", e))?;

        sqlx::query(
            r#"
            INSERT INTO caixa_snapshots (user_id, dados)
            VALUES ($1, $2)
            ON CONFLICT (user_id)
                DO UPDATE SET dados = EXCLUDED.dados, updated_at = now()
            "#,
        )
        .bind(user_id)
        .bind(dados)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn clear(&self, user_id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM caixa_snapshots WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
