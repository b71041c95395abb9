// src/db/license_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::licensing::License};

#[derive(Clone)]
pub struct LicenseRepository {
    pool: PgPool,
}

impl LicenseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<License>, AppError> {
        let maybe = sqlx::query_as::<_, License>("SELECT * FROM licenses WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe)
    }

    // Cria a licença trial; participa da transação de criação do usuário.
    // A chave nasce junto, para permitir a ativação direta trial -> active.
    pub async fn create_trial<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        trial_days: i32,
        activation_key: &str,
    ) -> Result<License, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let license = sqlx::query_as::<_, License>(
            r#"
            INSERT INTO licenses (user_id, trial_days, activation_key)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(trial_days)
        .bind(activation_key)
        .fetch_one(executor)
        .await?;

        Ok(license)
    }

    // Bloqueia e registra a nova chave exigida para a próxima ativação.
    pub async fn set_blocked(&self, user_id: Uuid, new_key: &str) -> Result<License, AppError> {
        let license = sqlx::query_as::<_, License>(
            r#"
            UPDATE licenses
            SET status = 'blocked', activation_key = $2, updated_at = now()
            WHERE user_id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(new_key)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::LicenseNotFound)?;

        Ok(license)
    }

    // Ativa, limpa a chave e grava a validade absoluta (se houver).
    pub async fn set_active(
        &self,
        user_id: Uuid,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<License, AppError> {
        let license = sqlx::query_as::<_, License>(
            r#"
            UPDATE licenses
            SET status = 'active',
                activation_key = NULL,
                activated_at = now(),
                expires_at = $2,
                updated_at = now()
            WHERE user_id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(expires_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::LicenseNotFound)?;

        Ok(license)
    }
}
