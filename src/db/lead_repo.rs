// src/db/lead_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::leads::{Lead, PendingUser, ResetKind, ResetRequest},
};

#[derive(Clone)]
pub struct LeadRepository {
    pool: PgPool,
}

impl LeadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert_lead(
        &self,
        nome: &str,
        telefone: &str,
        origem: Option<&str>,
    ) -> Result<Lead, AppError> {
        let lead = sqlx::query_as::<_, Lead>(
            "INSERT INTO leads (nome, telefone, origem) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(nome)
        .bind(telefone)
        .bind(origem)
        .fetch_one(&self.pool)
        .await?;

        Ok(lead)
    }

    pub async fn list_leads(&self) -> Result<Vec<Lead>, AppError> {
        let leads = sqlx::query_as::<_, Lead>("SELECT * FROM leads ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(leads)
    }

    pub async fn insert_pending(
        &self,
        username: &str,
        password_hash: &str,
        phone: Option<&str>,
    ) -> Result<PendingUser, AppError> {
        let pending = sqlx::query_as::<_, PendingUser>(
            r#"
            INSERT INTO pending_users (username, password_hash, phone)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(phone)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::UsernameAlreadyExists;
                }
            }
            e.into()
        })?;

        Ok(pending)
    }

    pub async fn list_pending(&self) -> Result<Vec<PendingUser>, AppError> {
        let pending = sqlx::query_as::<_, PendingUser>(
            "SELECT * FROM pending_users ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(pending)
    }

    pub async fn find_pending(&self, id: Uuid) -> Result<Option<PendingUser>, AppError> {
        let maybe = sqlx::query_as::<_, PendingUser>("SELECT * FROM pending_users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe)
    }

    // Remoção dentro da transação de aprovação.
    pub async fn delete_pending<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM pending_users WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn insert_reset_request(
        &self,
        kind: ResetKind,
        username: &str,
        telefone: Option<&str>,
    ) -> Result<ResetRequest, AppError> {
        let request = sqlx::query_as::<_, ResetRequest>(
            r#"
            INSERT INTO reset_requests (kind, username, telefone)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(kind)
        .bind(username)
        .bind(telefone)
        .fetch_one(&self.pool)
        .await?;

        Ok(request)
    }
}
