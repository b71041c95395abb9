// src/db/nota_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::notas::{NotaFiscal, ParcelaNota},
};

#[derive(Clone)]
pub struct NotaRepository {
    pool: PgPool,
}

impl NotaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert_nota<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        numero: &str,
        cliente: &str,
        valor_total: Decimal,
        data_emissao: NaiveDate,
    ) -> Result<NotaFiscal, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let nota = sqlx::query_as::<_, NotaFiscal>(
            r#"
            INSERT INTO notas_fiscais (user_id, numero, cliente, valor_total, data_emissao)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(numero)
        .bind(cliente)
        .bind(valor_total)
        .bind(data_emissao)
        .fetch_one(executor)
        .await?;

        Ok(nota)
    }

    pub async fn insert_parcela<'e, E>(
        &self,
        executor: E,
        nota_id: Uuid,
        numero: i32,
        valor: Decimal,
        vencimento: NaiveDate,
    ) -> Result<ParcelaNota, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let parcela = sqlx::query_as::<_, ParcelaNota>(
            r#"
            INSERT INTO parcelas_nota (nota_id, numero, valor, vencimento)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(nota_id)
        .bind(numero)
        .bind(valor)
        .bind(vencimento)
        .fetch_one(executor)
        .await?;

        Ok(parcela)
    }

    pub async fn list_notas(&self, user_id: Uuid) -> Result<Vec<NotaFiscal>, AppError> {
        let notas = sqlx::query_as::<_, NotaFiscal>(
            "SELECT * FROM notas_fiscais WHERE user_id = $1 ORDER BY data_emissao DESC, numero DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(notas)
    }

    // Todas as parcelas das notas do usuário, agrupadas em memória pelo serviço.
    pub async fn list_parcelas(&self, user_id: Uuid) -> Result<Vec<ParcelaNota>, AppError> {
        let parcelas = sqlx::query_as::<_, ParcelaNota>(
            r#"
            SELECT p.*
            FROM parcelas_nota p
            JOIN notas_fiscais n ON n.id = p.nota_id
            WHERE n.user_id = $1
            ORDER BY p.nota_id, p.numero
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(parcelas)
    }

    pub async fn marcar_parcela_paga(
        &self,
        user_id: Uuid,
        nota_id: Uuid,
        numero: i32,
        data_pagamento: NaiveDate,
    ) -> Result<ParcelaNota, AppError> {
        let parcela = sqlx::query_as::<_, ParcelaNota>(
            r#"
            UPDATE parcelas_nota p
            SET paga = TRUE, data_pagamento = $4
            FROM notas_fiscais n
            WHERE p.nota_id = $2
              AND p.numero = $3
              AND n.id = p.nota_id
              AND n.user_id = $1
            RETURNING p.*
            "#,
        )
        .bind(user_id)
        .bind(nota_id)
        .bind(numero)
        .bind(data_pagamento)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotaNotFound)?;

        Ok(parcela)
    }

    // As parcelas caem junto via ON DELETE CASCADE.
    pub async fn delete_nota(&self, user_id: Uuid, nota_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM notas_fiscais WHERE id = $1 AND user_id = $2")
            .bind(nota_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotaNotFound);
        }
        Ok(())
    }
}
