// src/models/notas.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Derivado das parcelas x data corrente; nunca armazenado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StatusNota {
    Ativa,
    Vencida,
    Quitada,
    ParcialmentePaga,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotaFiscal {
    pub id: Uuid,

    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub user_id: Uuid,

    #[schema(example = "000123")]
    pub numero: String,

    #[schema(example = "Mercado São João")]
    pub cliente: String,

    #[schema(example = "1200.00")]
    pub valor_total: Decimal,

    pub data_emissao: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParcelaNota {
    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub nota_id: Uuid,

    pub numero: i32,

    #[schema(example = "400.00")]
    pub valor: Decimal,

    pub vencimento: NaiveDate,
    pub paga: bool,
    pub data_pagamento: Option<NaiveDate>,
}

// Nota + parcelas + status derivado, como as rotas de leitura devolvem.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotaFiscalDetalhe {
    #[serde(flatten)]
    pub nota: NotaFiscal,
    pub parcelas: Vec<ParcelaNota>,
    pub status: StatusNota,
}

// Estatísticas recomputadas a cada consulta.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotasStats {
    pub quantidade: usize,
    pub valor_total: Decimal,
    pub valor_em_aberto: Decimal,
    pub valor_vencido: Decimal,
    pub quantidade_vencidas: usize,

    // Parcelas em aberto que vencem nos próximos 7 dias.
    pub valor_a_vencer: Decimal,
}

// --- Payloads ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NovaParcelaPayload {
    pub valor: Decimal,
    pub vencimento: NaiveDate,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotaPayload {
    #[validate(length(min = 1, message = "O número da nota é obrigatório."))]
    pub numero: String,

    #[validate(length(min = 1, message = "O cliente é obrigatório."))]
    pub cliente: String,

    pub data_emissao: NaiveDate,

    #[validate(length(min = 1, message = "A nota precisa de pelo menos uma parcela."))]
    pub parcelas: Vec<NovaParcelaPayload>,
}
